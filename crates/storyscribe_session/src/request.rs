//! Inputs and outputs of workflow actions.

use serde::{Deserialize, Serialize};
use storyscribe_core::{Message, ModelId, Temperature};

/// A request for a new version.
///
/// Model and temperature fall back to the session settings when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Instruction for this version
    #[serde(default)]
    pub prompt: String,
    /// Model override
    #[serde(default)]
    pub model: Option<ModelId>,
    /// Temperature override
    #[serde(default)]
    pub temperature: Option<Temperature>,
}

impl GenerationRequest {
    /// Request with the session's model and temperature.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            temperature: None,
        }
    }

    /// Use a specific model.
    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = Some(model);
        self
    }

    /// Use a specific temperature.
    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// One labelled context part with its token count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct PartPreview {
    /// Display label, e.g. `"Previous Version 2"`
    label: String,
    /// Full text of the part
    content: String,
    /// Tokens in the part on its own
    tokens: usize,
}

impl PartPreview {
    pub(crate) fn new(label: String, content: String, tokens: usize) -> Self {
        Self {
            label,
            content,
            tokens,
        }
    }
}

/// What a request would look like and cost, computed without sending it.
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct Preview {
    /// Model the request would use
    model: ModelId,
    /// Temperature the request would use
    temperature: Temperature,
    /// Messages in send order
    messages: Vec<Message>,
    /// Labelled parts after the system prompt
    parts: Vec<PartPreview>,
    /// Tokens in the system prompt
    system_tokens: usize,
    /// Tokens in the whole request
    input_tokens: usize,
    /// Heuristic output length
    estimated_output_tokens: usize,
    /// Estimated USD cost of input plus estimated output
    estimated_cost: f64,
    /// Model's context window
    context_window: usize,
    /// Window minus input; negative when over
    remaining_tokens: i64,
    /// Whether the request is too large to send
    exceeds_context: bool,
}

impl Preview {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        model: ModelId,
        temperature: Temperature,
        messages: Vec<Message>,
        parts: Vec<PartPreview>,
        system_tokens: usize,
        input_tokens: usize,
        estimated_output_tokens: usize,
        estimated_cost: f64,
        context_window: usize,
    ) -> Self {
        Self {
            model,
            temperature,
            messages,
            parts,
            system_tokens,
            input_tokens,
            estimated_output_tokens,
            estimated_cost,
            context_window,
            remaining_tokens: context_window as i64 - input_tokens as i64,
            exceeds_context: input_tokens > context_window,
        }
    }

    /// Labels of the parts in order, as recorded on the version.
    pub fn labels(&self) -> Vec<String> {
        self.parts.iter().map(|part| part.label.clone()).collect()
    }
}

/// A version ready to be saved as a text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct Export {
    /// Suggested file name
    filename: String,
    /// File contents
    content: String,
}

impl Export {
    /// Create an export.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}
