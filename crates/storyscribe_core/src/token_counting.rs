//! Token counting against a model's BPE vocabulary.
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

use crate::Message;

static COUNTERS: LazyLock<Mutex<HashMap<String, TokenCounter>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Clone)]
enum Encoding {
    Bpe(Arc<CoreBPE>),
    Approximate,
}

/// Counts tokens for one model, holding on to the resolved vocabulary.
///
/// Resolution never fails: models tiktoken does not know use `cl100k_base`, and
/// if that cannot be loaded either, a four-characters-per-token approximation.
#[derive(Clone)]
pub struct TokenCounter {
    model: String,
    vocabulary: &'static str,
    encoding: Encoding,
}

impl TokenCounter {
    /// Resolve the vocabulary for `model`.
    pub fn for_model(model: &str) -> Self {
        let (vocabulary, encoding) = match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => ("model", Encoding::Bpe(Arc::new(bpe))),
            Err(e) => {
                debug!(model, error = %e, "No vocabulary for model, using cl100k_base");
                match tiktoken_rs::cl100k_base() {
                    Ok(bpe) => ("cl100k_base", Encoding::Bpe(Arc::new(bpe))),
                    Err(e) => {
                        warn!(model, error = %e, "cl100k_base unavailable, approximating token counts");
                        ("approximate", Encoding::Approximate)
                    }
                }
            }
        };
        Self {
            model: model.to_string(),
            vocabulary,
            encoding,
        }
    }

    /// Shared counter for `model`, resolved once per process.
    pub fn cached(model: &str) -> Self {
        let mut counters = COUNTERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        counters
            .entry(model.to_string())
            .or_insert_with(|| Self::for_model(model))
            .clone()
    }

    /// Model this counter was resolved for.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Which vocabulary is in use: `"model"`, `"cl100k_base"` or `"approximate"`.
    pub fn vocabulary(&self) -> &'static str {
        self.vocabulary
    }

    /// Number of tokens in `text`.
    pub fn count(&self, text: &str) -> usize {
        match &self.encoding {
            Encoding::Bpe(bpe) => bpe.encode_ordinary(text).len(),
            Encoding::Approximate => text.chars().count().div_ceil(4),
        }
    }

    /// Tokens in the message contents joined by single spaces.
    pub fn count_messages(&self, messages: &[Message]) -> usize {
        let joined = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.count(&joined)
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("model", &self.model)
            .field("vocabulary", &self.vocabulary)
            .finish()
    }
}

/// Count tokens in `text` for `model`.
///
/// ```
/// use storyscribe_core::count_tokens;
///
/// assert_eq!(count_tokens("", "gpt-4o-mini"), 0);
/// assert!(count_tokens("Hello, world!", "not-a-model") > 0);
/// ```
pub fn count_tokens(text: &str, model: &str) -> usize {
    TokenCounter::cached(model).count(text)
}

/// Count tokens across messages the way a request total is measured.
pub fn count_message_tokens(messages: &[Message], model: &str) -> usize {
    TokenCounter::cached(model).count_messages(messages)
}
