//! Labelled context parts shown alongside a request.

use serde::{Deserialize, Serialize};

/// Where a context part came from.
///
/// The display form is the label persisted in [`crate::Version::context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ContextPartKind {
    /// The script's brief
    #[display("Brief Summary")]
    Brief,
    /// A previously generated version, by number
    #[display("Previous Version {_0}")]
    PreviousVersion(u32),
    /// The instruction for this request
    #[display("Current Request")]
    CurrentRequest,
}

/// A labelled text segment assembled into a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ContextPart {
    kind: ContextPartKind,
    content: String,
}

impl ContextPart {
    /// Create a context part.
    pub fn new(kind: ContextPartKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// The display label, e.g. `"Previous Version 2"`.
    pub fn label(&self) -> String {
        self.kind.to_string()
    }
}
