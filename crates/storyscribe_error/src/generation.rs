//! Errors from the text-generation endpoint.

/// Classified failures of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Connection could not be established or was interrupted
    #[display("Network failure: {}", _0)]
    Network(String),
    /// Credential missing, invalid or lacking permission (401/403)
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Rate limit or quota exhausted (429)
    #[display("Rate limit or quota exceeded: {}", _0)]
    RateLimit(String),
    /// Success status but the body did not contain generated text
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Any other non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error description from the response body
        message: String,
    },
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use storyscribe_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimit("quota".into()));
/// assert!(err.is_rate_limit());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// Whether the endpoint refused the request because of a rate limit or quota.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.kind, GenerationErrorKind::RateLimit(_))
    }
}

/// Result type for generation calls.
pub type GenerationResult<T> = Result<T, GenerationError>;
