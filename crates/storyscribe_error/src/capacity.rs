//! Context window overflow.

/// The assembled request does not fit in the selected model's context window.
///
/// Detected before submission. Only a strictly greater token count is an
/// error; a request that exactly fills the window is allowed.
///
/// # Examples
///
/// ```
/// use storyscribe_error::CapacityError;
///
/// let err = CapacityError::new("gpt-4o-mini", 128_001, 128_000);
/// assert_eq!(err.overflow(), 1);
/// assert!(format!("{}", err).contains("128000"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Capacity Error: {} input tokens exceed the {} token context window of {} at line {} in {}",
    input_tokens,
    context_window,
    model,
    line,
    file
)]
pub struct CapacityError {
    /// Model whose window was exceeded
    pub model: String,
    /// Tokens in the assembled request
    pub input_tokens: usize,
    /// Context window of the model
    pub context_window: usize,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CapacityError {
    /// Create a new capacity error with automatic location tracking.
    #[track_caller]
    pub fn new(model: impl Into<String>, input_tokens: usize, context_window: usize) -> Self {
        let location = std::panic::Location::caller();
        Self {
            model: model.into(),
            input_tokens,
            context_window,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Number of tokens that must be removed before the request fits.
    pub fn overflow(&self) -> usize {
        self.input_tokens.saturating_sub(self.context_window)
    }
}
