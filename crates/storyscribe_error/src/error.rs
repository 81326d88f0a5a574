//! Top-level error wrapper types.

use crate::{CapacityError, ConfigError, GenerationError, InputError, JsonError, StorageError};

/// Every error condition a Storyscribe operation can end in.
///
/// # Examples
///
/// ```
/// use storyscribe_error::{StoryscribeError, CapacityError};
///
/// let err: StoryscribeError = CapacityError::new("gpt-4o", 200_000, 128_000).into();
/// assert_eq!(err.kind().label(), "capacity");
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryscribeErrorKind {
    /// Unknown model or invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// Request exceeds the model's context window
    #[from(CapacityError)]
    Capacity(CapacityError),
    /// Generation endpoint failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Script or version file failure
    #[from(StorageError)]
    Storage(StorageError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Invalid user input
    #[from(InputError)]
    Input(InputError),
}

impl StoryscribeErrorKind {
    /// Short machine-readable name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            StoryscribeErrorKind::Config(_) => "config",
            StoryscribeErrorKind::Capacity(_) => "capacity",
            StoryscribeErrorKind::Generation(_) => "generation",
            StoryscribeErrorKind::Storage(_) => "storage",
            StoryscribeErrorKind::Json(_) => "json",
            StoryscribeErrorKind::Input(_) => "input",
        }
    }

    /// Description for end users, without the source location.
    pub fn message(&self) -> String {
        match self {
            StoryscribeErrorKind::Config(e) => e.message.clone(),
            StoryscribeErrorKind::Capacity(e) => format!(
                "{} input tokens exceed the {} token context window of {}",
                e.input_tokens, e.context_window, e.model
            ),
            StoryscribeErrorKind::Generation(e) => e.kind.to_string(),
            StoryscribeErrorKind::Storage(e) => e.kind.to_string(),
            StoryscribeErrorKind::Json(e) => e.message.clone(),
            StoryscribeErrorKind::Input(e) => e.message.clone(),
        }
    }
}

/// Storyscribe error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyscribe_error::{StoryscribeResult, InputError};
///
/// fn might_fail() -> StoryscribeResult<()> {
///     Err(InputError::new("Prompt must not be empty"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyscribe Error: {}", _0)]
pub struct StoryscribeError(Box<StoryscribeErrorKind>);

impl StoryscribeError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryscribeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryscribeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryscribeErrorKind
impl<T> From<T> for StoryscribeError
where
    T: Into<StoryscribeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyscribe operations.
pub type StoryscribeResult<T> = std::result::Result<T, StoryscribeError>;
