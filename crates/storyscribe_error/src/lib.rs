//! Error types for Storyscribe.
//!
//! This crate provides the error types used throughout the Storyscribe workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The top-level [`StoryscribeErrorKind`] aggregates every kind and is boxed
//! in [`StoryscribeError`].
//!
//! # Examples
//!
//! ```
//! use storyscribe_error::{ConfigError, StoryscribeErrorKind, StoryscribeResult};
//!
//! fn lookup_price() -> StoryscribeResult<f64> {
//!     Err(ConfigError::new("Model gpt-5 is not configured"))?
//! }
//!
//! match lookup_price() {
//!     Ok(price) => println!("Price: {}", price),
//!     Err(e) => assert!(matches!(e.kind(), StoryscribeErrorKind::Config(_))),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capacity;
mod config;
mod error;
mod generation;
mod input;
mod json;
mod storage;

pub use capacity::CapacityError;
pub use config::ConfigError;
pub use error::{StoryscribeError, StoryscribeErrorKind, StoryscribeResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use input::InputError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
