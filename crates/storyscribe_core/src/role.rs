//! Role types for message authors.

use serde::{Deserialize, Serialize};

/// Author of a chat message, serialized the way chat-completion endpoints expect.
///
/// # Examples
///
/// ```
/// use storyscribe_core::Role;
///
/// assert_eq!(Role::System.to_string(), "system");
/// assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Instructions that set the writer's role and style
    System,
    /// Brief, prior versions and the new instruction
    User,
    /// Generated replies
    Assistant,
}
