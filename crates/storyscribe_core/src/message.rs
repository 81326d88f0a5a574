//! Message type for generation requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One role-tagged text segment of a generation request. Never persisted.
///
/// # Examples
///
/// ```
/// use storyscribe_core::{Message, Role};
///
/// let message = Message::user("Make it darker");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Make it darker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message author
    pub role: Role,
    /// The text of the message
    pub content: String,
}

impl Message {
    /// Create a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}
