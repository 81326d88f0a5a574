//! Context assembly.
//!
//! A request is always laid out the same way: the system prompt, the brief,
//! each selected version in the order given, then the new instruction. Nothing
//! is reordered, deduplicated or truncated here.

use crate::{ContextPart, ContextPartKind, Message, Version};

/// Prefix of the brief message.
pub const BRIEF_PREFIX: &str = "Brief summary of the story: ";
/// Stand-in for a version without a recorded prompt.
pub const NO_PROMPT: &str = "No prompt";
/// Stand-in for a version without generated content.
pub const NO_CONTENT: &str = "No content";

/// Text of the brief message.
pub fn brief_text(brief: &str) -> String {
    format!("{}{}", BRIEF_PREFIX, brief)
}

/// Text of the message carrying a previous version.
pub fn version_text(version: &Version) -> String {
    format!(
        "Previous version {}:\nPrompt: {}\nContent: {}",
        version.version_number,
        version.prompt.as_deref().unwrap_or(NO_PROMPT),
        version.content.as_deref().unwrap_or(NO_CONTENT)
    )
}

/// Build the ordered messages for a generation request.
///
/// # Examples
///
/// ```
/// use storyscribe_core::{assemble, Role};
///
/// let messages = assemble("S", "B", [], "I");
/// assert_eq!(messages.len(), 3);
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[1].content, "Brief summary of the story: B");
/// assert_eq!(messages[2].content, "I");
/// ```
pub fn assemble<'a>(
    system_prompt: &str,
    brief: &str,
    selected_versions: impl IntoIterator<Item = &'a Version>,
    user_instruction: &str,
) -> Vec<Message> {
    let mut messages = vec![Message::system(system_prompt)];
    messages.extend(
        describe(brief, selected_versions, user_instruction)
            .into_iter()
            .map(|part| Message::user(part.content().clone())),
    );
    messages
}

/// Build the labelled parts of a request, without the system prompt.
///
/// Parts correspond one-to-one with the user messages produced by [`assemble`].
pub fn describe<'a>(
    brief: &str,
    selected_versions: impl IntoIterator<Item = &'a Version>,
    user_instruction: &str,
) -> Vec<ContextPart> {
    let mut parts = vec![ContextPart::new(ContextPartKind::Brief, brief_text(brief))];
    parts.extend(selected_versions.into_iter().map(|version| {
        ContextPart::new(
            ContextPartKind::PreviousVersion(version.version_number),
            version_text(version),
        )
    }));
    parts.push(ContextPart::new(
        ContextPartKind::CurrentRequest,
        user_instruction,
    ));
    parts
}

/// Shorten text for display, appending `"..."` when anything was cut.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-character.
///
/// ```
/// use storyscribe_core::preview_snippet;
///
/// assert_eq!(preview_snippet("short", 500), "short");
/// assert_eq!(preview_snippet("abcdef", 3), "abc...");
/// ```
pub fn preview_snippet(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
