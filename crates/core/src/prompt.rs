//! Prompt assembly from replayed history plus the new message.

use crate::message::{Role, Turn};

/// Number of history turns replayed into a prompt by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Build the text prompt sent to the agent runtime.
///
/// With no history (or a zero window) the prompt is exactly `message`.
/// Otherwise the last `window` turns are rendered as `User: ...` /
/// `Assistant: ...` lines followed by a final `User: <message>` line with
/// no trailing newline.
pub fn assemble_prompt(history: &[Turn], message: &str, window: usize) -> String {
    if history.is_empty() || window == 0 {
        return message.to_string();
    }

    let start = history.len().saturating_sub(window);
    let mut prompt = String::new();
    for turn in &history[start..] {
        let speaker = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        prompt.push_str(speaker);
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }
    prompt.push_str("User: ");
    prompt.push_str(message);
    prompt
}
