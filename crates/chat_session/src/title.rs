//! Auto-title generation.

use crate::completion::{ChatTurn, CompletionService};
use chat_core::Role;

/// Titles always use a small fast model rather than the branch's own.
pub const TITLE_MODEL: &str = "anthropic/claude-3-haiku";

const MAX_INPUT_CHARS: usize = 500;
const MAX_TITLE_CHARS: usize = 50;

/// Prompt for a short descriptive conversation title.
pub fn build_title_prompt(user_message: &str) -> String {
    let truncated: String = user_message.chars().take(MAX_INPUT_CHARS).collect();
    format!(
        "Based on this user message, generate a short, descriptive title \
         (max 5 words). Only respond with the title, nothing else.\n\nUser: {truncated}"
    )
}

/// Trim, strip wrapping quotes and cap the raw model output.
pub fn clean_title(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// Request a title from the completion service. Failure is swallowed:
/// the caller leaves the conversation untitled and never retries.
pub async fn generate_title(
    service: &dyn CompletionService,
    user_message: &str,
) -> Option<String> {
    let turns = vec![ChatTurn {
        role: Role::User,
        content: build_title_prompt(user_message),
    }];

    match service.complete(TITLE_MODEL, &turns).await {
        Ok(raw) => {
            let title = clean_title(&raw);
            if title.is_empty() {
                None
            } else {
                Some(title)
            }
        }
        Err(error) => {
            tracing::debug!(%error, "title generation failed");
            None
        }
    }
}
