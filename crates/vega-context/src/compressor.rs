//! Semantic lossy compression.
//!
//! Per-role compression applied to messages outside the most-recent window,
//! and never to the system pseudo-message or the last user message. Each
//! strategy is a deterministic map to shorter content; a result that fails
//! to shrink the message is discarded.

use tracing::debug;
use vega_core::constants::ELISION_MARKER;
use vega_core::messages::{Message, last_user_index, total_chars};
use vega_core::text::truncate_str;

use crate::policy::TrimPolicy;
use crate::summaries::{elide_user_text, summarize_tool_output};

/// Old user turns rarely matter in full; keep this much of the opening.
const USER_HEAD_CHARS: usize = 1_000;

/// And this much of the trailing specifics.
const USER_TAIL_CHARS: usize = 400;

/// User turns below this size are left alone.
const USER_COMPRESS_MIN: usize = 2_000;

/// Assistant lead-paragraph cap.
const ASSISTANT_LEAD_CHARS: usize = 1_200;

/// Assistant turns below this size are left alone.
const ASSISTANT_COMPRESS_MIN: usize = 2_000;

/// Compress all messages outside the most-recent window in place.
pub fn compress(messages: &mut [Message], policy: &TrimPolicy) {
    let total = messages.len();
    let cutoff = total.saturating_sub(policy.compress_keep_recent);
    let protected_user = last_user_index(messages);
    let before = total_chars(messages);

    for (index, message) in messages.iter_mut().enumerate() {
        if index >= cutoff || Some(index) == protected_user {
            continue;
        }
        let shorter = match message {
            Message::System { .. } => continue,
            Message::User { content } => compress_user(content),
            Message::Assistant { content, .. } => compress_assistant(content),
            Message::Tool {
                name,
                content,
                raw_params,
                ..
            } => {
                let summary = summarize_tool_output(content, name, raw_params);
                (summary.len() < content.len()).then_some(summary)
            }
        };
        if let Some(shorter) = shorter {
            *message.content_mut() = shorter;
        }
    }

    debug!(
        before,
        after = total_chars(messages),
        "compressed historical turns"
    );
}

/// Head+tail elision for a long historical user turn.
fn compress_user(content: &str) -> Option<String> {
    if content.len() < USER_COMPRESS_MIN {
        return None;
    }
    let out = elide_user_text(content, USER_HEAD_CHARS, USER_TAIL_CHARS, ELISION_MARKER);
    (out.len() < content.len()).then_some(out)
}

/// Lead paragraph of a long historical assistant turn, noting elided code.
fn compress_assistant(content: &str) -> Option<String> {
    if content.len() < ASSISTANT_COMPRESS_MIN {
        return None;
    }

    let lead_end = content.find("\n\n").unwrap_or(content.len());
    let lead = truncate_str(&content[..lead_end], ASSISTANT_LEAD_CHARS);

    let fences = content.matches("```").count();
    let code_blocks = fences / 2;

    let out = if code_blocks > 0 {
        format!("{lead}\n[{code_blocks} code block(s) elided]")
    } else {
        format!("{lead}{ELISION_MARKER}")
    };
    (out.len() < content.len()).then_some(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
