//! System-message placement.
//!
//! Runs after tool-format adaptation, independent of it. Empty system text
//! places nothing.

use crate::types::{Part, SystemSupport, WireMessage};

/// Place `system` according to the provider's capabilities.
///
/// Returns the separately transmitted string for
/// [`SystemSupport::Separated`]; in every other mode the text lands inside
/// `messages` and the return is `None`.
pub fn place_system_message(
    messages: &mut Vec<WireMessage>,
    system: String,
    support: SystemSupport,
) -> Option<String> {
    if system.is_empty() {
        return None;
    }
    match support {
        SystemSupport::SystemRole => {
            messages.insert(0, WireMessage::plain("system", system));
            None
        }
        SystemSupport::DeveloperRole => {
            messages.insert(0, WireMessage::plain("developer", system));
            None
        }
        SystemSupport::Separated => Some(system),
        SystemSupport::Unsupported => {
            prepend_wrapped(messages, &system);
            None
        }
    }
}

/// Wrap the text in a `<SYSTEM_MESSAGE>` tag and splice it into the first
/// message's content; open a user message if the sequence is empty.
fn prepend_wrapped(messages: &mut Vec<WireMessage>, system: &str) {
    let wrapped = format!("<SYSTEM_MESSAGE>\n{system}\n</SYSTEM_MESSAGE>");
    match messages.first_mut() {
        None => messages.push(WireMessage::plain("user", wrapped)),
        Some(WireMessage::Plain(first)) => {
            first.content = join(&wrapped, &first.content);
        }
        Some(WireMessage::ToolCalls(first)) => {
            first.content = join(&wrapped, &first.content);
        }
        Some(WireMessage::ToolResult(first)) => {
            first.content = join(&wrapped, &first.content);
        }
        Some(WireMessage::Blocks(first)) => {
            first.content.insert(
                0,
                crate::types::ContentBlock::Text {
                    text: wrapped.clone(),
                },
            );
        }
        Some(WireMessage::Parts(first)) => {
            first.parts.insert(
                0,
                Part::Text {
                    text: wrapped.clone(),
                },
            );
        }
    }
}

fn join(wrapped: &str, existing: &str) -> String {
    if existing.is_empty() {
        wrapped.to_owned()
    } else {
        format!("{wrapped}\n\n{existing}")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
