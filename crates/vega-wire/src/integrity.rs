//! Post-adaptation integrity guard.
//!
//! Every supported provider rejects a conversational turn with empty
//! content, so this pass runs last, after adaptation and system placement,
//! and guarantees no scalar content, block array, or parts array ships
//! empty.

use vega_core::constants::EMPTY_CONTENT_PLACEHOLDER;

use crate::types::{ContentBlock, Part, WireMessage};

/// Replace every empty content slot with the fixed placeholder.
///
/// Block and part arrays holding a tool call or result are left alone even
/// without a text entry; those are legal on every provider that uses them.
pub fn enforce_non_empty(messages: &mut [WireMessage]) {
    for message in messages {
        match message {
            WireMessage::Plain(m) => fill(&mut m.content),
            WireMessage::ToolResult(m) => fill(&mut m.content),
            WireMessage::ToolCalls(m) => {
                if m.tool_calls.is_empty() {
                    fill(&mut m.content);
                }
            }
            WireMessage::Blocks(m) => {
                for block in &mut m.content {
                    if let ContentBlock::Text { text } = block {
                        fill(text);
                    }
                }
                if m.content.is_empty() {
                    m.content.push(ContentBlock::Text {
                        text: EMPTY_CONTENT_PLACEHOLDER.to_owned(),
                    });
                }
            }
            WireMessage::Parts(m) => {
                for part in &mut m.parts {
                    if let Part::Text { text } = part {
                        fill(text);
                    }
                }
                if m.parts.is_empty() {
                    m.parts.push(Part::Text {
                        text: EMPTY_CONTENT_PLACEHOLDER.to_owned(),
                    });
                }
            }
        }
    }
}

fn fill(content: &mut String) {
    if content.is_empty() {
        EMPTY_CONTENT_PLACEHOLDER.clone_into(content);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
