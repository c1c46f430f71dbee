//! Gemini parts tool protocol.
//!
//! Derived from the Anthropic block sequence rather than built directly:
//! the block pairing logic is identical, only the surface shape differs.

use vega_core::messages::Message;

use crate::anthropic::adapt_anthropic;
use crate::types::{
    ContentBlock, FunctionCallPart, FunctionResponseOutput, FunctionResponsePart, Part,
    PartsMessage, WireMessage,
};

/// Adapt a uniform sequence to Gemini `{role, parts}` messages.
///
/// Gemini result parts must repeat the function name, but our tool turns
/// only carry it on the call side, so the most recently seen call name is
/// carried forward to its response.
#[must_use]
pub fn adapt_gemini(messages: Vec<Message>) -> Vec<WireMessage> {
    // Gemini has no channel for Anthropic reasoning blocks.
    let adapted = adapt_anthropic(messages, false);
    let mut out: Vec<WireMessage> = Vec::with_capacity(adapted.len());
    let mut last_tool_name = String::new();

    for message in adapted {
        match message {
            WireMessage::Blocks(blocks) => {
                let role = if blocks.role == "assistant" {
                    "model"
                } else {
                    "user"
                };
                let parts = blocks
                    .content
                    .into_iter()
                    .filter_map(|block| block_to_part(block, &mut last_tool_name))
                    .collect();
                out.push(WireMessage::Parts(PartsMessage {
                    role: role.to_owned(),
                    parts,
                }));
            }
            WireMessage::Plain(plain) => {
                let role = if plain.role == "assistant" {
                    "model"
                } else {
                    plain.role.as_str()
                };
                out.push(WireMessage::Parts(PartsMessage {
                    role: role.to_owned(),
                    parts: vec![Part::Text {
                        text: plain.content,
                    }],
                }));
            }
            other => out.push(other),
        }
    }
    out
}

fn block_to_part(block: ContentBlock, last_tool_name: &mut String) -> Option<Part> {
    match block {
        ContentBlock::Text { text } => Some(Part::Text { text }),
        ContentBlock::ToolUse { id, name, input } => {
            last_tool_name.clone_from(&name);
            Some(Part::FunctionCall {
                function_call: FunctionCallPart {
                    id,
                    name,
                    args: input,
                },
            })
        }
        ContentBlock::ToolResult {
            tool_use_id,
            content,
        } => Some(Part::FunctionResponse {
            function_response: FunctionResponsePart {
                id: tool_use_id,
                name: last_tool_name.clone(),
                response: FunctionResponseOutput { output: content },
            },
        }),
        ContentBlock::Thinking { .. } | ContentBlock::RedactedThinking { .. } => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
