//! Anthropic content-block tool protocol.

use vega_core::messages::{Message, ReasoningBlock};

use crate::types::{BlocksMessage, ContentBlock, WireMessage};

/// Adapt a uniform sequence to Anthropic block messages.
///
/// Assistant content becomes a block array. A following tool turn folds a
/// `tool_use` block into that assistant and emits a new user message whose
/// content is the matching `tool_result` block. When `supports_reasoning`
/// is set, carried reasoning blocks are prepended ahead of the text block.
#[must_use]
pub fn adapt_anthropic(messages: Vec<Message>, supports_reasoning: bool) -> Vec<WireMessage> {
    let mut out: Vec<WireMessage> = Vec::with_capacity(messages.len());

    for message in messages {
        match message {
            Message::System { content } => out.push(WireMessage::plain("system", content)),
            Message::User { content } => out.push(WireMessage::plain("user", content)),
            Message::Assistant { content, reasoning } => {
                let mut blocks = Vec::new();
                if supports_reasoning {
                    blocks.extend(reasoning.into_iter().map(reasoning_block));
                }
                if !content.is_empty() {
                    blocks.push(ContentBlock::Text { text: content });
                }
                out.push(WireMessage::Blocks(BlocksMessage {
                    role: "assistant".to_owned(),
                    content: blocks,
                }));
            }
            Message::Tool {
                id,
                name,
                content,
                raw_params,
            } => {
                if let Some(assistant) = preceding_assistant(&mut out) {
                    assistant.content.push(ContentBlock::ToolUse {
                        id: id.clone(),
                        name,
                        input: raw_params,
                    });
                    out.push(WireMessage::Blocks(BlocksMessage {
                        role: "user".to_owned(),
                        content: vec![ContentBlock::ToolResult {
                            tool_use_id: id,
                            content,
                        }],
                    }));
                } else {
                    out.push(WireMessage::plain("user", content));
                }
            }
        }
    }
    out
}

/// The assistant block message this tool turn belongs to, skipping over the
/// result messages of its earlier calls. None when the pairing is broken.
fn preceding_assistant(out: &mut [WireMessage]) -> Option<&mut BlocksMessage> {
    let index = out.iter().rposition(|m| match m {
        WireMessage::Blocks(b) if b.role == "assistant" => true,
        WireMessage::Blocks(b) => !is_tool_result(b),
        _ => true,
    })?;
    match &mut out[index] {
        WireMessage::Blocks(b) if b.role == "assistant" => Some(b),
        _ => None,
    }
}

fn is_tool_result(message: &BlocksMessage) -> bool {
    message.role == "user"
        && message
            .content
            .iter()
            .all(|b| matches!(b, ContentBlock::ToolResult { .. }))
        && !message.content.is_empty()
}

fn reasoning_block(block: ReasoningBlock) -> ContentBlock {
    match block {
        ReasoningBlock::Thinking {
            thinking,
            signature,
        } => ContentBlock::Thinking {
            thinking,
            signature,
        },
        ReasoningBlock::RedactedThinking { data } => ContentBlock::RedactedThinking { data },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
