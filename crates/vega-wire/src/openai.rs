//! OpenAI chat-completions tool protocol.

use vega_core::messages::Message;

use crate::types::{ToolCall, ToolCallsMessage, ToolResultMessage, WireMessage};

/// Adapt a uniform sequence to OpenAI `tool_calls` / `{role: "tool"}` pairs.
///
/// Each tool turn becomes a `tool` result message, and the preceding
/// assistant message is retroactively annotated with a matching
/// `tool_calls` entry. A tool turn with no assistant before it degrades to
/// an ordinary user message carrying the output.
#[must_use]
pub fn adapt_openai(messages: Vec<Message>) -> Vec<WireMessage> {
    let mut out: Vec<WireMessage> = Vec::with_capacity(messages.len());

    for message in messages {
        match message {
            Message::System { content } => out.push(WireMessage::plain("system", content)),
            Message::User { content } => out.push(WireMessage::plain("user", content)),
            Message::Assistant { content, .. } => {
                out.push(WireMessage::plain("assistant", content));
            }
            Message::Tool {
                id,
                name,
                content,
                raw_params,
            } => {
                let call = ToolCall::function(id.clone(), name, &raw_params);
                if annotate_preceding_assistant(&mut out, call) {
                    out.push(WireMessage::ToolResult(ToolResultMessage {
                        role: "tool".to_owned(),
                        tool_call_id: id,
                        content,
                    }));
                } else {
                    out.push(WireMessage::plain("user", content));
                }
            }
        }
    }
    out
}

/// Attach `call` to the assistant message at the tail of `out`, upgrading a
/// plain assistant to the `tool_calls` shape if needed. Skips over any tool
/// results already emitted, so an assistant issuing several calls in a row
/// collects them all. Returns false when no assistant is available.
fn annotate_preceding_assistant(out: &mut [WireMessage], call: ToolCall) -> bool {
    for message in out.iter_mut().rev() {
        match message {
            WireMessage::ToolCalls(assistant) => {
                assistant.tool_calls.push(call);
                return true;
            }
            WireMessage::Plain(plain) if plain.role == "assistant" => {
                *message = WireMessage::ToolCalls(ToolCallsMessage {
                    role: "assistant".to_owned(),
                    content: plain.content.clone(),
                    tool_calls: vec![call],
                });
                return true;
            }
            WireMessage::ToolResult(_) => {}
            _ => return false,
        }
    }
    false
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
