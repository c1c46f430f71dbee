//! XML tool protocol rendering.
//!
//! The provider-agnostic default: tool invocations and results are restated
//! as inline XML inside plain messages, so any chat endpoint can carry them.

use serde_json::Value;
use vega_core::messages::Message;

use crate::types::WireMessage;

/// Adapt a uniform sequence to plain messages with inline XML tools.
///
/// An assistant turn immediately followed by a tool turn gets that call's
/// XML invocation appended to its own text. Each tool turn becomes a
/// `<name_result>` element merged into the preceding user message, or a new
/// user message when none precedes it.
#[must_use]
pub fn adapt_xml(messages: Vec<Message>) -> Vec<WireMessage> {
    let mut out: Vec<WireMessage> = Vec::with_capacity(messages.len());
    let mut iter = messages.into_iter().peekable();

    while let Some(message) = iter.next() {
        match message {
            Message::System { content } => out.push(WireMessage::plain("system", content)),
            Message::User { content } => out.push(WireMessage::plain("user", content)),
            Message::Assistant { mut content, .. } => {
                if let Some(Message::Tool {
                    name, raw_params, ..
                }) = iter.peek()
                {
                    let invocation = render_invocation(name, raw_params);
                    if content.is_empty() {
                        content = invocation;
                    } else {
                        content = format!("{content}\n\n{invocation}");
                    }
                }
                out.push(WireMessage::plain("assistant", content));
            }
            Message::Tool { name, content, .. } => {
                let rendered = format!("<{name}_result>\n{content}\n</{name}_result>");
                match out.last_mut() {
                    Some(WireMessage::Plain(prev)) if prev.role == "user" => {
                        prev.content.push_str("\n\n");
                        prev.content.push_str(&rendered);
                    }
                    _ => out.push(WireMessage::plain("user", rendered)),
                }
            }
        }
    }
    out
}

/// `<name>` element with one child element per parameter.
fn render_invocation(name: &str, params: &Value) -> String {
    let mut body = String::new();
    if let Value::Object(map) = params {
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            body.push_str(&format!("<{key}>{text}</{key}>\n"));
        }
    }
    format!("<{name}>\n{body}</{name}>")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
