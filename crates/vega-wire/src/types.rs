//! Provider wire message shapes.
//!
//! Every adapter consumes uniform [`vega_core::messages::Message`] values and
//! produces [`WireMessage`] values. The two types never mix, so an adapted
//! sequence can never be fed back through an adapter — double-adaptation is
//! a type error rather than a runtime bug.
//!
//! Serialized field names and nesting are wire-exact for each provider; the
//! serde attributes here are the contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Provider capability flags
// ─────────────────────────────────────────────────────────────────────────────

/// How (and whether) the target provider accepts a system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemSupport {
    /// No system channel at all; the text is wrapped in a `<SYSTEM_MESSAGE>`
    /// tag and prepended to the first conversational message.
    #[default]
    Unsupported,
    /// `{role: "system"}` at index 0.
    SystemRole,
    /// `{role: "developer"}` at index 0.
    DeveloperRole,
    /// Transmitted out-of-band, next to the message array.
    Separated,
}

/// Which tool-call wire protocol the target provider speaks.
///
/// Unknown values deserialize to [`ToolFormat::Xml`], the most permissive,
/// provider-agnostic rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolFormat {
    /// OpenAI `tool_calls` arrays plus `{role: "tool"}` result messages.
    OpenaiStyle,
    /// Anthropic `tool_use`/`tool_result` content blocks.
    AnthropicStyle,
    /// Gemini `functionCall`/`functionResponse` parts.
    GeminiStyle,
    /// Tool calls and results rendered as inline XML inside plain messages.
    #[default]
    #[serde(other)]
    Xml,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire messages
// ─────────────────────────────────────────────────────────────────────────────

/// One provider-ready message, in whichever shape the target format uses.
///
/// Untagged: the variant is implied entirely by which fields are present,
/// matching what each provider actually accepts on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireMessage {
    /// OpenAI assistant turn carrying one or more tool calls.
    ToolCalls(ToolCallsMessage),
    /// OpenAI tool-result turn.
    ToolResult(ToolResultMessage),
    /// Anthropic turn whose content is an array of typed blocks.
    Blocks(BlocksMessage),
    /// Gemini turn whose content is an array of parts.
    Parts(PartsMessage),
    /// Plain `{role, content}` pair. Also the XML-mode rendering.
    Plain(PlainMessage),
}

impl WireMessage {
    /// Plain `{role, content}` message.
    #[must_use]
    pub fn plain(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Plain(PlainMessage {
            role: role.into(),
            content: content.into(),
        })
    }

    /// The role string of this message.
    #[must_use]
    pub fn role(&self) -> &str {
        match self {
            Self::ToolCalls(m) => &m.role,
            Self::ToolResult(m) => &m.role,
            Self::Blocks(m) => &m.role,
            Self::Parts(m) => &m.role,
            Self::Plain(m) => &m.role,
        }
    }
}

/// `{role, content}` with scalar string content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainMessage {
    /// `"system"`, `"developer"`, `"user"`, or `"assistant"`.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// OpenAI assistant message annotated with tool calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallsMessage {
    /// Always `"assistant"`.
    pub role: String,
    /// Assistant text preceding the calls; may be empty on the wire.
    pub content: String,
    /// The calls this turn issued, in order.
    pub tool_calls: Vec<ToolCall>,
}

/// One entry of an OpenAI `tool_calls` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub call_type: String,
    /// Provider-issued call id, echoed back by the result message.
    pub id: String,
    /// The invoked function.
    pub function: FunctionSpec,
}

/// The `function` object inside an OpenAI tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Tool name.
    pub name: String,
    /// Arguments as a JSON-encoded string, per the OpenAI contract.
    pub arguments: String,
}

impl ToolCall {
    /// A `"function"`-typed call with its arguments JSON-encoded.
    #[must_use]
    pub fn function(id: impl Into<String>, name: impl Into<String>, params: &Value) -> Self {
        let arguments = if params.is_null() {
            "{}".to_owned()
        } else {
            serde_json::to_string(params).unwrap_or_else(|_| "{}".to_owned())
        };
        Self {
            call_type: "function".to_owned(),
            id: id.into(),
            function: FunctionSpec {
                name: name.into(),
                arguments,
            },
        }
    }
}

/// OpenAI `{role: "tool"}` result message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultMessage {
    /// Always `"tool"`.
    pub role: String,
    /// Id of the call this result answers.
    pub tool_call_id: String,
    /// Raw tool output.
    pub content: String,
}

/// Anthropic message whose content is a typed block array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocksMessage {
    /// `"assistant"` or `"user"`.
    pub role: String,
    /// Ordered content blocks.
    pub content: Vec<ContentBlock>,
}

/// One Anthropic content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Visible text.
    Text {
        /// Block text.
        text: String,
    },
    /// Extended-thinking block, carried verbatim from a prior response.
    Thinking {
        /// Reasoning text.
        thinking: String,
        /// Provider signature over the reasoning.
        signature: String,
    },
    /// Encrypted thinking block, carried verbatim.
    RedactedThinking {
        /// Opaque ciphertext.
        data: String,
    },
    /// Assistant-issued tool invocation.
    ToolUse {
        /// Call id, echoed by the matching result block.
        id: String,
        /// Tool name.
        name: String,
        /// Structured call arguments.
        input: Value,
    },
    /// Tool output, carried in a user turn.
    ToolResult {
        /// Id of the `tool_use` block this answers.
        tool_use_id: String,
        /// Raw tool output.
        content: String,
    },
}

/// Gemini message whose content is a parts array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsMessage {
    /// `"model"` or `"user"`.
    pub role: String,
    /// Ordered parts.
    pub parts: Vec<Part>,
}

/// One Gemini part. Untagged: the single field present names the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Model-issued function call.
    FunctionCall {
        /// The call payload.
        #[serde(rename = "functionCall")]
        function_call: FunctionCallPart,
    },
    /// Function result, carried in a user turn.
    FunctionResponse {
        /// The response payload.
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponsePart,
    },
    /// Visible text.
    Text {
        /// Part text.
        text: String,
    },
}

/// Payload of a Gemini `functionCall` part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallPart {
    /// Call id.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// Structured call arguments.
    pub args: Value,
}

/// Payload of a Gemini `functionResponse` part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponsePart {
    /// Id of the call this responds to.
    pub id: String,
    /// Tool name, carried forward from the most recent call.
    pub name: String,
    /// Wrapped output, per the Gemini contract.
    pub response: FunctionResponseOutput,
}

/// The `response` object inside a `functionResponse` part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponseOutput {
    /// Raw tool output.
    pub output: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn openai_tool_call_wire_shape() {
        let msg = WireMessage::ToolCalls(ToolCallsMessage {
            role: "assistant".to_owned(),
            content: "let me check".to_owned(),
            tool_calls: vec![ToolCall::function("t1", "ls", &json!({}))],
        });
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            v,
            json!({
                "role": "assistant",
                "content": "let me check",
                "tool_calls": [
                    {"type": "function", "id": "t1", "function": {"name": "ls", "arguments": "{}"}}
                ]
            })
        );
    }

    #[test]
    fn openai_arguments_are_a_json_string() {
        let call = ToolCall::function("t1", "read", &json!({"path": "a.rs"}));
        assert_eq!(call.function.arguments, r#"{"path":"a.rs"}"#);
        let call = ToolCall::function("t2", "ls", &Value::Null);
        assert_eq!(call.function.arguments, "{}");
    }

    #[test]
    fn anthropic_block_wire_shape() {
        let block = ContentBlock::ToolUse {
            id: "t1".to_owned(),
            name: "ls".to_owned(),
            input: json!({"path": "."}),
        };
        let v = serde_json::to_value(&block).unwrap();
        assert_eq!(
            v,
            json!({"type": "tool_use", "id": "t1", "name": "ls", "input": {"path": "."}})
        );

        let block = ContentBlock::ToolResult {
            tool_use_id: "t1".to_owned(),
            content: "a.txt".to_owned(),
        };
        let v = serde_json::to_value(&block).unwrap();
        assert_eq!(
            v,
            json!({"type": "tool_result", "tool_use_id": "t1", "content": "a.txt"})
        );
    }

    #[test]
    fn gemini_part_wire_shape() {
        let part = Part::FunctionResponse {
            function_response: FunctionResponsePart {
                id: "t1".to_owned(),
                name: "ls".to_owned(),
                response: FunctionResponseOutput {
                    output: "a.txt".to_owned(),
                },
            },
        };
        let v = serde_json::to_value(&part).unwrap();
        assert_eq!(
            v,
            json!({"functionResponse": {"id": "t1", "name": "ls", "response": {"output": "a.txt"}}})
        );
    }

    #[test]
    fn unknown_tool_format_falls_back_to_xml() {
        let f: ToolFormat = serde_json::from_str("\"mystery-style\"").unwrap();
        assert_eq!(f, ToolFormat::Xml);
        let f: ToolFormat = serde_json::from_str("\"openai-style\"").unwrap();
        assert_eq!(f, ToolFormat::OpenaiStyle);
    }

    #[test]
    fn system_support_kebab_names() {
        assert_eq!(
            serde_json::to_string(&SystemSupport::DeveloperRole).unwrap(),
            "\"developer-role\""
        );
        let s: SystemSupport = serde_json::from_str("\"separated\"").unwrap();
        assert_eq!(s, SystemSupport::Separated);
    }
}
