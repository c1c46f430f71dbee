//! The uniform message model.
//!
//! One conversational turn, independent of any provider wire format. The
//! budgeting pipeline operates exclusively on this union; the wire adapters
//! consume it exhaustively, so every format branch must handle every
//! variant.
//!
//! `System` is a transient pseudo-message: it is prepended before budgeting
//! (exactly one, at index 0) and removed again before format adaptation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provider-exposed "thinking" block attached to an assistant turn.
///
/// Shapes follow the Anthropic extended-thinking API; providers that do not
/// expose reasoning simply carry an empty list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReasoningBlock {
    /// Visible reasoning text with its integrity signature.
    Thinking {
        /// The reasoning text.
        thinking: String,
        /// Provider-issued signature over the reasoning text.
        signature: String,
    },
    /// Reasoning the provider withheld; carried opaquely.
    RedactedThinking {
        /// Opaque provider payload.
        data: String,
    },
}

/// One conversational turn in the engine's uniform representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Transient system pseudo-message. Present only during budgeting.
    System {
        /// System prompt text.
        content: String,
    },
    /// A user turn.
    User {
        /// User-authored text.
        content: String,
    },
    /// An assistant turn.
    Assistant {
        /// Assistant display text.
        content: String,
        /// Ordered reasoning blocks, present only for providers that
        /// support exposing reasoning.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        reasoning: Vec<ReasoningBlock>,
    },
    /// The result of one tool invocation, paired by `id` with the assistant
    /// turn that requested it.
    Tool {
        /// Tool call id issued by the model.
        id: String,
        /// Tool name.
        name: String,
        /// Tool output text.
        content: String,
        /// The invocation arguments as the model produced them.
        #[serde(default)]
        raw_params: Value,
    },
}

impl Message {
    /// Construct a system pseudo-message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Construct a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Construct an assistant turn with no reasoning.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            reasoning: Vec::new(),
        }
    }

    /// Construct a tool turn.
    pub fn tool(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        raw_params: Value,
    ) -> Self {
        Self::Tool {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            raw_params,
        }
    }

    /// The turn's text content.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::System { content }
            | Self::User { content }
            | Self::Assistant { content, .. }
            | Self::Tool { content, .. } => content,
        }
    }

    /// Mutable access to the turn's text content.
    pub fn content_mut(&mut self) -> &mut String {
        match self {
            Self::System { content }
            | Self::User { content }
            | Self::Assistant { content, .. }
            | Self::Tool { content, .. } => content,
        }
    }

    /// Byte length of the content. The engine budgets in bytes, which for
    /// the chars-per-token approximation is close enough to characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content().len()
    }

    /// Role label for logging.
    #[must_use]
    pub fn role(&self) -> &'static str {
        match self {
            Self::System { .. } => "system",
            Self::User { .. } => "user",
            Self::Assistant { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    /// Whether this is a user turn.
    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// Whether this is the system pseudo-message.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }
}

/// Index of the last user turn, if any.
///
/// That turn is the user's live request and is protected from every trim
/// phase.
#[must_use]
pub fn last_user_index(messages: &[Message]) -> Option<usize> {
    messages.iter().rposition(Message::is_user)
}

/// Total content bytes across all messages.
#[must_use]
pub fn total_chars(messages: &[Message]) -> usize {
    messages.iter().map(Message::char_len).sum()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
