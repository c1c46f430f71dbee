//! The editor's rich chat-thread record.
//!
//! [`ThreadEvent`] is what the editor persists: it carries checkpoints,
//! interrupted-tool markers, and display-vs-raw assistant text, none of
//! which belong on the wire. The normalizer in `vega-context` filters and
//! flattens these into the uniform [`crate::messages::Message`] sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::messages::ReasoningBlock;

/// One record in the editor's chat thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThreadEvent {
    /// A user turn.
    User {
        /// Text the user typed.
        display: String,
    },
    /// An assistant turn. `display` is what the editor shows; `raw` is what
    /// the model actually emitted (may differ after editor post-processing).
    Assistant {
        /// Rendered assistant text.
        display: String,
        /// Unprocessed model output, when the editor kept it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
        /// Reasoning blocks for providers that expose them.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        reasoning: Vec<ReasoningBlock>,
    },
    /// A completed tool invocation and its output.
    ToolRun {
        /// Tool call id.
        id: String,
        /// Tool name.
        name: String,
        /// Raw tool output.
        content: String,
        /// Invocation arguments.
        #[serde(default)]
        raw_params: Value,
    },
    /// An editor checkpoint. Not LLM-relevant.
    Checkpoint {
        /// Checkpoint identifier.
        id: String,
    },
    /// Marker left where the user interrupted a running tool.
    /// Not LLM-relevant.
    InterruptedTool {
        /// Id of the interrupted call.
        id: String,
    },
}

/// Analytics collaborator that may have pre-pruned tool outputs.
///
/// When a tool output was already summarized at the session level, the
/// normalizer substitutes the summary instead of the raw content. This is
/// an injected seam; the engine never computes these summaries itself.
pub trait PrunedOutputs {
    /// Pre-computed summary for the given tool call id, if one exists.
    fn summary_for(&self, tool_id: &str) -> Option<String>;
}

/// Default collaborator: nothing was pruned.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrunedOutputs;

impl PrunedOutputs for NoPrunedOutputs {
    fn summary_for(&self, _tool_id: &str) -> Option<String> {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
