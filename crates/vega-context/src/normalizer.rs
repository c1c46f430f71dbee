//! Thread-record normalization.
//!
//! Converts the editor's rich [`ThreadEvent`] sequence into the uniform
//! [`Message`] sequence the pipeline budgets. Checkpoints and
//! interrupted-tool markers are not LLM-relevant and are dropped; assistant
//! turns contribute their display text; tool outputs already pruned by the
//! analytics collaborator are replaced with their pre-computed summaries.

use vega_core::messages::Message;
use vega_core::thread::{PrunedOutputs, ThreadEvent};

/// Flatten thread records into uniform messages, order preserved.
///
/// Never produces [`Message::System`]; the system pseudo-message is
/// prepended later by the preparation entry point.
pub fn normalize(events: Vec<ThreadEvent>, pruned: &dyn PrunedOutputs) -> Vec<Message> {
    events
        .into_iter()
        .filter_map(|event| match event {
            ThreadEvent::User { display } => Some(Message::User { content: display }),
            ThreadEvent::Assistant {
                display, reasoning, ..
            } => Some(Message::Assistant {
                content: display,
                reasoning,
            }),
            ThreadEvent::ToolRun {
                id,
                name,
                content,
                raw_params,
            } => {
                let content = pruned.summary_for(&id).unwrap_or(content);
                Some(Message::Tool {
                    id,
                    name,
                    content,
                    raw_params,
                })
            }
            ThreadEvent::Checkpoint { .. } | ThreadEvent::InterruptedTool { .. } => None,
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
