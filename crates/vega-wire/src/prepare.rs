//! Preparation entry points.
//!
//! `prepare_chat` is the pure pipeline: budget, adapt, place the system
//! message, enforce integrity. `prepare_chat_with_timeout` wraps the whole
//! preparation (including external system-message generation) in a race and
//! falls back to a minimal legal prompt rather than surfacing an error.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;
use vega_core::constants::EMPTY_CONTENT_PLACEHOLDER;
use vega_core::errors::VegaError;
use vega_core::messages::Message;
use vega_context::budget::BudgetParams;
use vega_context::pipeline::fit_to_budget;
use vega_context::policy::TrimPolicy;

use crate::anthropic::adapt_anthropic;
use crate::gemini::adapt_gemini;
use crate::integrity::enforce_non_empty;
use crate::openai::adapt_openai;
use crate::system::place_system_message;
use crate::types::{SystemSupport, ToolFormat, WireMessage};
use crate::xml::adapt_xml;

/// Everything one provider call needs prepared.
#[derive(Debug, Clone)]
pub struct PrepareRequest {
    /// The uniform conversation, oldest first.
    pub messages: Vec<Message>,
    /// Generated system message text; may be empty.
    pub system_message: String,
    /// Per-workspace instruction text appended to the system message.
    pub ai_instructions: String,
    /// How the provider accepts the system message.
    pub supports_system_message: SystemSupport,
    /// Which tool wire protocol the provider speaks.
    pub special_tool_format: ToolFormat,
    /// Whether carried reasoning blocks may ship to this provider.
    pub supports_anthropic_reasoning: bool,
    /// The model's context window, in tokens.
    pub context_window: u64,
    /// Caller-reserved output token space, when the caller knows better
    /// than the default.
    pub reserved_output_tokens: Option<u64>,
    /// Provider name, for diagnostics only.
    pub provider_name: String,
}

/// The `{messages, separate_system_message}` output contract.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPrompt {
    /// Provider-ready messages.
    pub messages: Vec<WireMessage>,
    /// System text for providers that transmit it out-of-band.
    pub separate_system_message: Option<String>,
}

/// Run the full preparation pipeline. Pure: no I/O, no shared state, never
/// fails.
#[must_use]
pub fn prepare_chat(request: PrepareRequest) -> PreparedPrompt {
    prepare_chat_with_policy(request, &TrimPolicy::default())
}

/// [`prepare_chat`] with an explicit trim policy.
#[must_use]
pub fn prepare_chat_with_policy(request: PrepareRequest, policy: &TrimPolicy) -> PreparedPrompt {
    let system = compose_system_text(&request.system_message, &request.ai_instructions);
    let params = BudgetParams::resolve(request.context_window, request.reserved_output_tokens);

    // The system text rides through budgeting as a pseudo-message so the
    // trimmer can weigh (and in the worst case truncate) it.
    let mut working = Vec::with_capacity(request.messages.len() + 1);
    working.push(Message::system(system));
    working.extend(request.messages);
    let mut budgeted = fit_to_budget(working, &params, policy);

    let system = match budgeted.first() {
        Some(Message::System { .. }) => budgeted.remove(0).content().to_owned(),
        _ => String::new(),
    };

    let mut messages = match request.special_tool_format {
        ToolFormat::Xml => adapt_xml(budgeted),
        ToolFormat::OpenaiStyle => adapt_openai(budgeted),
        ToolFormat::AnthropicStyle => {
            adapt_anthropic(budgeted, request.supports_anthropic_reasoning)
        }
        ToolFormat::GeminiStyle => adapt_gemini(budgeted),
    };

    let separate_system_message =
        place_system_message(&mut messages, system, request.supports_system_message);
    enforce_non_empty(&mut messages);

    PreparedPrompt {
        messages,
        separate_system_message,
    }
}

/// Race the whole preparation, system-message generation included, against
/// `limit`. On timeout the attempt is discarded and the caller gets a
/// minimal legal prompt: no system message, a single user message holding
/// the most recent real user turn.
pub async fn prepare_chat_with_timeout<F>(
    mut request: PrepareRequest,
    system_source: F,
    limit: Duration,
) -> PreparedPrompt
where
    F: Future<Output = String> + Send,
{
    let fallback = fallback_prompt(&request.messages);
    let prepared = timeout(limit, async {
        request.system_message = system_source.await;
        prepare_chat(request)
    })
    .await;

    match prepared {
        Ok(prompt) => prompt,
        Err(_) => {
            warn!(
                error = %VegaError::Timeout {
                    elapsed_ms: limit.as_millis() as u64,
                },
                "preparation timed out, sending fallback prompt"
            );
            fallback
        }
    }
}

/// Race auxiliary text generation (directory listings and the like) against
/// `limit`, substituting `fallback` when it loses.
pub async fn text_or_fallback<F>(source: F, limit: Duration, fallback: &str) -> String
where
    F: Future<Output = String> + Send,
{
    match timeout(limit, source).await {
        Ok(text) => text,
        Err(_) => {
            warn!(fallback, "auxiliary generation timed out");
            fallback.to_owned()
        }
    }
}

/// Fill-in-the-middle request: raw code context around the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FimRequest {
    /// Code before the cursor.
    pub prefix: String,
    /// Code after the cursor.
    pub suffix: String,
    /// Sequences on which the completion must stop.
    pub stop_tokens: Vec<String>,
}

/// Pass a FIM request through untouched. Completion needs the raw code
/// context exactly as the editor sees it; no system-instruction wrapping,
/// no budgeting rewrites.
#[must_use]
pub fn prepare_fim(request: FimRequest) -> FimRequest {
    request
}

fn compose_system_text(system_message: &str, ai_instructions: &str) -> String {
    match (system_message.is_empty(), ai_instructions.is_empty()) {
        (true, true) => String::new(),
        (false, true) => system_message.to_owned(),
        (true, false) => ai_instructions.to_owned(),
        (false, false) => format!("{system_message}\n\n{ai_instructions}"),
    }
}

fn fallback_prompt(messages: &[Message]) -> PreparedPrompt {
    let content = messages
        .iter()
        .rev()
        .find_map(|m| match m {
            Message::User { content } => Some(content.clone()),
            _ => None,
        })
        .unwrap_or_else(|| EMPTY_CONTENT_PLACEHOLDER.to_owned());
    PreparedPrompt {
        messages: vec![WireMessage::plain("user", content)],
        separate_system_message: None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
