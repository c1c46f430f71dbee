//! Provider wire formats and the preparation entry points.
//!
//! Takes a budgeted uniform conversation from `vega-context` and produces
//! provider-ready messages:
//!
//! - [`types`] — wire message shapes and provider capability flags
//! - [`xml`], [`openai`], [`anthropic`], [`gemini`] — the four tool-format
//!   adapters
//! - [`system`] — system-message placement, independent of tool format
//! - [`integrity`] — final no-empty-content guarantee
//! - [`prepare`] — `prepare_chat` / `prepare_fim` and timeout orchestration
//! - [`cache`] — TTL cache for generated system-message text

#![deny(unsafe_code)]

pub mod anthropic;
pub mod cache;
pub mod gemini;
pub mod integrity;
pub mod openai;
pub mod prepare;
pub mod system;
pub mod types;
pub mod xml;

pub use cache::{SystemMessageCache, SystemMessageKey};
pub use prepare::{
    FimRequest, PrepareRequest, PreparedPrompt, prepare_chat, prepare_chat_with_timeout,
    prepare_fim, text_or_fallback,
};
pub use types::{SystemSupport, ToolFormat, WireMessage};
