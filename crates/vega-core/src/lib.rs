//! # vega-core
//!
//! Foundation types for the vega conversation-budgeting engine.
//!
//! This crate provides the shared vocabulary the other vega crates depend on:
//!
//! - **Messages**: [`messages::Message`] union with `System`, `User`,
//!   `Assistant`, `Tool` variants and [`messages::ReasoningBlock`]
//! - **Thread records**: [`thread::ThreadEvent`] — the editor's rich chat
//!   record, plus the [`thread::PrunedOutputs`] analytics collaborator seam
//! - **Text**: [`text`] — UTF-8–safe truncation and head/tail elision
//! - **Constants**: [`constants`] — chars-per-token ratio and budget bounds
//! - **Errors**: [`errors::VegaError`] hierarchy via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `vega-context` and `vega-wire`.

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod messages;
pub mod text;
pub mod thread;

pub use errors::{Result, VegaError};
pub use messages::{Message, ReasoningBlock};
pub use thread::{NoPrunedOutputs, PrunedOutputs, ThreadEvent};
