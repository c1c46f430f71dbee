//! The budgeting phase driver.
//!
//! Coarse prune → compress → trim, over an owned working copy. The caller's
//! message list is taken by value; nothing upstream is ever mutated.

use tracing::debug;
use vega_core::messages::{Message, total_chars};

use crate::budget::BudgetParams;
use crate::compressor::compress;
use crate::policy::TrimPolicy;
use crate::pruner::coarse_prune;
use crate::trimmer::trim_to_fit;

/// Run the full budgeting pipeline.
///
/// Expects exactly one system pseudo-message at index 0 (the preparation
/// entry point guarantees this). The result fits
/// `params.available_input_chars`, except when system + last user alone
/// exceed the window — then the system message has already been maximally
/// truncated and only it may still be over.
#[must_use]
pub fn fit_to_budget(
    messages: Vec<Message>,
    params: &BudgetParams,
    policy: &TrimPolicy,
) -> Vec<Message> {
    let before = total_chars(&messages);

    let mut messages = coarse_prune(messages, policy);
    compress(&mut messages, policy);
    trim_to_fit(&mut messages, params, policy);

    debug!(
        before,
        after = total_chars(&messages),
        budget = params.available_input_chars,
        window = params.context_window,
        "budgeting pipeline complete"
    );
    messages
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
