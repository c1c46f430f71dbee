//! Error hierarchy for the vega engine.
//!
//! Pipeline failures are local and recoverable by design: the budgeting
//! phases degrade instead of erroring, so the only errors that surface are
//! orchestration-level timeouts.

use thiserror::Error;

/// Errors surfaced by the preparation orchestration boundary.
#[derive(Debug, Error)]
pub enum VegaError {
    /// The whole preparation (including system-message generation) exceeded
    /// its deadline. Callers receive the minimal fallback prompt instead of
    /// this error; it exists for internal reporting.
    #[error("preparation timed out after {elapsed_ms}ms")]
    Timeout {
        /// Milliseconds elapsed before the race was abandoned.
        elapsed_ms: u64,
    },
}

/// Result alias for vega operations.
pub type Result<T> = std::result::Result<T, VegaError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
