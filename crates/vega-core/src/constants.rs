//! Budget constants shared across the pipeline.
//!
//! `CHARS_PER_TOKEN` is an intentional approximation, not a tokenizer:
//! the engine budgets in characters and converts once at the boundary.

/// Approximate characters per token used for all char↔token conversions.
pub const CHARS_PER_TOKEN: u64 = 4;

/// Output-token reservation used when the caller supplies none.
pub const DEFAULT_RESERVED_OUTPUT_TOKENS: u64 = 4096;

/// Upper bound on the computed output-token reservation.
pub const MAX_RESERVED_OUTPUT_TOKENS: u64 = 16_000;

/// Fraction of the context window considered for the output reservation.
pub const RESERVED_OUTPUT_FRACTION: f64 = 0.20;

/// Floor on the input character budget. Degenerate small-window
/// configurations would otherwise produce budgets too small to carry any
/// conversation at all.
pub const MIN_INPUT_CHARS: u64 = 20_000;

/// Marker appended to content shortened by the trimmer.
pub const TRIM_MARKER: &str = "...[trimmed]";

/// Marker inserted where head/tail elision removed the middle of a text.
pub const ELISION_MARKER: &str = "\n[...]\n";

/// Substitute for content that would otherwise be empty on the wire.
/// Every supported provider API rejects empty content on a turn.
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "(empty)";

/// Fallback text when auxiliary generation (directory listings, etc.)
/// times out.
pub const AUX_GENERATION_FALLBACK: &str = "(unavailable)";
