//! # vega-context
//!
//! The conversation budgeting pipeline.
//!
//! Given an unbounded uniform message sequence and a model's context window,
//! this crate produces a sequence that fits the input budget while keeping
//! the highest-value content. Phases, in order:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `normalizer` | Editor thread records → uniform messages |
//! | `budget` | Token reservation and character budget with clamping |
//! | `pruner` | Whole-message drop when the thread is very long |
//! | `compressor` | Per-role lossy compression outside the recent window |
//! | `summaries` | Structured per-tool output summarizers |
//! | `trimmer` | Weighted character eviction with tiered fallbacks |
//! | `policy` | The tuned constants, as a configurable table |
//! | `pipeline` | Phase driver |
//!
//! ## Key Invariant
//!
//! The last user message is never truncated, compressed, or dropped by any
//! phase; only the ultimate fallback may shorten the system message.
//!
//! ## Crate Position
//!
//! Depends on `vega-core`. Depended on by `vega-wire`.

#![deny(unsafe_code)]

pub mod budget;
pub mod compressor;
pub mod normalizer;
pub mod pipeline;
pub mod policy;
pub mod pruner;
pub mod summaries;
pub mod trimmer;

pub use budget::BudgetParams;
pub use normalizer::normalize;
pub use pipeline::fit_to_budget;
pub use policy::TrimPolicy;
