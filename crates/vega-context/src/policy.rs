//! The trim policy table.
//!
//! The weighting constants are empirically tuned. They live here as one
//! configurable table rather than scattered hard constants; `Default`
//! carries the current values and the tests pin them as a regression
//! baseline.

use serde::{Deserialize, Serialize};

/// Tuned constants steering the pruner, compressor, and trimmer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimPolicy {
    /// Message count above which whole-message coarse pruning runs.
    pub coarse_prune_threshold: usize,
    /// How many recent messages the coarse pruner keeps.
    pub coarse_keep_recent: usize,
    /// Most-recent window exempt from lossy compression.
    pub compress_keep_recent: usize,
    /// Minimum retained length when the trimmer shrinks a message.
    pub trim_to_len: usize,
    /// Eviction weight multiplier for the system pseudo-message.
    pub system_weight: f64,
    /// Eviction weight multiplier for historical user turns.
    pub user_weight: f64,
    /// Eviction weight multiplier for assistant and tool turns.
    pub machine_weight: f64,
    /// Near-zero multiplier for the structural anchors (first/last few).
    pub anchor_weight: f64,
    /// How many leading messages count as anchors.
    pub anchor_head: usize,
    /// How many trailing messages count as anchors.
    pub anchor_tail: usize,
    /// Fraction of the character budget the final sequence must fit within.
    pub safety_margin: f64,
    /// Messages kept by the structural-collapse fallback.
    pub collapse_keep_recent: usize,
    /// Iteration budget for the trim loop.
    pub max_trim_iterations: usize,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self {
            coarse_prune_threshold: 50,
            coarse_keep_recent: 20,
            compress_keep_recent: 10,
            trim_to_len: 500,
            system_weight: 0.01,
            user_weight: 0.3,
            machine_weight: 10.0,
            anchor_weight: 0.05,
            anchor_head: 2,
            anchor_tail: 3,
            safety_margin: 0.85,
            collapse_keep_recent: 4,
            max_trim_iterations: 200,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // Regression baseline for the tuned values — changing any of these
    // shifts eviction behavior across the whole engine.
    #[test]
    fn default_policy_baseline() {
        let p = TrimPolicy::default();
        assert_eq!(p.coarse_prune_threshold, 50);
        assert_eq!(p.coarse_keep_recent, 20);
        assert_eq!(p.compress_keep_recent, 10);
        assert_eq!(p.trim_to_len, 500);
        assert!((p.system_weight - 0.01).abs() < f64::EPSILON);
        assert!((p.user_weight - 0.3).abs() < f64::EPSILON);
        assert!((p.machine_weight - 10.0).abs() < f64::EPSILON);
        assert!((p.safety_margin - 0.85).abs() < f64::EPSILON);
        assert_eq!(p.max_trim_iterations, 200);
    }

    #[test]
    fn machine_text_is_cheapest_to_cut() {
        let p = TrimPolicy::default();
        assert!(p.machine_weight > p.user_weight);
        assert!(p.user_weight > p.system_weight);
        assert!(p.anchor_weight < 1.0);
    }

    // Partial overrides deserialize against the defaults.
    #[test]
    fn partial_config_fills_from_defaults() {
        let p: TrimPolicy = serde_json::from_str(r#"{"trim_to_len": 800}"#).unwrap();
        assert_eq!(p.trim_to_len, 800);
        assert_eq!(p.coarse_prune_threshold, 50);
    }
}
