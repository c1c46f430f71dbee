//! Budget calculation.
//!
//! Derives the output-token reservation and the input character budget from
//! the model's context window. Everything downstream budgets in characters;
//! the chars-per-token ratio is a deliberate approximation, converted once
//! here.

use vega_core::constants::{
    CHARS_PER_TOKEN, DEFAULT_RESERVED_OUTPUT_TOKENS, MAX_RESERVED_OUTPUT_TOKENS, MIN_INPUT_CHARS,
    RESERVED_OUTPUT_FRACTION,
};

/// Resolved budget parameters for one preparation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetParams {
    /// Total token capacity of the model (input + output).
    pub context_window: u64,
    /// Tokens withheld for the model's reply.
    pub reserved_output_tokens: u64,
    /// Character budget for the transmitted sequence.
    pub available_input_chars: u64,
    /// Absolute character cap: the whole window expressed in characters.
    /// Tier B/C enforce this even when the floor lifted
    /// `available_input_chars` above it.
    pub hard_cap_chars: u64,
}

impl BudgetParams {
    /// Resolve budget parameters from the window size and an optional
    /// explicit output reservation.
    ///
    /// `reserved = max(min(window × 0.20, 16 000), explicit ?? 4096)`.
    /// The character budget gets a floor of [`MIN_INPUT_CHARS`] so that
    /// degenerate small windows still carry a usable conversation, and is
    /// clamped to the window's own character capacity so the fallback tiers
    /// stay honest.
    #[must_use]
    pub fn resolve(context_window: u64, reserved_output_tokens: Option<u64>) -> Self {
        let fraction = (context_window as f64 * RESERVED_OUTPUT_FRACTION) as u64;
        let reserved = fraction
            .min(MAX_RESERVED_OUTPUT_TOKENS)
            .max(reserved_output_tokens.unwrap_or(DEFAULT_RESERVED_OUTPUT_TOKENS));

        let hard_cap_chars = context_window.saturating_mul(CHARS_PER_TOKEN);
        let available_input_chars = context_window
            .saturating_sub(reserved)
            .saturating_mul(CHARS_PER_TOKEN)
            .max(MIN_INPUT_CHARS)
            .min(hard_cap_chars);

        Self {
            context_window,
            reserved_output_tokens: reserved,
            available_input_chars,
            hard_cap_chars,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_window_uses_fraction() {
        // 200k window: 20% = 40k, capped at 16k; explicit absent → max(16k, 4096)
        let params = BudgetParams::resolve(200_000, None);
        assert_eq!(params.reserved_output_tokens, 16_000);
        assert_eq!(params.available_input_chars, (200_000 - 16_000) * 4);
    }

    #[test]
    fn small_window_floors_at_default() {
        // 8k window: 20% = 1600 < 4096 default → 4096
        let params = BudgetParams::resolve(8_000, None);
        assert_eq!(params.reserved_output_tokens, 4096);
    }

    #[test]
    fn explicit_reservation_wins_when_larger() {
        let params = BudgetParams::resolve(100_000, Some(30_000));
        assert_eq!(params.reserved_output_tokens, 30_000);
    }

    #[test]
    fn explicit_reservation_ignored_when_below_fraction_cap() {
        // 100k window: fraction = 20k, capped at 16k; explicit 8k < 16k
        let params = BudgetParams::resolve(100_000, Some(8_000));
        assert_eq!(params.reserved_output_tokens, 16_000);
    }

    #[test]
    fn input_chars_floor_applies() {
        // 8k window, reserved 4096 → (8000-4096)*4 = 15 616 < 20 000 floor
        let params = BudgetParams::resolve(8_000, None);
        assert_eq!(params.available_input_chars, MIN_INPUT_CHARS);
    }

    #[test]
    fn hard_cap_clamps_floor_on_tiny_windows() {
        // 500-token window: floor would say 20 000 chars, but the window
        // itself only holds 2000
        let params = BudgetParams::resolve(500, None);
        assert_eq!(params.hard_cap_chars, 2_000);
        assert_eq!(params.available_input_chars, 2_000);
    }

    #[test]
    fn reservation_larger_than_window_saturates() {
        let params = BudgetParams::resolve(1_000, Some(50_000));
        assert_eq!(params.reserved_output_tokens, 50_000);
        // (1000 - 50 000) saturates to 0; floor then cap
        assert_eq!(params.available_input_chars, 4_000);
    }

    #[test]
    fn zero_window() {
        let params = BudgetParams::resolve(0, None);
        assert_eq!(params.hard_cap_chars, 0);
        assert_eq!(params.available_input_chars, 0);
    }
}
