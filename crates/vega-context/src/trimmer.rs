//! Weighted character trimming.
//!
//! The core eviction algorithm: each message gets an eviction weight, and
//! the highest-weight message is shrunk until the sequence fits the
//! character budget. Three escalating fallback tiers then run
//! unconditionally, so the result is always within the window and never
//! empty, even for pathological inputs (one enormous tool output, a window
//! smaller than a single message).
//!
//! The last user message has absolute protection in every tier; the ultimate
//! fallback truncates the system message instead.

use tracing::{debug, warn};
use vega_core::constants::TRIM_MARKER;
use vega_core::messages::{Message, last_user_index, total_chars};
use vega_core::text::{truncate_str, truncate_with_suffix};

use crate::budget::BudgetParams;
use crate::policy::TrimPolicy;

/// Minimum length Tier A shrinks a message toward.
const TIER_A_FLOOR: usize = 100;

/// Shrink the sequence until it fits the budget.
pub fn trim_to_fit(messages: &mut Vec<Message>, params: &BudgetParams, policy: &TrimPolicy) {
    let target = params.available_input_chars as usize;

    weighted_trim_loop(messages, target, policy);
    margin_shrink(messages, target, policy);
    structural_collapse(messages, target, policy);
    ultimate_fallback(messages, params.hard_cap_chars as usize);
}

/// Eviction weight for one message.
///
/// Zero means untouchable this round: the live user request, or a message
/// already trimmed in a previous iteration (prevents thrashing).
fn eviction_weight(
    message: &Message,
    index: usize,
    total: usize,
    protected: Option<usize>,
    spent: &[bool],
    policy: &TrimPolicy,
) -> f64 {
    if Some(index) == protected || spent[index] {
        return 0.0;
    }
    let role = match message {
        Message::System { .. } => policy.system_weight,
        Message::User { .. } => policy.user_weight,
        Message::Assistant { .. } | Message::Tool { .. } => policy.machine_weight,
    };
    // Mild ramp favoring older messages.
    let ramp = 1.0 + (total - 1 - index) as f64 / total as f64;
    // The conversation's structural anchors are nearly untouchable.
    let anchor = if index < policy.anchor_head || index + policy.anchor_tail >= total {
        policy.anchor_weight
    } else {
        1.0
    };
    message.char_len() as f64 * ramp * role * anchor
}

/// Iteratively shrink the highest-weight message until the total fits.
fn weighted_trim_loop(messages: &mut [Message], target: usize, policy: &TrimPolicy) {
    let total = messages.len();
    let protected = last_user_index(messages);
    let mut spent = vec![false; total];

    for _ in 0..policy.max_trim_iterations {
        let deficit = total_chars(messages).saturating_sub(target);
        if deficit == 0 {
            return;
        }

        let candidate = (0..total)
            .map(|i| {
                (
                    i,
                    eviction_weight(&messages[i], i, total, protected, &spent, policy),
                )
            })
            .filter(|(_, w)| *w > 0.0)
            .max_by(|(_, a), (_, b)| a.total_cmp(b));
        let Some((index, _)) = candidate else {
            // Nothing left to cut; the fallback tiers take over.
            return;
        };

        let len = messages[index].char_len();
        if len <= policy.trim_to_len {
            spent[index] = true;
            continue;
        }

        let freeable = len - policy.trim_to_len;
        if deficit < freeable {
            // Shave exactly the deficit and stop.
            shrink_to(&mut messages[index], len - deficit);
            return;
        }
        shrink_to(&mut messages[index], policy.trim_to_len);
        spent[index] = true;
    }
    warn!(target, "trim loop exhausted its iteration budget");
}

/// Tier A: proportionally shrink everything but the system pseudo-message
/// and the live user request when the total still exceeds the safety
/// margin.
fn margin_shrink(messages: &mut [Message], target: usize, policy: &TrimPolicy) {
    let margin_target = (target as f64 * policy.safety_margin) as usize;
    let total = total_chars(messages);
    if total <= margin_target || total == 0 {
        return;
    }
    let scale = margin_target as f64 / total as f64;
    let protected = last_user_index(messages);

    debug!(total, margin_target, "margin shrink engaged");
    for (index, message) in messages.iter_mut().enumerate() {
        if message.is_system() || Some(index) == protected {
            continue;
        }
        let keep = ((message.char_len() as f64 * scale) as usize).max(TIER_A_FLOOR);
        shrink_to(message, keep);
    }
}

/// Tier B: collapse to the hard structural keep-set.
fn structural_collapse(messages: &mut Vec<Message>, target: usize, policy: &TrimPolicy) {
    let margin_target = (target as f64 * policy.safety_margin) as usize;
    if total_chars(messages) <= margin_target {
        return;
    }
    let protected = last_user_index(messages);
    let suffix_start = messages.len().saturating_sub(policy.collapse_keep_recent);

    warn!(
        total_chars = total_chars(messages),
        margin_target, "structural collapse engaged"
    );
    let mut index = 0;
    messages.retain(|message| {
        let keep = message.is_system() || Some(index) == protected || index >= suffix_start;
        index += 1;
        keep
    });
}

/// Tier C: system + last user only; if even the pair exceeds the window,
/// truncate the system message — never the user message.
fn ultimate_fallback(messages: &mut Vec<Message>, hard_cap: usize) {
    if total_chars(messages) <= hard_cap {
        return;
    }

    warn!(hard_cap, "ultimate fallback engaged");
    let protected = last_user_index(messages);
    let mut index = 0;
    messages.retain(|message| {
        let keep = message.is_system() || Some(index) == protected;
        index += 1;
        keep
    });

    if total_chars(messages) > hard_cap {
        let user_len = last_user_index(messages)
            .map(|i| messages[i].char_len())
            .unwrap_or(0);
        let system_budget = hard_cap.saturating_sub(user_len);
        if let Some(system) = messages.iter_mut().find(|m| m.is_system()) {
            shrink_to(system, system_budget);
        }
    }
}

/// Truncate a message's content to at most `keep` bytes, marker included.
fn shrink_to(message: &mut Message, keep: usize) {
    let content = message.content_mut();
    if content.len() <= keep {
        return;
    }
    *content = if keep <= TRIM_MARKER.len() {
        truncate_str(content, keep).to_owned()
    } else {
        truncate_with_suffix(content, keep, TRIM_MARKER)
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params(window: u64) -> BudgetParams {
        BudgetParams::resolve(window, None)
    }

    fn thread(machine_turns: usize, turn_len: usize) -> Vec<Message> {
        let mut msgs = vec![Message::system("system prompt"), Message::user("first ask")];
        for i in 0..machine_turns {
            if i % 2 == 0 {
                msgs.push(Message::assistant("a".repeat(turn_len)));
            } else {
                msgs.push(Message::tool(
                    format!("t{i}"),
                    "run",
                    "o".repeat(turn_len),
                    serde_json::Value::Null,
                ));
            }
        }
        msgs.push(Message::user("the live request"));
        msgs
    }

    // ── weights ──────────────────────────────────────────────────────────

    #[test]
    fn last_user_weight_is_zero() {
        let policy = TrimPolicy::default();
        let msgs = thread(6, 1_000);
        let protected = last_user_index(&msgs);
        let spent = vec![false; msgs.len()];
        let w = eviction_weight(
            &msgs[protected.unwrap()],
            protected.unwrap(),
            msgs.len(),
            protected,
            &spent,
            &policy,
        );
        assert_eq!(w, 0.0);
    }

    #[test]
    fn spent_message_weight_is_zero() {
        let policy = TrimPolicy::default();
        let msgs = thread(6, 1_000);
        let mut spent = vec![false; msgs.len()];
        spent[3] = true;
        let w = eviction_weight(&msgs[3], 3, msgs.len(), None, &spent, &policy);
        assert_eq!(w, 0.0);
    }

    #[test]
    fn machine_turns_outweigh_user_turns() {
        let policy = TrimPolicy::default();
        let msgs = vec![
            Message::system("s"),
            Message::user("u".repeat(1_000)),
            Message::assistant("a".repeat(1_000)),
            Message::user("live"),
            Message::assistant("pad"),
            Message::assistant("pad"),
            Message::assistant("pad"),
        ];
        let spent = vec![false; msgs.len()];
        let user_w = eviction_weight(&msgs[1], 1, msgs.len(), Some(3), &spent, &policy);
        let asst_w = eviction_weight(&msgs[2], 2, msgs.len(), Some(3), &spent, &policy);
        assert!(asst_w > user_w);
    }

    #[test]
    fn older_messages_rank_higher_at_equal_length() {
        let policy = TrimPolicy::default();
        let mut msgs = vec![Message::system("s")];
        for _ in 0..10 {
            msgs.push(Message::assistant("x".repeat(1_000)));
        }
        let spent = vec![false; msgs.len()];
        let old = eviction_weight(&msgs[3], 3, msgs.len(), None, &spent, &policy);
        let new = eviction_weight(&msgs[7], 7, msgs.len(), None, &spent, &policy);
        assert!(old > new);
    }

    #[test]
    fn anchors_nearly_untouchable() {
        let policy = TrimPolicy::default();
        let mut msgs = vec![Message::system("s")];
        for _ in 0..10 {
            msgs.push(Message::assistant("x".repeat(1_000)));
        }
        let spent = vec![false; msgs.len()];
        let anchored = eviction_weight(&msgs[1], 1, msgs.len(), None, &spent, &policy);
        let free = eviction_weight(&msgs[5], 5, msgs.len(), None, &spent, &policy);
        assert!(anchored < free / 10.0);
    }

    // ── trim loop ────────────────────────────────────────────────────────

    #[test]
    fn fits_without_trimming_when_under_budget() {
        let mut msgs = thread(4, 100);
        let original = msgs.clone();
        trim_to_fit(&mut msgs, &params(100_000), &TrimPolicy::default());
        assert_eq!(msgs, original);
    }

    #[test]
    fn trims_machine_turns_first() {
        let mut msgs = thread(20, 4_000);
        trim_to_fit(&mut msgs, &params(8_000), &TrimPolicy::default());

        let p = params(8_000);
        assert!(total_chars(&msgs) <= p.available_input_chars as usize);
        // live request intact
        assert_eq!(msgs.last().unwrap().content(), "the live request");
        // system prompt intact (tiny, never a useful candidate)
        assert_eq!(msgs[0].content(), "system prompt");
    }

    /// Margin 1.0 disables the tiers, isolating the weighted loop.
    fn loop_only() -> TrimPolicy {
        TrimPolicy {
            safety_margin: 1.0,
            ..TrimPolicy::default()
        }
    }

    #[test]
    fn exact_deficit_shave_leaves_total_at_target() {
        // One oversized machine turn, everything else tiny.
        let policy = loop_only();
        let p = params(8_000); // available = 20 000
        let mut msgs = vec![
            Message::system("s"),
            Message::user("ask"),
            Message::assistant("x".repeat(21_000)),
            Message::assistant("mid"),
            Message::assistant("mid"),
            Message::assistant("mid"),
            Message::user("live"),
        ];
        trim_to_fit(&mut msgs, &p, &policy);
        assert!(total_chars(&msgs) <= p.available_input_chars as usize);
        assert!(msgs[2].content().ends_with(TRIM_MARKER));
        assert_eq!(msgs.last().unwrap().content(), "live");
    }

    #[test]
    fn trimmed_message_not_revisited() {
        // Two big machine turns: both must end at trim_to_len rather than
        // one being shaved twice.
        let policy = loop_only();
        let p = params(8_000);
        let mut msgs = vec![
            Message::system("s"),
            Message::user("ask"),
            Message::assistant("a".repeat(30_000)),
            Message::tool("t1", "run", "b".repeat(30_000), serde_json::Value::Null),
            Message::assistant("pad"),
            Message::assistant("pad"),
            Message::user("live"),
        ];
        trim_to_fit(&mut msgs, &p, &policy);
        assert!(total_chars(&msgs) <= p.available_input_chars as usize);
        assert!(msgs[2].char_len() >= policy.trim_to_len / 2);
        assert!(msgs[3].char_len() >= policy.trim_to_len / 2);
    }

    // ── tiers ────────────────────────────────────────────────────────────

    #[test]
    fn tier_c_truncates_system_never_user() {
        // contextWindow=500, system of 2000 chars, user "hello"
        let p = params(500); // hard cap 2000 chars
        let mut msgs = vec![Message::system("S".repeat(2_000)), Message::user("hello")];
        trim_to_fit(&mut msgs, &p, &TrimPolicy::default());

        assert_eq!(msgs.len(), 2);
        assert!(msgs[0].char_len() < 2_000);
        assert_eq!(msgs[1].content(), "hello");
        assert!(total_chars(&msgs) <= p.hard_cap_chars as usize);
    }

    #[test]
    fn tier_c_handles_system_alone_over_window() {
        let p = params(500);
        let mut msgs = vec![
            Message::system("S".repeat(10_000)),
            Message::user("keep me exactly"),
        ];
        trim_to_fit(&mut msgs, &p, &TrimPolicy::default());
        assert_eq!(msgs[1].content(), "keep me exactly");
        assert!(total_chars(&msgs) <= p.hard_cap_chars as usize);
    }

    #[test]
    fn enormous_single_tool_output_contained() {
        let p = params(8_000);
        let mut msgs = vec![
            Message::system("s"),
            Message::user("ask"),
            Message::tool("t1", "run", "z".repeat(500_000), serde_json::Value::Null),
            Message::user("live"),
        ];
        trim_to_fit(&mut msgs, &p, &TrimPolicy::default());
        assert!(total_chars(&msgs) <= p.available_input_chars as usize);
        assert!(msgs.iter().any(|m| m.content() == "live"));
    }

    #[test]
    fn protection_survives_collapse() {
        // Enough mid-sized turns that the loop alone cannot satisfy the
        // margin and Tier B engages.
        let p = params(8_000);
        let policy = TrimPolicy {
            max_trim_iterations: 3,
            ..TrimPolicy::default()
        };
        let mut msgs = thread(60, 3_000);
        trim_to_fit(&mut msgs, &p, &policy);
        assert!(msgs.iter().any(|m| m.content() == "the live request"));
        assert!(msgs.iter().any(Message::is_system));
    }

    #[test]
    fn shrink_to_respects_budget() {
        let mut msg = Message::assistant("x".repeat(1_000));
        shrink_to(&mut msg, 200);
        assert!(msg.char_len() <= 200);
        assert!(msg.content().ends_with(TRIM_MARKER));

        let mut tiny = Message::assistant("x".repeat(1_000));
        shrink_to(&mut tiny, 5);
        assert_eq!(tiny.char_len(), 5);
    }
}
