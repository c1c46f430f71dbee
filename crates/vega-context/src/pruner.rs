//! Coarse history pruning.
//!
//! Character-level trimming on hundreds of messages is slow and leaves many
//! tiny fragments. Once the conversation is extremely long, dropping whole
//! old turns is both faster and semantically better. This phase never
//! splits a message.

use tracing::debug;
use vega_core::messages::{Message, last_user_index};

use crate::policy::TrimPolicy;

/// Drop whole messages when the count exceeds the policy threshold.
///
/// The keep-set is: the prefix (system pseudo-message plus the first user
/// turn), the most recent `coarse_keep_recent` messages, and the current
/// last user message wherever it sits. Below the threshold the sequence is
/// returned untouched.
pub fn coarse_prune(messages: Vec<Message>, policy: &TrimPolicy) -> Vec<Message> {
    if messages.len() <= policy.coarse_prune_threshold {
        return messages;
    }

    let total = messages.len();
    let suffix_start = total.saturating_sub(policy.coarse_keep_recent);
    let first_user = messages.iter().position(Message::is_user);
    let last_user = last_user_index(&messages);

    let keep = |index: usize, message: &Message| -> bool {
        if index >= suffix_start {
            return true;
        }
        if message.is_system() {
            return true;
        }
        if Some(index) == first_user || Some(index) == last_user {
            return true;
        }
        false
    };

    let pruned: Vec<Message> = messages
        .into_iter()
        .enumerate()
        .filter(|(i, m)| keep(*i, m))
        .map(|(_, m)| m)
        .collect();

    debug!(
        before = total,
        after = pruned.len(),
        "coarse-pruned whole messages"
    );
    pruned
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn long_thread(n: usize) -> Vec<Message> {
        let mut msgs = vec![Message::system("sys"), Message::user("first ask")];
        for i in 0..n {
            msgs.push(Message::assistant(format!("reply {i}")));
        }
        msgs.push(Message::user("latest ask"));
        msgs
    }

    #[test]
    fn below_threshold_untouched() {
        let msgs = long_thread(10);
        let out = coarse_prune(msgs.clone(), &TrimPolicy::default());
        assert_eq!(out, msgs);
    }

    #[test]
    fn above_threshold_drops_middle() {
        let policy = TrimPolicy::default();
        let msgs = long_thread(100); // 103 messages
        let total = msgs.len();
        let out = coarse_prune(msgs, &policy);

        // system + first user + recent suffix
        assert!(out.len() < total);
        assert_eq!(out.len(), 2 + policy.coarse_keep_recent);
        assert_matches!(out[0], Message::System { .. });
        assert_eq!(out[1].content(), "first ask");
        assert_eq!(out.last().unwrap().content(), "latest ask");
    }

    #[test]
    fn last_user_kept_even_outside_suffix() {
        let policy = TrimPolicy::default();
        let mut msgs = vec![Message::system("sys"), Message::user("first ask")];
        for i in 0..30 {
            msgs.push(Message::assistant(format!("a{i}")));
        }
        msgs.push(Message::user("buried ask"));
        // bury the last user turn under more machine turns than the suffix
        for i in 0..30 {
            msgs.push(Message::tool(format!("t{i}"), "ls", "out", serde_json::Value::Null));
        }

        let out = coarse_prune(msgs, &policy);
        assert!(out.iter().any(|m| m.content() == "buried ask"));
    }

    #[test]
    fn whole_messages_only() {
        let policy = TrimPolicy::default();
        let msgs = long_thread(100);
        let originals: Vec<String> = msgs.iter().map(|m| m.content().to_owned()).collect();
        let out = coarse_prune(msgs, &policy);
        for m in &out {
            assert!(originals.iter().any(|o| o == m.content()));
        }
    }

    #[test]
    fn order_preserved() {
        let policy = TrimPolicy::default();
        let out = coarse_prune(long_thread(100), &policy);
        // first user comes right after system, suffix stays in order
        assert_eq!(out[1].content(), "first ask");
        let replies: Vec<&str> = out[2..].iter().map(Message::content).collect();
        let mut sorted = replies.clone();
        sorted.sort_by_key(|s| {
            s.strip_prefix("reply ")
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(usize::MAX)
        });
        assert_eq!(replies, sorted);
    }
}
