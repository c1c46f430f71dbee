//! Keyed TTL cache for generated system-message text.
//!
//! An injected collaborator, not part of the pipeline: preparation stays a
//! pure function while the caller decides when to consult or refresh this.
//! Read-mostly concurrent access behind a [`RwLock`]. Invalidation is
//! driven by directory-structure change events only; file content edits do
//! not affect the key, so they must not clear entries.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

/// What a cached system message was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SystemMessageKey {
    /// Workspace root the message describes.
    pub workspace: String,
    /// Agent mode the message was rendered for.
    pub mode: String,
    /// Fingerprint of the tool set available at generation time.
    pub tools_fingerprint: String,
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// TTL-bounded store of generated system-message text.
#[derive(Default)]
pub struct SystemMessageCache {
    entries: RwLock<HashMap<SystemMessageKey, CacheEntry>>,
}

impl SystemMessageCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached text for `key`, if present and not expired.
    #[must_use]
    pub fn get(&self, key: &SystemMessageKey) -> Option<String> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store `value` under `key` for `ttl`.
    pub fn set(&self, key: SystemMessageKey, value: String, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        let mut entries = self.entries.write();
        let _ = entries.insert(key, entry);
        entries.retain(|_, e| e.expires_at > Instant::now());
    }

    /// Drop every entry. Call on directory-structure change events; content
    /// edits within existing files do not warrant this.
    pub fn on_directory_changed(&self) {
        let mut entries = self.entries.write();
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "system message cache invalidated");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
