use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::{mapref::entry::Entry, DashMap};

/// Per-identity counter for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub resets_at: Instant,
}

impl RateLimitEntry {
    fn fresh(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            resets_at: now + window,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now > self.resets_at
    }
}

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
}

type Key = String;

/// Longest window (and retention) a limiter accepts. Longer values are
/// clamped so `Instant` arithmetic cannot overflow.
pub const MAX_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Fixed-window limiter keyed by caller identity.
///
/// Windows are anchored to each identity's first request, not to the wall
/// clock. The map is sharded, so a check only locks the shard holding its key
/// and the read-modify-write for one identity is atomic.
#[derive(Clone, Debug)]
pub struct FixedWindowLimiter {
    map: Arc<DashMap<Key, RateLimitEntry>>,
    limit: u32,
    window: Duration,
    retention: Duration,
}

impl FixedWindowLimiter {
    /// Expired entries are kept for one extra window before a sweep drops them.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::with_retention(limit, window, window)
    }

    pub fn with_retention(limit: u32, window: Duration, retention: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            limit,
            window: window.min(MAX_WINDOW),
            retention: retention.min(MAX_WINDOW),
        }
    }

    pub fn check(&self, identity: &str) -> RateDecision {
        self.check_at(identity, Instant::now())
    }

    pub fn check_at(&self, identity: &str, now: Instant) -> RateDecision {
        match self.map.entry(identity.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(RateLimitEntry::fresh(now, self.window));
                self.admitted(1)
            }
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_expired(now) {
                    *entry = RateLimitEntry::fresh(now, self.window);
                    self.admitted(1)
                } else if entry.count >= self.limit {
                    RateDecision { allowed: false, remaining: 0 }
                } else {
                    entry.count += 1;
                    self.admitted(entry.count)
                }
            }
        }
    }

    fn admitted(&self, count: u32) -> RateDecision {
        RateDecision {
            allowed: true,
            remaining: self.limit.saturating_sub(count),
        }
    }

    /// Drops entries whose window ended more than `retention` before `now`.
    /// Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.map.len();
        let retention = self.retention;
        self.map.retain(|_, entry| now <= entry.resets_at + retention);
        before.saturating_sub(self.map.len())
    }

    /// Snapshot of one identity's entry.
    pub fn entry(&self, identity: &str) -> Option<RateLimitEntry> {
        self.map.get(identity).map(|e| *e.value())
    }

    /// Number of identities currently tracked.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
