//! Per-identity rate limiting with fixed reset windows
//!
//! Each identity owns one [`RateLimitRecord`]. The first use opens a window
//! that lasts until `reset_at`; uses inside the window accumulate until the
//! limit is reached, after which checks are rejected without consuming quota.
//! Once the window has passed the record is replaced, not incremented.
//!
//! Identities come from client-supplied network hints and can be spoofed, so
//! this is abuse mitigation only, never access control.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Default number of generations per identity per window
pub const DEFAULT_DAILY_LIMIT: u32 = 3;

/// Default window length in seconds (24 hours)
pub const DEFAULT_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and simulations
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Usage of one identity inside its current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub reset_at: DateTime<Utc>,
}

/// Admission control keyed by identity
pub trait RateLimiter: Send + Sync {
    /// Check and, when allowed, record one use for `identity`
    fn check(&self, identity: &str) -> RateLimitDecision;

    /// Configured number of uses per window
    fn limit(&self) -> u32;
}

/// Process-local rate limiter.
///
/// Records live in a sharded concurrent map; the check-and-increment for an
/// identity runs under that key's entry lock, so concurrent checks for one
/// identity never over-admit while other identities proceed independently.
pub struct InMemoryRateLimiter {
    records: DashMap<String, RateLimitRecord>,
    limit: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemoryRateLimiter {
    /// Create a limiter with an explicit limit and window
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::with_clock(limit, window, Arc::new(SystemClock))
    }

    /// Create with a custom clock
    pub fn with_clock(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: DashMap::new(),
            limit,
            window,
            clock,
        }
    }

    /// Current record for an identity, if any
    pub fn record(&self, identity: &str) -> Option<RateLimitRecord> {
        self.records.get(identity).map(|r| *r)
    }

    /// Number of tracked identities, expired or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record whose window has passed. Returns how many were removed.
    ///
    /// Expired records are otherwise only replaced when their identity is
    /// checked again, so memory grows with distinct identities until this runs.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.records.len();
        self.records.retain(|_, record| now <= record.reset_at);
        before.saturating_sub(self.records.len())
    }

    fn open_window(&self, now: DateTime<Utc>) -> (RateLimitRecord, RateLimitDecision) {
        let record = RateLimitRecord {
            count: 1,
            reset_at: now + self.window,
        };
        let decision = RateLimitDecision {
            allowed: true,
            remaining: self.limit.saturating_sub(1),
            reset_at: record.reset_at,
        };
        (record, decision)
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_LIMIT, Duration::seconds(DEFAULT_WINDOW_SECS))
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, identity: &str) -> RateLimitDecision {
        let now = self.clock.now();

        match self.records.entry(identity.to_string()) {
            Entry::Vacant(entry) => {
                let (record, decision) = self.open_window(now);
                entry.insert(record);
                decision
            }
            Entry::Occupied(mut entry) => {
                if now > entry.get().reset_at {
                    let (record, decision) = self.open_window(now);
                    entry.insert(record);
                    return decision;
                }

                let record = entry.get_mut();
                if record.count >= self.limit {
                    tracing::debug!(identity, "rate limit exhausted");
                    return RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at: record.reset_at,
                    };
                }

                record.count += 1;
                RateLimitDecision {
                    allowed: true,
                    remaining: self.limit - record.count,
                    reset_at: record.reset_at,
                }
            }
        }
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn limiter_with_clock() -> (InMemoryRateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        ));
        let limiter = InMemoryRateLimiter::with_clock(3, Duration::hours(24), clock.clone());
        (limiter, clock)
    }

    #[test]
    fn test_three_uses_then_denied() {
        let (limiter, clock) = limiter_with_clock();
        let expected_reset = clock.now() + Duration::hours(24);

        let remaining: Vec<u32> = (0..3)
            .map(|_| {
                let decision = limiter.check("10.0.0.1");
                assert!(decision.allowed);
                assert_eq!(decision.reset_at, expected_reset);
                decision.remaining
            })
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        let denied = limiter.check("10.0.0.1");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.reset_at, expected_reset);
    }

    #[test]
    fn test_denied_checks_do_not_consume_quota() {
        let (limiter, _clock) = limiter_with_clock();
        for _ in 0..10 {
            limiter.check("user");
        }
        assert_eq!(limiter.record("user").unwrap().count, 3);
    }

    #[test]
    fn test_fresh_window_after_reset() {
        let (limiter, clock) = limiter_with_clock();
        for _ in 0..4 {
            limiter.check("user");
        }

        // Exactly at reset_at the old window still applies
        clock.advance(Duration::hours(24));
        assert!(!limiter.check("user").allowed);

        clock.advance(Duration::milliseconds(1));
        let decision = limiter.check("user");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
        assert_eq!(decision.reset_at, clock.now() + Duration::hours(24));
        assert_eq!(limiter.record("user").unwrap().count, 1);
    }

    #[test]
    fn test_identities_are_independent() {
        let (limiter, _clock) = limiter_with_clock();
        for _ in 0..3 {
            limiter.check("a");
        }
        assert!(!limiter.check("a").allowed);

        let other = limiter.check("b");
        assert!(other.allowed);
        assert_eq!(other.remaining, 2);
    }

    #[test]
    fn test_concurrent_checks_never_over_admit() {
        let limiter = InMemoryRateLimiter::new(5, Duration::hours(1));

        let allowed: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    scope.spawn(|| (0..10).filter(|_| limiter.check("shared").allowed).count())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(allowed, 5);
        assert_eq!(limiter.record("shared").unwrap().count, 5);
    }

    #[test]
    fn test_purge_expired() {
        let (limiter, clock) = limiter_with_clock();
        limiter.check("old");
        clock.advance(Duration::hours(12));
        limiter.check("new");
        clock.advance(Duration::hours(13));

        assert_eq!(limiter.purge_expired(), 1);
        assert!(limiter.record("old").is_none());
        assert!(limiter.record("new").is_some());
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn test_default_limits() {
        let limiter = InMemoryRateLimiter::default();
        assert_eq!(limiter.limit(), DEFAULT_DAILY_LIMIT);
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_decision_serializes_reset_at_as_millis() {
        let decision = RateLimitDecision {
            allowed: false,
            remaining: 0,
            reset_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_value(decision).unwrap();
        assert_eq!(json["resetAt"], 1_700_000_000_123i64);
    }
}
