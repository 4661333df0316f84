//! Fixed-window request budgets for admin mutations.
//!
//! The limiter is an injected value owned by application state, keyed by
//! `"<operation>:<caller>"`. Windows expire lazily on the next check for the
//! same key; there is no background sweeper.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::Timestamp;

/// Operation names used as the first half of a limiter key.
pub const OP_UPSERT_DRAFT: &str = "upsertMenuDraft";
pub const OP_IMPORT_CSV: &str = "importMenuCSV";
pub const OP_PUBLISH: &str = "publishDrafts";

/// Default window shared by every admin budget.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Time source for the limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = offset(*now, by);
    }

    pub fn set(&self, to: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

fn offset(from: Timestamp, by: Duration) -> Timestamp {
    TimeDelta::from_std(by)
        .ok()
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ---------------------------------------------------------------------------
// Limiter
// ---------------------------------------------------------------------------

/// Throttling collaborator consulted before each rate-limited operation.
pub trait RateLimiter: Send + Sync {
    /// Record one call against `key`; `false` once `limit` calls have been
    /// made inside the current `window`.
    fn allow(&self, key: &str, limit: u32, window: Duration) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u32,
    reset_at: Timestamp,
}

/// In-process fixed-window counter.
#[derive(Debug)]
pub struct FixedWindowLimiter<C> {
    clock: C,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl<C: Clock> FixedWindowLimiter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            buckets: Mutex::new(HashMap::new()),
        }
    }
}

impl FixedWindowLimiter<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> RateLimiter for FixedWindowLimiter<C> {
    fn allow(&self, key: &str, limit: u32, window: Duration) -> bool {
        let now = self.clock.now();
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);

        match buckets.get_mut(key) {
            Some(bucket) if bucket.reset_at >= now => {
                if bucket.count >= limit {
                    return false;
                }
                bucket.count += 1;
                true
            }
            _ => {
                buckets.insert(
                    key.to_string(),
                    Bucket {
                        count: 1,
                        reset_at: offset(now, window),
                    },
                );
                true
            }
        }
    }
}

/// Build a limiter key for `operation` performed by `caller`.
pub fn limiter_key(operation: &str, caller: &str) -> String {
    format!("{operation}:{caller}")
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBudget {
    pub limit: u32,
    pub window: Duration,
}

impl RateBudget {
    pub const fn per_window(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }
}

/// Per-operation budgets for the rate-limited admin mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBudgets {
    pub upsert_draft: RateBudget,
    pub import_csv: RateBudget,
    pub publish: RateBudget,
}

impl Default for RateBudgets {
    fn default() -> Self {
        Self {
            upsert_draft: RateBudget::per_window(50, DEFAULT_WINDOW),
            import_csv: RateBudget::per_window(5, DEFAULT_WINDOW),
            publish: RateBudget::per_window(2, DEFAULT_WINDOW),
        }
    }
}
