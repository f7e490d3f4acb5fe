//! Time source for token issuance and validation

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies "now" to the token service.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to, with one-second resolution.
///
/// Useful for exercising expiry without sleeping. Moves past the range chrono
/// can represent stop at `DateTime::<Utc>::MIN_UTC` / `MAX_UTC`.
#[derive(Debug)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            secs: AtomicI64::new(start.timestamp()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let step = by.num_seconds();
        // The closure always returns Some, so this cannot fail.
        let _ = self
            .secs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |secs| {
                Some(clamp_secs(secs.saturating_add(step)))
            });
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.secs.store(to.timestamp(), Ordering::SeqCst);
    }
}

fn clamp_secs(secs: i64) -> i64 {
    secs.clamp(
        DateTime::<Utc>::MIN_UTC.timestamp(),
        DateTime::<Utc>::MAX_UTC.timestamp(),
    )
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.secs.load(Ordering::SeqCst);
        // `secs` always came from a valid DateTime or went through `clamp_secs`.
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
