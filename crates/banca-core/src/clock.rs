// ── Time source ──
//
// Every timestamp in the ledger and session comes from a `Clock`.
// Instants are stored in UTC; "today" is the local calendar date.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the local time zone.
    fn today(&self) -> NaiveDate {
        local_date(self.now())
    }

    /// Current local wall-clock time.
    fn local_time(&self) -> NaiveTime {
        self.now().with_timezone(&Local).time()
    }
}

/// Local calendar date of a UTC instant.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Shared between a test and the component under test via `Arc`; reads
/// never block writers.
#[derive(Debug)]
pub struct ManualClock {
    now: ArcSwap<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: ArcSwap::from_pointee(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.store(Arc::new(instant));
    }

    pub fn advance(&self, by: Duration) {
        self.now.rcu(|current| Arc::new(**current + by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        **self.now.load()
    }
}
