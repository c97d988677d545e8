//! Time source for transaction timestamps

use chrono::{Local, NaiveDateTime, Timelike};

/// Source of timestamps for new transaction records
pub trait Clock: Send + Sync {
    /// Current local wall-clock time, truncated to whole seconds
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
