//! Clock
//!
//! Source of "today" for anything priced or numbered by calendar date.

use jiff::{Zoned, civil::Date};

/// Supplies the current calendar date.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Today's date.
    fn today(&self) -> Date;
}

/// Reads the date from the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// A clock stopped on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Date);

impl FixedClock {
    /// Create a clock that always reports `date`.
    pub fn new(date: Date) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
