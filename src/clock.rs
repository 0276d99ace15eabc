//! Sources of "today" for queries without an explicit as-of date.

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Supplies the current calendar date.
///
/// The resolver asks on every call that omits an as-of date, so a
/// long-running process rolls over at midnight without being restarted.
pub trait Clock: Send + Sync {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// The wall clock, read in the local timezone or in a configured IANA zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    /// A clock reading dates in the process's local timezone.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock reading dates in `timezone`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nadir::{Clock, SystemClock};
    ///
    /// let clock = SystemClock::with_timezone(chrono_tz::Asia::Tokyo);
    /// let today = clock.today();
    /// # let _ = today;
    /// ```
    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }

    /// The configured timezone, if any.
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// A clock stuck on one date, for reproducible and historical queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
