//! Time source for "now" and "today".
//!
//! Handlers never read the wall clock directly. Listings and reports cover the
//! current local calendar day, so the clock also answers where that day began.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};

/// The current local day so far, taken from a single clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight.
    pub from: DateTime<Utc>,
    /// The reading itself.
    pub to: DateTime<Utc>,
    /// The local calendar date.
    pub date: NaiveDate,
}

impl DayWindow {
    fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            from: local_midnight(now),
            to: now.with_timezone(&Utc),
            date: now.date_naive(),
        }
    }
}

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Local midnight through now.
    fn day_window(&self) -> DayWindow;
}

/// The server's wall clock in its local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn day_window(&self) -> DayWindow {
        DayWindow::at(&Local::now())
    }
}

/// A clock stopped at one instant, with its own UTC offset standing in for
/// the local time zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Stop the clock at `now`.
    #[must_use]
    pub const fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }

    fn day_window(&self) -> DayWindow {
        DayWindow::at(&self.now)
    }
}

/// Midnight of `now`'s local date, as a UTC instant.
fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map_or_else(
            // Midnight skipped by a DST change; reuse the current offset.
            || {
                let offset = i64::from(now.offset().fix().local_minus_utc());
                (midnight - TimeDelta::seconds(offset)).and_utc()
            },
            |start| start.with_timezone(&Utc),
        )
}
