//! Date window around "now" for event queries.

use chrono::{DateTime, Days, TimeDelta, TimeZone, Utc};

use crate::error::{HelperError, HelperResult};

/// Closed time window `[start, end]` handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Window from `days_back` days before `now` to `days_ahead` days after it.
    ///
    /// Days are calendar days in `now`'s timezone, so a window crossing a DST
    /// change keeps the wall-clock time of day. When the shifted wall-clock
    /// time is skipped or repeated by the timezone, fixed 24h days are used.
    pub fn around<Tz: TimeZone>(now: &DateTime<Tz>, days_back: u32, days_ahead: u32) -> HelperResult<Self> {
        Ok(DateWindow {
            start: shift_days(now, days_back, Direction::Back)?,
            end: shift_days(now, days_ahead, Direction::Ahead)?,
        })
    }

    /// Seconds since the Unix epoch, as the store expects them.
    pub fn start_timestamp(&self) -> f64 {
        epoch_seconds(&self.start)
    }

    pub fn end_timestamp(&self) -> f64 {
        epoch_seconds(&self.end)
    }

    /// Whether an event spanning `[start, end]` overlaps this window.
    ///
    /// An event ending exactly at the window start does not overlap, so a
    /// zero-width window selects only events in progress at that instant.
    pub fn overlaps(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
        *start <= self.end && *end > self.start
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Back,
    Ahead,
}

fn shift_days<Tz: TimeZone>(now: &DateTime<Tz>, days: u32, direction: Direction) -> HelperResult<DateTime<Utc>> {
    let calendar_days = Days::new(u64::from(days));
    let by_calendar = match direction {
        Direction::Back => now.clone().checked_sub_days(calendar_days),
        Direction::Ahead => now.clone().checked_add_days(calendar_days),
    };

    let shifted = by_calendar.or_else(|| {
        let fixed = TimeDelta::try_days(i64::from(days))?;
        match direction {
            Direction::Back => now.clone().checked_sub_signed(fixed),
            Direction::Ahead => now.clone().checked_add_signed(fixed),
        }
    });

    shifted
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(HelperError::WindowOutOfRange { days })
}

/// Fractional seconds since the Unix epoch.
pub fn epoch_seconds(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_micros()) / 1_000_000.0
}
