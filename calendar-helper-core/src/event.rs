//! Event types.
//!
//! `StoreEvent` is what a calendar store hands back, with absent fields left
//! as `None`. `EventRecord` is the flat JSON shape fetch-events prints, where
//! every key is always present.

use serde::{Deserialize, Serialize};

use crate::calendar::HostCalendar;

/// An event as reported by the calendar store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreEvent {
    /// Store-issued identifier
    pub identifier: Option<String>,
    pub title: Option<String>,
    /// Seconds since the Unix epoch
    pub start: f64,
    /// Seconds since the Unix epoch
    pub end: f64,
    pub all_day: bool,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Absolute URL string
    pub url: Option<String>,
}

/// The owning calendar as embedded in each record.
///
/// `id` repeats the display title; the store's own calendar identifier is not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarRecord {
    pub id: String,
    pub title: String,
    pub source: String,
}

impl CalendarRecord {
    pub fn from_calendar<C: HostCalendar>(calendar: &C, unknown_source: &str) -> Self {
        CalendarRecord {
            id: calendar.title().to_string(),
            title: calendar.title().to_string(),
            source: calendar
                .source_title()
                .map(str::to_string)
                .unwrap_or_else(|| unknown_source.to_string()),
        }
    }
}

/// One element of the fetch-events output array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: Option<String>,
    pub title: String,
    pub start_date: f64,
    pub end_date: f64,
    pub is_all_day: bool,
    pub location: String,
    pub notes: String,
    pub url: String,
    pub calendar: CalendarRecord,
}

impl EventRecord {
    pub fn from_store(event: StoreEvent, calendar: CalendarRecord) -> Self {
        if event.identifier.is_none() {
            tracing::warn!(title = ?event.title, "store returned an event without an identifier");
        }

        EventRecord {
            id: event.identifier,
            title: event.title.unwrap_or_default(),
            start_date: event.start,
            end_date: event.end,
            is_all_day: event.all_day,
            location: event.location.unwrap_or_default(),
            notes: event.notes.unwrap_or_default(),
            url: event.url.unwrap_or_default(),
            calendar,
        }
    }
}
