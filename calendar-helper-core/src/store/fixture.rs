//! JSON fixture standing in for the host calendar store.
//!
//! ```json
//! {
//!   "calendars": [
//!     {
//!       "title": "Work",
//!       "source": "iCloud",
//!       "events": [
//!         { "id": "E1", "title": "Holiday", "start": "2026-10-16T00:00:00Z",
//!           "end": "2026-10-17T00:00:00Z", "all_day": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::calendar::HostCalendar;
use crate::date_window::{DateWindow, epoch_seconds};
use crate::error::{HelperError, HelperResult};
use crate::event::StoreEvent;

use super::CalendarStore;

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCalendar {
    pub title: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub events: Vec<FixtureEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<&FixtureEvent> for StoreEvent {
    fn from(event: &FixtureEvent) -> Self {
        StoreEvent {
            identifier: event.id.clone(),
            title: event.title.clone(),
            start: epoch_seconds(&event.start),
            end: epoch_seconds(&event.end),
            all_day: event.all_day,
            location: event.location.clone(),
            notes: event.notes.clone(),
            url: event.url.clone(),
        }
    }
}

impl HostCalendar for FixtureCalendar {
    fn title(&self) -> &str {
        &self.title
    }

    fn source_title(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    calendars: Vec<FixtureCalendar>,
}

/// Calendars held in memory, loaded from a fixture file or built directly.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    calendars: Vec<FixtureCalendar>,
}

impl FixtureStore {
    pub fn new(calendars: Vec<FixtureCalendar>) -> HelperResult<Self> {
        for calendar in &calendars {
            if let Some(event) = calendar.events.iter().find(|e| e.end < e.start) {
                return Err(HelperError::Fixture(format!(
                    "event {:?} in calendar '{}' ends before it starts",
                    event.id.as_deref().or(event.title.as_deref()).unwrap_or("<unnamed>"),
                    calendar.title
                )));
            }
        }

        Ok(FixtureStore { calendars })
    }

    pub fn load(path: &Path) -> HelperResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HelperError::Fixture(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_json(&contents)
            .map_err(|e| HelperError::Fixture(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(contents: &str) -> HelperResult<Self> {
        let file: FixtureFile = serde_json::from_str(contents)?;
        Self::new(file.calendars)
    }
}

impl CalendarStore for FixtureStore {
    type Calendar = FixtureCalendar;

    fn request_access(&self) {
        tracing::debug!("fixture store grants access unconditionally");
    }

    fn calendars(&self) -> HelperResult<Vec<FixtureCalendar>> {
        Ok(self.calendars.clone())
    }

    fn events(&self, calendar: &FixtureCalendar, window: &DateWindow) -> HelperResult<Vec<StoreEvent>> {
        Ok(calendar
            .events
            .iter()
            .filter(|event| window.overlaps(&event.start, &event.end))
            .map(StoreEvent::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FIXTURE: &str = r#"{
        "calendars": [
            {
                "title": "Work",
                "source": "iCloud",
                "events": [
                    { "id": "late", "title": "Retro", "start": "2026-10-20T14:00:00Z", "end": "2026-10-20T15:00:00Z" },
                    { "id": "early", "title": "Standup", "start": "2026-10-16T09:00:00Z", "end": "2026-10-16T09:15:00Z" },
                    { "id": "old", "title": "Kickoff", "start": "2026-09-01T09:00:00Z", "end": "2026-09-01T10:00:00Z" }
                ]
            },
            { "title": "Home" }
        ]
    }"#;

    fn window() -> DateWindow {
        DateWindow {
            start: Utc.with_ymd_and_hms(2026, 10, 15, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 10, 25, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_events_filtered_by_window_in_fixture_order() {
        let store = FixtureStore::from_json(FIXTURE).unwrap();
        let calendars = store.calendars().unwrap();
        let events = store.events(&calendars[0], &window()).unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.identifier.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn test_calendar_without_events_or_source() {
        let store = FixtureStore::from_json(FIXTURE).unwrap();
        let calendars = store.calendars().unwrap();

        assert_eq!(calendars[1].title(), "Home");
        assert_eq!(calendars[1].source_title(), None);
        assert!(store.events(&calendars[1], &window()).unwrap().is_empty());
    }

    #[test]
    fn test_event_ending_before_start_is_rejected() {
        let json = r#"{ "calendars": [ { "title": "Work", "events": [
            { "id": "bad", "start": "2026-10-16T10:00:00Z", "end": "2026-10-16T09:00:00Z" }
        ] } ] }"#;

        let err = FixtureStore::from_json(json).unwrap_err();
        assert!(matches!(err, HelperError::Fixture(msg) if msg.contains("bad")));
    }

    #[test]
    fn test_missing_file_is_a_fixture_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureStore::load(&dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(err, HelperError::Fixture(_)));
    }
}
