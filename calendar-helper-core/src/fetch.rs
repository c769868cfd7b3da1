//! Look up a calendar by title and list its events around "now".

use chrono::{DateTime, TimeZone};

use crate::calendar::{HostCalendar, find_by_title};
use crate::date_window::DateWindow;
use crate::error::HelperResult;
use crate::event::{CalendarRecord, EventRecord};
use crate::store::CalendarStore;

/// What to fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub calendar_name: String,
    pub days_back: u32,
    pub days_ahead: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Events in store order (may be empty).
    Events(Vec<EventRecord>),
    CalendarNotFound { name: String },
}

/// Run one fetch against `store`, with the window centered on `now`.
///
/// `unknown_source` is reported as the calendar source when the store has none.
pub fn fetch_events<S, Tz>(
    store: &S,
    request: &FetchRequest,
    now: &DateTime<Tz>,
    unknown_source: &str,
) -> HelperResult<FetchOutcome>
where
    S: CalendarStore,
    Tz: TimeZone,
{
    store.request_access();

    let calendars = store.calendars()?;
    tracing::debug!(count = calendars.len(), "listed calendars");

    let Some(calendar) = find_by_title(&calendars, &request.calendar_name) else {
        tracing::debug!(name = %request.calendar_name, "no calendar with that title");
        return Ok(FetchOutcome::CalendarNotFound {
            name: request.calendar_name.clone(),
        });
    };

    let window = DateWindow::around(now, request.days_back, request.days_ahead)?;
    tracing::debug!(
        calendar = calendar.title(),
        start = %window.start,
        end = %window.end,
        "querying events"
    );

    let events = store.events(calendar, &window)?;
    tracing::debug!(count = events.len(), "store returned events");

    let calendar_record = CalendarRecord::from_calendar(calendar, unknown_source);
    let records = events
        .into_iter()
        .map(|event| EventRecord::from_store(event, calendar_record.clone()))
        .collect();

    Ok(FetchOutcome::Events(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture::{FixtureCalendar, FixtureEvent, FixtureStore};
    use chrono::{Duration, Utc};

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> FixtureEvent {
        FixtureEvent {
            id: Some(id.to_string()),
            title: Some(id.to_string()),
            start,
            end,
            all_day: false,
            location: None,
            notes: None,
            url: None,
        }
    }

    fn request(name: &str, days_back: u32, days_ahead: u32) -> FetchRequest {
        FetchRequest {
            calendar_name: name.to_string(),
            days_back,
            days_ahead,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_unknown_calendar() {
        let store = FixtureStore::new(vec![]).unwrap();
        let outcome = fetch_events(&store, &request("Work", 1, 1), &now(), "Unknown").unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::CalendarNotFound {
                name: "Work".to_string()
            }
        );
    }

    #[test]
    fn test_empty_calendar_with_zero_window() {
        let store = FixtureStore::new(vec![FixtureCalendar {
            title: "Test".to_string(),
            source: None,
            events: vec![],
        }])
        .unwrap();

        let outcome = fetch_events(&store, &request("Test", 0, 0), &now(), "Unknown").unwrap();
        assert_eq!(outcome, FetchOutcome::Events(vec![]));
    }

    #[test]
    fn test_only_matched_calendar_is_queried() {
        let now = now();
        let store = FixtureStore::new(vec![
            FixtureCalendar {
                title: "Home".to_string(),
                source: Some("iCloud".to_string()),
                events: vec![event("dinner", now, now + Duration::hours(2))],
            },
            FixtureCalendar {
                title: "Work".to_string(),
                source: None,
                events: vec![
                    event("standup", now + Duration::days(1), now + Duration::days(1) + Duration::minutes(15)),
                    event("planning", now - Duration::days(10), now - Duration::days(10) + Duration::hours(1)),
                    event("review", now - Duration::hours(3), now - Duration::hours(2)),
                ],
            },
        ])
        .unwrap();

        let FetchOutcome::Events(records) = fetch_events(&store, &request("Work", 2, 7), &now, "Unknown").unwrap()
        else {
            panic!("expected events");
        };

        let ids: Vec<_> = records.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["standup", "review"]);
        assert!(records.iter().all(|r| r.start_date <= r.end_date));
        assert!(records.iter().all(|r| r.calendar.title == "Work" && r.calendar.source == "Unknown"));
    }
}
