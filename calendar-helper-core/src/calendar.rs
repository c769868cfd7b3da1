//! Calendars as listed by a store, and lookup by display title.

/// A calendar handle listed by a [`crate::store::CalendarStore`].
pub trait HostCalendar {
    /// Display title shown in Calendar.app
    fn title(&self) -> &str;

    /// Title of the account/source the calendar belongs to, if any.
    fn source_title(&self) -> Option<&str>;
}

/// Find the first calendar whose title is exactly `name`.
///
/// Titles are not unique in the store; when several calendars share a title
/// the one listed first wins. Matching is case-sensitive.
pub fn find_by_title<'a, C: HostCalendar>(calendars: &'a [C], name: &str) -> Option<&'a C> {
    calendars.iter().find(|calendar| calendar.title() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture::FixtureCalendar;

    fn calendar(title: &str, source: &str) -> FixtureCalendar {
        FixtureCalendar {
            title: title.to_string(),
            source: Some(source.to_string()),
            events: vec![],
        }
    }

    #[test]
    fn test_first_match_wins_on_duplicate_titles() {
        let calendars = vec![
            calendar("Home", "iCloud"),
            calendar("Work", "Exchange"),
            calendar("Work", "Google"),
        ];

        let found = find_by_title(&calendars, "Work").unwrap();
        assert_eq!(found.source_title(), Some("Exchange"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let calendars = vec![calendar("Work", "iCloud")];

        assert!(find_by_title(&calendars, "work").is_none());
        assert!(find_by_title(&calendars, "Work ").is_none());
    }

    #[test]
    fn test_no_calendars() {
        let calendars: Vec<FixtureCalendar> = vec![];
        assert!(find_by_title(&calendars, "Work").is_none());
    }
}
