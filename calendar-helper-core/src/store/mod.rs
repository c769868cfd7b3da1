//! Calendar store access.
//!
//! On macOS the host store is EventKit. A JSON fixture can stand in for it
//! anywhere (see [`fixture`]).

#[cfg(target_os = "macos")]
pub mod eventkit;
pub mod fixture;

use crate::calendar::HostCalendar;
use crate::date_window::DateWindow;
use crate::error::HelperResult;
use crate::event::StoreEvent;

/// Read-only view of a calendar store.
pub trait CalendarStore {
    type Calendar: HostCalendar;

    /// Ask the store for access to events.
    ///
    /// Returns immediately without waiting for the user's answer and without
    /// reporting it. On a first run the permission prompt may still be
    /// pending when the calendars are read, in which case the store simply
    /// reports nothing.
    fn request_access(&self);

    /// All calendars holding events, in the order the store lists them.
    fn calendars(&self) -> HelperResult<Vec<Self::Calendar>>;

    /// Events of `calendar` overlapping `window`, in store order.
    fn events(&self, calendar: &Self::Calendar, window: &DateWindow) -> HelperResult<Vec<StoreEvent>>;
}

/// Open the host operating system's calendar store.
#[cfg(target_os = "macos")]
pub fn open_host_store() -> HelperResult<impl CalendarStore> {
    eventkit::EventKitStore::open()
}

/// Open the host operating system's calendar store.
#[cfg(not(target_os = "macos"))]
pub fn open_host_store() -> HelperResult<impl CalendarStore> {
    Err::<fixture::FixtureStore, _>(crate::error::HelperError::StoreUnavailable(
        "EventKit is only available on macOS; set CALENDAR_HELPER_FIXTURE to read a fixture instead".into(),
    ))
}
