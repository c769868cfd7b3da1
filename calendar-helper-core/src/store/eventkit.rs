//! EventKit-backed calendar store (macOS).
//!
//! Talks to `EKEventStore` through the Objective-C runtime. Every call that
//! returns an object goes through `msg_send_id!`, so lifetimes are handled by
//! `Retained`; scalar getters use `msg_send!`.

use std::ffi::{CStr, c_char};

use block2::RcBlock;
use objc2::rc::{Retained, autoreleasepool};
use objc2::runtime::{AnyObject, Bool};
use objc2::{class, msg_send, msg_send_id, sel};

use crate::calendar::HostCalendar;
use crate::date_window::DateWindow;
use crate::error::{HelperError, HelperResult};
use crate::event::StoreEvent;

use super::CalendarStore;

#[link(name = "EventKit", kind = "framework")]
unsafe extern "C" {}

/// `EKEntityTypeEvent`
const ENTITY_TYPE_EVENT: usize = 0;

pub struct EventKitCalendar {
    title: String,
    source: Option<String>,
    raw: Retained<AnyObject>,
}

impl HostCalendar for EventKitCalendar {
    fn title(&self) -> &str {
        &self.title
    }

    fn source_title(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

pub struct EventKitStore {
    store: Retained<AnyObject>,
}

impl EventKitStore {
    pub fn open() -> HelperResult<Self> {
        let store: Option<Retained<AnyObject>> = unsafe { msg_send_id![class!(EKEventStore), new] };
        let store = store.ok_or_else(|| HelperError::StoreUnavailable("EKEventStore could not be created".into()))?;

        tracing::debug!("opened EventKit store");
        Ok(EventKitStore { store })
    }
}

impl CalendarStore for EventKitStore {
    type Calendar = EventKitCalendar;

    fn request_access(&self) {
        // The completion handler runs later on an EventKit queue; nothing waits for it.
        let completion: RcBlock<dyn Fn(Bool, *mut AnyObject)> = RcBlock::new(|granted: Bool, _error: *mut AnyObject| {
            tracing::debug!(granted = granted.as_bool(), "calendar access request completed");
        });

        let full_access: Bool =
            unsafe { msg_send![&*self.store, respondsToSelector: sel!(requestFullAccessToEventsWithCompletion:)] };

        if full_access.as_bool() {
            // macOS 14+
            let _: () = unsafe { msg_send![&*self.store, requestFullAccessToEventsWithCompletion: &*completion] };
        } else {
            let _: () = unsafe {
                msg_send![&*self.store, requestAccessToEntityType: ENTITY_TYPE_EVENT, completion: &*completion]
            };
        }
    }

    fn calendars(&self) -> HelperResult<Vec<EventKitCalendar>> {
        autoreleasepool(|_| {
            let array: Option<Retained<AnyObject>> =
                unsafe { msg_send_id![&*self.store, calendarsForEntityType: ENTITY_TYPE_EVENT] };
            let Some(array) = array else {
                return Ok(Vec::new());
            };

            let count: usize = unsafe { msg_send![&*array, count] };
            let mut calendars = Vec::with_capacity(count);

            for index in 0..count {
                let calendar: Option<Retained<AnyObject>> = unsafe { msg_send_id![&*array, objectAtIndex: index] };
                let Some(calendar) = calendar else {
                    continue;
                };

                let title = text(unsafe { msg_send_id![&*calendar, title] }).unwrap_or_default();
                let source: Option<Retained<AnyObject>> = unsafe { msg_send_id![&*calendar, source] };
                let source = source.and_then(|source| text(unsafe { msg_send_id![&*source, title] }));

                calendars.push(EventKitCalendar {
                    title,
                    source,
                    raw: calendar,
                });
            }

            Ok(calendars)
        })
    }

    fn events(&self, calendar: &EventKitCalendar, window: &DateWindow) -> HelperResult<Vec<StoreEvent>> {
        autoreleasepool(|_| {
            let start = nsdate(window.start_timestamp())?;
            let end = nsdate(window.end_timestamp())?;

            let scope: Option<Retained<AnyObject>> =
                unsafe { msg_send_id![class!(NSArray), arrayWithObject: &*calendar.raw] };
            let scope = scope.ok_or_else(|| HelperError::Store("could not build calendar list".into()))?;

            let predicate: Option<Retained<AnyObject>> = unsafe {
                msg_send_id![
                    &*self.store,
                    predicateForEventsWithStartDate: &*start,
                    endDate: &*end,
                    calendars: &*scope
                ]
            };
            let predicate = predicate.ok_or_else(|| HelperError::Store("could not build event predicate".into()))?;

            let matches: Option<Retained<AnyObject>> =
                unsafe { msg_send_id![&*self.store, eventsMatchingPredicate: &*predicate] };
            let Some(matches) = matches else {
                return Ok(Vec::new());
            };

            let count: usize = unsafe { msg_send![&*matches, count] };
            let mut events = Vec::with_capacity(count);

            for index in 0..count {
                let event: Option<Retained<AnyObject>> = unsafe { msg_send_id![&*matches, objectAtIndex: index] };
                if let Some(event) = event {
                    events.push(read_event(&event)?);
                }
            }

            Ok(events)
        })
    }
}

fn read_event(event: &AnyObject) -> HelperResult<StoreEvent> {
    let identifier = text(unsafe { msg_send_id![event, eventIdentifier] });

    let start: Option<Retained<AnyObject>> = unsafe { msg_send_id![event, startDate] };
    let end: Option<Retained<AnyObject>> = unsafe { msg_send_id![event, endDate] };
    let (Some(start), Some(end)) = (start, end) else {
        return Err(HelperError::Store(format!(
            "event {} has no start or end date",
            identifier.as_deref().unwrap_or("<unknown>")
        )));
    };

    let all_day: Bool = unsafe { msg_send![event, isAllDay] };
    let url: Option<Retained<AnyObject>> = unsafe { msg_send_id![event, URL] };

    Ok(StoreEvent {
        identifier,
        title: text(unsafe { msg_send_id![event, title] }),
        start: unsafe { msg_send![&*start, timeIntervalSince1970] },
        end: unsafe { msg_send![&*end, timeIntervalSince1970] },
        all_day: all_day.as_bool(),
        location: text(unsafe { msg_send_id![event, location] }),
        notes: text(unsafe { msg_send_id![event, notes] }),
        url: url.and_then(|url| text(unsafe { msg_send_id![&*url, absoluteString] })),
    })
}

fn nsdate(seconds: f64) -> HelperResult<Retained<AnyObject>> {
    let date: Option<Retained<AnyObject>> =
        unsafe { msg_send_id![class!(NSDate), dateWithTimeIntervalSince1970: seconds] };
    date.ok_or_else(|| HelperError::Store(format!("could not create NSDate for {}", seconds)))
}

/// Copy an `NSString` into Rust; nil stays `None`.
fn text(value: Option<Retained<AnyObject>>) -> Option<String> {
    let value = value?;
    let cstr: *const c_char = unsafe { msg_send![&*value, UTF8String] };
    if cstr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(cstr) }.to_string_lossy().into_owned())
}
