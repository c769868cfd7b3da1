//! Core types for calendar-helper.
//!
//! This crate provides everything `fetch-events` needs apart from argument parsing:
//! - `store` for reading calendars and events from the host calendar store
//! - `date_window` for the window arithmetic around "now"
//! - `event` for the flat JSON records
//! - `output` for the JSON encoding written to stdout
//! - `fetch` for the lookup-and-query procedure tying them together

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date_window;
pub mod error;
pub mod event;
pub mod fetch;
pub mod output;
pub mod store;

pub use error::{HelperError, HelperResult};
