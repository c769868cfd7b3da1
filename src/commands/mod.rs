pub mod fetch_events;
