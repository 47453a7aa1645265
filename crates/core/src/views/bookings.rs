//! The user's ticket bookings joined with their events

use std::collections::HashMap;

use serde::Serialize;

use super::search::matches_query;
use crate::model::{Booking, BookingStatus, Event};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingView {
    pub booking: Booking,
    pub event: Event,
}

/// Join bookings to events, latest event first.
///
/// Bookings referencing an event that was not fetched are dropped. `status`
/// narrows the result when given; `query` matches the event name.
pub fn my_bookings(
    bookings: &[Booking],
    events: &[Event],
    status: Option<&BookingStatus>,
    query: &str,
) -> Vec<BookingView> {
    let by_id: HashMap<&str, &Event> = events.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut rows: Vec<BookingView> = bookings
        .iter()
        .filter(|b| status.map_or(true, |s| &b.status == s))
        .filter_map(|b| {
            let event = by_id.get(b.event_id.as_str())?;
            matches_query(&event.name, query).then(|| BookingView {
                booking: b.clone(),
                event: (*event).clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.event.starts_at.cmp(&a.event.starts_at));
    rows
}
