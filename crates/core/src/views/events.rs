//! Event listings

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::search::filter_by_text;
use crate::model::{Event, User};

/// Ids of the events organized by `user`
pub fn owned_event_ids<'a>(events: &'a [Event], user: &User) -> HashSet<&'a str> {
    events
        .iter()
        .filter(|e| e.organizer_id == user.id)
        .map(|e| e.id.as_str())
        .collect()
}

/// "My Events": events organized by the current user, filtered by name.
pub fn my_events(events: &[Event], user: Option<&User>, query: &str) -> Vec<Event> {
    let Some(user) = user else {
        return Vec::new();
    };
    let owned: Vec<Event> = events
        .iter()
        .filter(|e| e.organizer_id == user.id)
        .cloned()
        .collect();
    filter_by_text(owned, query, |e| e.name.as_str())
}

/// Public catalogue: active events that have not started yet, soonest first.
pub fn browse_events(events: &[Event], query: &str, now: DateTime<Utc>) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .iter()
        .filter(|e| e.is_active() && e.starts_at >= now)
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
    filter_by_text(upcoming, query, |e| e.name.as_str())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::model::{Event, EventStatus, User};

    pub fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            first_name: "Test".into(),
            last_name: "User".into(),
            email: format!("{}@example.com", id),
            phone: None,
            role_id: None,
            role_name: None,
        }
    }

    pub fn event(id: &str, name: &str, organizer: &str, day: u32) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            starts_at: Utc.with_ymd_and_hms(2025, 7, day, 20, 0, 0).unwrap(),
            ends_at: None,
            venue_id: None,
            organizer_id: organizer.to_string(),
            capacity: 100,
            category_id: None,
            status: EventStatus::Active,
        }
    }
}
