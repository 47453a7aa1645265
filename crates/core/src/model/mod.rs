//! Records mirrored from backend JSON
//!
//! The backend names fields in Spanish; Rust fields are renamed through serde.
//! Identifiers may arrive as numbers or strings and are normalized to `String`.

mod booking;
mod event;
mod forum;
mod payment;
mod service;
mod user;

pub use booking::{Booking, BookingStatus};
pub use event::{Event, EventStatus, Venue};
pub use forum::{Comment, Forum};
pub use payment::PaymentMethod;
pub use service::{Service, ServiceBooking, ServiceBookingStatus};
pub use user::{Role, RoleKind, User};

/// Serde helpers for backend identifiers
pub mod id {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use serde_json::Value;

    fn from_value<E: de::Error>(value: Value) -> Result<Option<String>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(E::custom(format!("expected string or number id, got {}", other))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        from_value(Value::deserialize(d)?)?.ok_or_else(|| de::Error::custom("missing id"))
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        from_value(Value::deserialize(d)?)
    }
}

/// Timestamps without an offset are taken as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    fn parse<E: de::Error>(raw: &str) -> Result<DateTime<Utc>, E> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| E::custom(format!("invalid timestamp {:?}: {}", raw, e)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw)
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw).map(Some),
            _ => Ok(None),
        }
    }
}
