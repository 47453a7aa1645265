//! Complementary services and their bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{id, timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// A user's booking of a service for a time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBooking {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "servicioId", deserialize_with = "id::deserialize")]
    pub service_id: String,
    #[serde(rename = "usuarioId", deserialize_with = "id::deserialize")]
    pub user_id: String,
    #[serde(rename = "fechaInicio", deserialize_with = "timestamp::deserialize")]
    pub starts_at: DateTime<Utc>,
    #[serde(rename = "fechaFin", deserialize_with = "timestamp::deserialize")]
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceBookingStatus {
    Upcoming,
    Active,
    Finished,
}

impl ServiceBooking {
    /// Status relative to `now`; the window is half-open `[start, end)`.
    pub fn status_at(&self, now: DateTime<Utc>) -> ServiceBookingStatus {
        if now < self.starts_at {
            ServiceBookingStatus::Upcoming
        } else if now < self.ends_at {
            ServiceBookingStatus::Active
        } else {
            ServiceBookingStatus::Finished
        }
    }
}
