//! Event and venue records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{id, timestamp};

/// Publication status of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Active,
    Draft,
    Other(String),
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl From<String> for EventStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "activo" | "active" => Self::Active,
            "draft" | "borrador" => Self::Draft,
            _ => Self::Other(raw),
        }
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Active => "Activo".to_string(),
            EventStatus::Draft => "Draft".to_string(),
            EventStatus::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fechaInicio", deserialize_with = "timestamp::deserialize")]
    pub starts_at: DateTime<Utc>,
    #[serde(
        rename = "fechaFin",
        default,
        deserialize_with = "timestamp::deserialize_opt"
    )]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(rename = "lugarId", default, deserialize_with = "id::deserialize_opt")]
    pub venue_id: Option<String>,
    #[serde(rename = "organizadorId", deserialize_with = "id::deserialize")]
    pub organizer_id: String,
    #[serde(rename = "capacidad", default)]
    pub capacity: u32,
    #[serde(rename = "categoriaId", default, deserialize_with = "id::deserialize_opt")]
    pub category_id: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: EventStatus,
}

impl Event {
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "ciudad", default)]
    pub city: String,
    #[serde(rename = "capacidad", default)]
    pub capacity: u32,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}
