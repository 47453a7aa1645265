//! Ticket booking records

use serde::{Deserialize, Serialize};

use super::id;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Confirmed,
    PendingPayment,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    /// Parse a user-supplied status filter; unlike deserialization this
    /// rejects unknown values.
    pub fn parse_filter(raw: &str) -> Result<Self> {
        match Self::from(raw.to_string()) {
            Self::Other(_) => Err(Error::InvalidInput(format!(
                "unknown booking status: {}",
                raw
            ))),
            status => Ok(status),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::PendingPayment => "Pending Payment",
            Self::Cancelled => "Cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "confirmed" | "confirmada" => Self::Confirmed,
            "pendingpayment" | "pending" | "pendientedepago" => Self::PendingPayment,
            "cancelled" | "canceled" | "cancelada" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "eventoId", deserialize_with = "id::deserialize")]
    pub event_id: String,
    #[serde(rename = "usuarioId", default, deserialize_with = "id::deserialize_opt")]
    pub user_id: Option<String>,
    /// Pricing tier name
    #[serde(rename = "tipoEntrada", default)]
    pub tier: String,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "asiento", default)]
    pub seat: Option<String>,
    #[serde(rename = "estado")]
    pub status: BookingStatus,
}
