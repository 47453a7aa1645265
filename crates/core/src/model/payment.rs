use serde::{Deserialize, Serialize};

use super::id;

/// A registered card, as returned by the backend (never the full number)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "usuarioId", deserialize_with = "id::deserialize")]
    pub user_id: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "titular")]
    pub holder: String,
    #[serde(rename = "ultimos4", default)]
    pub last_four: Option<String>,
    #[serde(rename = "expiracion", default)]
    pub expiry: Option<String>,
}
