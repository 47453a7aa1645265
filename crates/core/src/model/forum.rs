//! Forum and comment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{id, timestamp};

/// Discussion forum attached to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forum {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "eventoId", deserialize_with = "id::deserialize")]
    pub event_id: String,
    #[serde(rename = "creadorId", deserialize_with = "id::deserialize")]
    pub creator_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fechaCreacion", deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// A comment in a forum; replies point at their parent comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "foroId", deserialize_with = "id::deserialize")]
    pub forum_id: String,
    #[serde(
        rename = "comentarioPadreId",
        default,
        deserialize_with = "id::deserialize_opt"
    )]
    pub parent_id: Option<String>,
    #[serde(rename = "usuarioId", deserialize_with = "id::deserialize")]
    pub author_id: String,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "fechaCreacion", deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "fechaActualizacion",
        default,
        deserialize_with = "timestamp::deserialize_opt"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some_and(|at| at > self.created_at)
    }
}
