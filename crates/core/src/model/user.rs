//! User and role records

use serde::{Deserialize, Serialize};

use super::id;

/// Authenticated user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "rolId", default, deserialize_with = "id::deserialize_opt")]
    pub role_id: Option<String>,
    /// Display name of the role, filled in by the session after lookup
    #[serde(rename = "rolNombre", default)]
    pub role_name: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Role label for display: resolved name, then raw id.
    pub fn role_label(&self) -> &str {
        self.role_name
            .as_deref()
            .or(self.role_id.as_deref())
            .unwrap_or("")
    }

    pub fn role_kind(&self) -> RoleKind {
        RoleKind::from_name(self.role_label())
    }

    /// Whether this user created the record owned by `creator_id`
    pub fn owns(&self, creator_id: &str) -> bool {
        self.id == creator_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Coarse role used for UI gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Admin,
    Organizer,
    Attendee,
    Other,
}

impl RoleKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "admin" | "administrador" | "administrator" => Self::Admin,
            "organizador" | "organizer" => Self::Organizer,
            "asistente" | "attendee" | "usuario" | "cliente" | "user" => Self::Attendee,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role_id: Option<&str>, role_name: Option<&str>) -> User {
        User {
            id: "u-1".into(),
            first_name: "Ana".into(),
            last_name: "Rojas".into(),
            email: "ana@example.com".into(),
            phone: None,
            role_id: role_id.map(Into::into),
            role_name: role_name.map(Into::into),
        }
    }

    #[test]
    fn role_label_prefers_resolved_name() {
        assert_eq!(user(Some("2"), Some("Organizador")).role_label(), "Organizador");
        assert_eq!(user(Some("2"), None).role_label(), "2");
        assert_eq!(user(None, None).role_label(), "");
    }

    #[test]
    fn role_kind_from_name() {
        assert_eq!(RoleKind::from_name(" Administrador "), RoleKind::Admin);
        assert_eq!(RoleKind::from_name("organizer"), RoleKind::Organizer);
        assert_eq!(RoleKind::from_name("3"), RoleKind::Other);
        assert_eq!(user(Some("1"), Some("Admin")).role_kind(), RoleKind::Admin);
    }

    #[test]
    fn parses_backend_profile() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 41,
            "nombre": "Luis",
            "apellido": "Paz",
            "correo": "luis@example.com",
            "rolId": 2
        }))
        .unwrap();
        assert_eq!(user.id, "41");
        assert_eq!(user.role_id.as_deref(), Some("2"));
        assert_eq!(user.full_name(), "Luis Paz");
        assert!(user.role_name.is_none());
    }
}
