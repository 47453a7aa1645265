//! Session storage
//!
//! The bearer token and the ids written at login are the only client-side
//! session state. They outlive any single page, so they sit behind a small
//! storage trait with an in-memory and a file-backed implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;

/// Credentials written at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
}

impl StoredSession {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: Some(user_id.into()),
            role_id: None,
        }
    }

    pub fn with_role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// `exp` claim of the token when it is a readable JWT.
    ///
    /// Informational only: the signature is not checked and the backend
    /// remains the judge of expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let payload = self.token.split('.').nth(1)?;
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        let exp = claims.get("exp")?.as_i64()?;
        DateTime::from_timestamp(exp, 0)
    }
}

/// Where the session credentials live
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self) -> Result<Option<StoredSession>>;

    async fn save(&self, session: &StoredSession) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Process-lifetime storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    session: RwLock<Option<StoredSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

/// JSON file storage with an in-memory cache
pub struct FileStorage {
    path: PathBuf,
    cache: RwLock<Option<StoredSession>>,
}

impl FileStorage {
    /// Open the session file; a missing file means no session.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                None
            } else {
                Some(serde_json::from_str(&content)?)
            }
        } else {
            None
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.cache.read().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, content).await?;
        *self.cache.write().await = Some(session.clone());
        debug!("Session saved to {:?}", self.path);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path).await?;
        }
        *self.cache.write().await = None;
        Ok(())
    }
}
