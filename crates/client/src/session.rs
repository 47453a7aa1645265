//! Session service
//!
//! Holds the authenticated user for the lifetime of the process. It is
//! constructed once and handed to every page and form that needs it.
//! Nothing refreshes it behind the caller's back: after a state-changing
//! action the caller runs [`SessionService::refresh`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use vivopass_core::model::User;
use vivopass_core::ErrorKind;

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::notify::Notifier;
use crate::storage::{SessionStorage, StoredSession};

/// Point-in-time view of the session
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
    /// Category of the last failed refresh, cleared on success
    pub last_error: Option<ErrorKind>,
}

pub struct SessionService {
    client: ApiClient,
    storage: Arc<dyn SessionStorage>,
    notifier: Notifier,
    resolve_role_names: bool,
    state: RwLock<SessionSnapshot>,
    generation: AtomicU64,
}

impl SessionService {
    pub fn new(client: ApiClient, storage: Arc<dyn SessionStorage>, notifier: Notifier) -> Self {
        Self {
            client,
            storage,
            notifier,
            resolve_role_names: true,
            state: RwLock::new(SessionSnapshot {
                is_loading: true,
                ..SessionSnapshot::default()
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Enable or disable the role name lookup after the profile loads
    pub fn with_role_resolution(mut self, enabled: bool) -> Self {
        self.resolve_role_names = enabled;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    /// Stored credentials, when a non-empty token is present
    pub async fn stored(&self) -> Result<Option<StoredSession>> {
        Ok(self.storage.load().await?.filter(StoredSession::has_token))
    }

    /// Token and user id, or the error a form should report without calling out
    pub async fn credentials(&self) -> Result<(String, String)> {
        let stored = self.stored().await?.ok_or(ClientError::MissingSession)?;
        let user_id = stored.user_id.ok_or(ClientError::MissingIdentifier)?;
        Ok((stored.token, user_id))
    }

    /// Reload the user from the backend.
    ///
    /// Failures leave the user unset and raise one notification. A refresh
    /// overtaken by a newer refresh or a logout is discarded.
    pub async fn refresh(&self) -> Option<User> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.is_loading = true;

        let result = self.load_user().await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale session refresh");
            return state.user.clone();
        }
        state.is_loading = false;
        match result {
            Ok(user) => {
                state.user = user;
                state.last_error = None;
            }
            Err(e) => {
                let kind = profile_error_kind(&e);
                warn!("Session refresh failed: {}", e);
                state.user = None;
                state.last_error = Some(kind);
                self.notifier.error(kind);
            }
        }
        state.user.clone()
    }

    async fn load_user(&self) -> Result<Option<User>> {
        let Some(stored) = self.stored().await? else {
            debug!("No stored session");
            return Ok(None);
        };
        let user_id = stored
            .user_id
            .as_deref()
            .ok_or(ClientError::MissingIdentifier)?;

        let mut user = self.client.fetch_user(user_id, &stored.token).await?;

        let role_id = user.role_id.clone().or_else(|| stored.role_id.clone());
        if let Some(role_id) = role_id.filter(|_| self.resolve_role_names) {
            match self.client.fetch_role(&role_id, &stored.token).await {
                Ok(role) => user.role_name = Some(role.name),
                Err(e) => {
                    warn!(role_id = %role_id, "Role lookup failed, showing raw role id: {}", e);
                    user.role_name = Some(role_id);
                }
            }
        }

        info!("Session loaded for user {}", user.id);
        Ok(Some(user))
    }

    /// Persist credentials from a successful login and load the profile
    pub async fn establish(&self, session: StoredSession) -> Result<Option<User>> {
        self.storage.save(&session).await?;
        Ok(self.refresh().await)
    }

    /// Forget the stored credentials and the current user
    pub async fn logout(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.storage.clear().await?;
        let mut state = self.state.write().await;
        state.user = None;
        state.is_loading = false;
        state.last_error = None;
        info!("Logged out");
        self.notifier.info("You have been logged out.");
        Ok(())
    }
}

/// A profile lookup rejected as a bad request without a recognised code
/// means the stored user id is unusable.
fn profile_error_kind(e: &ClientError) -> ErrorKind {
    match e {
        ClientError::Api {
            status: 400, code, ..
        } if code.as_deref().and_then(ErrorKind::from_code).is_none() => {
            ErrorKind::MissingIdentifier
        }
        _ => e.kind(),
    }
}
