//! Remote collections
//!
//! One fetch/loading/error state machine shared by every page, parameterized
//! by endpoint path and element type.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ClientError, UiError};
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// A list fetched from one endpoint
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    path: String,
    requires_auth: bool,
    data: Vec<T>,
    status: FetchStatus,
    error: Option<UiError>,
}

impl<T> RemoteCollection<T> {
    /// Collection that needs a bearer token
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: true,
            data: Vec::new(),
            status: FetchStatus::Idle,
            error: None,
        }
    }

    /// Collection readable without a session; a token is still sent if present
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            requires_auth: false,
            ..Self::new(path)
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    fn fail(&mut self, e: &ClientError) {
        self.status = FetchStatus::Failed;
        self.error = Some(UiError::from(e));
    }
}

impl<T: DeserializeOwned> RemoteCollection<T> {
    /// Fetch the collection.
    ///
    /// On failure the previous data is kept and the error recorded. A
    /// collection that needs a token fails without a request when none is
    /// given.
    pub async fn load(&mut self, client: &ApiClient, token: Option<&str>) -> FetchStatus {
        if self.requires_auth && token.is_none() {
            self.fail(&ClientError::MissingSession);
            return self.status;
        }

        self.status = FetchStatus::Loading;
        match client.get_json::<Vec<T>>(&self.path, token).await {
            Ok(items) => {
                self.data = items;
                self.status = FetchStatus::Ready;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", self.path, e);
                self.fail(&e);
            }
        }
        self.status
    }

    /// Manual retry after a failure
    pub async fn retry(&mut self, client: &ApiClient, token: Option<&str>) -> FetchStatus {
        self.load(client, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vivopass_core::model::Event;
    use vivopass_core::ErrorKind;

    #[tokio::test]
    async fn missing_token_fails_without_request() {
        // Nothing listens on port 9; a request would surface as a connection error.
        let client = ApiClient::with_base_url("http://127.0.0.1:9");
        let mut events: RemoteCollection<Event> = RemoteCollection::new("/api/Evento");

        let status = events.load(&client, None).await;
        assert_eq!(status, FetchStatus::Failed);
        assert_eq!(events.error().map(|e| e.kind), Some(ErrorKind::MissingSession));
        assert!(events.data().is_empty());
    }

    #[test]
    fn starts_idle() {
        let events: RemoteCollection<Event> = RemoteCollection::public("/api/Evento");
        assert_eq!(events.status(), FetchStatus::Idle);
        assert!(events.error().is_none());
        assert_eq!(events.path(), "/api/Evento");
    }
}
