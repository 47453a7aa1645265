//! In-process stub of the VivoPass backend.
//!
//! Routes are canned `(status, json)` replies keyed by method and path.
//! Every request is recorded so tests can assert on what was (not) sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use vivopass_client::{ApiClient, MemoryStorage, Notifier, SessionService, SessionStorage, StoredSession};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct Reply {
    status: u16,
    body: Value,
    delay: Duration,
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(String, String), Reply>,
    requests: Vec<Recorded>,
}

pub struct StubBackend {
    pub base_url: String,
    shared: Arc<Mutex<Shared>>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            shared,
        }
    }

    pub fn route(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.route_delayed(method, path, status, body, Duration::ZERO)
    }

    /// Like `route`, but the reply is held back for `delay`
    pub fn route_delayed(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
        delay: Duration,
    ) -> &Self {
        self.shared.lock().unwrap().routes.insert(
            (method.to_string(), path.to_string()),
            Reply {
                status,
                body,
                delay,
            },
        );
        self
    }

    /// Wait until at least `count` requests have arrived
    pub async fn wait_for_hits(&self, count: usize) {
        for _ in 0..200 {
            if self.hits() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("backend saw {} requests, expected {}", self.hits(), count);
    }

    pub fn hits(&self) -> usize {
        self.shared.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.lock().unwrap().requests.clone()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(&self.base_url)
    }

    pub fn session(&self, stored: Option<StoredSession>) -> SessionService {
        let storage = match stored {
            Some(session) => MemoryStorage::with_session(session),
            None => MemoryStorage::new(),
        };
        self.session_with(Arc::new(storage))
    }

    /// Session over storage the test keeps a handle to
    pub fn session_with(&self, storage: Arc<MemoryStorage>) -> SessionService {
        let storage: Arc<dyn SessionStorage> = storage;
        SessionService::new(self.client(), storage, Notifier::new())
    }
}

async fn respond(
    State(shared): State<Arc<Mutex<Shared>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let reply = {
        let mut shared = shared.lock().unwrap();
        shared.requests.push(Recorded {
            method: method.to_string(),
            path: path.clone(),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_slice(&body).ok(),
        });
        shared.routes.get(&(method.to_string(), path)).cloned()
    };

    match reply {
        Some(reply) => {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            (StatusCode::from_u16(reply.status).unwrap(), Json(reply.body)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "NOT_FOUND", "message": "no such route" })),
        )
            .into_response(),
    }
}

pub fn user_json(id: &str, role_id: &str) -> Value {
    json!({
        "id": id,
        "nombre": "Ana",
        "apellido": "Rojas",
        "correo": "ana@example.com",
        "rolId": role_id
    })
}

pub fn event_json(id: &str, name: &str, organizer: &str, starts: &str) -> Value {
    json!({
        "id": id,
        "nombre": name,
        "fechaInicio": starts,
        "organizadorId": organizer,
        "capacidad": 100,
        "estado": "Activo"
    })
}
