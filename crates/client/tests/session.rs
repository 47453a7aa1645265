mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{user_json, StubBackend};
use serde_json::json;
use vivopass_client::{
    ApiClient, MemoryStorage, NotificationLevel, Notifier, SessionService, SessionStorage,
    StoredSession,
};
use vivopass_core::ErrorKind;

#[tokio::test]
async fn no_token_resolves_to_no_user_without_requests() {
    let backend = StubBackend::start().await;
    let session = backend.session(None);
    assert!(session.is_loading().await);

    let user = session.refresh().await;

    assert!(user.is_none());
    assert!(!session.is_loading().await);
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn blank_token_counts_as_signed_out() {
    let backend = StubBackend::start().await;
    let session = backend.session(Some(StoredSession::new("  ", "7")));

    assert!(session.refresh().await.is_none());
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn loads_user_and_resolves_role_name() {
    let backend = StubBackend::start().await;
    backend
        .route("GET", "/api/Usuario/7", 200, user_json("7", "2"))
        .route("GET", "/api/Rol/2", 200, json!({ "id": 2, "nombre": "Organizador" }));
    let session = backend.session(Some(StoredSession::new("tok", "7")));

    let user = session.refresh().await.unwrap();

    assert_eq!(user.id, "7");
    assert_eq!(user.role_label(), "Organizador");
    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn failed_role_lookup_falls_back_to_role_id() {
    let backend = StubBackend::start().await;
    backend
        .route("GET", "/api/Usuario/7", 200, user_json("7", "3"))
        .route("GET", "/api/Rol/3", 500, json!({ "message": "boom" }));
    let session = backend.session(Some(StoredSession::new("tok", "7")));
    let mut rx = session.notifier().subscribe();

    let user = session.refresh().await.unwrap();

    assert_eq!(user.role_label(), "3");
    assert!(rx.try_recv().is_err(), "role fallback is not user-facing");
}

#[tokio::test]
async fn role_resolution_can_be_disabled() {
    let backend = StubBackend::start().await;
    backend.route("GET", "/api/Usuario/7", 200, user_json("7", "3"));
    let session = backend
        .session(Some(StoredSession::new("tok", "7")))
        .with_role_resolution(false);

    let user = session.refresh().await.unwrap();

    assert_eq!(user.role_name, None);
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn unauthorized_clears_user_and_notifies_session_expired() {
    let backend = StubBackend::start().await;
    backend.route("GET", "/api/Usuario/7", 401, json!({ "message": "expired" }));
    let session = backend.session(Some(StoredSession::new("tok", "7")));
    let mut rx = session.notifier().subscribe();

    let user = session.refresh().await;

    assert!(user.is_none());
    let snapshot = session.snapshot().await;
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.last_error, Some(ErrorKind::SessionExpired));

    let toast = rx.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.kind, Some(ErrorKind::SessionExpired));
    assert_eq!(toast.message, "Your session has expired. Please log in again.");
}

#[tokio::test]
async fn structured_code_beats_status() {
    let backend = StubBackend::start().await;
    backend.route(
        "GET",
        "/api/Usuario/7",
        400,
        json!({ "code": "FORBIDDEN", "message": "nope" }),
    );
    let session = backend.session(Some(StoredSession::new("tok", "7")));

    session.refresh().await;

    assert_eq!(session.snapshot().await.last_error, Some(ErrorKind::AccessDenied));
}

#[tokio::test]
async fn token_without_user_id_is_missing_identifier() {
    let backend = StubBackend::start().await;
    let stored = StoredSession {
        token: "tok".into(),
        user_id: None,
        role_id: None,
    };
    let session = backend.session(Some(stored));

    assert!(session.refresh().await.is_none());
    assert_eq!(
        session.snapshot().await.last_error,
        Some(ErrorKind::MissingIdentifier)
    );
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn logout_forgets_user_and_credentials() {
    let backend = StubBackend::start().await;
    backend.route("GET", "/api/Usuario/7", 200, user_json("7", "2"));
    let session = backend
        .session(Some(StoredSession::new("tok", "7")))
        .with_role_resolution(false);
    assert!(session.refresh().await.is_some());

    let mut rx = session.notifier().subscribe();

    session.logout().await.unwrap();

    assert!(session.current_user().await.is_none());
    assert!(session.stored().await.unwrap().is_none());
    assert_eq!(rx.try_recv().unwrap().level, NotificationLevel::Info);
}

#[tokio::test]
async fn bad_request_on_profile_is_missing_identifier() {
    let backend = StubBackend::start().await;
    backend.route(
        "GET",
        "/api/Usuario/7",
        400,
        json!({ "message": "Id de usuario requerido" }),
    );
    let session = backend.session(Some(StoredSession::new("tok", "7")));
    let mut rx = session.notifier().subscribe();

    assert!(session.refresh().await.is_none());

    assert_eq!(
        session.snapshot().await.last_error,
        Some(ErrorKind::MissingIdentifier)
    );
    assert_eq!(
        rx.try_recv().unwrap().message,
        ErrorKind::MissingIdentifier.message()
    );
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let backend = StubBackend::start().await;
    backend.route("GET", "/api/Usuario/7", 404, json!({ "message": "no existe" }));
    let session = backend.session(Some(StoredSession::new("tok", "7")));

    assert!(session.refresh().await.is_none());
    assert_eq!(session.snapshot().await.last_error, Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn unreachable_backend_is_connection_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let storage: Arc<dyn SessionStorage> =
        Arc::new(MemoryStorage::with_session(StoredSession::new("tok", "7")));
    let session = SessionService::new(
        ApiClient::with_base_url(format!("http://{}", addr)),
        storage,
        Notifier::new(),
    );
    let mut rx = session.notifier().subscribe();

    assert!(session.refresh().await.is_none());

    assert_eq!(session.snapshot().await.last_error, Some(ErrorKind::Connection));
    assert_eq!(rx.try_recv().unwrap().kind, Some(ErrorKind::Connection));
}

#[tokio::test]
async fn newer_refresh_wins_over_slower_older_one() {
    let backend = StubBackend::start().await;
    backend
        .route_delayed(
            "GET",
            "/api/Usuario/7",
            200,
            user_json("7", "2"),
            Duration::from_millis(300),
        )
        .route("GET", "/api/Usuario/8", 200, user_json("8", "2"));
    let storage = Arc::new(MemoryStorage::with_session(StoredSession::new("tok", "7")));
    let session = Arc::new(
        backend
            .session_with(Arc::clone(&storage))
            .with_role_resolution(false),
    );

    let older = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.refresh().await }
    });
    backend.wait_for_hits(1).await;

    storage
        .save(&StoredSession::new("tok", "8"))
        .await
        .unwrap();
    let newer = session.refresh().await;
    assert_eq!(newer.map(|u| u.id), Some("8".to_string()));

    older.await.unwrap();

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.user.map(|u| u.id), Some("8".to_string()));
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn logout_during_refresh_keeps_user_cleared() {
    let backend = StubBackend::start().await;
    backend.route_delayed(
        "GET",
        "/api/Usuario/7",
        200,
        user_json("7", "2"),
        Duration::from_millis(300),
    );
    let session = Arc::new(
        backend
            .session(Some(StoredSession::new("tok", "7")))
            .with_role_resolution(false),
    );

    let in_flight = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.refresh().await }
    });
    backend.wait_for_hits(1).await;

    session.logout().await.unwrap();
    let returned = in_flight.await.unwrap();

    assert!(returned.is_none());
    assert!(session.current_user().await.is_none());
    assert!(session.stored().await.unwrap().is_none());
}
