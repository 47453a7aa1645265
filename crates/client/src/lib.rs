//! VivoPass client - REST access, session and page state
//!
//! This crate talks to the VivoPass backend and keeps the client-side state
//! derived from it: the session user, fetched collections and form outcomes.
//! All business rules live on the backend.

mod api;
mod config;
mod error;
mod forms;
mod http;
mod notify;
mod pages;
mod remote;
mod session;
mod storage;

pub use api::{endpoints, LoginResponse};
pub use config::ClientConfig;
pub use error::{ClientError, Result, UiError};
pub use forms::{FormSubmitter, LoginSuccess, Redirect, SubmitOutcome, LOGIN_ROUTE, PROFILE_ROUTE};
pub use http::ApiClient;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use pages::{
    AdminReportPage, BrowseEventsPage, ForumThreadsPage, MyBookingsPage, MyEventsPage,
    MyForumsPage, MyServicesPage, PageView, PaymentMethodsPage,
};
pub use remote::{FetchStatus, RemoteCollection};
pub use session::{SessionService, SessionSnapshot};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StoredSession};
