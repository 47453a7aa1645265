//! Page view-models
//!
//! A page loads its collections through [`RemoteCollection`], then projects
//! them for the session user with the pure joins from `vivopass_core::views`.
//! Pages never fetch while rendering; `view` only reads what `load` stored.

use chrono::{DateTime, Utc};
use futures::future::join;
use vivopass_core::access::has_role;
use vivopass_core::model::{
    Booking, BookingStatus, Comment, Event, Forum, PaymentMethod, RoleKind, Service,
    ServiceBooking, User,
};
use vivopass_core::views::{
    browse_events, comment_threads, event_sales_report, my_bookings, my_events, my_forums,
    my_service_bookings, BookingView, CommentThread, EventSalesRow, ServiceBookingView,
};

use crate::api::endpoints;
use crate::error::UiError;
use crate::remote::{FetchStatus, RemoteCollection};
use crate::session::SessionService;

/// What a page shows
#[derive(Debug, Clone, PartialEq)]
pub enum PageView<T> {
    Loading,
    /// No user in session
    SignedOut,
    /// User lacks the role the page needs
    AccessDenied,
    Failed(UiError),
    Empty,
    Rows(Vec<T>),
}

impl<T> PageView<T> {
    fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}

enum Readiness {
    Ready,
    Pending,
    Failed(UiError),
}

impl Readiness {
    fn of<T>(collection: &RemoteCollection<T>) -> Self {
        match collection.status() {
            FetchStatus::Ready => Self::Ready,
            FetchStatus::Failed => Self::Failed(
                collection
                    .error()
                    .cloned()
                    .unwrap_or_else(|| UiError::new(vivopass_core::ErrorKind::Server)),
            ),
            FetchStatus::Idle | FetchStatus::Loading => Self::Pending,
        }
    }

    /// First failure wins, then pending
    fn and(self, other: Readiness) -> Self {
        match (self, other) {
            (Self::Failed(e), _) | (_, Self::Failed(e)) => Self::Failed(e),
            (Self::Ready, Self::Ready) => Self::Ready,
            _ => Self::Pending,
        }
    }

    fn view<T>(self, rows: impl FnOnce() -> Vec<T>) -> PageView<T> {
        match self {
            Self::Ready => PageView::from_rows(rows()),
            Self::Pending => PageView::Loading,
            Self::Failed(e) => PageView::Failed(e),
        }
    }
}

/// Collection for a per-user endpoint, rebuilt when the user changes
fn scoped<T>(slot: &mut Option<RemoteCollection<T>>, path: String) -> &mut RemoteCollection<T> {
    if slot.as_ref().is_some_and(|c| c.path() != path) {
        *slot = None;
    }
    slot.get_or_insert_with(|| RemoteCollection::new(path))
}

async fn session_token(session: &SessionService) -> Option<String> {
    match session.stored().await {
        Ok(stored) => stored.map(|s| s.token),
        Err(e) => {
            tracing::warn!("Could not read session storage: {}", e);
            None
        }
    }
}

/// Public catalogue of upcoming events
pub struct BrowseEventsPage {
    events: RemoteCollection<Event>,
    pub query: String,
}

impl Default for BrowseEventsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseEventsPage {
    pub fn new() -> Self {
        Self {
            events: RemoteCollection::public(endpoints::EVENTS),
            query: String::new(),
        }
    }

    pub async fn load(&mut self, session: &SessionService) {
        let token = session_token(session).await;
        self.events.load(session.client(), token.as_deref()).await;
    }

    pub fn view(&self, now: DateTime<Utc>) -> PageView<Event> {
        Readiness::of(&self.events).view(|| browse_events(self.events.data(), &self.query, now))
    }
}

/// Events organized by the session user
pub struct MyEventsPage {
    user: Option<User>,
    events: RemoteCollection<Event>,
    pub query: String,
}

impl Default for MyEventsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MyEventsPage {
    pub fn new() -> Self {
        Self {
            user: None,
            events: RemoteCollection::new(endpoints::EVENTS),
            query: String::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub async fn load(&mut self, session: &SessionService) {
        self.user = session.current_user().await;
        if self.user.is_none() {
            return;
        }
        let token = session_token(session).await;
        self.events.load(session.client(), token.as_deref()).await;
    }

    pub fn view(&self) -> PageView<Event> {
        let Some(user) = &self.user else {
            return PageView::SignedOut;
        };
        Readiness::of(&self.events).view(|| my_events(self.events.data(), Some(user), &self.query))
    }
}

/// Forums under the session user's events
pub struct MyForumsPage {
    user: Option<User>,
    forums: RemoteCollection<Forum>,
    events: RemoteCollection<Event>,
    pub query: String,
}

impl Default for MyForumsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MyForumsPage {
    pub fn new() -> Self {
        Self {
            user: None,
            forums: RemoteCollection::new(endpoints::FORUMS),
            events: RemoteCollection::new(endpoints::EVENTS),
            query: String::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub async fn load(&mut self, session: &SessionService) {
        self.user = session.current_user().await;
        if self.user.is_none() {
            return;
        }
        let token = session_token(session).await;
        let client = session.client();
        join(
            self.forums.load(client, token.as_deref()),
            self.events.load(client, token.as_deref()),
        )
        .await;
    }

    pub fn view(&self) -> PageView<Forum> {
        let Some(user) = &self.user else {
            return PageView::SignedOut;
        };
        Readiness::of(&self.forums)
            .and(Readiness::of(&self.events))
            .view(|| my_forums(self.forums.data(), self.events.data(), Some(user), &self.query))
    }
}

/// Threads of one forum
pub struct ForumThreadsPage {
    signed_in: bool,
    comments: RemoteCollection<Comment>,
}

impl ForumThreadsPage {
    pub fn new(forum_id: &str) -> Self {
        Self {
            signed_in: false,
            comments: RemoteCollection::new(endpoints::forum_comments(forum_id)),
        }
    }

    pub async fn load(&mut self, session: &SessionService) {
        self.signed_in = session.current_user().await.is_some();
        if !self.signed_in {
            return;
        }
        let token = session_token(session).await;
        self.comments.load(session.client(), token.as_deref()).await;
    }

    pub fn view(&self) -> PageView<CommentThread> {
        if !self.signed_in {
            return PageView::SignedOut;
        }
        Readiness::of(&self.comments).view(|| comment_threads(self.comments.data()))
    }
}

/// The session user's ticket bookings
pub struct MyBookingsPage {
    user: Option<User>,
    bookings: Option<RemoteCollection<Booking>>,
    events: RemoteCollection<Event>,
    pub status: Option<BookingStatus>,
    pub query: String,
}

impl Default for MyBookingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MyBookingsPage {
    pub fn new() -> Self {
        Self {
            user: None,
            bookings: None,
            events: RemoteCollection::new(endpoints::EVENTS),
            status: None,
            query: String::new(),
        }
    }

    pub async fn load(&mut self, session: &SessionService) {
        self.user = session.current_user().await;
        let Some(user) = &self.user else {
            return;
        };
        let bookings = scoped(&mut self.bookings, endpoints::user_bookings(&user.id));
        let token = session_token(session).await;
        let client = session.client();
        join(
            bookings.load(client, token.as_deref()),
            self.events.load(client, token.as_deref()),
        )
        .await;
    }

    pub fn view(&self) -> PageView<BookingView> {
        let (Some(_), Some(bookings)) = (&self.user, &self.bookings) else {
            return PageView::SignedOut;
        };
        Readiness::of(bookings)
            .and(Readiness::of(&self.events))
            .view(|| {
                my_bookings(
                    bookings.data(),
                    self.events.data(),
                    self.status.as_ref(),
                    &self.query,
                )
            })
    }
}

/// The session user's complementary service bookings
pub struct MyServicesPage {
    user: Option<User>,
    services: RemoteCollection<Service>,
    bookings: Option<RemoteCollection<ServiceBooking>>,
}

impl Default for MyServicesPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MyServicesPage {
    pub fn new() -> Self {
        Self {
            user: None,
            services: RemoteCollection::new(endpoints::SERVICES),
            bookings: None,
        }
    }

    pub async fn load(&mut self, session: &SessionService) {
        self.user = session.current_user().await;
        let Some(user) = &self.user else {
            return;
        };
        let bookings = scoped(&mut self.bookings, endpoints::user_service_bookings(&user.id));
        let token = session_token(session).await;
        let client = session.client();
        join(
            self.services.load(client, token.as_deref()),
            bookings.load(client, token.as_deref()),
        )
        .await;
    }

    pub fn view(&self, now: DateTime<Utc>) -> PageView<ServiceBookingView> {
        let (Some(_), Some(bookings)) = (&self.user, &self.bookings) else {
            return PageView::SignedOut;
        };
        Readiness::of(&self.services)
            .and(Readiness::of(bookings))
            .view(|| my_service_bookings(self.services.data(), bookings.data(), now))
    }
}

/// The session user's registered cards
pub struct PaymentMethodsPage {
    user: Option<User>,
    methods: Option<RemoteCollection<PaymentMethod>>,
}

impl Default for PaymentMethodsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentMethodsPage {
    pub fn new() -> Self {
        Self {
            user: None,
            methods: None,
        }
    }

    pub async fn load(&mut self, session: &SessionService) {
        self.user = session.current_user().await;
        let Some(user) = &self.user else {
            return;
        };
        let methods = scoped(&mut self.methods, endpoints::user_payment_methods(&user.id));
        let token = session_token(session).await;
        methods.load(session.client(), token.as_deref()).await;
    }

    pub fn view(&self) -> PageView<PaymentMethod> {
        let (Some(_), Some(methods)) = (&self.user, &self.methods) else {
            return PageView::SignedOut;
        };
        Readiness::of(methods).view(|| methods.data().to_vec())
    }
}

/// Sales per event, for administrators
pub struct AdminReportPage {
    user: Option<User>,
    events: RemoteCollection<Event>,
    bookings: RemoteCollection<Booking>,
}

impl Default for AdminReportPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminReportPage {
    pub fn new() -> Self {
        Self {
            user: None,
            events: RemoteCollection::new(endpoints::EVENTS),
            bookings: RemoteCollection::new(endpoints::BOOKINGS),
        }
    }

    fn allowed(&self) -> bool {
        has_role(self.user.as_ref(), RoleKind::Admin)
    }

    /// Non-admins get no requests at all
    pub async fn load(&mut self, session: &SessionService) {
        self.user = session.current_user().await;
        if !self.allowed() {
            return;
        }
        let token = session_token(session).await;
        let client = session.client();
        join(
            self.events.load(client, token.as_deref()),
            self.bookings.load(client, token.as_deref()),
        )
        .await;
    }

    pub fn view(&self) -> PageView<EventSalesRow> {
        if self.user.is_none() {
            return PageView::SignedOut;
        }
        if !self.allowed() {
            return PageView::AccessDenied;
        }
        Readiness::of(&self.events)
            .and(Readiness::of(&self.bookings))
            .view(|| event_sales_report(self.events.data(), self.bookings.data()))
    }
}
