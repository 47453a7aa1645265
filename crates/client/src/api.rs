//! Typed endpoint calls
//!
//! Every function issues exactly one request. Identifiers that belong to the
//! session (author, creator, user) are passed in explicitly.

use serde::{Deserialize, Serialize};
use vivopass_core::model::{
    id, Booking, Comment, Event, Forum, PaymentMethod, Role, Service, ServiceBooking, User, Venue,
};
use vivopass_core::validation::{
    CommentForm, ForumForm, LoginForm, PasswordResetForm, PaymentMethodForm, SignupForm,
};

use crate::error::Result;
use crate::http::ApiClient;

/// Paths relative to the backend origin
pub mod endpoints {
    use urlencoding::encode;

    pub const LOGIN: &str = "/api/Auth/login";
    pub const REGISTER: &str = "/api/Auth/register";
    pub const FORGOT_PASSWORD: &str = "/api/Auth/forgot-password";
    pub const EVENTS: &str = "/api/Evento";
    pub const VENUES: &str = "/api/Lugar";
    pub const BOOKINGS: &str = "/api/Reserva";
    pub const FORUMS: &str = "/api/Foro";
    pub const COMMENTS: &str = "/api/Comentario";
    pub const SERVICES: &str = "/api/Servicio";
    pub const PAYMENT_METHODS: &str = "/api/MetodoPago";

    pub fn user(id: &str) -> String {
        format!("/api/Usuario/{}", encode(id))
    }

    pub fn role(id: &str) -> String {
        format!("/api/Rol/{}", encode(id))
    }

    pub fn user_bookings(user_id: &str) -> String {
        format!("{}/usuario/{}", BOOKINGS, encode(user_id))
    }

    pub fn forum(id: &str) -> String {
        format!("{}/{}", FORUMS, encode(id))
    }

    pub fn forum_comments(forum_id: &str) -> String {
        format!("{}/foro/{}", COMMENTS, encode(forum_id))
    }

    pub fn comment(id: &str) -> String {
        format!("{}/{}", COMMENTS, encode(id))
    }

    pub fn user_service_bookings(user_id: &str) -> String {
        format!("/api/ReservaServicio/usuario/{}", encode(user_id))
    }

    pub fn user_payment_methods(user_id: &str) -> String {
        format!("{}/usuario/{}", PAYMENT_METHODS, encode(user_id))
    }
}

/// Body returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(rename = "userId", deserialize_with = "id::deserialize")]
    pub user_id: String,
    #[serde(rename = "rolId", default, deserialize_with = "id::deserialize_opt")]
    pub role_id: Option<String>,
}

#[derive(Serialize)]
struct CreateForumRequest<'a> {
    #[serde(flatten)]
    form: &'a ForumForm,
    #[serde(rename = "creadorId")]
    creator_id: &'a str,
}

#[derive(Serialize)]
struct CommentRequest<'a> {
    #[serde(flatten)]
    form: &'a CommentForm,
    #[serde(rename = "usuarioId")]
    author_id: &'a str,
}

#[derive(Serialize)]
struct PaymentMethodRequest<'a> {
    #[serde(flatten)]
    form: &'a PaymentMethodForm,
    #[serde(rename = "usuarioId")]
    user_id: &'a str,
}

impl ApiClient {
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse> {
        self.post_json(endpoints::LOGIN, None, form).await
    }

    pub async fn register(&self, form: &SignupForm) -> Result<serde_json::Value> {
        self.post_json(endpoints::REGISTER, None, form).await
    }

    /// Returns the confirmation text the backend sends back
    pub async fn request_password_reset(&self, form: &PasswordResetForm) -> Result<String> {
        self.post_text(endpoints::FORGOT_PASSWORD, None, form).await
    }

    pub async fn fetch_user(&self, user_id: &str, token: &str) -> Result<User> {
        self.get_json(&endpoints::user(user_id), Some(token)).await
    }

    pub async fn fetch_role(&self, role_id: &str, token: &str) -> Result<Role> {
        self.get_json(&endpoints::role(role_id), Some(token)).await
    }

    pub async fn list_events(&self, token: Option<&str>) -> Result<Vec<Event>> {
        self.get_json(endpoints::EVENTS, token).await
    }

    pub async fn list_venues(&self, token: &str) -> Result<Vec<Venue>> {
        self.get_json(endpoints::VENUES, Some(token)).await
    }

    pub async fn list_user_bookings(&self, user_id: &str, token: &str) -> Result<Vec<Booking>> {
        self.get_json(&endpoints::user_bookings(user_id), Some(token)).await
    }

    pub async fn list_forums(&self, token: &str) -> Result<Vec<Forum>> {
        self.get_json(endpoints::FORUMS, Some(token)).await
    }

    pub async fn create_forum(&self, form: &ForumForm, creator_id: &str, token: &str) -> Result<Forum> {
        let body = CreateForumRequest { form, creator_id };
        self.post_json(endpoints::FORUMS, Some(token), &body).await
    }

    pub async fn update_forum(&self, forum_id: &str, form: &ForumForm, token: &str) -> Result<Forum> {
        self.put_json(&endpoints::forum(forum_id), Some(token), form).await
    }

    pub async fn list_comments(&self, forum_id: &str, token: &str) -> Result<Vec<Comment>> {
        self.get_json(&endpoints::forum_comments(forum_id), Some(token)).await
    }

    pub async fn create_comment(&self, form: &CommentForm, author_id: &str, token: &str) -> Result<Comment> {
        let body = CommentRequest { form, author_id };
        self.post_json(endpoints::COMMENTS, Some(token), &body).await
    }

    pub async fn update_comment(
        &self,
        comment_id: &str,
        form: &CommentForm,
        author_id: &str,
        token: &str,
    ) -> Result<Comment> {
        let body = CommentRequest { form, author_id };
        self.put_json(&endpoints::comment(comment_id), Some(token), &body).await
    }

    pub async fn list_services(&self, token: &str) -> Result<Vec<Service>> {
        self.get_json(endpoints::SERVICES, Some(token)).await
    }

    pub async fn list_user_service_bookings(&self, user_id: &str, token: &str) -> Result<Vec<ServiceBooking>> {
        self.get_json(&endpoints::user_service_bookings(user_id), Some(token))
            .await
    }

    pub async fn list_payment_methods(&self, user_id: &str, token: &str) -> Result<Vec<PaymentMethod>> {
        self.get_json(&endpoints::user_payment_methods(user_id), Some(token))
            .await
    }

    pub async fn add_payment_method(
        &self,
        form: &PaymentMethodForm,
        user_id: &str,
        token: &str,
    ) -> Result<PaymentMethod> {
        let body = PaymentMethodRequest { form, user_id };
        self.post_json(endpoints::PAYMENT_METHODS, Some(token), &body).await
    }
}
