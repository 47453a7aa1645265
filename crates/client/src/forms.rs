//! Form submission
//!
//! Every submission follows the same steps: validate locally, read the
//! session credentials, issue exactly one request, then turn the result into
//! a notification and an outcome. Nothing is applied optimistically, so there
//! is nothing to roll back; callers reload what they show on success.

use tracing::warn;
use vivopass_core::access::can_edit;
use vivopass_core::model::{Comment, Forum, PaymentMethod, User};
use vivopass_core::validation::{
    CommentForm, ForumForm, LoginForm, PasswordResetForm, PaymentMethodForm, SignupForm, Validate,
    ValidationErrors,
};
use vivopass_core::ErrorKind;

use crate::error::{ClientError, Result, UiError};
use crate::session::SessionService;
use crate::storage::StoredSession;

pub const PROFILE_ROUTE: &str = "/profile";
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Success(T),
    /// Local validation failed; nothing was sent
    Invalid(ValidationErrors),
    Failed(UiError),
}

impl<T> SubmitOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&UiError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Where the view should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect(pub &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    pub user_id: String,
    /// Profile loaded right after login; `None` if that lookup failed
    pub user: Option<User>,
    pub redirect: Redirect,
}

/// A rejected login reads as bad credentials, not as an expired session
fn login_error_kind(kind: ErrorKind) -> ErrorKind {
    match kind {
        ErrorKind::SessionExpired | ErrorKind::NotFound => ErrorKind::InvalidCredentials,
        other => other,
    }
}

fn same_kind(kind: ErrorKind) -> ErrorKind {
    kind
}

pub struct FormSubmitter<'a> {
    session: &'a SessionService,
}

impl<'a> FormSubmitter<'a> {
    pub fn new(session: &'a SessionService) -> Self {
        Self { session }
    }

    fn rejected<F: Validate, T>(form: &F) -> Option<SubmitOutcome<T>> {
        match form.validate() {
            Ok(()) => None,
            Err(vivopass_core::Error::Validation(errors)) => Some(SubmitOutcome::Invalid(errors)),
            Err(e) => Some(SubmitOutcome::Failed(UiError::new(e.kind()))),
        }
    }

    fn finish<T>(
        &self,
        action: &str,
        result: Result<T>,
        success_message: &str,
        classify: fn(ErrorKind) -> ErrorKind,
    ) -> SubmitOutcome<T> {
        match result {
            Ok(value) => {
                self.session.notifier().success(success_message);
                SubmitOutcome::Success(value)
            }
            Err(e) => {
                let kind = classify(e.kind());
                warn!("{} failed: {}", action, e);
                self.session.notifier().error(kind);
                SubmitOutcome::Failed(UiError::new(kind))
            }
        }
    }

    /// Log in, store the token and user id, and load the profile
    pub async fn login(&self, form: &LoginForm) -> SubmitOutcome<LoginSuccess> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = async {
            let resp = self.session.client().login(form).await?;
            let mut stored = StoredSession::new(resp.access_token, resp.user_id.clone());
            stored.role_id = resp.role_id;
            let user = self.session.establish(stored).await?;
            Ok::<_, ClientError>(LoginSuccess {
                user_id: resp.user_id,
                user,
                redirect: Redirect(PROFILE_ROUTE),
            })
        }
        .await;
        self.finish("Login", result, "Welcome back!", login_error_kind)
    }

    pub async fn signup(&self, form: &SignupForm) -> SubmitOutcome<Redirect> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = self
            .session
            .client()
            .register(form)
            .await
            .map(|_| Redirect(LOGIN_ROUTE));
        self.finish(
            "Signup",
            result,
            "Account created. You can now log in.",
            same_kind,
        )
    }

    /// Returns the confirmation text from the backend
    pub async fn request_password_reset(&self, form: &PasswordResetForm) -> SubmitOutcome<String> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        match self.session.client().request_password_reset(form).await {
            Ok(text) => {
                let message = match text.trim() {
                    "" => "Check your inbox for instructions to reset your password.".to_string(),
                    body => body.trim_matches('"').to_string(),
                };
                self.session.notifier().success(message.clone());
                SubmitOutcome::Success(message)
            }
            Err(e) => self.finish("Password reset", Err(e), "", same_kind),
        }
    }

    pub async fn create_forum(&self, form: &ForumForm) -> SubmitOutcome<Forum> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = async {
            let (token, user_id) = self.session.credentials().await?;
            self.session.client().create_forum(form, &user_id, &token).await
        }
        .await;
        self.finish("Create forum", result, "Forum created", same_kind)
    }

    /// Only the forum's creator may edit it
    pub async fn update_forum(&self, forum: &Forum, form: &ForumForm) -> SubmitOutcome<Forum> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = async {
            let (token, _) = self.session.credentials().await?;
            self.require_owner(&forum.creator_id).await?;
            self.session
                .client()
                .update_forum(&forum.id, form, &token)
                .await
        }
        .await;
        self.finish("Update forum", result, "Forum updated", same_kind)
    }

    /// Start a thread, or reply when the form has a parent
    pub async fn create_comment(&self, form: &CommentForm) -> SubmitOutcome<Comment> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = async {
            let (token, user_id) = self.session.credentials().await?;
            self.session
                .client()
                .create_comment(form, &user_id, &token)
                .await
        }
        .await;
        self.finish("Create comment", result, "Comment posted", same_kind)
    }

    /// Only the comment's author may edit it
    pub async fn edit_comment(&self, comment: &Comment, form: &CommentForm) -> SubmitOutcome<Comment> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = async {
            let (token, user_id) = self.session.credentials().await?;
            self.require_owner(&comment.author_id).await?;
            self.session
                .client()
                .update_comment(&comment.id, form, &user_id, &token)
                .await
        }
        .await;
        self.finish("Edit comment", result, "Comment updated", same_kind)
    }

    pub async fn add_payment_method(&self, form: &PaymentMethodForm) -> SubmitOutcome<PaymentMethod> {
        if let Some(outcome) = Self::rejected(form) {
            return outcome;
        }
        let result = async {
            let (token, user_id) = self.session.credentials().await?;
            self.session
                .client()
                .add_payment_method(form, &user_id, &token)
                .await
        }
        .await;
        let message = format!("Card ending in {} added", form.last_four());
        self.finish("Add payment method", result, &message, same_kind)
    }

    async fn require_owner(&self, creator_id: &str) -> Result<()> {
        let user = self.session.current_user().await;
        if can_edit(user.as_ref(), creator_id) {
            Ok(())
        } else {
            Err(ClientError::AccessDenied(format!(
                "record belongs to user {}",
                creator_id
            )))
        }
    }
}
