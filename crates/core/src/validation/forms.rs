//! Form inputs and their validation rules
//!
//! Forms serialize to the request bodies the backend expects. Identifiers
//! that come from the session (author, creator) are attached by the client
//! at submission time and are not part of the form.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use super::{Validate, ValidationErrors};
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        errors.required("password", &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupForm {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "contrasena")]
    pub password: String,
    #[serde(skip)]
    pub password_confirmation: String,
    #[serde(rename = "rolId", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
}

pub const MIN_PASSWORD_LEN: usize = 8;

impl Validate for SignupForm {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if errors.required("first_name", &self.first_name) {
            errors.length("first_name", &self.first_name, 2, 50);
        }
        if errors.required("last_name", &self.last_name) {
            errors.length("last_name", &self.last_name, 2, 50);
        }
        errors.email("email", &self.email);
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
            let allowed = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
            if !allowed || !(7..=15).contains(&digits) {
                errors.push("phone", "Enter a valid phone number");
            }
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(
                "password",
                format!("Must be at least {} characters", MIN_PASSWORD_LEN),
            );
        } else if !self.password.chars().any(|c| c.is_ascii_digit())
            || !self.password.chars().any(char::is_alphabetic)
        {
            errors.push("password", "Must contain letters and numbers");
        }
        if self.password != self.password_confirmation {
            errors.push("password_confirmation", "Passwords do not match");
        }
        errors.into_result()
    }
}

/// Create or update a forum under an event
#[derive(Debug, Clone, Serialize)]
pub struct ForumForm {
    #[serde(rename = "eventoId")]
    pub event_id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl Validate for ForumForm {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.required("event_id", &self.event_id);
        if errors.required("title", &self.title) {
            errors.length("title", &self.title, 3, 100);
        }
        if errors.required("description", &self.description) {
            errors.length("description", &self.description, 1, 1000);
        }
        errors.into_result()
    }
}

/// A new thread (top-level comment) or a reply
#[derive(Debug, Clone, Serialize)]
pub struct CommentForm {
    #[serde(rename = "foroId")]
    pub forum_id: String,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "comentarioPadreId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CommentForm {
    pub fn thread(forum_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            forum_id: forum_id.into(),
            content: content.into(),
            parent_id: None,
        }
    }

    pub fn reply(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

impl Validate for CommentForm {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.required("forum_id", &self.forum_id);
        if errors.required("content", &self.content) {
            errors.length("content", &self.content, 1, 2000);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetForm {
    #[serde(rename = "correo")]
    pub email: String,
}

impl Validate for PasswordResetForm {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodForm {
    /// Card brand or type, e.g. "Visa"
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "titular")]
    pub holder: String,
    #[serde(rename = "numeroTarjeta")]
    pub card_number: String,
    /// `MM/YY`
    #[serde(rename = "expiracion")]
    pub expiry: String,
    pub cvv: String,
}

impl PaymentMethodForm {
    /// Card number with separators removed
    pub fn digits(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect()
    }

    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.digits().chars().collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }

    fn validate_at(&self, today: NaiveDate) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.required("kind", &self.kind);
        errors.required("holder", &self.holder);

        let digits = self.digits();
        if !digits.chars().all(|c| c.is_ascii_digit()) || !(13..=19).contains(&digits.len()) {
            errors.push("card_number", "Enter a valid card number");
        } else if !luhn_valid(&digits) {
            errors.push("card_number", "Card number is not valid");
        }

        match CardExpiry::parse(&self.expiry) {
            Some(expiry) if expiry.is_past(today) => errors.push("expiry", "Card has expired"),
            Some(_) => {}
            None => errors.push("expiry", "Use the MM/YY format"),
        }

        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            errors.push("cvv", "Enter the 3 or 4 digit security code");
        }
        errors.into_result()
    }
}

impl Validate for PaymentMethodForm {
    fn validate(&self) -> Result<()> {
        self.validate_at(Utc::now().date_naive())
    }
}

/// Card expiry month; the card is valid through the last day of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardExpiry {
    pub month: u32,
    pub year: i32,
}

impl CardExpiry {
    pub fn parse(raw: &str) -> Option<Self> {
        let (month, year) = raw.trim().split_once('/')?;
        let month: u32 = month.trim().parse().ok()?;
        let year = year.trim();
        if !(1..=12).contains(&month) || year.len() != 2 {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        Some(Self {
            month,
            year: 2000 + year,
        })
    }

    pub fn is_past(&self, today: NaiveDate) -> bool {
        (self.year, self.month) < (today.year(), today.month())
    }
}

fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn field_errors(result: Result<()>) -> crate::validation::ValidationErrors {
        match result {
            Err(Error::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn login_serializes_backend_names() {
        let form = LoginForm::new("a@b.com", "x");
        assert!(form.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            serde_json::json!({"correo": "a@b.com", "contrasena": "x"})
        );
    }

    #[test]
    fn login_requires_password_and_email() {
        let errors = field_errors(LoginForm::new("nope", "").validate());
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert_eq!(errors.get("password"), Some("This field is required"));
    }

    #[test]
    fn signup_checks_confirmation_and_strength() {
        let mut form = SignupForm {
            first_name: "Ana".into(),
            last_name: "Rojas".into(),
            email: "ana@example.com".into(),
            phone: Some("+506 8888-1234".into()),
            password: "secreto123".into(),
            password_confirmation: "secreto123".into(),
            role_id: None,
        };
        assert!(form.validate().is_ok());

        form.password = "onlyletters".into();
        form.password_confirmation = "different1".into();
        let errors = field_errors(form.validate());
        assert_eq!(errors.get("password"), Some("Must contain letters and numbers"));
        assert_eq!(
            errors.get("password_confirmation"),
            Some("Passwords do not match")
        );

        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("password_confirmation").is_none());
        assert!(body.get("rolId").is_none());
    }

    #[test]
    fn forum_title_bounds() {
        let form = ForumForm {
            event_id: "e-1".into(),
            title: "Hi".into(),
            description: "Anything".into(),
        };
        let errors = field_errors(form.validate());
        assert_eq!(errors.get("title"), Some("Must be at least 3 characters"));
    }

    #[test]
    fn blank_comment_is_rejected() {
        let errors = field_errors(CommentForm::thread("f-1", "   ").validate());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("content"), Some("This field is required"));

        let reply = CommentForm::thread("f-1", "Agreed").reply("c-9");
        assert_eq!(
            serde_json::to_value(&reply).unwrap()["comentarioPadreId"],
            "c-9"
        );
    }

    #[test]
    fn card_checks() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut form = PaymentMethodForm {
            kind: "Visa".into(),
            holder: "Ana Rojas".into(),
            card_number: "4111 1111 1111 1111".into(),
            expiry: "06/25".into(),
            cvv: "123".into(),
        };
        assert!(form.validate_at(today).is_ok());
        assert_eq!(form.last_four(), "1111");

        form.expiry = "05/25".into();
        form.card_number = "4111 1111 1111 1112".into();
        form.cvv = "12a".into();
        let errors = field_errors(form.validate_at(today));
        assert_eq!(errors.get("expiry"), Some("Card has expired"));
        assert_eq!(errors.get("card_number"), Some("Card number is not valid"));
        assert!(errors.get("cvv").is_some());
    }

    #[test]
    fn expiry_format() {
        assert_eq!(
            CardExpiry::parse("09/27"),
            Some(CardExpiry {
                month: 9,
                year: 2027
            })
        );
        assert!(CardExpiry::parse("13/27").is_none());
        assert!(CardExpiry::parse("0927").is_none());
        assert!(CardExpiry::parse("09/2027").is_none());
    }
}
