use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginRequest, SignupRequest};

pub const NAME_EMPTY: &str = "Name should not be empty";
pub const EMAIL_EMPTY: &str = "Email should not be empty";
pub const EMAIL_FORMAT: &str = "Email didn't match the expected format";
pub const PASSWORD_EMPTY: &str = "Password should not be empty";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Field-level messages; `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some(EMAIL_EMPTY)
    } else if !is_valid_email(email.trim()) {
        Some(EMAIL_FORMAT)
    } else {
        None
    }
}

fn password_error(password: &str) -> Option<&'static str> {
    password.is_empty().then_some(PASSWORD_EMPTY)
}

pub fn validate_login(form: &LoginRequest) -> FormErrors {
    FormErrors {
        name: None,
        email: email_error(&form.email),
        password: password_error(&form.password),
    }
}

pub fn validate_signup(form: &SignupRequest) -> FormErrors {
    FormErrors {
        name: form.name.trim().is_empty().then_some(NAME_EMPTY),
        email: email_error(&form.email),
        password: password_error(&form.password),
    }
}
