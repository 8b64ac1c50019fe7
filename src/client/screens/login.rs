use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::dto::LoginRequest;
use crate::client::api::AuthApi;
use crate::client::forms::{validate_login, FormErrors};
use crate::client::route::Route;
use crate::client::screens::Submit;

pub const LOGIN_REJECTED: &str = "Invalid email or password";
pub const LOGIN_UNAVAILABLE: &str = "Server error. Try again later.";

pub struct LoginScreen {
    api: Arc<dyn AuthApi>,
    pub form: LoginRequest,
    pub errors: FormErrors,
    pub backend_error: Option<String>,
}

impl LoginScreen {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            form: LoginRequest {
                email: String::new(),
                password: String::new(),
            },
            errors: FormErrors::default(),
            backend_error: None,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub async fn submit(&mut self) -> Submit {
        // Stored emails are matched exactly, so surrounding blanks never go out.
        let trimmed = self.form.email.trim();
        if trimmed.len() != self.form.email.len() {
            self.form.email = trimmed.to_string();
        }
        self.errors = validate_login(&self.form);
        if !self.errors.is_empty() {
            return Submit::Invalid;
        }
        self.backend_error = None;

        match self.api.login(&self.form).await {
            Ok(resp) if resp.success => {
                info!("login accepted");
                Submit::Navigate(Route::Home)
            }
            Ok(resp) => {
                let message = Some(resp.message).filter(|m| !m.is_empty());
                self.backend_error = Some(message.unwrap_or_else(|| LOGIN_REJECTED.into()));
                Submit::Failed
            }
            Err(e) => {
                warn!(error = %e, "login request failed");
                self.backend_error = Some(
                    e.server_field("message")
                        .unwrap_or_else(|| LOGIN_UNAVAILABLE.into()),
                );
                Submit::Failed
            }
        }
    }
}
