use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::dto::SignupRequest;
use crate::client::api::AuthApi;
use crate::client::forms::{validate_signup, FormErrors};
use crate::client::route::Route;
use crate::client::screens::Submit;

pub const SIGNUP_UNAVAILABLE: &str = "Signup failed. Try again later.";

pub struct SignupScreen {
    api: Arc<dyn AuthApi>,
    pub form: SignupRequest,
    pub errors: FormErrors,
    pub backend_error: Option<String>,
}

impl SignupScreen {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            form: SignupRequest {
                name: String::new(),
                email: String::new(),
                password: String::new(),
            },
            errors: FormErrors::default(),
            backend_error: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    /// On success the user is sent to the login screen.
    pub async fn submit(&mut self) -> Submit {
        // Stored emails are matched exactly, so surrounding blanks never go out.
        let trimmed = self.form.email.trim();
        if trimmed.len() != self.form.email.len() {
            self.form.email = trimmed.to_string();
        }
        self.errors = validate_signup(&self.form);
        if !self.errors.is_empty() {
            return Submit::Invalid;
        }
        self.backend_error = None;

        match self.api.signup(&self.form).await {
            Ok(_) => {
                info!("signup accepted");
                Submit::Navigate(Route::Login)
            }
            Err(e) => {
                warn!(error = %e, "signup request failed");
                self.backend_error = Some(
                    e.server_field("error")
                        .unwrap_or_else(|| SIGNUP_UNAVAILABLE.into()),
                );
                Submit::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::auth::dto::{LoginRequest, LoginResponse, SignupResponse};
    use crate::client::error::ClientError;
    use crate::client::forms::NAME_EMPTY;

    #[derive(Default)]
    struct RecordingAuth {
        fail: bool,
        seen: Mutex<Vec<SignupRequest>>,
    }

    #[async_trait]
    impl AuthApi for RecordingAuth {
        async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse, ClientError> {
            self.seen.lock().unwrap().push(req.clone());
            if self.fail {
                return Err(ClientError::Status {
                    status: 500,
                    body: r#"{"error":"Failed to insert data"}"#.into(),
                });
            }
            Ok(SignupResponse {
                message: "Signup success".into(),
            })
        }
        async fn login(&self, _req: &LoginRequest) -> Result<LoginResponse, ClientError> {
            unreachable!("signup screen never logs in")
        }
    }

    fn filled(api: Arc<RecordingAuth>) -> SignupScreen {
        let mut screen = SignupScreen::new(api);
        screen.set_name("Ada");
        screen.set_email("ada@example.com");
        screen.set_password("s3cret");
        screen
    }

    #[tokio::test]
    async fn missing_name_blocks_request() {
        let api = Arc::new(RecordingAuth::default());
        let mut screen = filled(api.clone());
        screen.set_name("");

        assert_eq!(screen.submit().await, Submit::Invalid);
        assert_eq!(screen.errors.name, Some(NAME_EMPTY));
        assert!(api.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_goes_to_login_with_fields_verbatim() {
        let api = Arc::new(RecordingAuth::default());
        let mut screen = filled(api.clone());

        assert_eq!(screen.submit().await, Submit::Navigate(Route::Login));
        let seen = api.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "Ada");
        assert_eq!(seen[0].email, "ada@example.com");
        assert_eq!(seen[0].password, "s3cret");
    }

    #[tokio::test]
    async fn email_is_sent_trimmed() {
        let api = Arc::new(RecordingAuth::default());
        let mut screen = filled(api.clone());
        screen.set_email("  ada@example.com \t");

        assert_eq!(screen.submit().await, Submit::Navigate(Route::Login));
        assert_eq!(screen.form.email, "ada@example.com");
        assert_eq!(api.seen.lock().unwrap()[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn failure_surfaces_server_error() {
        let api = Arc::new(RecordingAuth {
            fail: true,
            ..Default::default()
        });
        let mut screen = filled(api);

        assert_eq!(screen.submit().await, Submit::Failed);
        assert_eq!(screen.backend_error.as_deref(), Some("Failed to insert data"));
    }
}
