use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::dto::{ErrorResponse, LoginResponse, LOGIN_SERVER_ERROR, SIGNUP_FAILED};

/// Server-side failures of the auth endpoints. The detail is logged,
/// never returned to the caller.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("signup failed: {0}")]
    Signup(anyhow::Error),

    #[error("login failed: {0}")]
    Login(anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Signup(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: SIGNUP_FAILED.into(),
                }),
            )
                .into_response(),
            AuthError::Login(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LoginResponse {
                    success: false,
                    message: LOGIN_SERVER_ERROR.into(),
                }),
            )
                .into_response(),
        }
    }
}
