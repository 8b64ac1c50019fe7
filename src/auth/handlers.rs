use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, SignupRequest, SignupResponse, LOGIN_INVALID,
            LOGIN_SUCCESS, SIGNUP_SUCCESS,
        },
        password::{hash_password, verify_password},
        repo_types::NewUser,
    },
    error::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AuthError> {
    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "password hashing failed");
        AuthError::Signup(e)
    })?;

    let user = state
        .users
        .create(NewUser {
            name: &payload.name,
            email: &payload.email,
            password_hash: &hash,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            AuthError::Signup(e)
        })?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok(Json(SignupResponse {
        message: SIGNUP_SUCCESS.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let candidates = state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            AuthError::Login(e)
        })?;

    // Duplicate signups leave several rows per email; any of them may match.
    let matched = candidates.iter().find(|user| {
        match verify_password(&payload.password, &user.password_hash) {
            Ok(ok) => ok,
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "stored hash unreadable");
                false
            }
        }
    });

    match matched {
        Some(user) => {
            info!(user_id = %user.id, email = %user.email, "user logged in");
            Ok(Json(LoginResponse {
                success: true,
                message: LOGIN_SUCCESS.into(),
            }))
        }
        None => {
            warn!(email = %payload.email, rows = candidates.len(), "login rejected");
            Ok(Json(LoginResponse {
                success: false,
                message: LOGIN_INVALID.into(),
            }))
        }
    }
}
