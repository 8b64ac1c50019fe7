use serde::{Deserialize, Serialize};

/// Request body for account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub message: String,
}

/// Failed signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login outcome; the same shape is used for every status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

pub const SIGNUP_SUCCESS: &str = "Signup success";
pub const SIGNUP_FAILED: &str = "Failed to insert data";
pub const LOGIN_SUCCESS: &str = "Login successful";
pub const LOGIN_INVALID: &str = "Invalid email or password";
pub const LOGIN_SERVER_ERROR: &str = "Server error";
