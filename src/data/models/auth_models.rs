use bcrypt::BcryptError;
use diesel::result::Error as DieselError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::data::models::UserView;

// Login specific errors
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Database error")]
    DatabaseError(DieselError),
    #[error("Hashing error")]
    HashingError(BcryptError),
    #[error("Session error: {0}")]
    SessionError(String),
}

// Registration specific errors
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("Username or email already exists")]
    AccountExists,
    #[error("{0}")]
    ValidationError(String),
    #[error("Database error")]
    DatabaseError(DieselError),
    #[error("Hashing error")]
    HashingError(BcryptError),
    #[error("Session error: {0}")]
    SessionError(String),
}

// Request payloads
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Response payloads
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_bad_email() {
        let form = RegisterRequest {
            username: "alice".into(),
            email: "not-an-email".into(),
            password: "longenough".into(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn register_request_rejects_short_password() {
        let form = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "short".into(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn register_request_accepts_valid_input() {
        let form = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "password123".into(),
        };
        assert!(form.validate().is_ok());
    }
}
