//! Wire DTOs for the auth backend.
//!
//! DESIGN
//! ======
//! Field names match the backend JSON exactly so serde needs no renames.
//! Unknown response fields are ignored to tolerate backend additions.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user as returned by login, register, and verify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier.
    pub id: String,
    /// Public handle shown in the navbar greeting.
    pub username: String,
    pub email: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/reset-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// Successful login/register response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    /// Opaque session token to persist and present on verify.
    pub token: String,
    /// Token lifetime in seconds, when the backend advertises one.
    #[serde(default)]
    pub expires_in: Option<u64>,
}
