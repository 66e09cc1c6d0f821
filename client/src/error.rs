//! Client-side auth error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every failure an auth action can produce is one of these variants. The
//! `AuthContext` boundary renders them into `AuthState::error` strings, so no
//! variant ever escapes as a panic into the view layer.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::util::validation::FieldErrors;

/// Backend operation an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOp {
    Login,
    Register,
    Verify,
    ResetPassword,
}

impl AuthOp {
    /// Fixed user-facing message shown when the backend rejects this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
            Self::Verify => "Session verification failed",
            Self::ResetPassword => "Password reset request failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The request never completed (offline, DNS, CORS, unavailable on server).
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("{}", .op.failure_message())]
    Rejected { op: AuthOp, status: u16 },
    /// The backend answered but the body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// A client-side form rule failed; no request was sent.
    #[error("{0}")]
    Validation(FieldErrors),
    /// A newer auth action was issued while this one was in flight.
    #[error("superseded by a newer request")]
    Superseded,
}
