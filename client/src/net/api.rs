//! REST client for the auth backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with a network error, since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Calls return `Result<_, AuthError>` instead of panicking. No retries, no
//! timeouts: failures go straight back to `AuthContext`, which turns them
//! into banner text.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthResponse, LoginRequest, RegisterRequest, ResetPasswordRequest, User};
use crate::error::AuthError;
#[cfg(any(test, feature = "hydrate"))]
use crate::error::AuthOp;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const VERIFY_PATH: &str = "/api/auth/verify";
pub const RESET_PASSWORD_PATH: &str = "/api/auth/reset-password";

#[cfg(not(feature = "hydrate"))]
const SERVER_UNAVAILABLE: &str = "not available on server";

/// Operations the auth state container needs from a backend.
///
/// `HttpAuthClient` is the browser implementation; tests supply a scripted
/// fake.
#[allow(async_fn_in_trait)]
pub trait AuthApi: Clone + Send + Sync + 'static {
    /// `POST /api/auth/login`.
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AuthError>;
    /// `POST /api/auth/register`.
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, AuthError>;
    /// `GET /api/auth/verify` with a bearer token.
    async fn verify(&self, token: &str) -> Result<User, AuthError>;
    /// `POST /api/auth/reset-password`. Succeeds for unknown emails too.
    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), AuthError>;
}

/// `gloo-net` backed client rooted at `base` (empty for same-origin).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpAuthClient {
    base: String,
}

impl HttpAuthClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base, path)
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a response status onto the operation's failure contract.
#[cfg(any(test, feature = "hydrate"))]
fn check_status(op: AuthOp, status: u16) -> Result<(), AuthError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(AuthError::Rejected { op, status }) }
}

/// Reset-password hides account existence: any 2xx or 4xx answer reads as
/// success. Only server faults are reported.
#[cfg(any(test, feature = "hydrate"))]
fn reset_outcome(status: u16) -> Result<(), AuthError> {
    if status >= 500 { Err(AuthError::Rejected { op: AuthOp::ResetPassword, status }) } else { Ok(()) }
}

#[cfg(feature = "hydrate")]
fn network(e: gloo_net::Error) -> AuthError {
    AuthError::Network(e.to_string())
}

#[cfg(feature = "hydrate")]
fn decode(e: gloo_net::Error) -> AuthError {
    AuthError::Decode(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn post_for_session<B: serde::Serialize>(url: &str, op: AuthOp, body: &B) -> Result<AuthResponse, AuthError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    check_status(op, resp.status())?;
    resp.json::<AuthResponse>().await.map_err(decode)
}

impl AuthApi for HttpAuthClient {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AuthError> {
        let url = self.url(LOGIN_PATH);
        #[cfg(feature = "hydrate")]
        {
            post_for_session(&url, AuthOp::Login, req).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, req);
            Err(AuthError::Network(SERVER_UNAVAILABLE.to_owned()))
        }
    }

    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        let url = self.url(REGISTER_PATH);
        #[cfg(feature = "hydrate")]
        {
            post_for_session(&url, AuthOp::Register, req).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, req);
            Err(AuthError::Network(SERVER_UNAVAILABLE.to_owned()))
        }
    }

    async fn verify(&self, token: &str) -> Result<User, AuthError> {
        let url = self.url(VERIFY_PATH);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer_header(token))
                .send()
                .await
                .map_err(network)?;
            check_status(AuthOp::Verify, resp.status())?;
            resp.json::<User>().await.map_err(decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, token);
            Err(AuthError::Network(SERVER_UNAVAILABLE.to_owned()))
        }
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), AuthError> {
        let url = self.url(RESET_PASSWORD_PATH);
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&url)
                .json(req)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            if !resp.ok() {
                log::debug!("reset-password answered {}", resp.status());
            }
            reset_outcome(resp.status())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, req);
            Err(AuthError::Network(SERVER_UNAVAILABLE.to_owned()))
        }
    }
}
