//! Auth state container: the single writer of `AuthState` and the session
//! store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one `AuthContext` and hands it to the navbar, the auth modal,
//! and pages as a component prop. Components read `state()` for rendering and
//! call the action methods; they never touch storage or the backend directly.
//!
//! DESIGN
//! ======
//! Each action takes a request id from `AuthState::issue` before awaiting the
//! backend. After the await it re-checks that id; a superseded response
//! neither writes storage nor changes state. Execution is single-threaded, so
//! the check and the writes that follow it cannot interleave with another
//! action.

#[cfg(test)]
#[path = "auth_context_test.rs"]
mod auth_context_test;

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;

use super::auth::{AuthAction, AuthState, RequestId};
use super::session::{LocalStorage, SessionStorage, SessionStore, now_ms};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::net::api::{AuthApi, HttpAuthClient};
use crate::net::types::{AuthResponse, User};
use crate::util::validation::{LoginForm, ResetForm, SignupForm};

/// Navigation side effect invoked after login, registration, and logout.
pub type Navigate = Arc<dyn Fn(&str) + Send + Sync>;

/// The browser wiring: HTTP backend plus `localStorage`.
pub type AppAuth = AuthContext<HttpAuthClient, LocalStorage>;

/// How a failed verify call should affect the stored session. Boot clears it
/// on any failure; re-validation only on rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CheckMode {
    Boot,
    Revalidate,
}

pub struct AuthContext<A, S> {
    state: RwSignal<AuthState>,
    api: A,
    session: SessionStore<S>,
    config: Arc<AuthConfig>,
    navigate: Navigate,
}

impl<A: Clone, S: Clone> Clone for AuthContext<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            api: self.api.clone(),
            session: self.session.clone(),
            config: Arc::clone(&self.config),
            navigate: Arc::clone(&self.navigate),
        }
    }
}

impl<A: AuthApi, S: SessionStorage> AuthContext<A, S> {
    /// Create the container in the `Booting` state.
    pub fn new(api: A, storage: S, config: AuthConfig, navigate: Navigate) -> Self {
        let session = SessionStore::new(storage, config.storage_key.clone());
        Self {
            state: RwSignal::new(AuthState::default()),
            api,
            session,
            config: Arc::new(config),
            navigate,
        }
    }

    /// Reactive state for rendering.
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// One-time session restore at application start.
    pub async fn boot(&self) {
        self.check_session(CheckMode::Boot).await;
    }

    /// Re-check the stored session against its expiry and the backend.
    ///
    /// Transient network failures keep the current user; only an expired,
    /// missing, or rejected session signs out.
    pub async fn revalidate(&self) {
        self.check_session(CheckMode::Revalidate).await;
    }

    /// Validate the form, then sign in and navigate to the landing page.
    ///
    /// # Errors
    ///
    /// Validation failures return before any request is sent. Backend and
    /// network failures are also written to `state().error`.
    pub async fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        let req = form.validate().map_err(AuthError::Validation)?;
        self.establish(self.api.login(&req)).await
    }

    /// Validate the form, then register and navigate to the landing page.
    ///
    /// # Errors
    ///
    /// Same contract as [`AuthContext::login`].
    pub async fn register(&self, form: &SignupForm) -> Result<User, AuthError> {
        let req = form.validate().map_err(AuthError::Validation)?;
        self.establish(self.api.register(&req)).await
    }

    /// Request a password reset email.
    ///
    /// # Errors
    ///
    /// Fails on validation, network failure, or a server fault. Unknown
    /// emails are not an error.
    pub async fn reset_password(&self, form: &ResetForm) -> Result<(), AuthError> {
        let req = form.validate().map_err(AuthError::Validation)?;
        let id = self.issue(true);
        let outcome = self.api.reset_password(&req).await;
        if !self.is_current(id) {
            log::debug!("discarding superseded reset-password response #{id}");
            return Err(AuthError::Superseded);
        }
        match outcome {
            Ok(()) => {
                self.finish(id, AuthAction::Completed);
                Ok(())
            }
            Err(e) => {
                log::warn!("password reset failed: {e}");
                self.finish(id, AuthAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Clear the session, go anonymous, and navigate home.
    pub fn logout(&self) {
        self.session.clear();
        self.state.update(AuthState::sign_out);
        log::info!("signed out");
        (self.navigate)(&self.config.home_path);
    }

    pub fn dismiss_error(&self) {
        self.state.update(AuthState::dismiss_error);
    }

    /// Run boot verification, then re-validate periodically while signed in.
    pub fn spawn_session_tasks(&self) {
        #[cfg(feature = "hydrate")]
        {
            let auth = self.clone();
            leptos::task::spawn_local(async move {
                auth.boot().await;
                let period = std::time::Duration::from_secs(auth.config.revalidate_interval_secs);
                loop {
                    gloo_timers::future::sleep(period).await;
                    if auth.state.get_untracked().is_authenticated() {
                        auth.revalidate().await;
                    }
                }
            });
        }
    }

    fn issue(&self, show_loading: bool) -> RequestId {
        self.state.try_update(|s| s.issue(show_loading)).unwrap_or_default()
    }

    fn is_current(&self, id: RequestId) -> bool {
        self.state.with_untracked(|s| s.is_current(id))
    }

    fn finish(&self, id: RequestId, action: AuthAction) -> bool {
        let applied = self.state.try_update(|s| s.apply(id, action)).unwrap_or(false);
        if !applied {
            log::debug!("discarding superseded auth response #{id}");
        }
        applied
    }

    async fn establish(&self, call: impl Future<Output = Result<AuthResponse, AuthError>>) -> Result<User, AuthError> {
        let id = self.issue(true);
        let outcome = call.await;
        if !self.is_current(id) {
            log::debug!("discarding superseded sign-in response #{id}");
            return Err(AuthError::Superseded);
        }
        match outcome {
            Ok(resp) => {
                let expires_at = self.config.expiry_from(now_ms(), resp.expires_in);
                self.session.set_with_expiry(&resp.token, Some(expires_at));
                self.finish(id, AuthAction::SignedIn(resp.user.clone()));
                log::info!("signed in as {}", resp.user.id);
                (self.navigate)(&self.config.landing_path);
                Ok(resp.user)
            }
            Err(e) => {
                log::warn!("sign-in failed: {e}");
                self.finish(id, AuthAction::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn check_session(&self, mode: CheckMode) {
        let id = self.issue(mode == CheckMode::Boot);
        let Some(stored) = self.session.load() else {
            self.finish(id, AuthAction::SignedOut);
            return;
        };
        if stored.is_expired(now_ms()) {
            log::info!("stored session expired");
            self.session.clear();
            self.finish(id, AuthAction::SignedOut);
            return;
        }

        let outcome = self.api.verify(&stored.token).await;
        if !self.is_current(id) {
            log::debug!("discarding superseded verify response #{id}");
            return;
        }
        match outcome {
            Ok(user) => {
                log::info!("session verified for {}", user.id);
                self.finish(id, AuthAction::SignedIn(user));
            }
            Err(e) if mode == CheckMode::Boot || matches!(e, AuthError::Rejected { .. }) => {
                log::warn!("stored session not restored: {e}");
                self.session.clear();
                self.finish(id, AuthAction::SignedOut);
            }
            Err(e) => {
                log::warn!("re-validation skipped: {e}");
            }
        }
    }
}
