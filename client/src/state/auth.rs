//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navbar, the auth modal, and route guards to decide what to
//! render. Written only through `AuthContext`, which feeds it the outcome of
//! each backend call via [`AuthState::apply`].
//!
//! DESIGN
//! ======
//! Transitions are a small reducer keyed by request id. Every action takes a
//! fresh id from [`AuthState::issue`]; an outcome is applied only if its id is
//! still the latest one, so a slow response can never overwrite the result
//! of a newer action.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Monotonic identifier handed out per auth action.
pub type RequestId = u64;

/// Coarse session phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Boot verification has not resolved yet.
    #[default]
    Booting,
    Authenticated,
    Anonymous,
}

/// Outcome of a backend call, applied to the state under its request id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// The backend accepted credentials or a stored token.
    SignedIn(User),
    /// No valid session: boot without token, rejected token, or logout.
    SignedOut,
    /// The call failed; the message goes to the error banner.
    Failed(String),
    /// A call with no session effect (password reset) finished.
    Completed,
}

/// Authentication state tracking the current user, loading, and error banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    status: AuthStatus,
    latest_request: RequestId,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true, error: None, status: AuthStatus::Booting, latest_request: 0 }
    }
}

impl AuthState {
    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// Start a new action and return its id. Any action still in flight is
    /// superseded from this point on.
    ///
    /// `show_loading` is false for background checks that should not disable
    /// the forms.
    pub fn issue(&mut self, show_loading: bool) -> RequestId {
        self.latest_request += 1;
        if show_loading {
            self.loading = true;
            self.error = None;
        }
        self.latest_request
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id == self.latest_request
    }

    /// Apply an outcome. Returns `false` (and changes nothing) when `id` is
    /// stale.
    pub fn apply(&mut self, id: RequestId, action: AuthAction) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.loading = false;
        match action {
            AuthAction::SignedIn(user) => {
                self.user = Some(user);
                self.error = None;
                self.status = AuthStatus::Authenticated;
            }
            AuthAction::SignedOut => {
                self.user = None;
                self.status = AuthStatus::Anonymous;
            }
            AuthAction::Failed(message) => {
                self.error = Some(message);
                if self.status == AuthStatus::Booting {
                    self.status = AuthStatus::Anonymous;
                }
            }
            AuthAction::Completed => {
                self.error = None;
                if self.status == AuthStatus::Booting {
                    self.status = AuthStatus::Anonymous;
                }
            }
        }
        true
    }

    /// Drop to anonymous immediately, superseding anything in flight.
    pub fn sign_out(&mut self) {
        let id = self.issue(false);
        self.apply(id, AuthAction::SignedOut);
        self.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
