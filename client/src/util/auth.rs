//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, and
//! `App` wires the auth container's navigation side effect through here.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;
use crate::state::auth_context::Navigate;

/// True once boot verification has finished and nobody is signed in.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Where an unauthenticated visitor should be sent, if anywhere.
pub fn unauth_redirect_target<'a>(state: &AuthState, to: &'a str) -> Option<&'a str> {
    should_redirect_unauth(state).then_some(to)
}

/// Redirect to `to` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, to: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = unauth_redirect_target(&auth.get(), &to) {
            navigate(target, NavigateOptions::default());
        }
    });
}

/// Navigation side effect that performs a full browser navigation.
///
/// The reload re-runs boot verification, so the new page always starts from
/// the persisted session.
pub fn browser_navigator() -> Navigate {
    Arc::new(|path: &str| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    })
}
