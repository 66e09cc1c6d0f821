//! Dashboard page shown after login and registration.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Once boot verification resolves
//! without a user it redirects to the configured home path.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// Label/value pairs shown in the account card.
pub fn account_rows(user: &User) -> [(&'static str, String); 3] {
    [("Username", user.username.clone()), ("Email", user.email.clone()), ("User ID", user.id.clone())]
}

/// Dashboard page. Redirects to `redirect_to` if the user is not
/// authenticated.
#[component]
pub fn DashboardPage(auth: RwSignal<AuthState>, #[prop(into)] redirect_to: String) -> impl IntoView {
    install_unauth_redirect(auth, redirect_to, use_navigate());

    let rows = move || {
        auth.get().user.map(|user| {
            account_rows(&user)
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="dashboard__row">
                            <span class="dashboard__label">{label}</span>
                            <span class="dashboard__value">{value}</span>
                        </div>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <main class="dashboard">
            <Show when=move || !auth.get().loading fallback=|| view! { <p class="dashboard__loading">"Loading…"</p> }>
                <h1 class="dashboard__title">"Dashboard"</h1>
                <section class="dashboard__card">{rows}</section>
            </Show>
        </main>
    }
}
