//! Top navigation bar with site links and session controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route by `App`. Shows the greeting and sign-out button
//! when a user is present, otherwise the sign-in/sign-up buttons that open
//! the auth modal.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::auth_modal::AuthModal;
use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::state::auth_context::AppAuth;
use crate::state::ui::{AuthView, UiState};

pub const BRAND: &str = "DevUnity";

/// Marketing links as `(label, path)`.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Explore", "/explore"),
    ("Community", "/community"),
    ("Blog", "/blogs"),
    ("About", "/about"),
    ("Questions", "/question"),
];

/// CSS class for a nav link given the current pathname.
pub fn link_class(pathname: &str, path: &str) -> &'static str {
    if pathname == path { "navbar__link navbar__link--active" } else { "navbar__link" }
}

pub fn greeting(user: &User) -> String {
    format!("Welcome, {}!", user.username)
}

#[component]
pub fn Navbar(auth: AppAuth, ui: RwSignal<UiState>) -> impl IntoView {
    let state = auth.state();
    let pathname = use_location().pathname;
    let session = StoredValue::new(auth.clone());

    let on_logout = move |_| session.with_value(AppAuth::logout);
    let open = move |view: AuthView| {
        state.update(AuthState::dismiss_error);
        ui.update(|u| u.open_auth(view));
    };

    let links = move || {
        let pathname = pathname.get();
        NAV_LINKS
            .iter()
            .map(|(label, path)| {
                let class = link_class(&pathname, path);
                view! {
                    <a class=class href=*path on:click=move |_| ui.update(UiState::close_menu)>
                        {*label}
                    </a>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="navbar">
            <div class="navbar__inner">
                <a class="navbar__brand" href="/">
                    <span class="navbar__logo" aria-hidden="true">"●"</span>
                    <span class="navbar__brand-name">{BRAND}</span>
                </a>

                <div class="navbar__links">{links}</div>

                <div class="navbar__session">
                    <Show
                        when=move || state.get().user.is_some()
                        fallback=move || {
                            view! {
                                <button class="btn navbar__sign-in" on:click=move |_| open(AuthView::Login)>
                                    "Sign in"
                                </button>
                                <button class="btn btn--primary navbar__sign-up" on:click=move |_| open(AuthView::Signup)>
                                    "Sign up"
                                </button>
                            }
                        }
                    >
                        <span class="navbar__greeting">
                            {move || state.get().user.as_ref().map(greeting).unwrap_or_default()}
                        </span>
                        <button class="btn navbar__sign-out" on:click=on_logout>
                            "Sign out"
                        </button>
                    </Show>

                    <button
                        class="navbar__menu-toggle"
                        title="Menu"
                        on:click=move |_| ui.update(UiState::toggle_menu)
                    >
                        "☰"
                    </button>
                </div>
            </div>

            <Show when=move || ui.get().mobile_menu_open>
                <div class="navbar__sheet">
                    <div class="navbar__sheet-links">{links}</div>
                </div>
            </Show>

            <AuthModal auth=auth.clone() ui=ui/>
        </nav>
    }
}
