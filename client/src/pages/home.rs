//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::ui::{AuthView, UiState};

/// Home route. Offers a sign-up call to action to anonymous visitors.
#[component]
pub fn HomePage(auth: RwSignal<AuthState>, ui: RwSignal<UiState>) -> impl IntoView {
    let anonymous = move || {
        let state = auth.get();
        !state.loading && state.user.is_none()
    };

    view! {
        <main class="home-page">
            <section class="home-page__hero">
                <h1>"DevUnity"</h1>
                <p class="home-page__tagline">"Join our community of developers"</p>
                <Show when=anonymous>
                    <button
                        class="btn btn--primary home-page__cta"
                        on:click=move |_| {
                            auth.update(AuthState::dismiss_error);
                            ui.update(|u| u.open_auth(AuthView::Signup));
                        }
                    >
                        "Get started"
                    </button>
                </Show>
                <Show when=move || auth.get().user.is_some()>
                    <a class="btn home-page__cta" href="/dashboard">"Go to dashboard"</a>
                </Show>
            </section>
        </main>
    }
}
