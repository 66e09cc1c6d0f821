//! Root application component with routing and the auth container.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::config::AuthConfig;
use crate::net::api::HttpAuthClient;
use crate::pages::{dashboard::DashboardPage, home::HomePage};
use crate::state::auth_context::AppAuth;
use crate::state::session::LocalStorage;
use crate::state::ui::UiState;
use crate::util::auth::browser_navigator;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the single auth container, starts boot verification, and passes
/// the container down to the navbar and pages as props.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AuthConfig::default();
    let auth = AppAuth::new(HttpAuthClient::new(config.api_base.clone()), LocalStorage, config, browser_navigator());
    let ui = RwSignal::new(UiState::default());
    let state = auth.state();
    let home_path = auth.config().home_path.clone();

    auth.spawn_session_tasks();

    view! {
        <Stylesheet id="leptos" href="/pkg/devunity.css"/>
        <Title text="DevUnity"/>

        <Router>
            <Navbar auth=auth ui=ui/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=move || view! { <HomePage auth=state ui=ui/> }/>
                <Route path=StaticSegment("dashboard") view=move || view! { <DashboardPage auth=state redirect_to=home_path.clone()/> }/>
            </Routes>
        </Router>
    }
}
