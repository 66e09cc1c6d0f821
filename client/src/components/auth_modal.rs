//! Sign-in / sign-up / forgot-password modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened by the navbar through `UiState::auth_modal`. Field rules run here
//! before submit; network calls and state changes go through `AuthContext`,
//! whose `error` feeds the banner at the top of the dialog.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use leptos::prelude::*;

use crate::error::AuthError;
use crate::net::api::AuthApi;
use crate::state::auth::AuthState;
use crate::state::auth_context::{AppAuth, AuthContext};
use crate::state::session::SessionStorage;
use crate::state::ui::{AuthView, UiState};
use crate::util::validation::{FieldErrors, LoginForm, ResetForm, SignupForm};

pub const RESET_NOTICE: &str = "If an account exists with this email, you will receive password reset instructions.";

/// Raw values of every input in the modal. Fields not shown in the current
/// view are ignored on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// A submit of the current view, ready to validate and send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Login(LoginForm),
    Signup(SignupForm),
    Reset(ResetForm),
}

impl Submission {
    pub fn from_fields(view: AuthView, fields: &FormFields) -> Self {
        match view {
            AuthView::Login => Self::Login(LoginForm { email: fields.email.clone(), password: fields.password.clone() }),
            AuthView::Signup => Self::Signup(SignupForm {
                email: fields.email.clone(),
                username: fields.username.clone(),
                password: fields.password.clone(),
                confirm_password: fields.confirm_password.clone(),
            }),
            AuthView::Forgot => Self::Reset(ResetForm { email: fields.email.clone() }),
        }
    }

    /// Run the client-side rules without sending anything.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages to render under each input.
    pub fn check(&self) -> Result<(), FieldErrors> {
        match self {
            Self::Login(form) => form.validate().map(drop),
            Self::Signup(form) => form.validate().map(drop),
            Self::Reset(form) => form.validate().map(drop),
        }
    }

    /// Dispatch to the matching `AuthContext` action.
    ///
    /// # Errors
    ///
    /// Propagates the action's error; the banner text is already set by then.
    pub async fn run<A: AuthApi, S: SessionStorage>(&self, auth: &AuthContext<A, S>) -> Result<(), AuthError> {
        match self {
            Self::Login(form) => auth.login(form).await.map(drop),
            Self::Signup(form) => auth.register(form).await.map(drop),
            Self::Reset(form) => auth.reset_password(form).await,
        }
    }
}

pub fn submit_label(view: AuthView, loading: bool) -> &'static str {
    match (view, loading) {
        (AuthView::Forgot, true) => "Sending...",
        (_, true) => "Processing...",
        (AuthView::Login, false) => "Login",
        (AuthView::Signup, false) => "Create Account",
        (AuthView::Forgot, false) => "Reset Password",
    }
}

pub fn tab_class(active: bool) -> &'static str {
    if active { "auth-modal__tab auth-modal__tab--active" } else { "auth-modal__tab" }
}

#[component]
pub fn AuthModal(auth: AppAuth, ui: RwSignal<UiState>) -> impl IntoView {
    let state = auth.state();
    let session = StoredValue::new(auth);
    let fields = RwSignal::new(FormFields::default());
    let field_errors = RwSignal::new(FieldErrors::default());
    let notice = RwSignal::new(None::<&'static str>);

    let current = move || ui.get().auth_modal.unwrap_or_default();
    let loading = move || state.get().loading;

    let clear_feedback = move || {
        field_errors.set(FieldErrors::default());
        notice.set(None);
        state.update(AuthState::dismiss_error);
    };
    let close = move || {
        ui.update(UiState::close_auth);
        fields.set(FormFields::default());
        clear_feedback();
    };
    let switch_to = move |view: AuthView| {
        ui.update(|u| u.open_auth(view));
        clear_feedback();
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.get_untracked().loading {
            return;
        }
        let view = ui.get_untracked().auth_modal.unwrap_or_default();
        let submission = Submission::from_fields(view, &fields.get_untracked());
        if let Err(errors) = submission.check() {
            field_errors.set(errors);
            return;
        }
        clear_feedback();

        #[cfg(feature = "hydrate")]
        {
            let auth = session.get_value();
            leptos::task::spawn_local(async move {
                if submission.run(&auth).await.is_err() {
                    return;
                }
                if matches!(submission, Submission::Reset(_)) {
                    fields.set(FormFields::default());
                    notice.set(Some(RESET_NOTICE));
                } else {
                    close();
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (submission, session);
        }
    };

    let field_error = move |pick: fn(&FieldErrors) -> Option<String>| {
        move || pick(&field_errors.get()).map(|message| view! { <p class="auth-modal__field-error">{message}</p> })
    };

    view! {
        <Show when=move || ui.get().auth_modal.is_some()>
            <div class="auth-modal__backdrop" on:click=move |_| close()>
                <div
                    class="auth-modal"
                    role="dialog"
                    tabindex="0"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=on_keydown
                >
                    <button class="auth-modal__close" title="Close" on:click=move |_| close()>
                        "×"
                    </button>

                    <div class="auth-modal__tabs">
                        <button
                            class=move || tab_class(current() == AuthView::Login)
                            on:click=move |_| switch_to(AuthView::Login)
                        >
                            "Log in"
                        </button>
                        <button
                            class=move || tab_class(current() == AuthView::Signup)
                            on:click=move |_| switch_to(AuthView::Signup)
                        >
                            "Sign up"
                        </button>
                    </div>

                    <div class="auth-modal__body">
                        {move || state.get().error.map(|message| view! { <div class="auth-modal__error">{message}</div> })}
                        {move || notice.get().map(|message| view! { <div class="auth-modal__notice">{message}</div> })}

                        <form class="auth-modal__form" on:submit=on_submit>
                            <input
                                class="auth-modal__input"
                                type="email"
                                placeholder=move || {
                                    if current() == AuthView::Forgot { "Enter your email" } else { "Enter email" }
                                }
                                prop:value=move || fields.get().email
                                on:input=move |ev| fields.update(|f| f.email = event_target_value(&ev))
                            />
                            {field_error(|e| e.email.clone())}

                            <Show when=move || current() == AuthView::Signup>
                                <input
                                    class="auth-modal__input"
                                    type="text"
                                    placeholder="Choose username"
                                    prop:value=move || fields.get().username
                                    on:input=move |ev| fields.update(|f| f.username = event_target_value(&ev))
                                />
                                {field_error(|e| e.username.clone())}
                            </Show>

                            <Show when=move || current() != AuthView::Forgot>
                                <input
                                    class="auth-modal__input"
                                    type="password"
                                    placeholder="Enter password"
                                    prop:value=move || fields.get().password
                                    on:input=move |ev| fields.update(|f| f.password = event_target_value(&ev))
                                />
                                {field_error(|e| e.password.clone())}
                            </Show>

                            <Show when=move || current() == AuthView::Signup>
                                <input
                                    class="auth-modal__input"
                                    type="password"
                                    placeholder="Confirm password"
                                    prop:value=move || fields.get().confirm_password
                                    on:input=move |ev| fields.update(|f| f.confirm_password = event_target_value(&ev))
                                />
                                {field_error(|e| e.confirm_password.clone())}
                            </Show>

                            <button class="btn btn--primary auth-modal__submit" type="submit" disabled=loading>
                                {move || submit_label(current(), loading())}
                            </button>

                            {move || match current() {
                                AuthView::Login => view! {
                                    <p class="auth-modal__footer">
                                        <button type="button" class="auth-modal__link" on:click=move |_| switch_to(AuthView::Forgot)>
                                            "Forgot password?"
                                        </button>
                                    </p>
                                }
                                .into_any(),
                                AuthView::Signup => view! {
                                    <p class="auth-modal__footer">
                                        "By clicking " <strong>"Create Account"</strong> ", you agree to our "
                                        <a href="#" class="auth-modal__link">"terms of service"</a>
                                    </p>
                                }
                                .into_any(),
                                AuthView::Forgot => view! {
                                    <p class="auth-modal__footer">
                                        <button type="button" class="auth-modal__link" on:click=move |_| switch_to(AuthView::Login)>
                                            "Back to login"
                                        </button>
                                    </p>
                                }
                                .into_any(),
                            }}
                        </form>
                    </div>
                </div>
            </div>
        </Show>
    }
}
