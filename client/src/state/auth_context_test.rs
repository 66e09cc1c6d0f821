use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::error::AuthOp;
use crate::net::types::{LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::state::auth::AuthStatus;
use crate::state::session::MemoryStorage;
use crate::util::validation::PASSWORDS_MISMATCH;

// =============================================================
// Fakes
// =============================================================

struct Script {
    login: Result<AuthResponse, AuthError>,
    register: Result<AuthResponse, AuthError>,
    verify: Result<User, AuthError>,
    reset: Result<(), AuthError>,
    login_gate: Option<oneshot::Receiver<()>>,
    calls: Vec<&'static str>,
    verified_tokens: Vec<String>,
}

#[derive(Clone)]
struct FakeApi {
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                login: Ok(session_for(alice(), "tok-login")),
                register: Ok(session_for(bob(), "tok-register")),
                verify: Ok(alice()),
                reset: Ok(()),
                login_gate: None,
                calls: Vec::new(),
                verified_tokens: Vec::new(),
            })),
        }
    }

    fn edit(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.lock().unwrap());
    }

    fn calls(&self) -> Vec<&'static str> {
        self.script.lock().unwrap().calls.clone()
    }

    fn verified_tokens(&self) -> Vec<String> {
        self.script.lock().unwrap().verified_tokens.clone()
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, _req: &LoginRequest) -> Result<AuthResponse, AuthError> {
        let gate = {
            let mut script = self.script.lock().unwrap();
            script.calls.push("login");
            script.login_gate.take()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.script.lock().unwrap().login.clone()
    }

    async fn register(&self, _req: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("register");
        script.register.clone()
    }

    async fn verify(&self, token: &str) -> Result<User, AuthError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("verify");
        script.verified_tokens.push(token.to_owned());
        script.verify.clone()
    }

    async fn reset_password(&self, _req: &ResetPasswordRequest) -> Result<(), AuthError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push("reset");
        script.reset.clone()
    }
}

struct Harness {
    auth: AuthContext<FakeApi, MemoryStorage>,
    api: FakeApi,
    storage: MemoryStorage,
    visited: Arc<Mutex<Vec<String>>>,
    _owner: Owner,
}

impl Harness {
    fn new() -> Self {
        let owner = Owner::new();
        owner.set();
        let api = FakeApi::new();
        let storage = MemoryStorage::default();
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&visited);
        let navigate: Navigate = Arc::new(move |path: &str| sink.lock().unwrap().push(path.to_owned()));
        let auth = AuthContext::new(api.clone(), storage.clone(), AuthConfig::default(), navigate);
        Self { auth, api, storage, visited, _owner: owner }
    }

    fn state(&self) -> AuthState {
        self.auth.state().get_untracked()
    }

    fn token(&self) -> Option<String> {
        self.auth.session().get()
    }

    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    fn signed_in(self) -> Self {
        block_on(self.auth.login(&valid_login())).unwrap();
        self.visited.lock().unwrap().clear();
        self
    }
}

fn alice() -> User {
    User { id: "u1".to_owned(), username: "alice".to_owned(), email: "alice@example.com".to_owned() }
}

fn bob() -> User {
    User { id: "u2".to_owned(), username: "bob".to_owned(), email: "bob@example.com".to_owned() }
}

fn session_for(user: User, token: &str) -> AuthResponse {
    AuthResponse { user, token: token.to_owned(), expires_in: None }
}

fn valid_login() -> LoginForm {
    LoginForm { email: "alice@example.com".to_owned(), password: "Abc12345".to_owned() }
}

fn valid_signup() -> SignupForm {
    SignupForm {
        email: "bob@example.com".to_owned(),
        username: "bob".to_owned(),
        password: "Abc12345".to_owned(),
        confirm_password: "Abc12345".to_owned(),
    }
}

fn rejected(op: AuthOp) -> AuthError {
    AuthError::Rejected { op, status: 401 }
}

// =============================================================
// Boot
// =============================================================

#[test]
fn boot_without_token_is_anonymous_and_skips_network() {
    let h = Harness::new();
    block_on(h.auth.boot());
    let state = h.state();
    assert_eq!(state.status(), AuthStatus::Anonymous);
    assert!(!state.loading);
    assert!(h.api.calls().is_empty());
}

#[test]
fn boot_with_accepted_token_restores_user() {
    let h = Harness::new();
    h.auth.session().set("tok-stored");
    block_on(h.auth.boot());
    assert_eq!(h.state().user, Some(alice()));
    assert!(h.state().is_authenticated());
    assert_eq!(h.api.verified_tokens(), vec!["tok-stored".to_owned()]);
    assert!(h.visited().is_empty());
}

#[test]
fn boot_with_rejected_token_clears_it_and_is_idempotent() {
    let h = Harness::new();
    h.auth.session().set("tok-stale");
    h.api.edit(|s| s.verify = Err(rejected(AuthOp::Verify)));

    block_on(h.auth.boot());
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.token(), None);
    let first = h.state();

    block_on(h.auth.boot());
    assert_eq!(h.state().user, first.user);
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.api.calls(), vec!["verify"]);
}

#[test]
fn boot_network_failure_clears_token_and_is_anonymous() {
    let h = Harness::new();
    h.auth.session().set("tok-stored");
    h.api.edit(|s| s.verify = Err(AuthError::Network("offline".to_owned())));
    block_on(h.auth.boot());
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert!(!h.state().loading);
    assert_eq!(h.token(), None);
}

#[test]
fn boot_with_expired_session_skips_network_and_clears() {
    let h = Harness::new();
    h.auth.session().set_with_expiry("tok-old", Some(1));
    block_on(h.auth.boot());
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.token(), None);
    assert!(h.api.calls().is_empty());
}

// =============================================================
// Login / register
// =============================================================

#[test]
fn login_authenticates_persists_token_and_navigates() {
    let h = Harness::new();
    block_on(h.auth.boot());
    let user = block_on(h.auth.login(&valid_login())).unwrap();
    assert_eq!(user, alice());
    let state = h.state();
    assert_eq!(state.user, Some(alice()));
    assert!(state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(h.token(), Some("tok-login".to_owned()));
    assert_eq!(h.visited(), vec!["/dashboard".to_owned()]);
}

#[test]
fn login_stores_expiry_from_backend_lifetime() {
    let h = Harness::new();
    h.api.edit(|s| {
        s.login = Ok(AuthResponse { user: alice(), token: "tok".to_owned(), expires_in: Some(60) });
    });
    let before = now_ms();
    block_on(h.auth.login(&valid_login())).unwrap();
    let expires_at = h.auth.session().load().unwrap().expires_at_ms.unwrap();
    assert!(expires_at >= before + 60_000);
    assert!(expires_at <= now_ms() + 60_000);
}

#[test]
fn login_rejection_sets_error_and_keeps_state() {
    let h = Harness::new();
    block_on(h.auth.boot());
    h.api.edit(|s| s.login = Err(rejected(AuthOp::Login)));
    let err = block_on(h.auth.login(&valid_login())).unwrap_err();
    assert_eq!(err, rejected(AuthOp::Login));
    let state = h.state();
    assert_eq!(state.user, None);
    assert_eq!(state.error.as_deref(), Some("Login failed"));
    assert!(!state.loading);
    assert_eq!(h.token(), None);
    assert!(h.visited().is_empty());
}

#[test]
fn login_with_short_password_never_reaches_network() {
    let h = Harness::new();
    let form = LoginForm { email: "a@b.com".to_owned(), password: "short".to_owned() };
    let err = block_on(h.auth.login(&form)).unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(h.api.calls().is_empty());
    assert_eq!(h.state().error, None);
}

#[test]
fn register_authenticates_new_user() {
    let h = Harness::new();
    let user = block_on(h.auth.register(&valid_signup())).unwrap();
    assert_eq!(user, bob());
    assert_eq!(h.state().user, Some(bob()));
    assert_eq!(h.token(), Some("tok-register".to_owned()));
    assert_eq!(h.visited(), vec!["/dashboard".to_owned()]);
}

#[test]
fn register_with_mismatched_confirmation_never_reaches_network() {
    let h = Harness::new();
    let mut form = valid_signup();
    form.confirm_password = "Abc1234".to_owned();
    let err = block_on(h.auth.register(&form)).unwrap_err();
    let AuthError::Validation(fields) = err else {
        panic!("expected validation error");
    };
    assert_eq!(fields.confirm_password.as_deref(), Some(PASSWORDS_MISMATCH));
    assert!(h.api.calls().is_empty());
}

#[test]
fn register_failure_reports_registration_message() {
    let h = Harness::new();
    h.api.edit(|s| s.register = Err(AuthError::Rejected { op: AuthOp::Register, status: 409 }));
    assert!(block_on(h.auth.register(&valid_signup())).is_err());
    assert_eq!(h.state().error.as_deref(), Some("Registration failed"));
}

#[test]
fn decode_failure_surfaces_as_error_banner() {
    let h = Harness::new();
    h.api.edit(|s| s.login = Err(AuthError::Decode("missing field `token`".to_owned())));
    assert!(block_on(h.auth.login(&valid_login())).is_err());
    assert_eq!(h.state().error.as_deref(), Some("unexpected response: missing field `token`"));
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_token_and_navigates_home() {
    let h = Harness::new().signed_in();
    h.auth.logout();
    assert_eq!(h.token(), None);
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.state().user, None);
    assert_eq!(h.visited(), vec!["/".to_owned()]);
}

#[test]
fn logout_from_any_state_is_anonymous() {
    let h = Harness::new();
    h.auth.logout();
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert!(!h.state().loading);
    assert_eq!(h.token(), None);
}

// =============================================================
// Reset password
// =============================================================

#[test]
fn reset_password_for_unknown_email_resolves_ok() {
    let h = Harness::new();
    let form = ResetForm { email: "nonexistent@example.com".to_owned() };
    assert_eq!(block_on(h.auth.reset_password(&form)), Ok(()));
    let state = h.state();
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(h.api.calls(), vec!["reset"]);
}

#[test]
fn reset_password_network_failure_sets_error() {
    let h = Harness::new();
    h.api.edit(|s| s.reset = Err(AuthError::Network("offline".to_owned())));
    let form = ResetForm { email: "a@b.com".to_owned() };
    assert!(block_on(h.auth.reset_password(&form)).is_err());
    assert_eq!(h.state().error.as_deref(), Some("network error: offline"));
}

// =============================================================
// Staleness
// =============================================================

#[test]
fn login_resolving_after_logout_is_discarded() {
    let h = Harness::new();
    block_on(h.auth.boot());
    let (release, gate) = oneshot::channel();
    h.api.edit(|s| s.login_gate = Some(gate));

    let form = valid_login();
    block_on(async {
        let mut pending = Box::pin(h.auth.login(&form));
        assert!(futures::poll!(pending.as_mut()).is_pending());
        h.auth.logout();
        release.send(()).unwrap();
        assert_eq!(pending.await, Err(AuthError::Superseded));
    });

    assert_eq!(h.state().user, None);
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.token(), None);
    assert_eq!(h.visited(), vec!["/".to_owned()]);
}

#[test]
fn older_login_loses_to_newer_register() {
    let h = Harness::new();
    let (release, gate) = oneshot::channel();
    h.api.edit(|s| s.login_gate = Some(gate));

    let form = valid_login();
    block_on(async {
        let mut slow = Box::pin(h.auth.login(&form));
        assert!(futures::poll!(slow.as_mut()).is_pending());
        h.auth.register(&valid_signup()).await.unwrap();
        release.send(()).unwrap();
        assert_eq!(slow.await, Err(AuthError::Superseded));
    });

    assert_eq!(h.state().user, Some(bob()));
    assert_eq!(h.token(), Some("tok-register".to_owned()));
}

// =============================================================
// Re-validation
// =============================================================

#[test]
fn revalidate_signs_out_when_backend_rejects() {
    let h = Harness::new().signed_in();
    h.api.edit(|s| s.verify = Err(rejected(AuthOp::Verify)));
    block_on(h.auth.revalidate());
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.token(), None);
}

#[test]
fn revalidate_keeps_user_on_network_failure() {
    let h = Harness::new().signed_in();
    h.api.edit(|s| s.verify = Err(AuthError::Network("offline".to_owned())));
    block_on(h.auth.revalidate());
    assert_eq!(h.state().user, Some(alice()));
    assert_eq!(h.token(), Some("tok-login".to_owned()));
}

#[test]
fn revalidate_signs_out_when_session_expired() {
    let h = Harness::new().signed_in();
    h.auth.session().set_with_expiry("tok-login", Some(1));
    block_on(h.auth.revalidate());
    assert_eq!(h.state().status(), AuthStatus::Anonymous);
    assert_eq!(h.token(), None);
    assert_eq!(h.api.calls(), vec!["login"]);
}

#[test]
fn revalidate_does_not_flash_loading() {
    let h = Harness::new().signed_in();
    block_on(h.auth.revalidate());
    let state = h.state();
    assert!(!state.loading);
    assert_eq!(state.user, Some(alice()));
    assert!(h.storage.get_item("token").is_some());
}

#[test]
fn dismiss_error_clears_banner() {
    let h = Harness::new();
    h.api.edit(|s| s.login = Err(rejected(AuthOp::Login)));
    let _ = block_on(h.auth.login(&valid_login()));
    h.auth.dismiss_error();
    assert_eq!(h.state().error, None);
}
