use super::*;

fn alice() -> User {
    User { id: "u1".to_owned(), username: "alice".to_owned(), email: "alice@example.com".to_owned() }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.error.is_none());
}

#[test]
fn auth_state_default_is_booting_and_loading() {
    let state = AuthState::default();
    assert!(state.loading);
    assert_eq!(state.status(), AuthStatus::Booting);
    assert_eq!(state.latest_request(), 0);
}

// =============================================================
// Request ids
// =============================================================

#[test]
fn issue_hands_out_increasing_ids() {
    let mut state = AuthState::default();
    let a = state.issue(true);
    let b = state.issue(true);
    assert!(b > a);
    assert!(!state.is_current(a));
    assert!(state.is_current(b));
}

#[test]
fn issue_with_loading_clears_previous_error() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::Failed("Login failed".to_owned()));
    state.issue(true);
    assert!(state.loading);
    assert_eq!(state.error, None);
}

#[test]
fn background_issue_leaves_loading_and_error_alone() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::Failed("boom".to_owned()));
    state.issue(false);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("boom"));
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn signed_in_moves_to_authenticated() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    assert!(state.apply(id, AuthAction::SignedIn(alice())));
    assert_eq!(state.user, Some(alice()));
    assert!(!state.loading);
    assert!(state.is_authenticated());
}

#[test]
fn signed_out_moves_to_anonymous() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::SignedIn(alice()));
    let id = state.issue(true);
    state.apply(id, AuthAction::SignedOut);
    assert_eq!(state.user, None);
    assert_eq!(state.status(), AuthStatus::Anonymous);
}

#[test]
fn failure_keeps_user_and_sets_error() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::SignedIn(alice()));
    let id = state.issue(true);
    state.apply(id, AuthAction::Failed("Login failed".to_owned()));
    assert_eq!(state.user, Some(alice()));
    assert!(state.is_authenticated());
    assert_eq!(state.error.as_deref(), Some("Login failed"));
    assert!(!state.loading);
}

#[test]
fn failure_during_boot_resolves_to_anonymous() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::Failed("Registration failed".to_owned()));
    assert_eq!(state.status(), AuthStatus::Anonymous);
}

#[test]
fn completed_clears_error_without_touching_user() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::SignedOut);
    let id = state.issue(true);
    assert!(state.apply(id, AuthAction::Completed));
    assert_eq!(state.user, None);
    assert_eq!(state.error, None);
    assert!(!state.loading);
}

#[test]
fn stale_outcome_is_discarded() {
    let mut state = AuthState::default();
    let slow = state.issue(true);
    let fast = state.issue(true);
    state.apply(fast, AuthAction::SignedOut);
    let before = state.clone();
    assert!(!state.apply(slow, AuthAction::SignedIn(alice())));
    assert_eq!(state, before);
}

#[test]
fn sign_out_supersedes_in_flight_login() {
    let mut state = AuthState::default();
    let login = state.issue(true);
    state.sign_out();
    assert!(!state.apply(login, AuthAction::SignedIn(alice())));
    assert_eq!(state.user, None);
    assert_eq!(state.status(), AuthStatus::Anonymous);
    assert!(!state.loading);
}

#[test]
fn dismiss_error_clears_banner() {
    let mut state = AuthState::default();
    let id = state.issue(true);
    state.apply(id, AuthAction::Failed("x".to_owned()));
    state.dismiss_error();
    assert_eq!(state.error, None);
}
