use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_has_everything_closed() {
    let state = UiState::default();
    assert_eq!(state.auth_modal, None);
    assert!(!state.mobile_menu_open);
}

#[test]
fn auth_view_default_is_login() {
    assert_eq!(AuthView::default(), AuthView::Login);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn open_auth_selects_view_and_closes_menu() {
    let mut state = UiState { mobile_menu_open: true, ..UiState::default() };
    state.open_auth(AuthView::Signup);
    assert_eq!(state.auth_modal, Some(AuthView::Signup));
    assert!(!state.mobile_menu_open);
}

#[test]
fn open_auth_switches_between_views() {
    let mut state = UiState::default();
    state.open_auth(AuthView::Login);
    state.open_auth(AuthView::Forgot);
    assert_eq!(state.auth_modal, Some(AuthView::Forgot));
}

#[test]
fn close_auth_hides_modal() {
    let mut state = UiState::default();
    state.open_auth(AuthView::Login);
    state.close_auth();
    assert_eq!(state.auth_modal, None);
}

#[test]
fn toggle_menu_flips_and_close_menu_resets() {
    let mut state = UiState::default();
    state.toggle_menu();
    assert!(state.mobile_menu_open);
    state.toggle_menu();
    assert!(!state.mobile_menu_open);
    state.toggle_menu();
    state.close_menu();
    assert!(!state.mobile_menu_open);
}
