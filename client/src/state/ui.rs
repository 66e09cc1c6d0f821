//! Local UI chrome state (auth modal, mobile menu).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of `AuthState` so opening a
//! dialog or a menu never looks like a session change to route guards.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Which pane the auth modal shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthView {
    #[default]
    Login,
    Signup,
    /// Forgot-password form.
    Forgot,
}

/// UI state for overlays shared between the navbar and the auth modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Open auth modal pane; `None` when the modal is closed.
    pub auth_modal: Option<AuthView>,
    pub mobile_menu_open: bool,
}

impl UiState {
    /// Open the auth modal on `view`, closing the mobile menu.
    pub fn open_auth(&mut self, view: AuthView) {
        self.auth_modal = Some(view);
        self.mobile_menu_open = false;
    }

    pub fn close_auth(&mut self) {
        self.auth_modal = None;
    }

    pub fn toggle_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn close_menu(&mut self) {
        self.mobile_menu_open = false;
    }
}
