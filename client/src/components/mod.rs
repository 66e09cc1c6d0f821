//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and the auth dialog. They receive the auth
//! container and UI state as props from `App` rather than pulling them from
//! ambient context.

pub mod auth_modal;
pub mod navbar;
