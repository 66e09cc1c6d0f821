//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern: `auth` is the pure session reducer,
//! `auth_context` the container that drives it, `session` the persisted
//! token, and `ui` transient overlay state.

pub mod auth;
pub mod auth_context;
pub mod session;
pub mod ui;
