//! # client
//!
//! Leptos + WASM frontend for DevUnity: navigation bar, authentication
//! modal, and the session container that keeps the browser-stored token in
//! step with the backend.
//!
//! Under `hydrate` the crate talks to `/api/auth/*` through `gloo-net` and
//! persists the session in `localStorage`. Under `ssr` it only renders the
//! shell; all network and storage calls are inert.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
