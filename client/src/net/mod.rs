//! Networking modules for the auth backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the REST calls and `types` defines the JSON wire schema.

pub mod api;
pub mod types;
