//! Client auth configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Tunables for the auth flow. `App` uses [`AuthConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    /// Prefix for backend endpoints; empty means same origin.
    pub api_base: String,
    /// `localStorage` key holding the session record.
    pub storage_key: String,
    /// Route opened after a successful login or registration.
    pub landing_path: String,
    /// Route opened after logout.
    pub home_path: String,
    /// Session lifetime assumed when the backend does not send `expires_in`.
    pub session_ttl_secs: u64,
    /// Period of background re-validation while signed in.
    pub revalidate_interval_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            storage_key: "token".to_owned(),
            landing_path: "/dashboard".to_owned(),
            home_path: "/".to_owned(),
            session_ttl_secs: 7 * 24 * 60 * 60,
            revalidate_interval_secs: 5 * 60,
        }
    }
}

impl AuthConfig {
    /// Absolute expiry for a token issued at `now_ms`.
    pub fn expiry_from(&self, now_ms: i64, expires_in: Option<u64>) -> i64 {
        let secs = expires_in.unwrap_or(self.session_ttl_secs);
        let ttl_ms = i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        now_ms.saturating_add(ttl_ms)
    }
}
