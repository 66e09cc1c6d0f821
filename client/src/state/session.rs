//! Persisted session token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is the only owner of the token. `AuthContext` reads it
//! at boot and on re-validation, writes it after login/register, and clears
//! it on logout or rejection. Nothing else touches the storage key.
//!
//! TRADE-OFFS
//! ==========
//! The record is stored as JSON so an expiry timestamp can travel with the
//! token. A bare token string left by an older build is still accepted and
//! read as a session without expiry.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Key/value string storage scoped to the page origin.
pub trait SessionStorage: Clone + Send + Sync + 'static {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Browser `localStorage`. Every operation is a no-op outside `hydrate`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Shared in-memory storage. Clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    fn with<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut items)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.with(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) {
        self.with(|items| items.insert(key.to_owned(), value.to_owned()));
    }

    fn remove_item(&self, key: &str) {
        self.with(|items| items.remove(key));
    }
}

/// The persisted session record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    /// Milliseconds since the Unix epoch after which the token is not trusted.
    #[serde(default)]
    pub expires_at_ms: Option<i64>,
}

impl StoredSession {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at_ms.is_some_and(|at| now_ms >= at)
    }
}

/// Parse a raw storage value, accepting both JSON records and bare tokens.
fn parse_stored(raw: &str) -> Option<StoredSession> {
    let session = serde_json::from_str::<StoredSession>(raw)
        .unwrap_or_else(|_| StoredSession { token: raw.trim().to_owned(), expires_at_ms: None });
    (!session.token.is_empty()).then_some(session)
}

/// Typed view over one storage key.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// The stored token, if any.
    pub fn get(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    /// The full stored record, if any.
    pub fn load(&self) -> Option<StoredSession> {
        let raw = self.storage.get_item(&self.key)?;
        parse_stored(&raw)
    }

    /// Store a token with no expiry.
    pub fn set(&self, token: &str) {
        self.set_with_expiry(token, None);
    }

    pub fn set_with_expiry(&self, token: &str, expires_at_ms: Option<i64>) {
        let record = StoredSession { token: token.to_owned(), expires_at_ms };
        match serde_json::to_string(&record) {
            Ok(raw) => self.storage.set_item(&self.key, &raw),
            Err(e) => log::warn!("session encode failed: {e}"),
        }
    }

    pub fn clear(&self) {
        self.storage.remove_item(&self.key);
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as i64)
    }
}
