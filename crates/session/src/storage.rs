//! Persisted session mirror.
//!
//! The session writes its observable state through this trait so that a
//! reload (process restart, new tab) can restore exactly what the live
//! session saw. Embeddings bridge it to whatever the host offers: web
//! storage and cookies in a browser shell, plain memory in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The fixed set of persisted session keys.
///
/// Wire names are the storage keys the console has always used; every key
/// is removed on logout and on failed restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Token,
    User,
    AuthState,
    Permissions,
    UserRole,
    SessionData,
}

impl StorageKey {
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Token,
        StorageKey::User,
        StorageKey::AuthState,
        StorageKey::Permissions,
        StorageKey::UserRole,
        StorageKey::SessionData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Token => "token",
            StorageKey::User => "user",
            StorageKey::AuthState => "authState",
            StorageKey::Permissions => "permissions",
            StorageKey::UserRole => "userRole",
            StorageKey::SessionData => "sessionData",
        }
    }
}

impl core::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host storage the session persists through.
///
/// Three scopes mirror the browser's: durable keys (survive restarts),
/// session-scoped values (cleared with the session), and cookies (expired
/// one by one on logout).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Option<String>;
    fn put(&self, key: StorageKey, value: String);
    fn remove(&self, key: StorageKey);

    fn session_value(&self, name: &str) -> Option<String>;
    fn put_session_value(&self, name: &str, value: String);

    fn cookie(&self, name: &str) -> Option<String>;
    fn set_cookie(&self, name: &str, value: String);
    fn remove_cookie(&self, name: &str);
    fn cookie_names(&self) -> Vec<String>;

    /// Remove every persisted key and all session-scoped values.
    /// Cookies are not touched; logout expires them explicitly.
    fn clear_all(&self);
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn get(&self, key: StorageKey) -> Option<String> {
        (**self).get(key)
    }

    fn put(&self, key: StorageKey, value: String) {
        (**self).put(key, value)
    }

    fn remove(&self, key: StorageKey) {
        (**self).remove(key)
    }

    fn session_value(&self, name: &str) -> Option<String> {
        (**self).session_value(name)
    }

    fn put_session_value(&self, name: &str, value: String) {
        (**self).put_session_value(name, value)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }

    fn set_cookie(&self, name: &str, value: String) {
        (**self).set_cookie(name, value)
    }

    fn remove_cookie(&self, name: &str) {
        (**self).remove_cookie(name)
    }

    fn cookie_names(&self) -> Vec<String> {
        (**self).cookie_names()
    }

    fn clear_all(&self) {
        (**self).clear_all()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    persisted: HashMap<StorageKey, String>,
    session: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

/// In-memory session store for tests and headless embeddings.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<MemoryState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        let state = self.inner.read().ok()?;
        state.persisted.get(&key).cloned()
    }

    fn put(&self, key: StorageKey, value: String) {
        if let Ok(mut state) = self.inner.write() {
            state.persisted.insert(key, value);
        }
    }

    fn remove(&self, key: StorageKey) {
        if let Ok(mut state) = self.inner.write() {
            state.persisted.remove(&key);
        }
    }

    fn session_value(&self, name: &str) -> Option<String> {
        let state = self.inner.read().ok()?;
        state.session.get(name).cloned()
    }

    fn put_session_value(&self, name: &str, value: String) {
        if let Ok(mut state) = self.inner.write() {
            state.session.insert(name.to_owned(), value);
        }
    }

    fn cookie(&self, name: &str) -> Option<String> {
        let state = self.inner.read().ok()?;
        state.cookies.get(name).cloned()
    }

    fn set_cookie(&self, name: &str, value: String) {
        if let Ok(mut state) = self.inner.write() {
            state.cookies.insert(name.to_owned(), value);
        }
    }

    fn remove_cookie(&self, name: &str) {
        if let Ok(mut state) = self.inner.write() {
            state.cookies.remove(name);
        }
    }

    fn cookie_names(&self) -> Vec<String> {
        match self.inner.read() {
            Ok(state) => state.cookies.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn clear_all(&self) {
        if let Ok(mut state) = self.inner.write() {
            state.persisted.clear();
            state.session.clear();
        }
    }
}
