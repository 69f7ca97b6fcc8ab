//! Session lifecycle.
//!
//! `AuthSession` owns the authenticated principal between login and logout
//! and keeps the persisted mirror in step with every transition. The
//! embedding UI shares one instance by reference; interior mutability keeps
//! the whole surface `&self`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use coverdesk_core::{Action, PrincipalId, Resource, SessionPrincipal, UserType};
use coverdesk_directory::RoleDirectory;

use crate::client::{AuthBackend, token_preview};
use crate::error::SessionError;
use crate::normalize::normalize_principal;
use crate::storage::{SessionStore, StorageKey};

/// Routes the session can redirect to.
pub mod routes {
    /// Entry route, shown after logout.
    pub const LOGIN: &str = "/";
}

/// Receiver for session-initiated redirects.
pub trait NavigationSink: Send + Sync {
    fn navigate(&self, route: &str);
}

#[derive(Default)]
struct SessionState {
    user: Option<SessionPrincipal>,
    loading: bool,
    error: Option<String>,
}

/// Authentication session state machine.
///
/// # Invariants
/// - Every transition writes the persisted mirror in the same call that
///   updates memory; callers never observe the two disagreeing.
/// - A login attempt superseded by a newer one never commits its response.
/// - An inactive account never authenticates and never persists a token.
pub struct AuthSession {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn SessionStore>,
    roles: Arc<dyn RoleDirectory>,
    navigation: Option<Arc<dyn NavigationSink>>,
    state: RwLock<SessionState>,
    login_seq: AtomicU64,
}

impl AuthSession {
    /// Create an unauthenticated session. `is_loading` stays true until the
    /// first [`restore`](Self::restore) completes.
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        store: Arc<dyn SessionStore>,
        roles: Arc<dyn RoleDirectory>,
    ) -> Self {
        Self {
            backend,
            store,
            roles,
            navigation: None,
            state: RwLock::new(SessionState { user: None, loading: true, error: None }),
            login_seq: AtomicU64::new(0),
        }
    }

    /// Attach a redirect receiver for post-logout navigation.
    pub fn with_navigation(mut self, sink: Arc<dyn NavigationSink>) -> Self {
        self.navigation = Some(sink);
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observable state
    // ─────────────────────────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<SessionPrincipal> {
        self.state.read().ok()?.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.with_user(|_| true).unwrap_or(false)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().map(|state| state.loading).unwrap_or(false)
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().ok()?.error.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Re-establish a session from the persisted token + user record.
    ///
    /// Both artifacts must be present, the token must validate against the
    /// backend and the stored record must decode; anything less clears the
    /// persisted artifacts and leaves the session silently unauthenticated.
    /// Expired sessions are steady-state, not faults, so no error surfaces.
    pub async fn restore(&self) {
        let restored = match (self.store.get(StorageKey::Token), self.store.get(StorageKey::User))
        {
            (Some(token), Some(stored)) => self.validate_stored(&token, &stored).await,
            _ => None,
        };

        if restored.is_none() {
            self.store.clear_all();
        }

        if let Ok(mut state) = self.state.write() {
            state.user = restored;
            state.loading = false;
        }
    }

    async fn validate_stored(&self, token: &str, stored: &str) -> Option<SessionPrincipal> {
        match self.backend.validate_token(token).await {
            Ok(()) => match serde_json::from_str::<SessionPrincipal>(stored) {
                Ok(user) => {
                    tracing::debug!(username = %user.username, "session restored");
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored user record is undecodable");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    token = %token_preview(token),
                    "stored token rejected"
                );
                None
            }
        }
    }

    /// Exchange credentials for an authenticated session.
    ///
    /// Returns `true` on success. Every failure path captures a message in
    /// [`last_error`](Self::last_error) instead of propagating; a response
    /// arriving after a newer login attempt is discarded unseen.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let seq = self.login_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut state) = self.state.write() {
            state.loading = true;
            state.error = None;
        }

        let outcome = self.perform_login(username, password).await;

        if self.login_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(username = %username, "discarding superseded login response");
            return false;
        }

        match outcome {
            Ok((token, user)) => {
                self.store.put(StorageKey::Token, token);
                self.persist_principal(&user);
                if let Ok(mut state) = self.state.write() {
                    state.user = Some(user);
                    state.loading = false;
                    state.error = None;
                }
                true
            }
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(username = %username, error = %message, "login failed");
                if let Ok(mut state) = self.state.write() {
                    state.user = None;
                    state.loading = false;
                    state.error = Some(message);
                }
                false
            }
        }
    }

    async fn perform_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, SessionPrincipal), SessionError> {
        let reply = self.backend.login(username, password).await?;
        let user = normalize_principal(reply.user)?;

        if !user.is_active {
            return Err(SessionError::InactiveAccount {
                username: user.username.clone(),
                user_type: user.user_type,
                admin_type: user.admin_type.map(|a| a.to_string()).unwrap_or_default(),
            });
        }

        tracing::info!(
            username = %user.username,
            user_type = %user.user_type,
            token = %token_preview(&reply.access_token),
            "session established"
        );
        Ok((reply.access_token, user))
    }

    /// Tear the session down.
    ///
    /// The backend is notified best-effort; local teardown always completes.
    /// Cookies are expired here and only here.
    pub async fn logout(&self) {
        if let Some(token) = self.store.get(StorageKey::Token) {
            if let Err(e) = self.backend.logout(&token).await {
                tracing::warn!(error = %e, "backend logout failed, continuing local teardown");
            }
        }

        if let Ok(mut state) = self.state.write() {
            state.user = None;
            state.error = None;
        }
        self.store.clear_all();
        for name in self.store.cookie_names() {
            self.store.remove_cookie(&name);
        }

        if let Some(navigation) = &self.navigation {
            navigation.navigate(routes::LOGIN);
        }
        tracing::info!("session terminated");
    }

    /// Fold the default roles for the user's type into the held set.
    ///
    /// Used after an administrator edits role assignments so the acting
    /// user's own session reflects the change without a re-login. Dedups by
    /// role id, so repeated calls settle on the same set.
    pub fn refresh_user(&self) {
        let Some(mut user) = self.current_user() else {
            return;
        };

        for role in self.roles.roles_for_user_type(user.user_type) {
            if !user.roles.iter().any(|held| held.id == role.id) {
                user.roles.push(role);
            }
        }

        self.persist_principal(&user);
        if let Ok(mut state) = self.state.write() {
            state.user = Some(user);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authorization queries
    // ─────────────────────────────────────────────────────────────────────
    //
    // All of these answer false when no user is signed in.

    pub fn has_permission(&self, resource: Resource, action: Action) -> bool {
        self.with_user(|u| u.has_permission(resource, action)).unwrap_or(false)
    }

    /// Permission check for an arbitrary user id.
    ///
    /// Only the signed-in principal can be answered locally; other ids
    /// resolve to false until a cross-user backend lookup exists.
    pub async fn has_user_permission(
        &self,
        user_id: &PrincipalId,
        resource: Resource,
        action: Action,
    ) -> bool {
        self.with_user(|u| &u.id == user_id && u.has_permission(resource, action))
            .unwrap_or(false)
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.with_user(|u| u.has_role(name)).unwrap_or(false)
    }

    pub fn has_user_type(&self, user_type: UserType) -> bool {
        self.with_user(|u| u.has_user_type(user_type)).unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.with_user(SessionPrincipal::is_admin).unwrap_or(false)
    }

    pub fn is_insurance_admin(&self) -> bool {
        self.with_user(SessionPrincipal::is_insurance_admin).unwrap_or(false)
    }

    pub fn is_corporate_admin(&self) -> bool {
        self.with_user(SessionPrincipal::is_corporate_admin).unwrap_or(false)
    }

    pub fn is_provider(&self) -> bool {
        self.with_user(SessionPrincipal::is_provider).unwrap_or(false)
    }

    pub fn is_member(&self) -> bool {
        self.with_user(SessionPrincipal::is_member).unwrap_or(false)
    }

    pub fn is_staff(&self) -> bool {
        self.with_user(SessionPrincipal::is_staff).unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn with_user<R>(&self, f: impl FnOnce(&SessionPrincipal) -> R) -> Option<R> {
        let state = self.state.read().ok()?;
        state.user.as_ref().map(f)
    }

    fn persist_principal(&self, user: &SessionPrincipal) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.put(StorageKey::User, json),
            Err(e) => tracing::warn!(error = %e, "failed to serialize principal for storage"),
        }
    }
}
