//! `coverdesk-session` — authentication session lifecycle.
//!
//! Everything between "user typed credentials" and "user is signed out":
//! the backend client, the persisted session mirror, payload
//! normalization, and the [`AuthSession`] state machine the embedding UI
//! drives. Component and permission decisions live in the registry and
//! core crates; this crate only decides who the current principal is.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod storage;

pub use auth::{AuthSession, NavigationSink, routes};
pub use client::{AuthBackend, BackendError, HttpAuthBackend, LoginReply, RawUser};
pub use config::SessionConfig;
pub use error::SessionError;
pub use normalize::{NormalizeError, normalize_principal};
pub use storage::{MemorySessionStore, SessionStore, StorageKey};
