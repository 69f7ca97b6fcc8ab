//! Session-level errors.

use thiserror::Error;

use coverdesk_core::UserType;

use crate::client::BackendError;
use crate::normalize::NormalizeError;

/// Why a login attempt did not produce an authenticated session.
///
/// These stay internal to the lifecycle code; callers see the rendered
/// message through [`crate::auth::AuthSession::last_error`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Credentials were valid but the account is flagged inactive. The
    /// identifiers are part of the message so support can triage from a
    /// screenshot alone.
    #[error("Account is inactive. Please contact your system administrator. (User: {username}, Type: {user_type}, Admin Type: {admin_type})")]
    InactiveAccount {
        username: String,
        user_type: UserType,
        /// Rendered subtype, empty when the account has none.
        admin_type: String,
    },
}
