//! `coverdesk-observability` — shared logging setup.
//!
//! The authorization crates emit `tracing` events (denied restores, dropped
//! role entries, backend failures); an embedding calls [`init`] once at
//! startup to turn those into structured log output.

pub mod tracing;

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
