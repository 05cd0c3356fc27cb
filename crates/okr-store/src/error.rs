// error.rs — Error types for the state store subsystem.

use thiserror::Error;

/// Errors surfaced by the store and its observers.
///
/// Observer failures are non-fatal: the store logs them and the mutation
/// still applies. Nothing here terminates the session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A state observer failed to process a snapshot (non-fatal).
    #[error("observer error: {0}")]
    Observer(String),
}
