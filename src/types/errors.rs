use thiserror::Error;

/// Failure reported by an upstream record store.
///
/// Retry/backoff policy belongs to the stores' own I/O clients; by the time
/// an error reaches the engine it is final for the current merge run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Upstream store [{store}] is unavailable: {reason}")]
    Unavailable {
        store: &'static str,
        reason: String
    }
}

impl StoreError {
    pub fn unavailable(store: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable { store, reason: reason.into() }
    }
}
