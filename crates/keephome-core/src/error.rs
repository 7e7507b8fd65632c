// ── Core error types ──
//
// User-facing errors from keephome-core. Device protocol failures stay
// stringified on purpose: the coordinator passes them through to the
// display untyped, so classifying them here would add nothing.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The multicast-DNS subsystem could not be started. Fatal to
    /// discovery only; the rest of the app works without presence
    /// detection.
    #[error("discovery unavailable: {reason}")]
    DiscoveryUnavailable { reason: String },

    /// A device request failed (transport or protocol). The message is
    /// the raw failure text, surfaced verbatim to the display layer.
    #[error("{0}")]
    Device(String),

    /// Locally-entered input failed a format check. Never reaches the
    /// network.
    #[error("validation failed: {message}")]
    Validation { message: String },
}

impl From<keephome_api::Error> for CoreError {
    fn from(err: keephome_api::Error) -> Self {
        Self::Device(err.to_string())
    }
}
