use thiserror::Error;

/// Top-level error type for the `keephome-api` crate.
///
/// Covers every failure mode of the device protocol: transport, HTTP
/// status, and URL construction. `keephome-core` maps these into
/// user-facing diagnostics; the raw `Display` text is what ends up on
/// screen when a request fails mid-session.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, DNS failure, etc.)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid device URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Device protocol ─────────────────────────────────────────────
    /// The device answered with a non-success HTTP status.
    #[error("device returned HTTP {status}: {message}")]
    Device { status: u16, message: String },
}

impl Error {
    /// Returns `true` if this error indicates the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the device could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}
