//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use keephome_core::CoreError;

/// Exit codes the binary commits to.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const DISCOVERY: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("{message}")]
    #[diagnostic(code(keephome::validation))]
    Validation { message: String },

    #[error("device request failed: {message}")]
    #[diagnostic(
        code(keephome::device),
        help(
            "Check that the device is powered and on this network.\n\
             Try: keephome discover"
        )
    )]
    Device { message: String },

    #[error("discovery unavailable: {reason}")]
    #[diagnostic(
        code(keephome::discovery),
        help(
            "The multicast-DNS listener could not start. The device can\n\
             still be reached directly: keephome set ip <address>"
        )
    )]
    Discovery { reason: String },

    #[error("invalid usage: {message}")]
    #[diagnostic(code(keephome::usage))]
    Usage { message: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::Usage { .. } => exit_code::USAGE,
            Self::Discovery { .. } => exit_code::DISCOVERY,
            Self::Device { .. } => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation { message },
            CoreError::DiscoveryUnavailable { reason } => Self::Discovery { reason },
            CoreError::Device(message) => Self::Device { message },
        }
    }
}
