// Shared transport configuration for building reqwest::Client instances.
//
// The device speaks plain HTTP on a fixed control port; the only knobs
// are the request timeout and (for tests) the port itself.

use std::time::Duration;

/// The control port the device firmware listens on.
pub const DEVICE_PORT: u16 = 7000;

/// Default request timeout. The device answers from a microcontroller
/// loop; anything slower than this is as good as unreachable.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub port: u16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            port: DEVICE_PORT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("keephome-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
