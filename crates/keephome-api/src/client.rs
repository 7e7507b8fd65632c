// Device HTTP client
//
// Wraps `reqwest::Client` with KeepHome-specific URL construction and
// uniform failure surfacing. Responses are opaque JSON text: this layer
// never parses a body, keeping wire interpretation out of transport.

use tracing::{debug, trace};
use url::Url;

use crate::command::{self, SettingCommand};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Path for telemetry and settings commands.
const POST_PATH: &str = "post";

/// Path for the parameterless restart command.
const RESTART_PATH: &str = "restart";

/// Raw HTTP client for the KeepHome control protocol.
///
/// Every operation is a POST whose form parameters carry the command;
/// the device answers with a small JSON body (or a device-defined ack
/// for writes). Exactly one of success/failure is surfaced per call —
/// there is no retry at this layer.
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeviceClient {
    /// Create a client for the device at `address` (IPv4 literal or
    /// hostname). The base URL becomes `http://{address}:{port}`.
    pub fn new(address: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{address}:{}/", transport.port))?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and base URL.
    ///
    /// Used by tests to point at a mock device on an arbitrary port.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Protocol operations ──────────────────────────────────────────

    /// Fetch the telemetry body: a parameterless POST to `/post`.
    ///
    /// The device answers `{"time": ..., "additional": ...}`.
    pub async fn telemetry(&self) -> Result<String, Error> {
        self.post(POST_PATH, &[]).await
    }

    /// Issue a batch of setting commands in a single POST to `/post`.
    pub async fn send_commands(&self, commands: &[SettingCommand]) -> Result<String, Error> {
        self.post(POST_PATH, &command::encode(commands)).await
    }

    /// Ask the device to restart: a parameterless POST to `/restart`.
    ///
    /// The ack body is device-defined and callers generally discard it.
    pub async fn restart(&self) -> Result<String, Error> {
        self.post(RESTART_PATH, &[]).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build a full URL for a device path.
    fn device_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a form POST and return the raw response body.
    ///
    /// Non-2xx statuses are surfaced as [`Error::Device`] with a body
    /// preview; everything else flows through untouched.
    async fn post(&self, path: &str, params: &[(&str, String)]) -> Result<String, Error> {
        let url = self.device_url(path)?;
        debug!("POST {}", url);
        trace!(?params, "request parameters");

        let resp = self
            .http
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Device {
                status: status.as_u16(),
                message: body[..body.len().min(200)].to_owned(),
            });
        }

        resp.text().await.map_err(Error::Transport)
    }
}
