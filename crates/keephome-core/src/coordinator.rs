// ── Sync coordinator ──
//
// Ties discovery, the device protocol, and the settings store
// together. Presence events adopt discovered addresses into the store;
// user actions issue protocol requests and reconcile responses into
// the store and a transient display state. All shared-state mutation
// happens on the consumer side of a channel, so no locks are needed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use keephome_api::{DeviceClient, SettingCommand, TransportConfig};

use crate::discovery::PresenceEvent;
use crate::error::CoreError;
use crate::model::{FALLBACK_ADDRESS, Presence, TelemetrySnapshot};
use crate::store::{SettingChange, SettingsStore};

/// Transient per-action display state.
///
/// Each user action moves through `Requesting` and lands on exactly
/// one of the terminal variants; a new action supersedes whatever the
/// previous one would eventually have shown (last response wins).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Requesting,
    Info(TelemetrySnapshot),
    Error(String),
}

/// Coordinates discovery, protocol requests, and the settings mirror.
///
/// Cheaply cloneable via `Arc`. Consumers observe [`Presence`] and
/// [`SyncState`] through watch channels and never mutate them
/// directly.
#[derive(Clone)]
pub struct SyncCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<SettingsStore>,
    transport: TransportConfig,
    presence: watch::Sender<Presence>,
    sync_state: watch::Sender<SyncState>,
    last_synced: watch::Sender<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
}

impl SyncCoordinator {
    pub fn new(store: Arc<SettingsStore>, transport: TransportConfig) -> Self {
        let (presence, _) = watch::channel(Presence::Unknown);
        let (sync_state, _) = watch::channel(SyncState::Idle);
        let (last_synced, _) = watch::channel(None);

        Self {
            inner: Arc::new(Inner {
                store,
                transport,
                presence,
                sync_state,
                last_synced,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// The settings store this coordinator reconciles into.
    pub fn store(&self) -> &Arc<SettingsStore> {
        &self.inner.store
    }

    /// Observe presence transitions.
    pub fn presence(&self) -> watch::Receiver<Presence> {
        self.inner.presence.subscribe()
    }

    /// Observe the transient display state.
    pub fn sync_state(&self) -> watch::Receiver<SyncState> {
        self.inner.sync_state.subscribe()
    }

    /// Observe the timestamp of the last successful settings read.
    pub fn last_synced(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.inner.last_synced.subscribe()
    }

    /// Stop the discovery-consumer task (if attached).
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    // ── Discovery consumption ────────────────────────────────────────

    /// Spawn the single-consumer task over a discovery event stream.
    ///
    /// Resolution events adopt the discovered address into the store
    /// immediately and unconditionally — discovery is authoritative
    /// for addressing. Loss events flip presence only; the stale
    /// address is the best guess until something better arrives.
    pub fn attach_discovery(&self, mut events: mpsc::Receiver<PresenceEvent>) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = inner.cancel.cancelled() => break,
                    event = events.recv() => {
                        let Some(event) = event else { break };
                        inner.apply_presence(&event);
                    }
                }
            }
            debug!("discovery consumer finished");
        })
    }

    // ── User actions ─────────────────────────────────────────────────

    /// Fetch the telemetry body and publish it as the display state.
    pub async fn refresh(&self) -> Result<TelemetrySnapshot, CoreError> {
        let client = self.begin_request()?;
        let body = match client.telemetry().await {
            Ok(body) => body,
            Err(err) => return Err(self.fail(err.to_string())),
        };
        match parse_report(&body) {
            Ok(snapshot) => {
                self.inner.set_state(SyncState::Info(snapshot.clone()));
                Ok(snapshot)
            }
            Err(err) => Err(self.fail(err.to_string())),
        }
    }

    /// Read every device setting and reconcile the mirror.
    ///
    /// Fields present in the response overwrite the local copy
    /// authoritatively; absent fields leave it untouched.
    pub async fn fetch_settings(&self) -> Result<TelemetrySnapshot, CoreError> {
        let client = self.begin_request()?;
        let body = match client.send_commands(&SettingCommand::get_all()).await {
            Ok(body) => body,
            Err(err) => return Err(self.fail(err.to_string())),
        };
        match parse_report(&body) {
            Ok(snapshot) => {
                self.reconcile(&snapshot);
                let _ = self.inner.last_synced.send_replace(Some(Utc::now()));
                self.inner.set_state(SyncState::Info(snapshot.clone()));
                Ok(snapshot)
            }
            Err(err) => Err(self.fail(err.to_string())),
        }
    }

    /// Ask the device to restart. On success the transient snapshot is
    /// cleared and the display returns to idle; the ack body is
    /// discarded.
    pub async fn restart(&self) -> Result<(), CoreError> {
        let client = self.begin_request()?;
        match client.restart().await {
            Ok(_) => {
                info!("device restarting");
                self.inner.set_state(SyncState::Idle);
                Ok(())
            }
            Err(err) => Err(self.fail(err.to_string())),
        }
    }

    /// Set the device SSID: optimistic local write, then the device
    /// command. A failed command does not roll the local write back.
    pub async fn set_ssid(&self, ssid: String) -> Result<(), CoreError> {
        self.inner
            .store
            .apply_optimistic(SettingChange::Ssid(ssid.clone()));
        self.send_set(SettingCommand::set_ssid(ssid)).await
    }

    /// Set the WiFi mode (same optimistic-write policy as
    /// [`set_ssid`](Self::set_ssid)).
    pub async fn set_ap_mode(&self, enabled: bool) -> Result<(), CoreError> {
        self.inner
            .store
            .apply_optimistic(SettingChange::ApMode(enabled));
        self.send_set(SettingCommand::set_ap_mode(enabled)).await
    }

    /// Set the WiFi password (same optimistic-write policy).
    pub async fn set_password(&self, password: String) -> Result<(), CoreError> {
        self.inner
            .store
            .apply_optimistic(SettingChange::Password(password.clone()));
        self.send_set(SettingCommand::set_password(password)).await
    }

    /// Override the device address locally. No network traffic: the
    /// address only tells this app where to find the device.
    pub fn set_address(&self, ip: String) {
        self.inner.store.apply_optimistic(SettingChange::Address(ip));
    }

    // ── Internals ────────────────────────────────────────────────────

    fn client(&self) -> Result<DeviceClient, CoreError> {
        let address = self.inner.store.snapshot().ip.clone();
        Ok(DeviceClient::new(&address, &self.inner.transport)?)
    }

    async fn send_set(&self, command: SettingCommand) -> Result<(), CoreError> {
        match self.client()?.send_commands(&[command]).await {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(%err, "device write failed; local value kept");
                Err(CoreError::Device(err.to_string()))
            }
        }
    }

    /// Enter the requesting state and build a client against the
    /// currently stored address. A client-construction failure lands
    /// on the error state like any other failure — the display never
    /// sticks on "requesting".
    fn begin_request(&self) -> Result<DeviceClient, CoreError> {
        self.inner.set_state(SyncState::Requesting);
        self.client().map_err(|err| self.fail(err.to_string()))
    }

    /// Record a failed action: the raw error text, verbatim, becomes
    /// the display state.
    fn fail(&self, message: String) -> CoreError {
        self.inner.set_state(SyncState::Error(message.clone()));
        CoreError::Device(message)
    }

    fn reconcile(&self, snapshot: &TelemetrySnapshot) {
        self.inner.store.update(|s| {
            if let Some(ssid) = &snapshot.ssid {
                s.ssid = ssid.clone();
            }
            if let Some(ap_mode) = snapshot.ap_mode {
                s.ap_mode = ap_mode;
            }
            if let Some(password) = &snapshot.password {
                s.password = password.clone();
            }
        });
    }
}

impl Inner {
    fn set_state(&self, state: SyncState) {
        let _ = self.sync_state.send_replace(state);
    }

    fn apply_presence(&self, event: &PresenceEvent) {
        if event.lost {
            debug!(service = %event.service_name, "device lost");
            let _ = self.presence.send_replace(Presence::Offline);
        } else {
            let ip = event
                .ipv4
                .map_or_else(|| FALLBACK_ADDRESS.to_owned(), |addr| addr.to_string());
            debug!(service = %event.service_name, %ip, "device resolved");
            self.store.set_ip(ip);
            let _ = self.presence.send_replace(Presence::Online);
        }
    }
}

// ── Response parsing ─────────────────────────────────────────────────

/// Extract a field as a string, stringifying non-string JSON values
/// the way the device sometimes emits them (bare numbers).
fn field_string(value: &Value, key: &str) -> Option<String> {
    value.get(key).map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Parse a device report body. Tolerant of missing keys — every
/// expected field defaults rather than erroring — but a body that is
/// not JSON at all is a failure.
fn parse_report(body: &str) -> Result<TelemetrySnapshot, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    Ok(TelemetrySnapshot {
        uptime_seconds: field_string(&value, "time").unwrap_or_default(),
        additional_info: field_string(&value, "additional").unwrap_or_default(),
        ssid: field_string(&value, "SSID"),
        ap_mode: field_string(&value, "WiFiMode").map(|mode| mode != "0"),
        password: field_string(&value, "password"),
    })
}
