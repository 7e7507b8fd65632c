// ── Reactive settings store ──
//
// Single-struct storage with push-based change notification via a
// `watch` channel. Readers get the current value immediately and every
// later update as a lazy, restartable sequence; writers perform atomic
// scoped updates that are flushed through the persistence backend.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::model::{Settings, SyncInterval};
use crate::stream::SettingsStream;

/// Result type for backend flushes. Backends report their own error
/// types; the store only logs them.
pub type BackendResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Abstract durable storage for [`Settings`].
///
/// The OS-level mechanics (file location, format, atomicity) live
/// behind this trait; the store itself is storage-agnostic.
pub trait SettingsBackend: Send + Sync {
    /// Load the persisted settings, or `None` when nothing has been
    /// written yet (defaults materialize lazily in the store).
    fn load(&self) -> Option<Settings>;

    /// Persist the given settings.
    fn save(&self, settings: &Settings) -> BackendResult;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    saved: std::sync::Mutex<Option<Settings>>,
}

impl MemoryBackend {
    /// The last settings flushed through this backend.
    pub fn last_saved(&self) -> Option<Settings> {
        self.saved.lock().expect("settings lock poisoned").clone()
    }
}

impl SettingsBackend for MemoryBackend {
    fn load(&self) -> Option<Settings> {
        self.last_saved()
    }

    fn save(&self, settings: &Settings) -> BackendResult {
        *self.saved.lock().expect("settings lock poisoned") = Some(settings.clone());
        Ok(())
    }
}

impl<B: SettingsBackend + ?Sized> SettingsBackend for Arc<B> {
    fn load(&self) -> Option<Settings> {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> BackendResult {
        (**self).save(settings)
    }
}

/// An optimistic local write: applied to the mirror before the
/// matching device request resolves, and never rolled back if that
/// request later fails. The mirror may diverge from device truth until
/// the next successful settings read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    Ssid(String),
    ApMode(bool),
    Password(String),
    Address(String),
}

/// Reactive store owning the durable copy of device configuration and
/// app preferences.
///
/// All mutations broadcast a fresh snapshot to subscribers; a failed
/// backend flush is logged and swallowed — the in-memory value stays
/// authoritative for the session.
pub struct SettingsStore {
    settings: watch::Sender<Arc<Settings>>,
    backend: Box<dyn SettingsBackend>,
}

impl SettingsStore {
    /// Create a store over the given backend. Missing persisted state
    /// materializes as the defaults.
    pub fn new(backend: Box<dyn SettingsBackend>) -> Self {
        let initial = backend.load().unwrap_or_default();
        let (settings, _) = watch::channel(Arc::new(initial));
        Self { settings, backend }
    }

    /// Store with no durable backing, for tests and dry runs.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::default()))
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Settings> {
        self.settings.borrow().clone()
    }

    /// Subscribe to settings changes.
    pub fn subscribe(&self) -> SettingsStream {
        SettingsStream::new(self.settings.subscribe())
    }

    /// Atomic scoped update: mutate a copy, flush it, then broadcast.
    pub fn update(&self, mutate: impl FnOnce(&mut Settings)) {
        let mut next = Settings::clone(&self.settings.borrow());
        mutate(&mut next);
        if let Err(err) = self.backend.save(&next) {
            warn!(%err, "failed to persist settings");
        }
        // `send_modify` updates unconditionally, even with zero receivers.
        self.settings.send_modify(|current| *current = Arc::new(next));
    }

    /// Apply an optimistic device-config write (see [`SettingChange`]).
    pub fn apply_optimistic(&self, change: SettingChange) {
        self.update(|s| match change {
            SettingChange::Ssid(ssid) => s.ssid = ssid,
            SettingChange::ApMode(enabled) => s.ap_mode = enabled,
            SettingChange::Password(password) => s.password = password,
            SettingChange::Address(ip) => s.ip = ip,
        });
    }

    // ── Typed setters ────────────────────────────────────────────────

    pub fn set_sync_notifications(&self, enabled: bool) {
        self.update(|s| s.sync_notifications = enabled);
    }

    pub fn set_notification_interval(&self, interval: SyncInterval) {
        self.update(|s| s.notification_interval = interval.minutes());
    }

    pub fn set_ap_mode(&self, enabled: bool) {
        self.update(|s| s.ap_mode = enabled);
    }

    pub fn set_ssid(&self, ssid: impl Into<String>) {
        let ssid = ssid.into();
        self.update(|s| s.ssid = ssid);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.update(|s| s.password = password);
    }

    pub fn set_ip(&self, ip: impl Into<String>) {
        let ip = ip.into();
        self.update(|s| s.ip = ip);
    }
}
