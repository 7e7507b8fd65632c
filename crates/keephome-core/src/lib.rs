//! Discovery-and-synchronization core for the KeepHome companion.
//!
//! This crate owns the business logic between `keephome-api` and UI
//! consumers:
//!
//! - **[`DiscoveryService`]** — browses multicast-DNS advertisements,
//!   filters to the device's instance name, and emits
//!   [`PresenceEvent`]s.
//! - **[`SettingsStore`]** — reactive, backend-abstracted storage for
//!   the device configuration mirror and app preferences. Subscribers
//!   get the current snapshot immediately and every change after it.
//! - **[`SyncCoordinator`]** — consumes presence events (adopting
//!   discovered addresses), issues protocol requests, and reconciles
//!   responses into the store and a transient [`SyncState`].
//! - **[`validate`]** — local format checks (password length, IPv4,
//!   interval set) that gate input before it reaches the network.

pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use coordinator::{SyncCoordinator, SyncState};
pub use discovery::{DiscoveryHandle, DiscoveryService, PresenceEvent, SERVICE_TYPE};
pub use error::CoreError;
pub use model::{
    DEVICE_NAME, FALLBACK_ADDRESS, Presence, Settings, SyncInterval, TelemetrySnapshot,
};
pub use store::{MemoryBackend, SettingChange, SettingsBackend, SettingsStore};
pub use stream::SettingsStream;

// Re-exported so consumers can configure transport without depending
// on the api crate directly.
pub use keephome_api::TransportConfig;
