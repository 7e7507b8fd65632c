//! Async client for the KeepHome access point's control protocol.
//!
//! The device exposes a tiny HTTP surface on port 7000: `/post` for
//! telemetry and settings (commands travel as form parameters), and
//! `/restart`. This crate owns transport mechanics only — bodies come
//! back as opaque JSON text for `keephome-core` to interpret.

pub mod client;
pub mod command;
pub mod error;
pub mod transport;

pub use client::DeviceClient;
pub use command::{SettingCommand, SettingField};
pub use error::Error;
pub use transport::{DEVICE_PORT, TransportConfig};
