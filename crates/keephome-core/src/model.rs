// ── Domain model ──
//
// The persisted settings mirror, app preferences, and the transient
// telemetry snapshot the device reports.

use serde::{Deserialize, Serialize};

/// Substring that identifies the device in its mDNS advertisement.
pub const DEVICE_NAME: &str = "KeepHome";

/// Address the device claims when it broadcasts its own network, used
/// whenever discovery cannot produce anything better.
pub const FALLBACK_ADDRESS: &str = "192.168.4.1";

/// The full set of locally persisted entries: the device configuration
/// mirror plus app preferences.
///
/// Serde field names double as the storage keys and are a
/// compatibility contract — renaming one silently resets that setting
/// for every existing install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether sync notifications are enabled.
    pub sync_notifications: bool,
    /// Sync interval in minutes. Persisted and user-selectable, but no
    /// scheduler consumes it yet.
    pub notification_interval: u32,
    /// WiFi mode: `true` when the device acts as an access point.
    pub ap_mode: bool,
    /// Last-known device SSID.
    pub ssid: String,
    /// Last-known device WiFi password.
    pub password: String,
    /// Address believed to reach the device; overwritten whenever
    /// discovery resolves a fresher one.
    pub ip: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sync_notifications: false,
            notification_interval: 1,
            ap_mode: true,
            ssid: DEVICE_NAME.to_owned(),
            password: "12345678".to_owned(),
            ip: FALLBACK_ADDRESS.to_owned(),
        }
    }
}

/// The closed set of selectable sync intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncInterval {
    OneMinute,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
}

impl SyncInterval {
    pub const ALL: [Self; 4] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::FifteenMinutes,
    ];

    /// The interval length in minutes (the persisted representation).
    pub fn minutes(self) -> u32 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::TenMinutes => 10,
            Self::FifteenMinutes => 15,
        }
    }

    /// Parse a persisted minute count back into the closed set.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.minutes() == minutes)
    }
}

/// Whether the device is currently advertised on the local segment.
///
/// Driven only by discovery events; process-lifetime state, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// One device report, replaced wholesale by each successful response.
///
/// `uptime_seconds` and `additional_info` come from the telemetry
/// endpoint; the `Option` fields are populated only when the response
/// was a detailed settings read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TelemetrySnapshot {
    /// Device uptime, reported as a string of seconds.
    pub uptime_seconds: String,
    /// Free-form status text.
    pub additional_info: String,
    pub ssid: Option<String>,
    pub ap_mode: Option<bool>,
    pub password: Option<String>,
}
