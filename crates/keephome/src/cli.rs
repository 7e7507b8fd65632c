// ── CLI argument definitions ──

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "keephome",
    version,
    about = "Companion for the KeepHome access point",
    long_about = "Discovers a KeepHome device on the local network, reads and \
                  writes its WiFi configuration, and shows basic telemetry."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true, env = "KEEPHOME_SETTINGS_FILE", value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    /// Device request timeout in seconds
    #[arg(long, global = true, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and show device telemetry (uptime, status)
    Status,

    /// Read or sync the device settings mirror
    Settings(SettingsArgs),

    /// Change a device setting (written locally first, then sent)
    Set(SetArgs),

    /// Ask the device to restart
    Restart,

    /// Browse the local network for the device
    Discover(DiscoverArgs),

    /// App preferences (notifications, sync interval)
    Prefs(PrefsArgs),

    /// Show the support website
    Support,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── settings ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Read every setting from the device and update the local mirror
    Sync,
    /// Show the local mirror without touching the network
    Show,
}

// ── set ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(subcommand)]
    pub field: SetField,
}

#[derive(Debug, Subcommand)]
pub enum SetField {
    /// WiFi network name
    Ssid { ssid: String },
    /// WiFi password (at least 8 characters)
    Password { password: String },
    /// Access point mode
    ApMode { state: OnOff },
    /// Device address (local override only, never sent to the device)
    Ip { address: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

impl OnOff {
    pub fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

// ── discover ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Keep printing presence transitions until interrupted
    #[arg(long)]
    pub watch: bool,

    /// Give up after this many seconds (ignored with --watch)
    #[arg(long, default_value_t = 15, value_name = "SECS")]
    pub timeout: u64,
}

// ── prefs ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub action: PrefsAction,
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Show the current preferences
    Show,
    /// Change one or both preferences
    Set {
        /// Enable or disable sync notifications
        #[arg(long)]
        notifications: Option<OnOff>,

        /// Sync interval in minutes (1, 5, 10 or 15)
        #[arg(long, value_name = "MINUTES")]
        interval: Option<u32>,
    },
}

// ── completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
