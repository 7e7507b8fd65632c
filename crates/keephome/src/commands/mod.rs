// ── Command dispatch ──

pub mod device;
pub mod prefs;
pub mod set_cmd;
pub mod settings_cmd;
pub mod status;

use keephome_core::SyncCoordinator;

use crate::cli::Command;
use crate::error::CliError;

/// Where to send issues and feature requests.
pub const SUPPORT_URL: &str = "https://anderserver.ddns.net/blog/2021/5";

pub async fn dispatch(cmd: Command, coordinator: &SyncCoordinator) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(coordinator).await,
        Command::Settings(args) => settings_cmd::handle(args, coordinator).await,
        Command::Set(args) => set_cmd::handle(args, coordinator).await,
        Command::Restart => device::restart(coordinator).await,
        Command::Discover(args) => device::discover(&args, coordinator).await,
        Command::Prefs(args) => prefs::handle(args, coordinator.store()),
        // Handled in main before a coordinator exists.
        Command::Support | Command::Completions(_) => Ok(()),
    }
}
