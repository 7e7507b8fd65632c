// ── `keephome settings` ──

use owo_colors::OwoColorize;

use keephome_core::{Settings, SyncCoordinator, validate};

use crate::cli::{SettingsAction, SettingsArgs};
use crate::error::CliError;

pub async fn handle(args: SettingsArgs, coordinator: &SyncCoordinator) -> Result<(), CliError> {
    match args.action {
        SettingsAction::Sync => {
            coordinator.fetch_settings().await?;
            println!("{}", "Synced from device.".green());
            print_mirror(&coordinator.store().snapshot());
            Ok(())
        }
        SettingsAction::Show => {
            print_mirror(&coordinator.store().snapshot());
            Ok(())
        }
    }
}

fn print_mirror(settings: &Settings) {
    let mode = if settings.ap_mode {
        "access point (broadcasts its own network)"
    } else {
        "client (joins your network)"
    };
    let password = if validate::password_valid(&settings.password) {
        "set (8+ characters)".to_owned()
    } else {
        "INVALID (shorter than 8 characters)".red().to_string()
    };

    println!("{}      {}", "SSID:".bold(), settings.ssid);
    println!("{}      {mode}", "Mode:".bold());
    println!("{}  {password}", "Password:".bold());
    println!("{}   {}", "Address:".bold(), settings.ip);
}
