// ── `keephome set` ──
//
// Writes apply to the local mirror first and are then sent to the
// device; a failed send keeps the local value (the next successful
// settings sync reconciles). `set ip` is purely local.

use owo_colors::OwoColorize;

use keephome_core::{CoreError, SyncCoordinator, validate};

use crate::cli::{SetArgs, SetField};
use crate::error::CliError;

pub async fn handle(args: SetArgs, coordinator: &SyncCoordinator) -> Result<(), CliError> {
    match args.field {
        SetField::Ssid { ssid } => {
            confirm(coordinator.set_ssid(ssid.clone()).await)?;
            println!("SSID set to '{ssid}'.");
        }
        SetField::Password { password } => {
            validate::ensure_password(&password)?;
            confirm(coordinator.set_password(password).await)?;
            println!("Password updated.");
        }
        SetField::ApMode { state } => {
            confirm(coordinator.set_ap_mode(state.enabled()).await)?;
            println!(
                "Access point mode {}.",
                if state.enabled() { "enabled" } else { "disabled" }
            );
        }
        SetField::Ip { address } => {
            validate::ensure_ipv4(&address)?;
            coordinator.set_address(address.clone());
            println!("Device address set to {address}.");
        }
    }
    Ok(())
}

/// Report a device write failure without hiding that the local mirror
/// already holds the new value.
fn confirm(result: Result<(), CoreError>) -> Result<(), CliError> {
    if let Err(err) = result {
        eprintln!(
            "{}",
            "Saved locally; the device did not confirm the change.".yellow()
        );
        return Err(err.into());
    }
    Ok(())
}
