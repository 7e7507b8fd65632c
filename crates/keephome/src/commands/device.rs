// ── `keephome restart` and `keephome discover` ──

use std::time::Duration;

use owo_colors::OwoColorize;

use keephome_core::{DiscoveryService, Presence, SyncCoordinator};

use crate::cli::DiscoverArgs;
use crate::error::CliError;

pub async fn restart(coordinator: &SyncCoordinator) -> Result<(), CliError> {
    coordinator.restart().await?;
    println!("Device is restarting.");
    Ok(())
}

/// Browse the local network, printing presence transitions. Without
/// `--watch` the command exits on the first resolution or after the
/// timeout; with it, browsing continues until interrupted.
pub async fn discover(args: &DiscoverArgs, coordinator: &SyncCoordinator) -> Result<(), CliError> {
    let (handle, events) = DiscoveryService::start().map_err(CliError::from)?;
    let _consumer = coordinator.attach_discovery(events);
    let mut presence = coordinator.presence();

    println!("Browsing for the device...");
    let deadline = tokio::time::sleep(Duration::from_secs(args.timeout));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            () = &mut deadline, if !args.watch => {
                println!("No device found within {} seconds.", args.timeout);
                break;
            }
            _ = tokio::signal::ctrl_c(), if args.watch => break,
            changed = presence.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *presence.borrow_and_update();
                match state {
                    Presence::Online => {
                        println!(
                            "{} at {}",
                            "Online".green().bold(),
                            coordinator.store().snapshot().ip
                        );
                        if !args.watch {
                            break;
                        }
                    }
                    Presence::Offline => println!("{}", "Offline".red()),
                    Presence::Unknown => {}
                }
            }
        }
    }

    handle.stop();
    coordinator.shutdown();
    Ok(())
}
