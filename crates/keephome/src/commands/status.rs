// ── `keephome status` ──

use keephome_core::SyncCoordinator;

use crate::error::CliError;

pub async fn handle(coordinator: &SyncCoordinator) -> Result<(), CliError> {
    let snapshot = coordinator.refresh().await?;
    println!("Uptime: {}s", snapshot.uptime_seconds);
    println!("Additional info: {}", snapshot.additional_info);
    Ok(())
}
