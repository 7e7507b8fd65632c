// ── `keephome prefs` ──

use std::sync::Arc;

use keephome_core::{SettingsStore, SyncInterval};

use crate::cli::{PrefsAction, PrefsArgs};
use crate::error::CliError;

pub fn handle(args: PrefsArgs, store: &Arc<SettingsStore>) -> Result<(), CliError> {
    match args.action {
        PrefsAction::Show => {
            let snap = store.snapshot();
            println!(
                "Sync notifications: {}",
                if snap.sync_notifications { "on" } else { "off" }
            );
            let unit = if snap.notification_interval == 1 {
                "minute"
            } else {
                "minutes"
            };
            println!("Sync interval: {} {unit}", snap.notification_interval);
            Ok(())
        }
        PrefsAction::Set {
            notifications,
            interval,
        } => {
            if notifications.is_none() && interval.is_none() {
                return Err(CliError::Usage {
                    message: "pass --notifications and/or --interval".into(),
                });
            }
            if let Some(state) = notifications {
                store.set_sync_notifications(state.enabled());
                println!(
                    "Sync notifications {}.",
                    if state.enabled() { "enabled" } else { "disabled" }
                );
            }
            if let Some(minutes) = interval {
                let interval =
                    SyncInterval::from_minutes(minutes).ok_or_else(|| CliError::Validation {
                        message: format!("interval must be one of 1, 5, 10 or 15 (got {minutes})"),
                    })?;
                store.set_notification_interval(interval);
                println!("Sync interval set to {minutes} min.");
            }
            Ok(())
        }
    }
}
