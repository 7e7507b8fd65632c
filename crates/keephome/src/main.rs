mod cli;
mod commands;
mod error;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keephome_config::FileBackend;
use keephome_core::{SettingsStore, SyncCoordinator, TransportConfig};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation needs no device or settings.
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "keephome", &mut std::io::stdout());
            Ok(())
        }

        Command::Support => {
            println!("Submit issues and requests: {}", commands::SUPPORT_URL);
            Ok(())
        }

        cmd => {
            let coordinator = build_coordinator(&cli.global);
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &coordinator).await
        }
    }
}

/// Wire the settings backend, store, and coordinator together.
fn build_coordinator(global: &GlobalOpts) -> SyncCoordinator {
    let backend = match &global.settings_file {
        Some(path) => FileBackend::new(path.clone()),
        None => FileBackend::at_default_path(),
    };
    let store = Arc::new(SettingsStore::new(Box::new(backend)));
    let transport =
        TransportConfig::default().with_timeout(Duration::from_secs(global.timeout));
    SyncCoordinator::new(store, transport)
}
