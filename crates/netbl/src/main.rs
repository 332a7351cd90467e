mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netbl_core::Monitor;

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
        // Config commands don't need a backend connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let monitor_config = build_monitor_config(&cli.global)?;
            let monitor = Monitor::new(monitor_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &monitor, &cli.global).await
        }
    }
}

/// Build a `MonitorConfig` from the config file, profile, and CLI overrides.
fn build_monitor_config(global: &GlobalOpts) -> Result<netbl_core::MonitorConfig, CliError> {
    let cfg = netbl_config::load_config_or_default();
    let (_, mut profile) = netbl_config::resolve_profile(&cfg, global.profile.as_deref())?;

    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(netbl_config::profile_to_monitor_config(&profile, &cfg.defaults)?)
}
