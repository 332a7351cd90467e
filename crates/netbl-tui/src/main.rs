//! `netbl-tui` — terminal dashboard for a Network Bandwidth Logger backend.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `netbl-core`'s [`Monitor`](netbl_core::Monitor). Screens are navigable
//! via number keys (1-3): Dashboard, Devices, and Reports, with a device
//! detail drill-down from the device list.
//!
//! Logs are written to a file (default `/tmp/netbl-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task forwards
//! store updates from the monitor into the TUI action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netbl_core::{Monitor, MonitorConfig};

use crate::app::App;

/// Terminal dashboard for monitoring home network bandwidth.
#[derive(Parser, Debug)]
#[command(name = "netbl-tui", version, about)]
struct Cli {
    /// Backend URL (e.g., http://localhost:5002)
    #[arg(short = 'u', long, env = "NETBL_URL")]
    url: Option<String>,

    /// Named profile from the config file
    #[arg(short = 'p', long, env = "NETBL_PROFILE")]
    profile: Option<String>,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long, env = "NETBL_INSECURE")]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NETBL_TIMEOUT")]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/netbl-tui.log)
    #[arg(long, default_value = "/tmp/netbl-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, which
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("netbl_tui={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netbl-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build a [`MonitorConfig`] from the config file, profile, and CLI
/// overrides. Same resolution order as the CLI: flags beat the profile,
/// the profile beats built-in defaults.
fn build_monitor_config(cli: &Cli) -> Result<MonitorConfig> {
    let cfg = netbl_config::load_config_or_default();
    let (_, mut profile) = netbl_config::resolve_profile(&cfg, cli.profile.as_deref())?;

    if let Some(ref url) = cli.url {
        profile.url.clone_from(url);
    }
    if cli.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = cli.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(netbl_config::profile_to_monitor_config(
        &profile,
        &cfg.defaults,
    )?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = build_monitor_config(&cli)?;
    info!(url = %config.base_url, "starting netbl-tui");

    let monitor = Monitor::new(config)?;
    let mut app = App::new(monitor);
    app.run().await?;

    Ok(())
}
