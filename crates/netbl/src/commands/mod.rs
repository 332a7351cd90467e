//! Command dispatch: bridges CLI args -> core fetches -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod report;
pub mod summary;

use netbl_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Summary => summary::handle(monitor, global).await,
        Command::Devices => devices::handle_list(monitor, global).await,
        Command::Device { id } => devices::handle_detail(monitor, id, global).await,
        Command::Report { period } => report::handle(monitor, period.into(), global).await,
        // Config is handled before dispatch
        Command::Config(_) => unreachable!(),
    }
}
