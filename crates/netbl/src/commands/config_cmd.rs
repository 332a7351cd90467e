//! Config file management handlers. These never touch the network.

use netbl_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&netbl_config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = netbl_config::load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = netbl_config::config_path();
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!(
                        "config file already exists at {} (use --force to overwrite)",
                        path.display()
                    ),
                });
            }

            let mut cfg = Config::default();
            cfg.profiles.insert("default".into(), Profile::default());
            netbl_config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!("Wrote starter config to {}", path.display());
            }
            Ok(())
        }
    }
}
