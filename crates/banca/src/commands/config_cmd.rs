//! Config subcommand handlers. These run before any shop is built.

use banca_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn to_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg)
        .unwrap_or_else(|e| format!("# could not render config: {e}"))
        .trim_end()
        .to_owned()
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = super::resolve_format(global, &cfg);
            let out = output::render_single(format, &cfg, to_toml, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::Conflict {
                    resource_type: "config file".into(),
                    identifier: path.display().to_string(),
                });
            }
            let written = config::save_config(&Config::default())?;
            if !global.quiet {
                eprintln!("Configuration written to {}", written.display());
            }
            Ok(())
        }
    }
}
