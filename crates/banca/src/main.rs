mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::App;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli) {
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
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a shop
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "banca", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = banca_config::load_config()?;
            let mut app = App::open(&cli.global, &cfg)?;

            tracing::debug!(command = command_name(&cmd), "dispatching command");
            commands::dispatch(cmd, &mut app)
        }
    }
}

/// Command name for logs. Arguments stay out since `login` may carry a password.
fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::Bets(_) => "bets",
        Command::Sellers(_) => "sellers",
        Command::Games(_) => "games",
        Command::Report(_) => "report",
        Command::Shell => "shell",
        Command::Config(_) => "config",
        Command::Completions(_) => "completions",
    }
}
