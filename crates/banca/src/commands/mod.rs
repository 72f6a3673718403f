//! Command dispatch: bridges CLI args -> `BettingShop` calls -> output.

pub mod auth;
pub mod bets;
pub mod config_cmd;
pub mod games;
pub mod report;
pub mod sellers;
pub mod shell;
pub mod util;

use std::sync::Arc;

use banca_config::Config;
use banca_core::{BetLedger, BettingShop, Clock, FileStorage, Roster, SystemClock, demo};

use crate::cli::{ColorMode, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a handler needs: the shop plus resolved presentation flags.
pub struct App {
    pub shop: BettingShop<FileStorage>,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
    /// Set while `banca shell` runs, where in-memory changes outlive a
    /// single command.
    pub in_shell: bool,
}

impl App {
    /// Build the shop from config and flags, then pick up any stored
    /// session.
    pub fn open(global: &GlobalOpts, cfg: &Config) -> Result<Self, CliError> {
        let options = cfg.shop_options()?;
        let session_file = global
            .session_file
            .clone()
            .unwrap_or_else(|| cfg.session_file());

        let clock = Arc::new(SystemClock);
        let roster = Roster::with_demo_users(clock.now());
        let mut ledger = BetLedger::new(clock);
        if cfg.shop.seed_demo_bets && !global.no_demo {
            demo::seed_demo_bets(&mut ledger)?;
        }

        let mut shop = BettingShop::new(roster, ledger, FileStorage::new(session_file), options);
        if let Some(user) = shop.restore_session() {
            tracing::debug!(username = %user.username, "session restored");
        }

        Ok(Self {
            shop,
            format: resolve_format(global, cfg),
            color: output::should_color(resolve_color(global, cfg)),
            quiet: global.quiet,
            yes: global.yes,
            in_shell: false,
        })
    }

    /// Status line for a change that lives only in this process's memory.
    /// Outside the shell it also says so.
    pub fn note_change(&self, message: &str) {
        if self.in_shell {
            self.note(message);
        } else {
            self.note(&format!(
                "{message} (this run only; use `banca shell` to keep working with it)"
            ));
        }
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.quiet);
    }

    /// Status line on stderr, suppressed by `--quiet`.
    pub fn note(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

pub(crate) fn resolve_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    use clap::ValueEnum;
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

fn resolve_color(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    use clap::ValueEnum;
    global
        .color
        .unwrap_or_else(|| ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto))
}

/// Dispatch a shop-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, app: &mut App) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(args, app),
        Command::Logout => auth::logout(app),
        Command::Whoami => auth::whoami(app),
        Command::Bets(args) => bets::handle(args, app),
        Command::Sellers(args) => sellers::handle(args, app),
        Command::Games(args) => games::handle(args, app),
        Command::Report(args) => report::handle(args, app),
        Command::Shell => shell::run(app),
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "not available here".into(),
        }),
    }
}
