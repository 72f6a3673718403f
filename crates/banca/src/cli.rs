//! Clap derive structures for the `banca` CLI.
//!
//! Defines the complete command tree, global flags, and shared value
//! enums. Also compiled by `build.rs` for man pages, so it depends on
//! clap alone.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// banca -- point-of-sale CLI for a milhar/centena/dezena betting shop
#[derive(Debug, Parser)]
#[command(
    name = "banca",
    version,
    about = "Run a milhar/centena/dezena betting shop from the command line",
    long_about = "Run a milhar/centena/dezena betting shop: take bets, print receipts,\n\
        cancel and pay out bets, manage sellers and game limits, and read daily\n\
        financial reports.\n\n\
        Sellers place bets and see their own takings; administrators manage\n\
        everything else. The login session is kept on disk between runs.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// One line typed at the `banca shell` prompt.
#[derive(Debug, Parser)]
#[command(name = "banca", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "BANCA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Session store file (overrides config)
    #[arg(long, env = "BANCA_SESSION_FILE", global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Start without the sample bets
    #[arg(long, global = true)]
    pub no_demo: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameArg {
    /// Four digits
    #[value(alias = "m")]
    Milhar,
    /// Three digits
    #[value(alias = "c")]
    Centena,
    /// Two digits
    #[value(alias = "d")]
    Dezena,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Cancelled,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Today,
    /// Since last Sunday
    Week,
    /// Since the first of the month
    Month,
    All,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Place, list, cancel and pay bets
    #[command(alias = "b")]
    Bets(BetsArgs),

    /// Manage sellers (admin)
    #[command(alias = "s")]
    Sellers(SellersArgs),

    /// View or change game limits and multipliers
    #[command(alias = "g")]
    Games(GamesArgs),

    /// Dashboards and financial reports
    #[command(alias = "r")]
    Report(ReportArgs),

    /// Interactive prompt keeping one in-memory ledger across commands
    Shell,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login handle
    pub username: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "BANCA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Bets ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BetsArgs {
    #[command(subcommand)]
    pub command: BetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BetsCommand {
    /// Place a bet as the logged-in seller and print its receipt
    #[command(alias = "new")]
    Place {
        /// Game type
        game: GameArg,
        /// Number played, zero-padded (e.g. 0042 for milhar)
        number: String,
        /// Stake, e.g. 10 or 2,50
        amount: String,
    },

    /// Cancel an active bet (admin)
    Cancel {
        /// Receipt code or bet id
        bet: String,
    },

    /// Mark an active bet as paid out (admin)
    Pay {
        /// Receipt code or bet id
        bet: String,
    },

    /// List bets, most recent first
    #[command(alias = "ls")]
    List(BetsListArgs),

    /// Show one bet as a receipt
    #[command(alias = "get")]
    Show {
        /// Receipt code or bet id
        bet: String,
    },
}

#[derive(Debug, Args)]
pub struct BetsListArgs {
    /// Match number, seller name or receipt code
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only this game type
    #[arg(long, short = 'g')]
    pub game: Option<GameArg>,

    /// Only this status
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Only this seller, by id or username (admin)
    #[arg(long)]
    pub seller: Option<String>,

    /// Only bets placed today
    #[arg(long, short = 't')]
    pub today: bool,

    /// Max rows to show
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// ── Sellers ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SellersArgs {
    #[command(subcommand)]
    pub command: SellersCommand,
}

#[derive(Debug, Subcommand)]
pub enum SellersCommand {
    /// List sellers
    #[command(alias = "ls")]
    List {
        /// Match name or username
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Create a seller
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login handle
        #[arg(long)]
        username: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Commission percentage, 0-100
        #[arg(long, default_value = "10")]
        commission: String,
        /// Exposure ceiling
        #[arg(long)]
        limit: Option<String>,
    },

    /// Edit a seller's fields
    Edit {
        /// Seller id or username
        seller: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        reset_password: bool,
        #[arg(long)]
        commission: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },

    /// Block an active seller or unblock a blocked one
    Toggle {
        /// Seller id or username
        seller: String,
    },

    /// Remove a seller (existing bets are kept)
    #[command(alias = "rm")]
    Remove {
        /// Seller id or username
        seller: String,
    },
}

// ── Games ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GamesArgs {
    #[command(subcommand)]
    pub command: GamesCommand,
}

#[derive(Debug, Subcommand)]
pub enum GamesCommand {
    /// Show limits, multipliers and trading hours
    Show,

    /// Change one game's settings (admin, this session only)
    Set {
        game: GameArg,
        #[arg(long)]
        min: Option<String>,
        #[arg(long)]
        max: Option<String>,
        #[arg(long)]
        multiplier: Option<String>,
    },
}

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Today's totals and the most recent bets (admin)
    Dashboard,

    /// Totals, commission and net for a period (admin)
    Summary {
        #[arg(long, short = 'p', default_value = "today")]
        period: PeriodArg,
    },

    /// Per-day closings for the previous days (admin)
    Closings {
        #[arg(long, short = 'd', default_value = "5")]
        days: u32,
    },

    /// A seller's takings and commission (own, or any seller for admin)
    Statement {
        /// Seller id or username (admin)
        seller: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
