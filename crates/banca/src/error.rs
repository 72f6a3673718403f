//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use banca_config::ConfigError;
use banca_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Invalid username or password")]
    #[diagnostic(
        code(banca::auth_failed),
        help("Check the credentials. Blocked accounts cannot log in.")
    )]
    AuthFailed,

    #[error("Not logged in")]
    #[diagnostic(code(banca::not_logged_in), help("Run: banca login <username>"))]
    NotLoggedIn,

    // ── Permission ───────────────────────────────────────────────────
    #[error("'{action}' requires the {required} role")]
    #[diagnostic(
        code(banca::permission_denied),
        help("Log in with a {required} account: banca login <username>")
    )]
    PermissionDenied { action: String, required: String },

    #[error("Account '{username}' is blocked")]
    #[diagnostic(
        code(banca::account_blocked),
        help("Ask an administrator to run: banca sellers toggle {username}")
    )]
    AccountBlocked { username: String },

    #[error("Betting is closed at {time}")]
    #[diagnostic(code(banca::market_closed), help("Bets are accepted {window}."))]
    MarketClosed { time: String, window: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(banca::not_found),
        help("Run: banca {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(banca::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(banca::validation))]
    Validation { field: String, reason: String },

    // ── Configuration / storage ──────────────────────────────────────
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(banca::config),
        help("Inspect the effective settings with: banca config show")
    )]
    Config(#[from] ConfigError),

    #[error("Session storage error: {message}")]
    #[diagnostic(
        code(banca::storage),
        help("Check permissions of the session file, or point --session-file elsewhere.")
    )]
    Storage { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed | Self::NotLoggedIn => exit_code::AUTH,
            Self::PermissionDenied { .. } | Self::AccountBlocked { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::MarketClosed { .. } | Self::Config(_) | Self::Storage { .. } | Self::Io(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed => CliError::AuthFailed,
            CoreError::NotAuthenticated => CliError::NotLoggedIn,
            CoreError::Forbidden { action, required } => {
                CliError::PermissionDenied { action, required }
            }
            CoreError::AccountBlocked { username } => CliError::AccountBlocked { username },
            CoreError::BetNotFound { identifier } => CliError::NotFound {
                resource_type: "bet".into(),
                identifier,
                list_command: "bets list".into(),
            },
            CoreError::SellerNotFound { identifier } => CliError::NotFound {
                resource_type: "seller".into(),
                identifier,
                list_command: "sellers list".into(),
            },
            CoreError::UsernameTaken { username } => CliError::Conflict {
                resource_type: "username".into(),
                identifier: username,
            },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::MarketClosed { time, window } => CliError::MarketClosed { time, window },
            CoreError::Storage { message } => CliError::Storage { message },
        }
    }
}
