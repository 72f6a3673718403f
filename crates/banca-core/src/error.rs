// ── Core error types ──
//
// User-facing errors from banca-core. The ledger itself never fails on
// unknown ids (those are no-ops); these variants surface from the
// `BettingShop` facade, input validation and session storage.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Identity errors ──────────────────────────────────────────────
    /// Wrong username, wrong password and blocked account all collapse
    /// into this single variant.
    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("No user is logged in")]
    NotAuthenticated,

    #[error("Operation '{action}' requires the {required} role")]
    Forbidden { action: String, required: String },

    #[error("Account '{username}' is blocked")]
    AccountBlocked { username: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Bet not found: {identifier}")]
    BetNotFound { identifier: String },

    #[error("Seller not found: {identifier}")]
    SellerNotFound { identifier: String },

    #[error("Username already taken: {username}")]
    UsernameTaken { username: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Betting is closed at {time} (open {window})")]
    MarketClosed { time: String, window: String },

    // ── Storage errors ───────────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Storage { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    pub(crate) fn forbidden(action: &str, required: &str) -> Self {
        Self::Forbidden {
            action: action.into(),
            required: required.into(),
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage {
            message: format!("malformed storage content: {err}"),
        }
    }
}
