//! Shared helpers for command handlers.

use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;

use banca_core::{BetRef, BetStatus, GameType, Period};

use crate::cli::{GameArg, PeriodArg, StatusArg};
use crate::error::CliError;

// ── Arg → core conversions ──────────────────────────────────────────

impl From<GameArg> for GameType {
    fn from(g: GameArg) -> Self {
        match g {
            GameArg::Milhar => Self::Milhar,
            GameArg::Centena => Self::Centena,
            GameArg::Dezena => Self::Dezena,
        }
    }
}

impl From<StatusArg> for BetStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Active => Self::Active,
            StatusArg::Cancelled => Self::Cancelled,
            StatusArg::Paid => Self::Paid,
        }
    }
}

impl From<PeriodArg> for Period {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Today => Self::Today,
            PeriodArg::Week => Self::Week,
            PeriodArg::Month => Self::Month,
            PeriodArg::All => Self::All,
        }
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Parse a money amount. Accepts a decimal comma (`2,50`).
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, CliError> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a number"),
    })
}

pub fn parse_optional_amount(field: &str, raw: Option<&str>) -> Result<Option<Decimal>, CliError> {
    raw.map(|r| parse_amount(field, r)).transpose()
}

/// Parse a receipt code or bet id.
pub fn parse_bet_ref(raw: &str) -> Result<BetRef, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "bet".into(),
        reason: format!("'{raw}' is neither a receipt code nor a bet id"),
    })
}

// ── Interactive ─────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Use the given password, or prompt for one without echo.
pub fn password_or_prompt(given: Option<String>, prompt: &str) -> Result<SecretString, CliError> {
    let password = match given {
        Some(p) => p,
        None => rpassword::prompt_password(prompt).map_err(prompt_err)?,
    };
    Ok(SecretString::from(password))
}

// ── Shell words ─────────────────────────────────────────────────────

/// Split a shell line into words with POSIX shell quoting rules.
pub fn split_words(line: &str) -> Result<Vec<String>, CliError> {
    shlex::split(line).ok_or_else(|| CliError::Validation {
        field: "input".into(),
        reason: "unterminated quote or trailing backslash".into(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_dot_or_comma() {
        assert_eq!(parse_amount("amount", "2,50").unwrap(), Decimal::new(25, 1));
        assert_eq!(parse_amount("amount", " 10 ").unwrap(), Decimal::from(10));
        assert!(matches!(
            parse_amount("amount", "ten"),
            Err(CliError::Validation { .. })
        ));
        assert_eq!(parse_optional_amount("limit", None).unwrap(), None);
    }

    #[test]
    fn bet_refs() {
        assert!(matches!(parse_bet_ref("abc12345").unwrap(), BetRef::Receipt(_)));
        assert!(parse_bet_ref("12").is_err());
    }

    #[test]
    fn words_split_on_whitespace_and_respect_quotes() {
        assert_eq!(
            split_words("  bets place milhar 0042   10 ").unwrap(),
            vec!["bets", "place", "milhar", "0042", "10"]
        );
        assert_eq!(
            split_words(r#"sellers create --name "Ana Lima" --username 'ana'"#).unwrap(),
            vec!["sellers", "create", "--name", "Ana Lima", "--username", "ana"]
        );
        assert_eq!(split_words(r"a\ b ''").unwrap(), vec!["a b", ""]);
        assert!(split_words("login \"joao").is_err());
        assert!(split_words(r"bets show ABC12345\").is_err());
        assert!(split_words("   ").unwrap().is_empty());
    }
}
