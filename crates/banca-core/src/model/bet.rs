// ── Bet domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{BetId, UserId};
use crate::error::CoreError;

// ── GameType ────────────────────────────────────────────────────────

/// Numeric lottery modality. Each one fixes the number of digits played.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameType {
    Milhar,
    Centena,
    Dezena,
}

impl GameType {
    /// Exact length of a number played in this modality.
    pub const fn digits(self) -> usize {
        match self {
            Self::Milhar => 4,
            Self::Centena => 3,
            Self::Dezena => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Milhar => "Milhar",
            Self::Centena => "Centena",
            Self::Dezena => "Dezena",
        }
    }

    /// Check that `number` is exactly `digits()` ASCII decimal digits.
    pub fn validate_number(self, number: &str) -> Result<(), CoreError> {
        if number.len() != self.digits() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::validation(format!(
                "{} requires exactly {} digits, got '{number}'",
                self.label(),
                self.digits()
            )));
        }
        Ok(())
    }
}

// ── BetStatus ───────────────────────────────────────────────────────

/// Lifecycle of a bet: `Active` moves once to `Cancelled` or `Paid`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BetStatus {
    Active,
    Cancelled,
    Paid,
}

// ── ReceiptCode ─────────────────────────────────────────────────────

/// Eight uppercase alphanumeric characters printed on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptCode(String);

impl ReceiptCode {
    pub const LEN: usize = 8;
    const ALPHABET: &'static [u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Draw `LEN` characters uniformly and independently from `[A-Z0-9]`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let code = (0..Self::LEN)
            .map(|_| char::from(Self::ALPHABET[rng.gen_range(0..Self::ALPHABET.len())]))
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        s.len() == Self::LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }
}

impl fmt::Display for ReceiptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReceiptCode {
    type Err = CoreError;

    /// Parses case-insensitively; operators often type codes in lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if Self::is_valid(&upper) {
            Ok(Self(upper))
        } else {
            Err(CoreError::validation(format!(
                "receipt code must be {} characters of A-Z or 0-9, got '{s}'",
                Self::LEN
            )))
        }
    }
}

// ── Bet ─────────────────────────────────────────────────────────────

/// A single wager, immutable after creation except for `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub seller_id: UserId,
    /// Seller's display name at placement time; later renames don't touch it.
    pub seller_name: String,
    pub game_type: GameType,
    /// Zero-padded, `game_type.digits()` long.
    pub number: String,
    pub amount: Decimal,
    pub placed_at: DateTime<Utc>,
    pub status: BetStatus,
    pub receipt_code: ReceiptCode,
}

impl Bet {
    pub fn is_active(&self) -> bool {
        self.status == BetStatus::Active
    }

    /// Prize paid if the number is drawn, given the game's multiplier.
    pub fn potential_prize(&self, multiplier: Decimal) -> Decimal {
        self.amount * multiplier
    }
}
