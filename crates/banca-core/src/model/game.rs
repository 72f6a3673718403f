// ── Game configuration ──
//
// Per-modality stake limits and payout multipliers, plus the daily
// window during which bets are accepted.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::bet::GameType;
use crate::error::CoreError;

// ── GameSettings ────────────────────────────────────────────────────

/// Stake limits and payout multiplier for one game type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub game_type: GameType,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub multiplier: Decimal,
}

impl GameSettings {
    /// House defaults for each modality.
    pub fn default_for(game_type: GameType) -> Self {
        let (min_amount, max_amount, multiplier) = match game_type {
            GameType::Milhar => (dec!(1), dec!(100), dec!(4000)),
            GameType::Centena => (dec!(1), dec!(200), dec!(600)),
            GameType::Dezena => (dec!(0.50), dec!(500), dec!(60)),
        };
        Self {
            game_type,
            min_amount,
            max_amount,
            multiplier,
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.min_amount <= Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "{}: minimum stake must be positive",
                self.game_type.label()
            )));
        }
        if self.min_amount > self.max_amount {
            return Err(CoreError::validation(format!(
                "{}: minimum stake {} exceeds maximum {}",
                self.game_type.label(),
                self.min_amount,
                self.max_amount
            )));
        }
        if self.multiplier <= Decimal::ZERO {
            return Err(CoreError::validation(format!(
                "{}: multiplier must be positive",
                self.game_type.label()
            )));
        }
        Ok(())
    }
}

// ── GameTable ───────────────────────────────────────────────────────

/// Settings for every game type. Always complete: one entry per variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTable {
    games: BTreeMap<GameType, GameSettings>,
}

impl Default for GameTable {
    fn default() -> Self {
        Self {
            games: GameType::iter()
                .map(|g| (g, GameSettings::default_for(g)))
                .collect(),
        }
    }
}

impl GameTable {
    pub fn get(&self, game_type: GameType) -> GameSettings {
        self.games
            .get(&game_type)
            .copied()
            .unwrap_or_else(|| GameSettings::default_for(game_type))
    }

    /// All settings, in `GameType` order.
    pub fn all(&self) -> Vec<GameSettings> {
        GameType::iter().map(|g| self.get(g)).collect()
    }

    /// Replace the settings of one game type after validating them.
    pub fn set(&mut self, settings: GameSettings) -> Result<(), CoreError> {
        settings.validate()?;
        self.games.insert(settings.game_type, settings);
        Ok(())
    }

    /// Check a stake against the configured limits for its game.
    pub fn check_amount(&self, game_type: GameType, amount: Decimal) -> Result<(), CoreError> {
        let s = self.get(game_type);
        if amount < s.min_amount || amount > s.max_amount {
            return Err(CoreError::validation(format!(
                "{} stakes must be between {:.2} and {:.2}, got {amount:.2}",
                game_type.label(),
                s.min_amount,
                s.max_amount
            )));
        }
        Ok(())
    }
}

// ── TradingHours ────────────────────────────────────────────────────

/// Daily window during which bets are accepted, with an optional pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingHours {
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    /// Half-open `[start, end)` interval with no betting.
    pub pause: Option<(NaiveTime, NaiveTime)>,
}

impl Default for TradingHours {
    fn default() -> Self {
        Self {
            opens_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            closes_at: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            pause: None,
        }
    }
}

impl TradingHours {
    pub fn new(
        opens_at: NaiveTime,
        closes_at: NaiveTime,
        pause: Option<(NaiveTime, NaiveTime)>,
    ) -> Result<Self, CoreError> {
        if opens_at >= closes_at {
            return Err(CoreError::validation(format!(
                "opening time {opens_at} must be before closing time {closes_at}"
            )));
        }
        if let Some((start, end)) = pause {
            if start >= end || start < opens_at || end > closes_at {
                return Err(CoreError::validation(format!(
                    "pause {start}-{end} must lie inside {opens_at}-{closes_at}"
                )));
            }
        }
        Ok(Self {
            opens_at,
            closes_at,
            pause,
        })
    }

    /// Whether a bet may be placed at local wall-clock `time`.
    pub fn is_open(&self, time: NaiveTime) -> bool {
        if time < self.opens_at || time >= self.closes_at {
            return false;
        }
        !matches!(self.pause, Some((start, end)) if time >= start && time < end)
    }
}

impl fmt::Display for TradingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.opens_at.format("%H:%M"),
            self.closes_at.format("%H:%M")
        )?;
        if let Some((start, end)) = self.pause {
            write!(
                f,
                ", paused {}-{}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn default_table_matches_house_rules() {
        let table = GameTable::default();
        assert_eq!(table.get(GameType::Milhar).multiplier, dec!(4000));
        assert_eq!(table.get(GameType::Centena).multiplier, dec!(600));
        assert_eq!(table.get(GameType::Dezena).multiplier, dec!(60));
        assert_eq!(table.get(GameType::Dezena).min_amount, dec!(0.50));
        assert_eq!(table.all().len(), 3);
    }

    #[test]
    fn check_amount_enforces_bounds() {
        let table = GameTable::default();
        table.check_amount(GameType::Milhar, dec!(1)).unwrap();
        table.check_amount(GameType::Milhar, dec!(100)).unwrap();
        assert!(table.check_amount(GameType::Milhar, dec!(0.99)).is_err());
        assert!(table.check_amount(GameType::Milhar, dec!(100.01)).is_err());
    }

    #[test]
    fn set_rejects_inverted_limits() {
        let mut table = GameTable::default();
        let bad = GameSettings {
            game_type: GameType::Centena,
            min_amount: dec!(50),
            max_amount: dec!(10),
            multiplier: dec!(600),
        };
        assert!(table.set(bad).is_err());
        assert_eq!(table.get(GameType::Centena), GameSettings::default_for(GameType::Centena));
    }

    #[test]
    fn set_replaces_one_game_only() {
        let mut table = GameTable::default();
        let updated = GameSettings {
            game_type: GameType::Dezena,
            min_amount: dec!(1),
            max_amount: dec!(50),
            multiplier: dec!(70),
        };
        table.set(updated).unwrap();
        assert_eq!(table.get(GameType::Dezena), updated);
        assert_eq!(table.get(GameType::Milhar), GameSettings::default_for(GameType::Milhar));
    }

    #[test]
    fn hours_without_pause() {
        let hours = TradingHours::default();
        assert!(!hours.is_open(t(7, 59)));
        assert!(hours.is_open(t(8, 0)));
        assert!(hours.is_open(t(21, 59)));
        assert!(!hours.is_open(t(22, 0)));
    }

    #[test]
    fn hours_with_pause() {
        let hours = TradingHours::new(t(8, 0), t(22, 0), Some((t(12, 0), t(14, 0)))).unwrap();
        assert!(hours.is_open(t(11, 59)));
        assert!(!hours.is_open(t(12, 0)));
        assert!(!hours.is_open(t(13, 30)));
        assert!(hours.is_open(t(14, 0)));
        assert_eq!(hours.to_string(), "08:00-22:00, paused 12:00-14:00");
    }

    #[test]
    fn hours_reject_pause_outside_window() {
        assert!(TradingHours::new(t(8, 0), t(22, 0), Some((t(7, 0), t(9, 0)))).is_err());
        assert!(TradingHours::new(t(22, 0), t(8, 0), None).is_err());
    }
}
