// ── Bet search criteria ──

use crate::model::{Bet, BetStatus, GameType, UserId};

/// Criteria for [`BetLedger::search`](super::BetLedger::search).
///
/// Every populated field must match. `term` matches the bet number as a
/// substring, or the seller name / receipt code case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetFilter {
    pub term: Option<String>,
    pub game_type: Option<GameType>,
    pub status: Option<BetStatus>,
    pub seller_id: Option<UserId>,
}

impl BetFilter {
    pub fn matches(&self, bet: &Bet) -> bool {
        if self.game_type.is_some_and(|g| g != bet.game_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != bet.status) {
            return false;
        }
        if self
            .seller_id
            .as_ref()
            .is_some_and(|id| id != &bet.seller_id)
        {
            return false;
        }
        match self.term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                bet.number.contains(term)
                    || bet.seller_name.to_lowercase().contains(&needle)
                    || bet.receipt_code.as_str().to_lowercase().contains(&needle)
            }
        }
    }
}
