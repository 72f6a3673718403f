// ── Bet ledger ──
//
// The single authoritative list of bets. Most recent first. Only two
// mutations exist after creation: cancel and mark-paid, both from
// `Active`. Lookups of unknown ids are silent no-ops.

mod filter;

pub use filter::BetFilter;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock, local_date};
use crate::error::CoreError;
use crate::model::{Bet, BetId, BetStatus, GameType, ReceiptCode, UserId};

/// In-memory bet store owned by the application root.
pub struct BetLedger {
    /// Newest at the front.
    bets: VecDeque<Bet>,
    /// Receipt code -> bet, for uniqueness and lookup.
    receipts: HashMap<ReceiptCode, BetId>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl Default for BetLedger {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for BetLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BetLedger")
            .field("len", &self.bets.len())
            .finish_non_exhaustive()
    }
}

impl BetLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(clock, StdRng::from_entropy())
    }

    /// Ledger with a caller-supplied RNG, for reproducible receipt codes.
    pub fn with_rng(clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        Self {
            bets: VecDeque::new(),
            receipts: HashMap::new(),
            clock,
            rng,
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Record a new active bet and return a snapshot of it.
    ///
    /// `number` must have exactly `game_type.digits()` ASCII digits and
    /// `amount` must be positive; otherwise nothing is inserted.
    pub fn add_bet(
        &mut self,
        seller_id: UserId,
        seller_name: impl Into<String>,
        game_type: GameType,
        number: impl Into<String>,
        amount: Decimal,
    ) -> Result<Bet, CoreError> {
        let number = number.into();
        check_wager(game_type, &number, amount)?;

        let receipt_code = self.fresh_receipt_code();
        Ok(self.insert(Bet {
            id: BetId::generate(),
            seller_id,
            seller_name: seller_name.into(),
            game_type,
            number,
            amount,
            placed_at: self.clock.now(),
            status: BetStatus::Active,
            receipt_code,
        }))
    }

    /// Record a bet whose id and receipt code are already fixed, placed
    /// now and active. Used for seed data.
    ///
    /// Same checks as [`add_bet`](Self::add_bet); an id or receipt code
    /// already in the ledger is rejected.
    pub(crate) fn add_fixed_bet(&mut self, bet: Bet) -> Result<Bet, CoreError> {
        check_wager(bet.game_type, &bet.number, bet.amount)?;
        if self.receipts.contains_key(&bet.receipt_code) || self.get(bet.id).is_some() {
            return Err(CoreError::validation(format!(
                "bet {} is already recorded",
                bet.receipt_code
            )));
        }
        let placed_at = self.clock.now();
        Ok(self.insert(Bet {
            placed_at,
            status: BetStatus::Active,
            ..bet
        }))
    }

    /// Cancel an active bet. Returns `true` if the status changed.
    ///
    /// Unknown ids and bets that are already cancelled or paid are left
    /// untouched.
    pub fn cancel_bet(&mut self, id: BetId) -> bool {
        self.transition(id, BetStatus::Cancelled)
    }

    /// Mark an active bet as paid out. Returns `true` if the status changed.
    pub fn mark_paid(&mut self, id: BetId) -> bool {
        self.transition(id, BetStatus::Paid)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get(&self, id: BetId) -> Option<&Bet> {
        self.bets.iter().find(|b| b.id == id)
    }

    pub fn find_by_receipt(&self, code: &ReceiptCode) -> Option<&Bet> {
        let id = self.receipts.get(code)?;
        self.get(*id)
    }

    /// Every bet, most recent first.
    pub fn bets(&self) -> impl Iterator<Item = &Bet> + '_ {
        self.bets.iter()
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Bets placed by `seller_id`, any status, most recent first.
    pub fn bets_by_seller<'a>(&'a self, seller_id: &'a UserId) -> impl Iterator<Item = &'a Bet> + 'a {
        self.bets.iter().filter(move |b| &b.seller_id == seller_id)
    }

    /// Bets placed on the current local calendar date, any status.
    pub fn todays_bets(&self) -> impl Iterator<Item = &Bet> + '_ {
        let today = self.clock.today();
        self.bets
            .iter()
            .filter(move |b| local_date(b.placed_at) == today)
    }

    /// Bets placed at or after `since`, any status.
    pub fn bets_since(&self, since: DateTime<Utc>) -> impl Iterator<Item = &Bet> + '_ {
        self.bets.iter().filter(move |b| b.placed_at >= since)
    }

    /// Bets matching every criterion of `filter`.
    pub fn search<'a>(&'a self, filter: &'a BetFilter) -> impl Iterator<Item = &'a Bet> + 'a {
        self.bets.iter().filter(move |b| filter.matches(b))
    }

    // ── Aggregates ───────────────────────────────────────────────────

    /// Money at risk today: sum of *active* bets placed today, optionally
    /// for one seller.
    pub fn todays_total(&self, seller_id: Option<&UserId>) -> Decimal {
        self.todays_bets()
            .filter(|b| b.is_active())
            .filter(|b| seller_id.is_none_or(|id| &b.seller_id == id))
            .map(|b| b.amount)
            .sum()
    }

    /// Bets placed today in *any* status, optionally for one seller.
    pub fn todays_count(&self, seller_id: Option<&UserId>) -> usize {
        self.todays_bets()
            .filter(|b| seller_id.is_none_or(|id| &b.seller_id == id))
            .count()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn transition(&mut self, id: BetId, to: BetStatus) -> bool {
        let Some(bet) = self.bets.iter_mut().find(|b| b.id == id) else {
            debug!(bet_id = %id, "transition ignored: unknown bet");
            return false;
        };
        if !bet.is_active() {
            debug!(bet_id = %id, status = %bet.status, "transition ignored: bet not active");
            return false;
        }
        bet.status = to;
        info!(bet_id = %id, receipt = %bet.receipt_code, status = %to, "bet status changed");
        true
    }

    fn insert(&mut self, bet: Bet) -> Bet {
        self.receipts.insert(bet.receipt_code.clone(), bet.id);
        self.bets.push_front(bet.clone());
        debug!(
            bet_id = %bet.id,
            seller_id = %bet.seller_id,
            game = %bet.game_type,
            receipt = %bet.receipt_code,
            "bet recorded"
        );
        bet
    }

    /// Draw codes until one is unused in this ledger.
    fn fresh_receipt_code(&mut self) -> ReceiptCode {
        loop {
            let code = ReceiptCode::generate(&mut self.rng);
            if !self.receipts.contains_key(&code) {
                return code;
            }
            debug!(receipt = %code, "receipt code collision, redrawing");
        }
    }
}

fn check_wager(game_type: GameType, number: &str, amount: Decimal) -> Result<(), CoreError> {
    game_type.validate_number(number)?;
    if amount <= Decimal::ZERO {
        return Err(CoreError::validation(format!(
            "bet amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<ManualClock>, BetLedger) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 14, 15, 0, 0).unwrap(),
        ));
        let ledger = BetLedger::with_rng(clock.clone(), StdRng::seed_from_u64(42));
        (clock, ledger)
    }

    fn joao() -> UserId {
        UserId::from("2")
    }

    fn maria() -> UserId {
        UserId::from("3")
    }

    #[test]
    fn add_bet_returns_active_snapshot() {
        let (clock, mut ledger) = setup();
        let bet = ledger
            .add_bet(joao(), "João Vendedor", GameType::Milhar, "1234", dec!(10))
            .unwrap();

        assert_eq!(bet.status, BetStatus::Active);
        assert_eq!(bet.number.len(), GameType::Milhar.digits());
        assert_eq!(bet.placed_at, clock.now());
        assert_eq!(bet.seller_name, "João Vendedor");
        assert_eq!(bet.receipt_code.as_str().len(), 8);
        assert!(
            bet.receipt_code
                .as_str()
                .bytes()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
        assert_eq!(ledger.get(bet.id), Some(&bet));
    }

    #[test]
    fn add_bet_rejects_bad_input_without_inserting() {
        let (_, mut ledger) = setup();
        assert!(ledger.add_bet(joao(), "J", GameType::Centena, "12", dec!(5)).is_err());
        assert!(ledger.add_bet(joao(), "J", GameType::Dezena, "1x", dec!(5)).is_err());
        assert!(ledger.add_bet(joao(), "J", GameType::Dezena, "12", dec!(0)).is_err());
        assert!(ledger.add_bet(joao(), "J", GameType::Dezena, "12", dec!(-1)).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn newest_bet_comes_first() {
        let (_, mut ledger) = setup();
        let first = ledger.add_bet(joao(), "J", GameType::Dezena, "01", dec!(1)).unwrap();
        let second = ledger.add_bet(joao(), "J", GameType::Dezena, "02", dec!(1)).unwrap();
        let ids: Vec<_> = ledger.bets().map(|b| b.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn cancel_changes_only_status_and_is_idempotent() {
        let (_, mut ledger) = setup();
        let bet = ledger.add_bet(joao(), "J", GameType::Centena, "567", dec!(5)).unwrap();

        assert!(ledger.cancel_bet(bet.id));
        let after = ledger.get(bet.id).unwrap().clone();
        assert_eq!(after, Bet { status: BetStatus::Cancelled, ..bet.clone() });

        assert!(!ledger.cancel_bet(bet.id));
        assert_eq!(ledger.get(bet.id).unwrap(), &after);
    }

    #[test]
    fn cancel_unknown_id_mutates_nothing() {
        let (_, mut ledger) = setup();
        let bet = ledger.add_bet(joao(), "J", GameType::Centena, "567", dec!(5)).unwrap();
        let before: Vec<Bet> = ledger.bets().cloned().collect();

        assert!(!ledger.cancel_bet(BetId::generate()));
        let after: Vec<Bet> = ledger.bets().cloned().collect();
        assert_eq!(before, after);
        assert!(ledger.get(bet.id).unwrap().is_active());
    }

    #[test]
    fn paid_and_cancelled_are_terminal() {
        let (_, mut ledger) = setup();
        let paid = ledger.add_bet(joao(), "J", GameType::Dezena, "10", dec!(2)).unwrap();
        let cancelled = ledger.add_bet(joao(), "J", GameType::Dezena, "11", dec!(2)).unwrap();

        assert!(ledger.mark_paid(paid.id));
        assert!(ledger.cancel_bet(cancelled.id));

        assert!(!ledger.cancel_bet(paid.id));
        assert!(!ledger.mark_paid(cancelled.id));
        assert_eq!(ledger.get(paid.id).unwrap().status, BetStatus::Paid);
        assert_eq!(ledger.get(cancelled.id).unwrap().status, BetStatus::Cancelled);
    }

    #[test]
    fn bets_by_seller_filters_and_keeps_order() {
        let (_, mut ledger) = setup();
        let a = ledger.add_bet(joao(), "J", GameType::Milhar, "1234", dec!(10)).unwrap();
        ledger.add_bet(maria(), "M", GameType::Dezena, "89", dec!(2)).unwrap();
        let c = ledger.add_bet(joao(), "J", GameType::Centena, "567", dec!(5)).unwrap();
        ledger.cancel_bet(c.id);

        let ids: Vec<_> = ledger.bets_by_seller(&joao()).map(|b| b.id).collect();
        assert_eq!(ids, vec![c.id, a.id]);
        assert_eq!(ledger.bets_by_seller(&UserId::from("99")).count(), 0);
    }

    #[test]
    fn todays_count_includes_cancelled_total_does_not() {
        let (_, mut ledger) = setup();
        ledger.add_bet(joao(), "J", GameType::Milhar, "1234", dec!(10)).unwrap();
        let b = ledger.add_bet(joao(), "J", GameType::Centena, "567", dec!(5)).unwrap();
        ledger.add_bet(maria(), "M", GameType::Dezena, "89", dec!(2)).unwrap();
        ledger.cancel_bet(b.id);

        assert_eq!(ledger.todays_count(None), 3);
        assert_eq!(ledger.todays_total(None), dec!(12));
        assert_eq!(ledger.todays_count(Some(&joao())), 2);
        assert_eq!(ledger.todays_total(Some(&joao())), dec!(10));
        assert_eq!(ledger.todays_total(Some(&maria())), dec!(2));
    }

    #[test]
    fn previous_days_are_not_today() {
        let (clock, mut ledger) = setup();
        ledger.add_bet(joao(), "J", GameType::Milhar, "1111", dec!(7)).unwrap();
        clock.advance(Duration::days(2));
        ledger.add_bet(joao(), "J", GameType::Milhar, "2222", dec!(3)).unwrap();

        let today: Vec<_> = ledger.todays_bets().map(|b| b.number.clone()).collect();
        assert_eq!(today, vec!["2222".to_string()]);
        assert_eq!(ledger.todays_total(None), dec!(3));
        assert_eq!(ledger.todays_count(None), 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn empty_ledger_aggregates_to_zero() {
        let (_, ledger) = setup();
        assert_eq!(ledger.todays_total(None), Decimal::ZERO);
        assert_eq!(ledger.todays_count(None), 0);
        assert_eq!(ledger.todays_bets().count(), 0);
    }

    #[test]
    fn receipt_lookup_and_uniqueness() {
        let (_, mut ledger) = setup();
        let mut codes = std::collections::HashSet::new();
        for n in 0..200 {
            let number = format!("{:02}", n % 100);
            let bet = ledger.add_bet(joao(), "J", GameType::Dezena, number, dec!(1)).unwrap();
            assert!(codes.insert(bet.receipt_code.clone()));
            assert_eq!(ledger.find_by_receipt(&bet.receipt_code).unwrap().id, bet.id);
        }
    }

    #[test]
    fn bets_since_bounds_by_instant() {
        let (clock, mut ledger) = setup();
        ledger.add_bet(joao(), "J", GameType::Dezena, "01", dec!(1)).unwrap();
        clock.advance(Duration::hours(1));
        let cutoff = clock.now();
        ledger.add_bet(joao(), "J", GameType::Dezena, "02", dec!(1)).unwrap();

        let numbers: Vec<_> = ledger.bets_since(cutoff).map(|b| b.number.as_str()).collect();
        assert_eq!(numbers, vec!["02"]);
    }

    #[test]
    fn fixed_bets_keep_their_code_and_reject_duplicates() {
        let (clock, mut ledger) = setup();
        let code: ReceiptCode = "ABC12345".parse().unwrap();
        let template = Bet {
            id: BetId::from(uuid::Uuid::from_u128(1)),
            seller_id: joao(),
            seller_name: "J".into(),
            game_type: GameType::Milhar,
            number: "1234".into(),
            amount: dec!(10),
            placed_at: clock.now() - Duration::days(3),
            status: BetStatus::Paid,
            receipt_code: code.clone(),
        };

        let bet = ledger.add_fixed_bet(template.clone()).unwrap();
        assert_eq!(bet.receipt_code, code);
        assert_eq!(bet.status, BetStatus::Active);
        assert_eq!(bet.placed_at, clock.now());
        assert_eq!(ledger.find_by_receipt(&code).unwrap().id, bet.id);

        assert!(matches!(
            ledger.add_fixed_bet(template.clone()),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            ledger.add_fixed_bet(Bet {
                id: BetId::from(uuid::Uuid::from_u128(2)),
                receipt_code: "XYZ98765".parse().unwrap(),
                number: "12".into(),
                ..template
            }),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert_eq!(ledger.len(), 1);
    }
}
