// ── Financial reports ──
//
// Read-only aggregations over the ledger. Money "at risk" always means
// active bets; counts include every status unless named otherwise.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::clock::local_date;
use crate::ledger::BetLedger;
use crate::model::{Bet, BetStatus, GameType, User, UserId};
use crate::session::Roster;

/// Number of bets shown in the dashboard's recent list.
pub const RECENT_BETS: usize = 5;

// ── Period ──────────────────────────────────────────────────────────

/// Reporting window, anchored on the current local date.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Period {
    #[default]
    Today,
    /// Since the most recent Sunday.
    Week,
    /// Since the first of the month.
    Month,
    All,
}

impl Period {
    /// First local date inside the window, or `None` for [`Period::All`].
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Week => {
                let back = i64::from(today.weekday().num_days_from_sunday());
                Some(today - Duration::days(back))
            }
            Self::Month => today.with_day(1),
            Self::All => None,
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.start(today).is_none_or(|start| date >= start)
    }
}

// ── Commission ──────────────────────────────────────────────────────

/// Commission owed on `amount` at `rate` percent.
pub fn commission(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Seller rates from the roster, with a fallback for sellers that have
/// since been removed.
struct Rates<'a> {
    roster: &'a Roster,
    default_rate: Decimal,
}

impl Rates<'_> {
    fn of(&self, seller: &UserId) -> Decimal {
        self.roster.commission_rate(seller).unwrap_or(self.default_rate)
    }

    fn on(&self, bets: &[&Bet]) -> Decimal {
        bets.iter()
            .filter(|b| b.is_active())
            .map(|b| commission(b.amount, self.of(&b.seller_id)))
            .sum()
    }
}

fn sum_status(bets: &[&Bet], status: BetStatus) -> Decimal {
    bets.iter()
        .filter(|b| b.status == status)
        .map(|b| b.amount)
        .sum()
}

fn count_status(bets: &[&Bet], status: BetStatus) -> usize {
    bets.iter().filter(|b| b.status == status).count()
}

// ── FinancialSummary ────────────────────────────────────────────────

/// Totals for one seller within a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerTotals {
    pub seller_id: UserId,
    pub seller_name: String,
    pub bet_count: usize,
    pub total_amount: Decimal,
    pub commission_rate: Decimal,
    pub commission: Decimal,
}

/// Active stake per game type within a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameTotals {
    pub game_type: GameType,
    pub bet_count: usize,
    pub total_amount: Decimal,
}

/// House-wide financial picture for a [`Period`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub period: Period,
    pub from: Option<NaiveDate>,
    pub to: NaiveDate,
    /// Sum of active bets.
    pub total_amount: Decimal,
    pub cancelled_amount: Decimal,
    pub paid_amount: Decimal,
    pub bet_count: usize,
    pub active_count: usize,
    pub cancelled_count: usize,
    pub paid_count: usize,
    pub commission: Decimal,
    /// `total_amount - commission`.
    pub net: Decimal,
    pub by_seller: Vec<SellerTotals>,
    pub by_game: Vec<GameTotals>,
}

impl FinancialSummary {
    pub fn compute(
        ledger: &BetLedger,
        roster: &Roster,
        period: Period,
        default_rate: Decimal,
    ) -> Self {
        let today = ledger.clock().today();
        let bets: Vec<&Bet> = ledger
            .bets()
            .filter(|b| period.contains(local_date(b.placed_at), today))
            .collect();
        let rates = Rates {
            roster,
            default_rate,
        };

        let total_amount = sum_status(&bets, BetStatus::Active);
        let commission_total = rates.on(&bets);

        let mut by_seller: BTreeMap<&UserId, SellerTotals> = BTreeMap::new();
        for bet in &bets {
            let entry = by_seller
                .entry(&bet.seller_id)
                .or_insert_with(|| SellerTotals {
                    seller_id: bet.seller_id.clone(),
                    seller_name: bet.seller_name.clone(),
                    bet_count: 0,
                    total_amount: Decimal::ZERO,
                    commission_rate: rates.of(&bet.seller_id),
                    commission: Decimal::ZERO,
                });
            entry.bet_count += 1;
            if bet.is_active() {
                entry.total_amount += bet.amount;
                entry.commission += commission(bet.amount, entry.commission_rate);
            }
        }
        let mut by_seller: Vec<SellerTotals> = by_seller.into_values().collect();
        by_seller.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));

        let mut by_game: BTreeMap<GameType, GameTotals> = BTreeMap::new();
        for bet in bets.iter().filter(|b| b.is_active()) {
            let entry = by_game.entry(bet.game_type).or_insert(GameTotals {
                game_type: bet.game_type,
                bet_count: 0,
                total_amount: Decimal::ZERO,
            });
            entry.bet_count += 1;
            entry.total_amount += bet.amount;
        }

        Self {
            period,
            from: period.start(today),
            to: today,
            total_amount,
            cancelled_amount: sum_status(&bets, BetStatus::Cancelled),
            paid_amount: sum_status(&bets, BetStatus::Paid),
            bet_count: bets.len(),
            active_count: count_status(&bets, BetStatus::Active),
            cancelled_count: count_status(&bets, BetStatus::Cancelled),
            paid_count: count_status(&bets, BetStatus::Paid),
            commission: commission_total,
            net: total_amount - commission_total,
            by_seller,
            by_game: by_game.into_values().collect(),
        }
    }
}

// ── Daily closings ──────────────────────────────────────────────────

/// Active stake and commission for one past day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyClosing {
    pub date: NaiveDate,
    pub bet_count: usize,
    pub total_amount: Decimal,
    pub commission: Decimal,
    pub net: Decimal,
}

/// Closings for the `days` days before today, most recent first.
///
/// With `seller`, only that seller's bets count and commission uses their
/// rate.
pub fn daily_closings(
    ledger: &BetLedger,
    roster: &Roster,
    seller: Option<&UserId>,
    days: u32,
    default_rate: Decimal,
) -> Vec<DailyClosing> {
    let today = ledger.clock().today();
    let rates = Rates {
        roster,
        default_rate,
    };
    (1..=i64::from(days))
        .map(|back| {
            let date = today - Duration::days(back);
            let bets: Vec<&Bet> = ledger
                .bets()
                .filter(|b| local_date(b.placed_at) == date)
                .filter(|b| seller.is_none_or(|id| &b.seller_id == id))
                .collect();
            let total_amount = sum_status(&bets, BetStatus::Active);
            let commission = rates.on(&bets);
            DailyClosing {
                date,
                bet_count: bets.len(),
                total_amount,
                commission,
                net: total_amount - commission,
            }
        })
        .collect()
}

// ── DashboardStats ──────────────────────────────────────────────────

/// Administrator's view of the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub date: NaiveDate,
    pub total_amount: Decimal,
    /// Bets placed today, any status.
    pub bet_count: usize,
    pub active_count: usize,
    pub cancelled_count: usize,
    pub gross: Decimal,
    pub net: Decimal,
    pub sellers_today: usize,
    pub recent: Vec<Bet>,
}

impl DashboardStats {
    pub fn compute(ledger: &BetLedger, roster: &Roster, default_rate: Decimal) -> Self {
        let today: Vec<&Bet> = ledger.todays_bets().collect();
        let gross = ledger.todays_total(None);
        let rates = Rates {
            roster,
            default_rate,
        };
        let sellers: HashSet<&UserId> = today.iter().map(|b| &b.seller_id).collect();

        Self {
            date: ledger.clock().today(),
            total_amount: gross,
            bet_count: ledger.todays_count(None),
            active_count: count_status(&today, BetStatus::Active),
            cancelled_count: count_status(&today, BetStatus::Cancelled),
            gross,
            net: gross - rates.on(&today),
            sellers_today: sellers.len(),
            recent: ledger.bets().take(RECENT_BETS).cloned().collect(),
        }
    }
}

// ── SellerStatement ─────────────────────────────────────────────────

/// A seller's own takings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerStatement {
    pub seller_id: UserId,
    pub seller_name: String,
    pub date: NaiveDate,
    pub today_total: Decimal,
    pub today_count: usize,
    pub commission_rate: Decimal,
    /// `today_total * commission_rate / 100`.
    pub estimated_commission: Decimal,
    /// Bets ever placed, any status.
    pub lifetime_count: usize,
    pub closings: Vec<DailyClosing>,
}

impl SellerStatement {
    pub fn compute(ledger: &BetLedger, roster: &Roster, seller: &User, days: u32) -> Self {
        let today_total = ledger.todays_total(Some(&seller.id));
        Self {
            seller_id: seller.id.clone(),
            seller_name: seller.name.clone(),
            date: ledger.clock().today(),
            today_total,
            today_count: ledger.todays_count(Some(&seller.id)),
            commission_rate: seller.commission_rate,
            estimated_commission: commission(today_total, seller.commission_rate),
            lifetime_count: ledger.bets_by_seller(&seller.id).count(),
            closings: daily_closings(ledger, roster, Some(&seller.id), days, seller.commission_rate),
        }
    }
}
