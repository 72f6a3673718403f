// ── Betting shop ──
//
// Application root: owns the roster, ledger, session and game settings,
// and gates every operation on the logged-in user's role.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::ledger::{BetFilter, BetLedger};
use crate::model::{
    Bet, BetId, GameSettings, GameTable, GameType, ReceiptCode, Role, TradingHours, User, UserId,
    UserStatus,
};
use crate::report::{DailyClosing, DashboardStats, FinancialSummary, Period, SellerStatement, daily_closings};
use crate::session::{IdentitySession, NewSeller, Roster, SellerUpdate, SessionStorage};

/// Days of history in seller statements.
pub const STATEMENT_DAYS: u32 = 5;

// ── Options ─────────────────────────────────────────────────────────

/// House rules applied by a [`BettingShop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopOptions {
    pub games: GameTable,
    pub hours: TradingHours,
    /// Refuse bets outside `hours`.
    pub enforce_hours: bool,
    /// Commission rate for bets whose seller is no longer on the roster.
    pub default_commission_rate: Decimal,
}

impl Default for ShopOptions {
    fn default() -> Self {
        Self {
            games: GameTable::default(),
            hours: TradingHours::default(),
            enforce_hours: false,
            default_commission_rate: dec!(10),
        }
    }
}

// ── BetRef ──────────────────────────────────────────────────────────

/// How an operator names a bet: by id or by receipt code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetRef {
    Id(BetId),
    Receipt(ReceiptCode),
}

impl FromStr for BetRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.trim().parse::<BetId>() {
            return Ok(Self::Id(id));
        }
        s.parse::<ReceiptCode>().map(Self::Receipt)
    }
}

impl fmt::Display for BetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Receipt(code) => write!(f, "{code}"),
        }
    }
}

impl From<BetId> for BetRef {
    fn from(id: BetId) -> Self {
        Self::Id(id)
    }
}

impl From<ReceiptCode> for BetRef {
    fn from(code: ReceiptCode) -> Self {
        Self::Receipt(code)
    }
}

/// A freshly placed bet together with what it would pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetReceipt {
    #[serde(flatten)]
    pub bet: Bet,
    pub multiplier: Decimal,
    pub potential_prize: Decimal,
}

// ── BettingShop ─────────────────────────────────────────────────────

pub struct BettingShop<S: SessionStorage> {
    roster: Roster,
    ledger: BetLedger,
    session: IdentitySession<S>,
    options: ShopOptions,
    clock: Arc<dyn Clock>,
}

impl<S: SessionStorage> fmt::Debug for BettingShop<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BettingShop")
            .field("session", &self.session)
            .field("ledger", &self.ledger)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S: SessionStorage> BettingShop<S> {
    /// Assemble a shop around an existing ledger. The ledger's clock
    /// becomes the shop's clock.
    pub fn new(roster: Roster, ledger: BetLedger, storage: S, options: ShopOptions) -> Self {
        let clock = Arc::clone(ledger.clock());
        Self {
            session: IdentitySession::new(storage, Arc::clone(&clock)),
            roster,
            ledger,
            options,
            clock,
        }
    }

    // ── Session ──────────────────────────────────────────────────────

    pub fn login(&mut self, username: &str, password: &SecretString) -> Result<User, CoreError> {
        self.session.login(&self.roster, username, password)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn restore_session(&mut self) -> Option<User> {
        self.session.restore_session()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn session(&self) -> &IdentitySession<S> {
        &self.session
    }

    // ── Read-only views ──────────────────────────────────────────────

    pub fn ledger(&self) -> &BetLedger {
        &self.ledger
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn options(&self) -> &ShopOptions {
        &self.options
    }

    pub fn games(&self) -> &GameTable {
        &self.options.games
    }

    pub fn hours(&self) -> &TradingHours {
        &self.options.hours
    }

    pub fn is_open_now(&self) -> bool {
        self.options.hours.is_open(self.clock.local_time())
    }

    // ── Bets ─────────────────────────────────────────────────────────

    /// Place a bet as the logged-in seller.
    ///
    /// The seller must still be on the roster and active, since a restored
    /// session may predate a block. Stakes are checked against the game
    /// table; the trading window only when `enforce_hours` is set.
    pub fn place_bet(
        &mut self,
        game_type: GameType,
        number: &str,
        amount: Decimal,
    ) -> Result<BetReceipt, CoreError> {
        let seller_id = self.session.require_role(Role::Seller, "place bet")?.id.clone();
        let seller = self
            .roster
            .get(&seller_id)
            .ok_or_else(|| CoreError::SellerNotFound {
                identifier: seller_id.to_string(),
            })?;
        if seller.status == UserStatus::Blocked {
            warn!(seller_id = %seller.id, "blocked seller attempted to place a bet");
            return Err(CoreError::AccountBlocked {
                username: seller.username.clone(),
            });
        }

        if self.options.enforce_hours {
            let now = self.clock.local_time();
            if !self.options.hours.is_open(now) {
                return Err(CoreError::MarketClosed {
                    time: now.format("%H:%M").to_string(),
                    window: self.options.hours.to_string(),
                });
            }
        }
        self.options.games.check_amount(game_type, amount)?;

        let seller_name = seller.name.clone();
        let bet = self
            .ledger
            .add_bet(seller_id, seller_name, game_type, number, amount)?;
        let multiplier = self.options.games.get(game_type).multiplier;
        info!(receipt = %bet.receipt_code, game = %game_type, "bet placed");
        Ok(BetReceipt {
            potential_prize: bet.potential_prize(multiplier),
            multiplier,
            bet,
        })
    }

    /// Cancel an active bet. Administrators only.
    pub fn cancel_bet(&mut self, bet: &BetRef) -> Result<Bet, CoreError> {
        self.session.require_role(Role::Admin, "cancel bet")?;
        self.change_status(bet, BetLedger::cancel_bet)
    }

    /// Record the payout of an active bet. Administrators only.
    pub fn pay_bet(&mut self, bet: &BetRef) -> Result<Bet, CoreError> {
        self.session.require_role(Role::Admin, "pay bet")?;
        self.change_status(bet, BetLedger::mark_paid)
    }

    /// One bet. Sellers only see their own.
    pub fn bet(&self, bet: &BetRef) -> Result<Bet, CoreError> {
        let user = self.session.require_user()?;
        self.resolve(bet)
            .filter(|b| user.is_admin() || b.seller_id == user.id)
            .cloned()
            .ok_or_else(|| CoreError::BetNotFound {
                identifier: bet.to_string(),
            })
    }

    /// Bets matching `filter`, most recent first. A seller's filter is
    /// always narrowed to their own bets.
    pub fn list_bets(&self, filter: &BetFilter) -> Result<Vec<Bet>, CoreError> {
        let user = self.session.require_user()?;
        let mut filter = filter.clone();
        if user.is_seller() {
            filter.seller_id = Some(user.id.clone());
        }
        Ok(self.ledger.search(&filter).cloned().collect())
    }

    // ── Reports ──────────────────────────────────────────────────────

    pub fn dashboard(&self) -> Result<DashboardStats, CoreError> {
        self.session.require_role(Role::Admin, "view dashboard")?;
        Ok(DashboardStats::compute(
            &self.ledger,
            &self.roster,
            self.options.default_commission_rate,
        ))
    }

    pub fn financial_summary(&self, period: Period) -> Result<FinancialSummary, CoreError> {
        self.session.require_role(Role::Admin, "view financial summary")?;
        Ok(FinancialSummary::compute(
            &self.ledger,
            &self.roster,
            period,
            self.options.default_commission_rate,
        ))
    }

    /// House-wide closings for the previous `days` days.
    pub fn daily_closings(&self, days: u32) -> Result<Vec<DailyClosing>, CoreError> {
        self.session.require_role(Role::Admin, "view daily closings")?;
        Ok(daily_closings(
            &self.ledger,
            &self.roster,
            None,
            days,
            self.options.default_commission_rate,
        ))
    }

    /// The logged-in seller's statement.
    pub fn my_statement(&self) -> Result<SellerStatement, CoreError> {
        let user = self.session.require_role(Role::Seller, "view statement")?;
        let seller = self.roster.get(&user.id).unwrap_or(user);
        Ok(SellerStatement::compute(
            &self.ledger,
            &self.roster,
            seller,
            STATEMENT_DAYS,
        ))
    }

    /// Any seller's statement. Administrators only.
    pub fn seller_statement(&self, seller_id: &UserId) -> Result<SellerStatement, CoreError> {
        self.session.require_role(Role::Admin, "view seller statement")?;
        let seller = self.seller(seller_id)?;
        Ok(SellerStatement::compute(
            &self.ledger,
            &self.roster,
            seller,
            STATEMENT_DAYS,
        ))
    }

    // ── Seller administration ────────────────────────────────────────

    /// Sellers matching `term` (all when empty).
    pub fn sellers(&self, term: &str) -> Result<Vec<User>, CoreError> {
        self.session.require_role(Role::Admin, "list sellers")?;
        Ok(self.roster.search_sellers(term).cloned().collect())
    }

    pub fn create_seller(&mut self, seller: NewSeller) -> Result<User, CoreError> {
        self.session.require_role(Role::Admin, "create seller")?;
        self.roster.create_seller(seller, self.clock.now())
    }

    pub fn update_seller(&mut self, id: &UserId, update: SellerUpdate) -> Result<User, CoreError> {
        self.session.require_role(Role::Admin, "edit seller")?;
        self.roster.update_seller(id, update)
    }

    pub fn toggle_seller(&mut self, id: &UserId) -> Result<UserStatus, CoreError> {
        self.session.require_role(Role::Admin, "toggle seller")?;
        self.roster.toggle_status(id)
    }

    pub fn remove_seller(&mut self, id: &UserId) -> Result<User, CoreError> {
        self.session.require_role(Role::Admin, "remove seller")?;
        self.roster.remove_seller(id)
    }

    /// Resolve a seller by id or username.
    pub fn find_seller(&self, key: &str) -> Result<&User, CoreError> {
        self.session.require_role(Role::Admin, "look up seller")?;
        self.roster
            .get(&UserId::from(key))
            .or_else(|| self.roster.find_by_username(key))
            .filter(|u| u.is_seller())
            .ok_or_else(|| CoreError::SellerNotFound {
                identifier: key.into(),
            })
    }

    // ── Games ────────────────────────────────────────────────────────

    pub fn set_game(&mut self, settings: GameSettings) -> Result<GameSettings, CoreError> {
        self.session.require_role(Role::Admin, "change game settings")?;
        self.options.games.set(settings)?;
        info!(
            game = %settings.game_type,
            min = %settings.min_amount,
            max = %settings.max_amount,
            multiplier = %settings.multiplier,
            "game settings updated"
        );
        Ok(settings)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn resolve(&self, bet: &BetRef) -> Option<&Bet> {
        match bet {
            BetRef::Id(id) => self.ledger.get(*id),
            BetRef::Receipt(code) => self.ledger.find_by_receipt(code),
        }
    }

    fn seller(&self, id: &UserId) -> Result<&User, CoreError> {
        self.roster
            .get(id)
            .filter(|u| u.is_seller())
            .ok_or_else(|| CoreError::SellerNotFound {
                identifier: id.to_string(),
            })
    }

    /// Resolve `bet` and apply `transition`, which refuses bets that are
    /// no longer active.
    fn change_status(
        &mut self,
        bet: &BetRef,
        transition: fn(&mut BetLedger, BetId) -> bool,
    ) -> Result<Bet, CoreError> {
        let found = self.resolve(bet).ok_or_else(|| CoreError::BetNotFound {
            identifier: bet.to_string(),
        })?;
        let (id, current) = (found.id, found.status);
        if !transition(&mut self.ledger, id) {
            return Err(CoreError::validation(format!(
                "bet {bet} is already {current}"
            )));
        }
        self.ledger.get(id).cloned().ok_or_else(|| CoreError::BetNotFound {
            identifier: bet.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::demo::seed_demo_bets;
    use crate::model::BetStatus;
    use crate::session::MemoryStorage;
    use chrono::{NaiveTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn shop_with(options: ShopOptions) -> (Arc<ManualClock>, BettingShop<MemoryStorage>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap(),
        ));
        let mut ledger = BetLedger::with_rng(clock.clone(), StdRng::seed_from_u64(1));
        seed_demo_bets(&mut ledger).unwrap();
        let roster = Roster::with_demo_users(clock.now());
        let shop = BettingShop::new(roster, ledger, MemoryStorage::new(), options);
        (clock, shop)
    }

    fn shop() -> BettingShop<MemoryStorage> {
        shop_with(ShopOptions::default()).1
    }

    fn as_admin(shop: &mut BettingShop<MemoryStorage>) {
        shop.login("admin", &secret("admin123")).unwrap();
    }

    fn as_joao(shop: &mut BettingShop<MemoryStorage>) {
        shop.login("joao", &secret("123456")).unwrap();
    }

    #[test]
    fn bet_ref_parses_ids_and_receipts() {
        let id = BetId::from(uuid::Uuid::nil());
        assert_eq!(id.to_string().parse::<BetRef>().unwrap(), BetRef::Id(id));
        assert!(matches!("abc12345".parse::<BetRef>().unwrap(), BetRef::Receipt(_)));
        assert!("nope".parse::<BetRef>().is_err());
    }

    #[test]
    fn seller_places_bet_with_name_snapshot_and_prize() {
        let mut shop = shop();
        as_joao(&mut shop);
        let receipt = shop.place_bet(GameType::Milhar, "0042", dec!(2)).unwrap();
        assert_eq!(receipt.bet.seller_name, "João Vendedor");
        assert_eq!(receipt.bet.seller_id, UserId::from("2"));
        assert_eq!(receipt.multiplier, dec!(4000));
        assert_eq!(receipt.potential_prize, dec!(8000));
        assert_eq!(shop.ledger().bets().next().unwrap().id, receipt.bet.id);
    }

    #[test]
    fn admin_cannot_place_bets_and_anonymous_cannot_do_anything() {
        let mut shop = shop();
        assert!(matches!(
            shop.place_bet(GameType::Dezena, "10", dec!(1)),
            Err(CoreError::NotAuthenticated)
        ));
        assert!(matches!(shop.list_bets(&BetFilter::default()), Err(CoreError::NotAuthenticated)));

        as_admin(&mut shop);
        assert!(matches!(
            shop.place_bet(GameType::Dezena, "10", dec!(1)),
            Err(CoreError::Forbidden { .. })
        ));
    }

    #[test]
    fn stake_limits_apply() {
        let mut shop = shop();
        as_joao(&mut shop);
        assert!(matches!(
            shop.place_bet(GameType::Milhar, "1234", dec!(100.01)),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(shop.place_bet(GameType::Dezena, "12", dec!(0.5)).is_ok());
        assert!(shop.place_bet(GameType::Dezena, "12", dec!(0.49)).is_err());
        assert!(shop.place_bet(GameType::Centena, "12", dec!(5)).is_err());
    }

    #[test]
    fn trading_hours_enforced_only_when_enabled() {
        // A pause spanning the whole window keeps the shop always closed.
        let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        let hours = TradingHours::new(NaiveTime::MIN, end, Some((NaiveTime::MIN, end))).unwrap();
        let (_, mut strict) = shop_with(ShopOptions {
            hours,
            enforce_hours: true,
            ..ShopOptions::default()
        });
        as_joao(&mut strict);
        assert!(!strict.is_open_now());
        assert!(matches!(
            strict.place_bet(GameType::Dezena, "12", dec!(1)),
            Err(CoreError::MarketClosed { .. })
        ));
        assert!(strict.ledger().bets().all(|b| b.number != "12"));

        let (_, mut relaxed) = shop_with(ShopOptions {
            hours,
            ..ShopOptions::default()
        });
        as_joao(&mut relaxed);
        assert!(relaxed.place_bet(GameType::Dezena, "12", dec!(1)).is_ok());
    }

    #[test]
    fn restored_blocked_seller_cannot_place_bets() {
        let mut shop = shop();
        as_joao(&mut shop);

        // Admin blocks João from another terminal sharing the roster.
        shop.roster.toggle_status(&UserId::from("2")).unwrap();
        assert!(matches!(
            shop.place_bet(GameType::Dezena, "12", dec!(1)),
            Err(CoreError::AccountBlocked { .. })
        ));
    }

    #[test]
    fn cancel_and_pay_by_receipt_or_id() {
        let mut shop = shop();
        as_admin(&mut shop);
        let bets: Vec<Bet> = shop.ledger().bets().cloned().collect();

        let by_receipt = BetRef::Receipt(bets[0].receipt_code.clone());
        let cancelled = shop.cancel_bet(&by_receipt).unwrap();
        assert_eq!(cancelled.status, BetStatus::Cancelled);
        assert_eq!(cancelled, Bet { status: BetStatus::Cancelled, ..bets[0].clone() });

        let paid = shop.pay_bet(&BetRef::Id(bets[1].id)).unwrap();
        assert_eq!(paid.status, BetStatus::Paid);

        // Terminal states stay put.
        assert!(matches!(shop.pay_bet(&by_receipt), Err(CoreError::ValidationFailed { .. })));
        assert_eq!(shop.ledger().get(bets[0].id).unwrap().status, BetStatus::Cancelled);
    }

    #[test]
    fn settled_bet_refuses_second_transition_with_its_status() {
        let mut shop = shop();
        as_admin(&mut shop);
        let id = shop.ledger().bets().next().unwrap().id;
        shop.pay_bet(&BetRef::Id(id)).unwrap();

        let err = shop.cancel_bet(&BetRef::Id(id)).unwrap_err();
        assert!(err.to_string().contains("already paid"), "{err}");
        let err = shop.pay_bet(&BetRef::Id(id)).unwrap_err();
        assert!(err.to_string().contains("already paid"), "{err}");
        assert_eq!(shop.ledger().get(id).unwrap().status, BetStatus::Paid);
    }

    #[test]
    fn cancel_unknown_bet_reports_not_found() {
        let mut shop = shop();
        as_admin(&mut shop);
        let before: Vec<Bet> = shop.ledger().bets().cloned().collect();
        let missing = BetRef::Receipt("ZZZZZZZZ".parse().unwrap());
        assert!(matches!(shop.cancel_bet(&missing), Err(CoreError::BetNotFound { .. })));
        let after: Vec<Bet> = shop.ledger().bets().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn seller_cannot_cancel() {
        let mut shop = shop();
        as_joao(&mut shop);
        let id = shop.ledger().bets().next().unwrap().id;
        assert!(matches!(
            shop.cancel_bet(&BetRef::Id(id)),
            Err(CoreError::Forbidden { .. })
        ));
    }

    #[test]
    fn sellers_only_see_their_own_bets() {
        let mut shop = shop();
        as_joao(&mut shop);
        let mine = shop.list_bets(&BetFilter::default()).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|b| b.seller_id == UserId::from("2")));

        // Asking for Maria's bets still yields only João's.
        let sneaky = BetFilter {
            seller_id: Some(UserId::from("3")),
            ..BetFilter::default()
        };
        assert!(shop.list_bets(&sneaky).unwrap().iter().all(|b| b.seller_id == UserId::from("2")));

        let marias = shop
            .ledger()
            .bets()
            .find(|b| b.seller_id == UserId::from("3"))
            .unwrap()
            .id;
        assert!(matches!(shop.bet(&BetRef::Id(marias)), Err(CoreError::BetNotFound { .. })));

        shop.logout();
        as_admin(&mut shop);
        assert_eq!(shop.list_bets(&BetFilter::default()).unwrap().len(), 3);
        assert!(shop.bet(&BetRef::Id(marias)).is_ok());
    }

    #[test]
    fn reports_are_role_gated() {
        let mut shop = shop();
        as_joao(&mut shop);
        let statement = shop.my_statement().unwrap();
        assert_eq!(statement.today_total, dec!(15));
        assert_eq!(statement.estimated_commission, dec!(1.5));
        assert!(matches!(shop.dashboard(), Err(CoreError::Forbidden { .. })));

        shop.logout();
        as_admin(&mut shop);
        let dash = shop.dashboard().unwrap();
        assert_eq!(dash.total_amount, dec!(17));
        assert_eq!(dash.bet_count, 3);
        assert_eq!(dash.sellers_today, 2);
        let summary = shop.financial_summary(Period::Today).unwrap();
        assert_eq!(summary.total_amount, dec!(17));
        assert_eq!(shop.daily_closings(3).unwrap().len(), 3);
        assert!(matches!(shop.my_statement(), Err(CoreError::Forbidden { .. })));
        let maria = shop.seller_statement(&UserId::from("3")).unwrap();
        assert_eq!(maria.today_total, dec!(2));
    }

    #[test]
    fn seller_admin_round_trip() {
        let mut shop = shop();
        as_admin(&mut shop);
        let ana = shop
            .create_seller(NewSeller {
                name: "Ana".into(),
                username: "ana".into(),
                password: secret("pw"),
                commission_rate: dec!(7),
                bet_limit: None,
            })
            .unwrap();
        assert_eq!(shop.sellers("").unwrap().len(), 4);
        assert_eq!(shop.find_seller("ana").unwrap().id, ana.id);
        assert_eq!(shop.find_seller(ana.id.as_str()).unwrap().id, ana.id);
        assert!(shop.find_seller("admin").is_err());

        assert_eq!(shop.toggle_seller(&ana.id).unwrap(), UserStatus::Blocked);
        shop.remove_seller(&ana.id).unwrap();
        assert_eq!(shop.sellers("ana").unwrap().len(), 0);

        shop.logout();
        as_joao(&mut shop);
        assert!(matches!(shop.sellers(""), Err(CoreError::Forbidden { .. })));
    }

    #[test]
    fn renaming_seller_keeps_old_bets_untouched() {
        let mut shop = shop();
        as_admin(&mut shop);
        shop.update_seller(
            &UserId::from("2"),
            SellerUpdate {
                name: Some("João Silva".into()),
                ..SellerUpdate::default()
            },
        )
        .unwrap();
        assert!(
            shop.ledger()
                .bets_by_seller(&UserId::from("2"))
                .all(|b| b.seller_name == "João Vendedor")
        );

        shop.logout();
        as_joao(&mut shop);
        let receipt = shop.place_bet(GameType::Dezena, "33", dec!(1)).unwrap();
        assert_eq!(receipt.bet.seller_name, "João Silva");
    }

    #[test]
    fn game_settings_update_changes_limits() {
        let mut shop = shop();
        as_admin(&mut shop);
        let mut milhar = shop.games().get(GameType::Milhar);
        milhar.max_amount = dec!(500);
        milhar.multiplier = dec!(5000);
        shop.set_game(milhar).unwrap();

        milhar.min_amount = dec!(600);
        assert!(shop.set_game(milhar).is_err());

        shop.logout();
        as_joao(&mut shop);
        let receipt = shop.place_bet(GameType::Milhar, "9999", dec!(300)).unwrap();
        assert_eq!(receipt.potential_prize, dec!(1500000));
        assert!(matches!(shop.set_game(milhar), Err(CoreError::Forbidden { .. })));
    }
}
