//! Domain logic for a numeric-lottery betting shop (milhar / centena /
//! dezena), shared by the `banca` CLI and any other front end.
//!
//! - **[`BettingShop`]**: Application root. Owns the roster, ledger,
//!   session and house rules, and checks the logged-in user's role on every
//!   operation: sellers place bets and read their own data, administrators
//!   cancel and pay bets, manage sellers and games, and read reports.
//!
//! - **[`BetLedger`]**: The authoritative in-memory list of bets, most
//!   recent first. Insert, cancel and mark-paid, plus per-seller and
//!   per-day aggregates. Unknown ids are silent no-ops at this level.
//!
//! - **[`IdentitySession`]**: Login against a fixed [`Roster`], logout and
//!   session restore through a pluggable [`SessionStorage`]
//!   ([`MemoryStorage`], [`FileStorage`]).
//!
//! - **Reports** ([`report`]): [`FinancialSummary`] per [`Period`],
//!   [`DashboardStats`] for the current day, and [`SellerStatement`].
//!
//! - **Domain model** ([`model`]): [`Bet`], [`User`], closed enums for
//!   game type, bet status, role and account status, and [`GameTable`] /
//!   [`TradingHours`] for house rules.
//!
//! All time-dependent logic reads a [`Clock`] so "today" can be pinned in
//! tests with [`ManualClock`].

pub mod clock;
pub mod demo;
pub mod error;
pub mod ledger;
pub mod model;
pub mod report;
pub mod session;
pub mod shop;

// ── Primary re-exports ──────────────────────────────────────────────
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CoreError;
pub use ledger::{BetFilter, BetLedger};
pub use report::{
    DailyClosing, DashboardStats, FinancialSummary, GameTotals, Period, SellerStatement,
    SellerTotals,
};
pub use session::{
    FileStorage, IdentitySession, MemoryStorage, NewSeller, Roster, SellerUpdate, SessionStorage,
};
pub use shop::{BetReceipt, BetRef, BettingShop, ShopOptions};

pub use model::{
    Bet, BetId, BetStatus, GameSettings, GameTable, GameType, ReceiptCode, Role, TradingHours,
    User, UserId, UserStatus,
};
