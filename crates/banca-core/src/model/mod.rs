// ── Domain model ──
//
// Canonical types shared by the ledger, the roster and every front end.

pub mod bet;
pub mod entity_id;
pub mod game;
pub mod user;

pub use bet::{Bet, BetStatus, GameType, ReceiptCode};
pub use entity_id::{BetId, UserId};
pub use game::{GameSettings, GameTable, TradingHours};
pub use user::{Role, User, UserStatus};
