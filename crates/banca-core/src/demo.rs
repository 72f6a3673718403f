// ── Demonstration data ──

use rust_decimal_macros::dec;
use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;
use crate::ledger::BetLedger;
use crate::model::{Bet, BetId, BetStatus, GameType, UserId};

/// Seed the three sample bets of a fresh shop.
///
/// Inserted oldest first so that ledger order ends with João's milhar on
/// top. Ids (`Uuid::from_u128(1..=3)`) and receipt codes are fixed, so a
/// bet listed by one process can be named in the next.
pub fn seed_demo_bets(ledger: &mut BetLedger) -> Result<(), CoreError> {
    let bets = [
        (3, "GHI11223", "3", "Maria Vendedora", GameType::Dezena, "89", dec!(2)),
        (2, "DEF67890", "2", "João Vendedor", GameType::Centena, "567", dec!(5)),
        (1, "ABC12345", "2", "João Vendedor", GameType::Milhar, "1234", dec!(10)),
    ];
    let now = ledger.clock().now();
    for (id, code, seller_id, seller_name, game_type, number, amount) in bets {
        ledger.add_fixed_bet(Bet {
            id: BetId::from(Uuid::from_u128(id)),
            seller_id: UserId::from(seller_id),
            seller_name: seller_name.into(),
            game_type,
            number: number.into(),
            amount,
            placed_at: now,
            status: BetStatus::Active,
            receipt_code: code.parse()?,
        })?;
    }
    debug!(count = ledger.len(), "demo bets seeded");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn seeds_three_active_bets_newest_first() {
        let mut ledger = BetLedger::default();
        seed_demo_bets(&mut ledger).unwrap();

        let numbers: Vec<_> = ledger.bets().map(|b| b.number.as_str()).collect();
        assert_eq!(numbers, vec!["1234", "567", "89"]);
        assert!(ledger.bets().all(|b| b.is_active()));
        assert_eq!(ledger.todays_total(Some(&UserId::from("2"))), dec!(15));
        assert_eq!(ledger.todays_total(None), Decimal::from(17));

        let codes: Vec<_> = ledger.bets().map(|b| b.receipt_code.to_string()).collect();
        assert_eq!(codes, ["ABC12345", "DEF67890", "GHI11223"]);
    }

    #[test]
    fn seeds_are_identical_across_ledgers() {
        let (mut a, mut b) = (BetLedger::default(), BetLedger::default());
        seed_demo_bets(&mut a).unwrap();
        seed_demo_bets(&mut b).unwrap();

        let ids = |l: &BetLedger| {
            l.bets()
                .map(|b| (b.id, b.receipt_code.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
        let first = "ABC12345".parse().unwrap();
        assert_eq!(a.find_by_receipt(&first).unwrap().number, "1234");
    }

    #[test]
    fn seeding_twice_is_rejected() {
        let mut ledger = BetLedger::default();
        seed_demo_bets(&mut ledger).unwrap();
        assert!(seed_demo_bets(&mut ledger).is_err());
        assert_eq!(ledger.len(), 3);
    }
}
