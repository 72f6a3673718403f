//! Bet command handlers.

use banca_core::{Bet, BetFilter, BetStatus, clock::local_date};
use rust_decimal::Decimal;
use tabled::Tabled;

use crate::cli::{BetsArgs, BetsCommand, BetsListArgs};
use crate::error::CliError;
use crate::output;

use super::{App, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct BetRow {
    #[tabled(rename = "Receipt")]
    receipt: String,
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Seller")]
    seller: String,
    #[tabled(rename = "Placed")]
    placed: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl BetRow {
    pub(super) fn new(b: &Bet, color: bool) -> Self {
        Self {
            receipt: b.receipt_code.to_string(),
            game: b.game_type.label().into(),
            number: b.number.clone(),
            amount: output::money(b.amount),
            seller: b.seller_name.clone(),
            placed: output::local_time(b.placed_at),
            status: output::paint_bet_status(b.status, color),
        }
    }
}

/// Receipt-style view of one bet.
fn receipt_detail(b: &Bet, multiplier: Decimal, color: bool) -> String {
    output::detail(&[
        ("Receipt", output::bold(b.receipt_code.as_str(), color)),
        ("Game", b.game_type.label().into()),
        ("Number", b.number.clone()),
        ("Amount", output::money(b.amount)),
        (
            "Prize",
            format!(
                "{} (x{})",
                output::money(b.potential_prize(multiplier)),
                multiplier.normalize()
            ),
        ),
        ("Seller", b.seller_name.clone()),
        ("Placed", output::local_time(b.placed_at)),
        ("Status", output::paint_bet_status(b.status, color)),
        ("Bet ID", b.id.to_string()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: BetsArgs, app: &mut App) -> Result<(), CliError> {
    match args.command {
        BetsCommand::Place {
            game,
            number,
            amount,
        } => {
            let amount = util::parse_amount("amount", &amount)?;
            let receipt = app.shop.place_bet(game.into(), &number, amount)?;
            let out = output::render_single(
                app.format,
                &receipt,
                |r| receipt_detail(&r.bet, r.multiplier, app.color),
                |r| r.bet.receipt_code.to_string(),
            );
            app.print(&out);
            Ok(())
        }

        BetsCommand::Cancel { bet } => {
            let bet_ref = util::parse_bet_ref(&bet)?;
            if !util::confirm(&format!("Cancel bet {bet_ref}?"), app.yes)? {
                return Ok(());
            }
            let updated = app.shop.cancel_bet(&bet_ref)?;
            app.note_change(&format!("Bet {} cancelled", updated.receipt_code));
            Ok(())
        }

        BetsCommand::Pay { bet } => {
            let bet_ref = util::parse_bet_ref(&bet)?;
            if !util::confirm(&format!("Mark bet {bet_ref} as paid?"), app.yes)? {
                return Ok(());
            }
            let updated = app.shop.pay_bet(&bet_ref)?;
            app.note_change(&format!(
                "Bet {} paid: {}",
                updated.receipt_code,
                output::money(
                    updated.potential_prize(app.shop.games().get(updated.game_type).multiplier)
                )
            ));
            Ok(())
        }

        BetsCommand::List(list) => list_bets(&list, app),

        BetsCommand::Show { bet } => {
            let bet_ref = util::parse_bet_ref(&bet)?;
            let found = app.shop.bet(&bet_ref)?;
            let multiplier = app.shop.games().get(found.game_type).multiplier;
            let out = output::render_single(
                app.format,
                &found,
                |b| receipt_detail(b, multiplier, app.color),
                |b| b.receipt_code.to_string(),
            );
            app.print(&out);
            Ok(())
        }
    }
}

fn list_bets(list: &BetsListArgs, app: &App) -> Result<(), CliError> {
    let seller_id = match list.seller.as_deref() {
        Some(key) => Some(app.shop.find_seller(key)?.id.clone()),
        None => None,
    };
    let filter = BetFilter {
        term: list.search.clone(),
        game_type: list.game.map(Into::into),
        status: list.status.map(Into::<BetStatus>::into),
        seller_id,
    };

    let today = app.shop.ledger().clock().today();
    let mut bets = app.shop.list_bets(&filter)?;
    if list.today {
        bets.retain(|b| local_date(b.placed_at) == today);
    }
    if let Some(limit) = list.limit {
        bets.truncate(limit);
    }

    let out = output::render_list(
        app.format,
        &bets,
        |b| BetRow::new(b, app.color),
        |b| b.receipt_code.to_string(),
    );
    app.print(&out);
    Ok(())
}
