//! Seller administration handlers.

use banca_core::{NewSeller, SellerUpdate, User};
use tabled::Tabled;

use crate::cli::{SellersArgs, SellersCommand};
use crate::error::CliError;
use crate::output;

use super::{App, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SellerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Commission")]
    commission: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl SellerRow {
    fn new(u: &User, color: bool) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            username: u.username.clone(),
            commission: output::percent(u.commission_rate),
            limit: u.bet_limit.map(output::money).unwrap_or_default(),
            status: output::paint_user_status(u.status, color),
            created: u.created_at.format("%d/%m/%Y").to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: SellersArgs, app: &mut App) -> Result<(), CliError> {
    match args.command {
        SellersCommand::List { search } => {
            let sellers = app.shop.sellers(search.as_deref().unwrap_or_default())?;
            let out = output::render_list(
                app.format,
                &sellers,
                |u| SellerRow::new(u, app.color),
                |u| u.username.clone(),
            );
            app.print(&out);
            Ok(())
        }

        SellersCommand::Create {
            name,
            username,
            password,
            commission,
            limit,
        } => {
            let seller = NewSeller {
                name,
                username,
                commission_rate: util::parse_amount("commission", &commission)?,
                bet_limit: util::parse_optional_amount("limit", limit.as_deref())?,
                password: util::password_or_prompt(password, "Seller password: ")?,
            };
            let user = app.shop.create_seller(seller)?;
            app.note_change(&format!("Seller {} created (id {})", user.username, user.id));
            Ok(())
        }

        SellersCommand::Edit {
            seller,
            name,
            username,
            reset_password,
            commission,
            limit,
        } => {
            let id = app.shop.find_seller(&seller)?.id.clone();
            let password = if reset_password {
                Some(util::password_or_prompt(None, "New password: ")?)
            } else {
                None
            };
            let update = SellerUpdate {
                name,
                username,
                password,
                commission_rate: util::parse_optional_amount("commission", commission.as_deref())?,
                bet_limit: util::parse_optional_amount("limit", limit.as_deref())?,
            };
            let user = app.shop.update_seller(&id, update)?;
            app.note_change(&format!("Seller {} updated", user.username));
            Ok(())
        }

        SellersCommand::Toggle { seller } => {
            let id = app.shop.find_seller(&seller)?.id.clone();
            let status = app.shop.toggle_seller(&id)?;
            app.note_change(&format!("Seller {seller} is now {status}"));
            Ok(())
        }

        SellersCommand::Remove { seller } => {
            let id = app.shop.find_seller(&seller)?.id.clone();
            if !util::confirm(
                &format!("Remove seller '{seller}'? Their bets are kept."),
                app.yes,
            )? {
                return Ok(());
            }
            let user = app.shop.remove_seller(&id)?;
            app.note_change(&format!("Seller {} removed", user.username));
            Ok(())
        }
    }
}
