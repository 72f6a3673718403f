//! Dashboard, financial summary, daily closings and seller statements.

use banca_core::{
    DailyClosing, DashboardStats, FinancialSummary, GameTotals, SellerStatement, SellerTotals,
};
use tabled::Tabled;

use crate::cli::{ReportArgs, ReportCommand};
use crate::error::CliError;
use crate::output;

use super::App;
use super::bets::BetRow;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClosingRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Bets")]
    bets: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Commission")]
    commission: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl From<&DailyClosing> for ClosingRow {
    fn from(c: &DailyClosing) -> Self {
        Self {
            date: c.date.format("%d/%m/%Y").to_string(),
            bets: c.bet_count,
            total: output::money(c.total_amount),
            commission: output::money(c.commission),
            net: output::money(c.net),
        }
    }
}

#[derive(Tabled)]
struct SellerTotalsRow {
    #[tabled(rename = "Seller")]
    seller: String,
    #[tabled(rename = "Bets")]
    bets: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Commission")]
    commission: String,
}

impl From<&SellerTotals> for SellerTotalsRow {
    fn from(s: &SellerTotals) -> Self {
        Self {
            seller: s.seller_name.clone(),
            bets: s.bet_count,
            total: output::money(s.total_amount),
            rate: output::percent(s.commission_rate),
            commission: output::money(s.commission),
        }
    }
}

#[derive(Tabled)]
struct GameTotalsRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Bets")]
    bets: usize,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&GameTotals> for GameTotalsRow {
    fn from(g: &GameTotals) -> Self {
        Self {
            game: g.game_type.label().into(),
            bets: g.bet_count,
            total: output::money(g.total_amount),
        }
    }
}

fn table_of<'a, T: 'a, R: Tabled + From<&'a T>>(items: &'a [T]) -> String {
    let rows: Vec<R> = items.iter().map(R::from).collect();
    output::render_table(&rows)
}

// ── Detail views ────────────────────────────────────────────────────

fn dashboard_detail(d: &DashboardStats, color: bool) -> String {
    let summary = output::detail(&[
        ("Date", d.date.format("%d/%m/%Y").to_string()),
        ("Bets today", d.bet_count.to_string()),
        ("Active", d.active_count.to_string()),
        ("Cancelled", d.cancelled_count.to_string()),
        ("Sellers", d.sellers_today.to_string()),
        ("Gross", output::bold(&output::money(d.gross), color)),
        ("Net", output::money(d.net)),
    ]);
    if d.recent.is_empty() {
        return summary;
    }
    let recent: Vec<BetRow> = d.recent.iter().map(|b| BetRow::new(b, color)).collect();
    format!(
        "{summary}\n\nRecent bets\n{}",
        output::render_table(&recent)
    )
}

fn summary_detail(s: &FinancialSummary, color: bool) -> String {
    let range = match s.from {
        Some(from) if from == s.to => from.format("%d/%m/%Y").to_string(),
        Some(from) => format!("{} to {}", from.format("%d/%m/%Y"), s.to.format("%d/%m/%Y")),
        None => format!("up to {}", s.to.format("%d/%m/%Y")),
    };
    let mut out = output::detail(&[
        ("Period", format!("{} ({range})", s.period)),
        ("Bets", s.bet_count.to_string()),
        (
            "Active",
            format!("{} / {}", s.active_count, output::money(s.total_amount)),
        ),
        (
            "Cancelled",
            format!("{} / {}", s.cancelled_count, output::money(s.cancelled_amount)),
        ),
        (
            "Paid",
            format!("{} / {}", s.paid_count, output::money(s.paid_amount)),
        ),
        ("Commission", output::money(s.commission)),
        ("Net", output::bold(&output::money(s.net), color)),
    ]);
    if !s.by_seller.is_empty() {
        out.push_str("\n\nBy seller\n");
        out.push_str(&table_of::<_, SellerTotalsRow>(&s.by_seller));
    }
    if !s.by_game.is_empty() {
        out.push_str("\n\nBy game\n");
        out.push_str(&table_of::<_, GameTotalsRow>(&s.by_game));
    }
    out
}

fn statement_detail(s: &SellerStatement, color: bool) -> String {
    let mut out = output::detail(&[
        ("Seller", output::bold(&s.seller_name, color)),
        ("Date", s.date.format("%d/%m/%Y").to_string()),
        ("Bets today", s.today_count.to_string()),
        ("Sold today", output::money(s.today_total)),
        ("Commission", output::percent(s.commission_rate)),
        ("Earned today", output::money(s.estimated_commission)),
        ("All-time bets", s.lifetime_count.to_string()),
    ]);
    if !s.closings.is_empty() {
        out.push_str("\n\nPrevious days\n");
        out.push_str(&table_of::<_, ClosingRow>(&s.closings));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ReportArgs, app: &App) -> Result<(), CliError> {
    let color = app.color;
    let out = match args.command {
        ReportCommand::Dashboard => {
            let stats = app.shop.dashboard()?;
            output::render_single(
                app.format,
                &stats,
                |d| dashboard_detail(d, color),
                |d| d.gross.to_string(),
            )
        }

        ReportCommand::Summary { period } => {
            let summary = app.shop.financial_summary(period.into())?;
            output::render_single(
                app.format,
                &summary,
                |s| summary_detail(s, color),
                |s| s.net.to_string(),
            )
        }

        ReportCommand::Closings { days } => {
            let closings = app.shop.daily_closings(days)?;
            output::render_list(
                app.format,
                &closings,
                |c| -> ClosingRow { c.into() },
                |c| c.date.to_string(),
            )
        }

        ReportCommand::Statement { seller } => {
            let statement = match seller {
                Some(key) => {
                    let id = app.shop.find_seller(&key)?.id.clone();
                    app.shop.seller_statement(&id)?
                }
                None => app.shop.my_statement()?,
            };
            output::render_single(
                app.format,
                &statement,
                |s| statement_detail(s, color),
                |s| s.estimated_commission.to_string(),
            )
        }
    };
    app.print(&out);
    Ok(())
}
