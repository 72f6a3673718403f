//! Game limits, multipliers and trading hours.

use banca_core::{GameSettings, TradingHours};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GamesArgs, GamesCommand};
use crate::error::CliError;
use crate::output;

use super::{App, util};

#[derive(Tabled)]
struct GameRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Digits")]
    digits: usize,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Multiplier")]
    multiplier: String,
}

impl From<&GameSettings> for GameRow {
    fn from(s: &GameSettings) -> Self {
        Self {
            game: s.game_type.label().into(),
            digits: s.game_type.digits(),
            min: output::money(s.min_amount),
            max: output::money(s.max_amount),
            multiplier: format!("x{}", s.multiplier.normalize()),
        }
    }
}

#[derive(Serialize)]
struct GamesView {
    games: Vec<GameSettings>,
    hours: TradingHours,
    enforce_hours: bool,
    open_now: bool,
}

fn games_detail(view: &GamesView) -> String {
    let rows: Vec<GameRow> = view.games.iter().map(GameRow::from).collect();
    let state = match (view.enforce_hours, view.open_now) {
        (false, _) => "not enforced",
        (true, true) => "open now",
        (true, false) => "closed now",
    };
    format!(
        "{}\n{}",
        output::render_table(&rows),
        output::detail(&[("Hours", format!("{} ({state})", view.hours))])
    )
}

pub fn handle(args: GamesArgs, app: &mut App) -> Result<(), CliError> {
    match args.command {
        GamesCommand::Show => {
            let view = GamesView {
                games: app.shop.games().all(),
                hours: *app.shop.hours(),
                enforce_hours: app.shop.options().enforce_hours,
                open_now: app.shop.is_open_now(),
            };
            let out = output::render_single(app.format, &view, games_detail, |v| {
                v.games
                    .iter()
                    .map(|g| g.game_type.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            app.print(&out);
            Ok(())
        }

        GamesCommand::Set {
            game,
            min,
            max,
            multiplier,
        } => {
            let mut settings = app.shop.games().get(game.into());
            if let Some(min) = util::parse_optional_amount("min", min.as_deref())? {
                settings.min_amount = min;
            }
            if let Some(max) = util::parse_optional_amount("max", max.as_deref())? {
                settings.max_amount = max;
            }
            if let Some(m) = util::parse_optional_amount("multiplier", multiplier.as_deref())? {
                settings.multiplier = m;
            }
            let saved = app.shop.set_game(settings)?;
            app.note_change(&format!(
                "{}: {} to {}, pays x{}",
                saved.game_type.label(),
                output::money(saved.min_amount),
                output::money(saved.max_amount),
                saved.multiplier.normalize()
            ));
            Ok(())
        }
    }
}
