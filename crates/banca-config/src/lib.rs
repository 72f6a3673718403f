//! Shared configuration for the banca tools.
//!
//! TOML file + `BANCA_*` environment, layered with figment, and
//! translation to `banca_core::ShopOptions`. The CLI adds flag-aware
//! wrappers on top.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveTime;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use banca_core::{GameSettings, GameTable, GameType, ShopOptions, TradingHours};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "BANCA_CONFIG";
/// Overrides the session store location.
pub const SESSION_FILE_ENV: &str = "BANCA_SESSION_FILE";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<banca_core::CoreError> for ConfigError {
    fn from(err: banca_core::CoreError) -> Self {
        Self::Validation {
            field: "shop rules".into(),
            reason: err.to_string(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Global output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub shop: ShopConfig,

    /// Per-game overrides keyed by game name (`milhar`, `centena`, `dezena`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub games: BTreeMap<String, GameOverride>,

    #[serde(default)]
    pub hours: HoursConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session store path. Defaults to `session.json` in the data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShopConfig {
    /// Start each process with the three sample bets.
    #[serde(default = "default_true")]
    pub seed_demo_bets: bool,

    /// Refuse bets outside `[hours]`.
    #[serde(default)]
    pub enforce_hours: bool,

    /// Commission rate (percent) for sellers no longer on the roster.
    #[serde(default = "default_commission_rate")]
    pub default_commission_rate: Decimal,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            seed_demo_bets: true,
            enforce_hours: false,
            default_commission_rate: default_commission_rate(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_commission_rate() -> Decimal {
    Decimal::TEN
}

/// Partial override of one game's built-in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
}

/// Trading window, as `HH:MM` local times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HoursConfig {
    #[serde(default = "default_opens_at")]
    pub opens_at: String,
    #[serde(default = "default_closes_at")]
    pub closes_at: String,
    #[serde(default = "default_pause_start")]
    pub pause_start: String,
    #[serde(default = "default_pause_end")]
    pub pause_end: String,
    #[serde(default)]
    pub pause_enabled: bool,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            opens_at: default_opens_at(),
            closes_at: default_closes_at(),
            pause_start: default_pause_start(),
            pause_end: default_pause_end(),
            pause_enabled: false,
        }
    }
}

fn default_opens_at() -> String {
    "08:00".into()
}
fn default_closes_at() -> String {
    "22:00".into()
}
fn default_pause_start() -> String {
    "12:00".into()
}
fn default_pause_end() -> String {
    "14:00".into()
}

// ── Translation to core types ───────────────────────────────────────

impl Config {
    /// Built-in game table with the `[games.*]` overrides applied.
    pub fn game_table(&self) -> Result<GameTable, ConfigError> {
        let mut table = GameTable::default();
        for (name, o) in &self.games {
            let game_type: GameType = name.parse().map_err(|_| ConfigError::Validation {
                field: format!("games.{name}"),
                reason: "expected 'milhar', 'centena' or 'dezena'".into(),
            })?;
            let base = table.get(game_type);
            table
                .set(GameSettings {
                    game_type,
                    min_amount: o.min_amount.unwrap_or(base.min_amount),
                    max_amount: o.max_amount.unwrap_or(base.max_amount),
                    multiplier: o.multiplier.unwrap_or(base.multiplier),
                })
                .map_err(|e| ConfigError::Validation {
                    field: format!("games.{name}"),
                    reason: e.to_string(),
                })?;
        }
        Ok(table)
    }

    pub fn trading_hours(&self) -> Result<TradingHours, ConfigError> {
        let h = &self.hours;
        let pause = if h.pause_enabled {
            Some((
                parse_time("hours.pause_start", &h.pause_start)?,
                parse_time("hours.pause_end", &h.pause_end)?,
            ))
        } else {
            None
        };
        let hours = TradingHours::new(
            parse_time("hours.opens_at", &h.opens_at)?,
            parse_time("hours.closes_at", &h.closes_at)?,
            pause,
        )?;
        Ok(hours)
    }

    pub fn shop_options(&self) -> Result<ShopOptions, ConfigError> {
        let rate = self.shop.default_commission_rate;
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Validation {
                field: "shop.default_commission_rate".into(),
                reason: format!("must be between 0 and 100, got {rate}"),
            });
        }
        Ok(ShopOptions {
            games: self.game_table()?,
            hours: self.trading_hours()?,
            enforce_hours: self.shop.enforce_hours,
            default_commission_rate: rate,
        })
    }
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("'{value}' is not an HH:MM time ({e})"),
    })
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("br", "banca", "banca")
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("banca");
    p
}

/// Resolve the config file path: `BANCA_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for mutable application data.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

impl Config {
    /// Where the durable session lives.
    pub fn session_file(&self) -> PathBuf {
        self.session
            .file
            .clone()
            .unwrap_or_else(|| data_dir().join("session.json"))
    }
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered provider: defaults, then the TOML file, then environment.
pub fn figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("BANCA_").split("__"))
        .merge(
            Env::raw()
                .only(&[SESSION_FILE_ENV])
                .map(|_| "session.file".into()),
        )
}

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let config: Config = figment().extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to [`config_path`]. Returns the
/// path written.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}
