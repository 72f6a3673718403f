// ── User roster ──
//
// The fixed set of users allowed to log in, plus the administrative
// operations on sellers. Credentials live here and nowhere else.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{Role, User, UserId, UserStatus};

struct RosterEntry {
    user: User,
    password: SecretString,
}

/// Fields for a seller created by an administrator.
#[derive(Debug)]
pub struct NewSeller {
    pub name: String,
    pub username: String,
    pub password: SecretString,
    pub commission_rate: Decimal,
    pub bet_limit: Option<Decimal>,
}

/// Partial edit of a seller. `None` leaves a field unchanged.
#[derive(Debug, Default)]
pub struct SellerUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub commission_rate: Option<Decimal>,
    pub bet_limit: Option<Decimal>,
}

/// Users in creation order, keyed by id.
#[derive(Default)]
pub struct Roster {
    entries: IndexMap<UserId, RosterEntry>,
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.values().map(|e| &e.user.username))
            .finish()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demonstration roster: one admin, two active sellers and one
    /// blocked seller.
    pub fn with_demo_users(created_at: DateTime<Utc>) -> Self {
        let mut roster = Self::new();
        let demo = [
            ("1", "Administrador", "admin", "admin123", Role::Admin, dec!(0), UserStatus::Active, None),
            ("2", "João Vendedor", "joao", "123456", Role::Seller, dec!(10), UserStatus::Active, Some(dec!(5000))),
            ("3", "Maria Vendedora", "maria", "123456", Role::Seller, dec!(12), UserStatus::Active, Some(dec!(8000))),
            ("4", "Pedro Santos", "pedro", "123456", Role::Seller, dec!(8), UserStatus::Blocked, Some(dec!(3000))),
        ];
        for (id, name, username, password, role, commission_rate, status, bet_limit) in demo {
            let user = User {
                id: UserId::from(id),
                name: name.into(),
                username: username.into(),
                role,
                commission_rate,
                status,
                bet_limit,
                created_at,
            };
            roster.entries.insert(
                user.id.clone(),
                RosterEntry {
                    user,
                    password: SecretString::from(password.to_owned()),
                },
            );
        }
        roster
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Return the user whose username and password match and whose
    /// account is active. Any mismatch yields `None`, indistinguishably.
    pub fn authenticate(&self, username: &str, password: &SecretString) -> Option<User> {
        self.entries
            .values()
            .find(|e| {
                e.user.username == username
                    && e.password.expose_secret() == password.expose_secret()
                    && e.user.is_active()
            })
            .map(|e| e.user.clone())
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.entries.get(id).map(|e| &e.user)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users().find(|u| u.username == username)
    }

    /// All users, in creation order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.entries.values().map(|e| &e.user)
    }

    pub fn sellers(&self) -> impl Iterator<Item = &User> + '_ {
        self.users().filter(|u| u.is_seller())
    }

    /// Sellers whose name or username contains `term`, ignoring case.
    pub fn search_sellers<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a User> + 'a {
        let needle = term.trim().to_lowercase();
        self.sellers().filter(move |u| {
            needle.is_empty()
                || u.name.to_lowercase().contains(&needle)
                || u.username.to_lowercase().contains(&needle)
        })
    }

    pub fn commission_rate(&self, id: &UserId) -> Option<Decimal> {
        self.get(id).map(|u| u.commission_rate)
    }

    // ── Seller administration ────────────────────────────────────────

    pub fn create_seller(
        &mut self,
        seller: NewSeller,
        created_at: DateTime<Utc>,
    ) -> Result<User, CoreError> {
        validate_name(&seller.name)?;
        validate_username(&seller.username)?;
        validate_password(&seller.password)?;
        validate_commission(seller.commission_rate)?;
        validate_limit(seller.bet_limit)?;
        self.ensure_username_free(&seller.username, None)?;

        let user = User {
            id: UserId::generate(),
            name: seller.name.trim().to_owned(),
            username: seller.username,
            role: Role::Seller,
            commission_rate: seller.commission_rate,
            status: UserStatus::Active,
            bet_limit: seller.bet_limit,
            created_at,
        };
        self.entries.insert(
            user.id.clone(),
            RosterEntry {
                user: user.clone(),
                password: seller.password,
            },
        );
        info!(seller_id = %user.id, username = %user.username, "seller created");
        Ok(user)
    }

    pub fn update_seller(&mut self, id: &UserId, update: SellerUpdate) -> Result<User, CoreError> {
        self.seller_entry(id)?;
        if let Some(ref name) = update.name {
            validate_name(name)?;
        }
        if let Some(ref username) = update.username {
            validate_username(username)?;
            self.ensure_username_free(username, Some(id))?;
        }
        if let Some(ref password) = update.password {
            validate_password(password)?;
        }
        if let Some(rate) = update.commission_rate {
            validate_commission(rate)?;
        }
        validate_limit(update.bet_limit)?;

        let entry = self.seller_entry_mut(id)?;
        if let Some(name) = update.name {
            entry.user.name = name.trim().to_owned();
        }
        if let Some(username) = update.username {
            entry.user.username = username;
        }
        if let Some(password) = update.password {
            entry.password = password;
        }
        if let Some(rate) = update.commission_rate {
            entry.user.commission_rate = rate;
        }
        if let Some(limit) = update.bet_limit {
            entry.user.bet_limit = Some(limit);
        }
        debug!(seller_id = %id, "seller updated");
        Ok(entry.user.clone())
    }

    /// Flip a seller between active and blocked. Returns the new status.
    pub fn toggle_status(&mut self, id: &UserId) -> Result<UserStatus, CoreError> {
        let entry = self.seller_entry_mut(id)?;
        entry.user.status = entry.user.status.toggled();
        info!(seller_id = %id, status = %entry.user.status, "seller status changed");
        Ok(entry.user.status)
    }

    /// Remove a seller. Bets keep their own copy of the seller's name.
    pub fn remove_seller(&mut self, id: &UserId) -> Result<User, CoreError> {
        self.seller_entry(id)?;
        let entry = self
            .entries
            .shift_remove(id)
            .ok_or_else(|| CoreError::SellerNotFound {
                identifier: id.to_string(),
            })?;
        info!(seller_id = %id, username = %entry.user.username, "seller removed");
        Ok(entry.user)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn seller_entry(&self, id: &UserId) -> Result<&RosterEntry, CoreError> {
        self.entries
            .get(id)
            .filter(|e| e.user.is_seller())
            .ok_or_else(|| CoreError::SellerNotFound {
                identifier: id.to_string(),
            })
    }

    fn seller_entry_mut(&mut self, id: &UserId) -> Result<&mut RosterEntry, CoreError> {
        self.entries
            .get_mut(id)
            .filter(|e| e.user.is_seller())
            .ok_or_else(|| CoreError::SellerNotFound {
                identifier: id.to_string(),
            })
    }

    fn ensure_username_free(&self, username: &str, except: Option<&UserId>) -> Result<(), CoreError> {
        let taken = self
            .users()
            .any(|u| u.username == username && Some(&u.id) != except);
        if taken {
            return Err(CoreError::UsernameTaken {
                username: username.into(),
            });
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("name cannot be empty"));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(CoreError::validation(
            "username must be non-empty and contain no spaces",
        ));
    }
    Ok(())
}

fn validate_password(password: &SecretString) -> Result<(), CoreError> {
    if password.expose_secret().is_empty() {
        return Err(CoreError::validation("password cannot be empty"));
    }
    Ok(())
}

fn validate_commission(rate: Decimal) -> Result<(), CoreError> {
    if rate < Decimal::ZERO || rate > dec!(100) {
        return Err(CoreError::validation(format!(
            "commission must be between 0 and 100, got {rate}"
        )));
    }
    Ok(())
}

fn validate_limit(limit: Option<Decimal>) -> Result<(), CoreError> {
    if limit.is_some_and(|l| l <= Decimal::ZERO) {
        return Err(CoreError::validation("bet limit must be positive"));
    }
    Ok(())
}
