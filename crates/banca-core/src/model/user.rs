// ── User domain types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::UserId;

/// Role of a roster user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Seller,
}

/// Account status. Blocked users cannot log in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserStatus {
    Active,
    Blocked,
}

impl UserStatus {
    /// The opposite status, used by the admin toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Blocked,
            Self::Blocked => Self::Active,
        }
    }
}

/// A roster user as seen by everything outside the roster.
///
/// Never carries the password: the roster keeps credentials separately,
/// so a `User` is always safe to serialize into session storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name, copied onto every bet the user places.
    pub name: String,
    /// Unique login handle.
    pub username: String,
    pub role: Role,
    /// Commission percentage (0–100). Meaningful only for sellers.
    pub commission_rate: Decimal,
    pub status: UserStatus,
    /// Exposure ceiling. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_limit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("seller".parse::<Role>().unwrap(), Role::Seller);
    }

    #[test]
    fn status_toggle_flips() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Blocked);
        assert_eq!(UserStatus::Blocked.toggled(), UserStatus::Active);
    }

    #[test]
    fn user_json_uses_lowercase_enums() {
        let user = User {
            id: UserId::from("9"),
            name: "Ana".into(),
            username: "ana".into(),
            role: Role::Seller,
            commission_rate: dec!(7.5),
            status: UserStatus::Blocked,
            bet_limit: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "seller");
        assert_eq!(json["status"], "blocked");
        assert!(json.get("bet_limit").is_none());
    }
}
