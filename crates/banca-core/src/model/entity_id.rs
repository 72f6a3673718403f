// ── Core identity types ──
//
// UserId and BetId are opaque string/UUID wrappers. Roster seeds use
// short numeric ids ("1", "2", ...); everything created at runtime gets
// a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ── UserId ──────────────────────────────────────────────────────────

/// Identifier of a roster user (admin or seller).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Fresh random identifier for a newly created user.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── BetId ───────────────────────────────────────────────────────────

/// Identifier of a bet, assigned by the ledger at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(Uuid);

impl BetId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for BetId {
    fn from(u: Uuid) -> Self {
        Self(u)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_id_keeps_legacy_numeric_form() {
        let id = UserId::from("2");
        assert_eq!(id.as_str(), "2");
        assert_eq!(id.to_string(), "2");
    }

    #[test]
    fn generated_user_ids_are_distinct() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn bet_id_parses_uuid() {
        let id: BetId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn bet_id_rejects_garbage() {
        assert!("ABC12345".parse::<BetId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&UserId::from("3")).unwrap();
        assert_eq!(json, "\"3\"");
    }
}
