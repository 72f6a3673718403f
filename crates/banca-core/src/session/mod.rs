// ── Identity session ──
//
// Holds the logged-in user (if any) and mirrors it into durable storage
// so the next process start can pick it up again.

mod roster;
mod storage;

pub use roster::{NewSeller, Roster, SellerUpdate};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::model::{Role, User};

/// Storage key for the serialized current user.
pub const SESSION_USER_KEY: &str = "session_user";
/// Storage key for the RFC 3339 login timestamp.
pub const SESSION_LOGIN_TIME_KEY: &str = "session_login_time";

/// The current authenticated user, backed by a [`SessionStorage`].
///
/// `NoSession --login--> Active(user) --logout--> NoSession`, plus
/// `NoSession --restore_session--> Active(user)` when storage holds a
/// readable user record.
pub struct IdentitySession<S: SessionStorage> {
    storage: S,
    current: Option<User>,
    login_time: Option<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl<S: SessionStorage> std::fmt::Debug for IdentitySession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySession")
            .field("user", &self.current.as_ref().map(|u| &u.username))
            .field("login_time", &self.login_time)
            .finish_non_exhaustive()
    }
}

impl<S: SessionStorage> IdentitySession<S> {
    pub fn new(storage: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            current: None,
            login_time: None,
            clock,
        }
    }

    /// Check credentials against `roster` and start a session.
    ///
    /// Unknown username, wrong password and blocked account all return
    /// [`CoreError::AuthenticationFailed`]. On success the user and login
    /// time are written to storage before the session becomes active. If
    /// either write fails, storage is left without a user record.
    pub fn login(
        &mut self,
        roster: &Roster,
        username: &str,
        password: &SecretString,
    ) -> Result<User, CoreError> {
        let Some(user) = roster.authenticate(username, password) else {
            info!(username, "login rejected");
            return Err(CoreError::AuthenticationFailed);
        };

        let now = self.clock.now();
        let record = serde_json::to_string(&user)?;
        self.storage.set(SESSION_USER_KEY, &record)?;
        if let Err(e) = self.storage.set(SESSION_LOGIN_TIME_KEY, &now.to_rfc3339()) {
            self.discard_stored_user();
            return Err(e);
        }

        info!(user_id = %user.id, username = %user.username, role = %user.role, "logged in");
        self.current = Some(user.clone());
        self.login_time = Some(now);
        Ok(user)
    }

    /// End the session and clear both storage entries.
    ///
    /// Storage failures are logged; the in-memory session is cleared
    /// regardless.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id, username = %user.username, "logged out");
        }
        self.login_time = None;
        for key in [SESSION_USER_KEY, SESSION_LOGIN_TIME_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "failed to clear session storage");
            }
        }
    }

    /// Pick up a session left in storage by an earlier process.
    ///
    /// The stored user is trusted as-is; it is not checked against the
    /// roster. A record that cannot be read is removed and the session
    /// stays empty.
    pub fn restore_session(&mut self) -> Option<User> {
        let raw = match self.storage.get(SESSION_USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored session");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "session storage unreadable, discarding");
                self.discard_stored_user();
                return None;
            }
        };

        let user: User = match serde_json::from_str(&raw) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "stored session is corrupted, discarding");
                self.discard_stored_user();
                return None;
            }
        };

        self.login_time = self
            .storage
            .get(SESSION_LOGIN_TIME_KEY)
            .ok()
            .flatten()
            .and_then(|t| DateTime::parse_from_rfc3339(&t).ok())
            .map(|t| t.with_timezone(&Utc));
        debug!(user_id = %user.id, username = %user.username, "session restored");
        self.current = Some(user.clone());
        Some(user)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn login_time(&self) -> Option<DateTime<Utc>> {
        self.login_time
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The current user, or [`CoreError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<&User, CoreError> {
        self.current.as_ref().ok_or(CoreError::NotAuthenticated)
    }

    /// The current user if it holds `role`.
    pub fn require_role(&self, role: Role, action: &str) -> Result<&User, CoreError> {
        let user = self.require_user()?;
        if user.role != role {
            return Err(CoreError::forbidden(action, &role.to_string()));
        }
        Ok(user)
    }

    fn discard_stored_user(&mut self) {
        if let Err(e) = self.storage.remove(SESSION_USER_KEY) {
            warn!(error = %e, "failed to discard stored session");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::UserId;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 15, 0, 0).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(ManualClock::new(start()))
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn roster() -> Roster {
        Roster::with_demo_users(start())
    }

    fn session() -> IdentitySession<MemoryStorage> {
        IdentitySession::new(MemoryStorage::new(), clock())
    }

    #[test]
    fn admin_login_succeeds() {
        let mut s = session();
        let user = s.login(&roster(), "admin", &secret("admin123")).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(s.is_admin());
        assert_eq!(s.login_time(), Some(start()));
    }

    #[test]
    fn wrong_password_fails_and_leaves_no_session() {
        let mut s = session();
        let err = s.login(&roster(), "admin", &secret("wrong")).unwrap_err();
        assert!(matches!(err, CoreError::AuthenticationFailed));
        assert!(!s.is_authenticated());
        assert_eq!(s.storage().get(SESSION_USER_KEY).unwrap(), None);
    }

    #[test]
    fn seller_login_carries_commission() {
        let mut s = session();
        let user = s.login(&roster(), "joao", &secret("123456")).unwrap();
        assert_eq!(user.role, Role::Seller);
        assert_eq!(user.commission_rate, dec!(10));
        assert!(!s.is_admin());
    }

    #[test]
    fn blocked_seller_cannot_login() {
        let mut s = session();
        for password in ["123456", "anything"] {
            assert!(matches!(
                s.login(&roster(), "pedro", &secret(password)),
                Err(CoreError::AuthenticationFailed)
            ));
        }
    }

    #[test]
    fn failures_are_indistinguishable() {
        let mut s = session();
        let unknown = s.login(&roster(), "ghost", &secret("x")).unwrap_err();
        let wrong = s.login(&roster(), "joao", &secret("x")).unwrap_err();
        let blocked = s.login(&roster(), "pedro", &secret("123456")).unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(wrong.to_string(), blocked.to_string());
    }

    #[test]
    fn restore_round_trips_user_field_for_field() {
        let mut first = session();
        let user = first.login(&roster(), "maria", &secret("123456")).unwrap();
        let storage = first.storage().clone();

        let mut second = IdentitySession::new(storage, clock());
        let restored = second.restore_session().unwrap();
        assert_eq!(restored, user);
        assert_eq!(second.current_user(), Some(&user));
        assert_eq!(second.login_time(), Some(start()));
    }

    #[test]
    fn stored_record_never_contains_password() {
        let mut s = session();
        s.login(&roster(), "admin", &secret("admin123")).unwrap();
        let raw = s.storage().get(SESSION_USER_KEY).unwrap().unwrap();
        assert!(!raw.contains("admin123"));
        assert!(!raw.contains("password"));
    }

    #[test]
    fn restore_with_empty_storage_is_none() {
        let mut s = session();
        assert_eq!(s.restore_session(), None);
        assert!(!s.is_authenticated());
    }

    #[test]
    fn corrupted_record_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage.set(SESSION_USER_KEY, "{not a user").unwrap();
        let mut s = IdentitySession::new(storage, clock());

        assert_eq!(s.restore_session(), None);
        assert_eq!(s.storage().get(SESSION_USER_KEY).unwrap(), None);
    }

    #[test]
    fn restore_does_not_consult_roster() {
        let mut first = session();
        first.login(&roster(), "joao", &secret("123456")).unwrap();

        // Blocking the seller afterwards does not end the stored session.
        let mut roster = roster();
        roster.toggle_status(&UserId::from("2")).unwrap();

        let mut second = IdentitySession::new(first.storage().clone(), clock());
        let restored = second.restore_session().unwrap();
        assert_eq!(restored.username, "joao");
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let mut s = session();
        s.login(&roster(), "admin", &secret("admin123")).unwrap();
        s.logout();

        assert!(!s.is_authenticated());
        assert_eq!(s.login_time(), None);
        assert_eq!(s.storage().get(SESSION_USER_KEY).unwrap(), None);
        assert_eq!(s.storage().get(SESSION_LOGIN_TIME_KEY).unwrap(), None);
        assert_eq!(s.restore_session(), None);
    }

    #[test]
    fn require_role_distinguishes_missing_and_wrong_role() {
        let mut s = session();
        assert!(matches!(
            s.require_role(Role::Admin, "cancel bet"),
            Err(CoreError::NotAuthenticated)
        ));
        s.login(&roster(), "joao", &secret("123456")).unwrap();
        assert!(matches!(
            s.require_role(Role::Admin, "cancel bet"),
            Err(CoreError::Forbidden { .. })
        ));
        assert_eq!(s.require_role(Role::Seller, "place bet").unwrap().username, "joao");
    }

    /// Memory storage that refuses writes to one key.
    #[derive(Default)]
    struct RefusingStorage {
        inner: MemoryStorage,
        refused: &'static str,
    }

    impl SessionStorage for RefusingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
            if key == self.refused {
                return Err(CoreError::Storage {
                    message: format!("{key} is read-only"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), CoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_login_time_write_leaves_no_stored_user() {
        let storage = RefusingStorage {
            refused: SESSION_LOGIN_TIME_KEY,
            ..Default::default()
        };
        let mut s = IdentitySession::new(storage, clock());

        let err = s.login(&roster(), "joao", &secret("123456")).unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
        assert!(!s.is_authenticated());
        assert_eq!(s.storage().get(SESSION_USER_KEY).unwrap(), None);

        let mut next = IdentitySession::new(s.storage, clock());
        assert_eq!(next.restore_session(), None);
    }

    #[test]
    fn file_backed_session_survives_new_process() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut first = IdentitySession::new(FileStorage::new(&path), clock());
        let user = first.login(&roster(), "joao", &secret("123456")).unwrap();

        let mut second = IdentitySession::new(FileStorage::new(&path), clock());
        assert_eq!(second.restore_session(), Some(user));
        second.logout();

        let mut third = IdentitySession::new(FileStorage::new(&path), clock());
        assert_eq!(third.restore_session(), None);
    }

    #[test]
    fn garbage_session_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "][").unwrap();

        let mut s = IdentitySession::new(FileStorage::new(&path), clock());
        assert_eq!(s.restore_session(), None);
        assert_eq!(s.storage().get(SESSION_USER_KEY).unwrap(), None);
    }
}
