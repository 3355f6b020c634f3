//! Session context. Remembers the logged-in user across restarts without a
//! server-side session.
//!
//! Constructed once in `main` and carried in `AppState`. Nothing else touches
//! the storage directly.

pub mod storage;

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::User;

pub use storage::{FileStorage, MemoryStorage, SessionError, SessionStorage};

pub const KEY_USER: &str = "user";
pub const KEY_TOKEN: &str = "token";
pub const KEY_USER_ID: &str = "userId";
pub const KEY_USER_NAME: &str = "userName";

/// Every key the session owns. Cleared together on logout.
pub const SESSION_KEYS: [&str; 4] = [KEY_USER, KEY_TOKEN, KEY_USER_ID, KEY_USER_NAME];

/// Marker stored under `token`. A flag, not a credential.
pub const TOKEN_SENTINEL: &str = "authenticated";

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Persists the user record and the authenticated marker.
    pub fn store_user(&self, user: &User) -> Result<(), SessionError> {
        let serialized = serde_json::to_string(user)?;
        self.storage.set(KEY_USER, &serialized)?;
        self.storage.set(KEY_USER_ID, &user.id.to_string())?;
        self.storage.set(KEY_USER_NAME, &user.name)?;
        self.storage.set(KEY_TOKEN, TOKEN_SENTINEL)?;
        info!("Session stored for user {}", user.id);
        Ok(())
    }

    /// Reads the stored user. A record that does not parse or lacks an id or
    /// name clears the whole session.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage.get(KEY_USER)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) if is_valid_user(&user) => Some(user),
            Ok(_) => {
                warn!("Stored user record is incomplete, clearing session");
                self.clear();
                None
            }
            Err(e) => {
                warn!("Stored user record is corrupt ({e}), clearing session");
                self.clear();
                None
            }
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.current_user().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        let has_token = self
            .storage
            .get(KEY_TOKEN)
            .is_some_and(|t| t == TOKEN_SENTINEL);
        has_token && self.current_user().is_some()
    }

    /// Removes every session key. Storage failures are logged and the
    /// remaining keys are still removed.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove session key '{key}': {e}");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }
}

fn is_valid_user(user: &User) -> bool {
    user.id > 0 && !user.name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 12,
            name: "Marina".to_string(),
            email: "marina@skillmatch.dev".to_string(),
            birth_date: None,
        }
    }

    #[test]
    fn test_store_user_writes_all_keys() {
        let session = Session::in_memory();
        session.store_user(&sample_user()).unwrap();
        for key in SESSION_KEYS {
            assert!(session.storage().get(key).is_some(), "missing key {key}");
        }
        assert_eq!(session.storage().get(KEY_USER_ID).as_deref(), Some("12"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_clear_removes_all_keys_and_deauthenticates() {
        let session = Session::in_memory();
        session.store_user(&sample_user()).unwrap();
        session.clear();
        for key in SESSION_KEYS {
            assert!(session.storage().get(key).is_none(), "key {key} survived");
        }
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_user_self_heals() {
        let session = Session::in_memory();
        session.store_user(&sample_user()).unwrap();
        session.storage().set(KEY_USER, "{not json").unwrap();

        assert!(session.current_user().is_none());
        assert!(session.storage().get(KEY_TOKEN).is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_user_without_name_is_invalid() {
        let session = Session::in_memory();
        session
            .storage()
            .set(KEY_USER, r#"{"idUsuario": 5, "nome": "  "}"#)
            .unwrap();
        session.storage().set(KEY_TOKEN, TOKEN_SENTINEL).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.storage().get(KEY_USER).is_none());
    }

    #[test]
    fn test_token_without_user_is_not_authenticated() {
        let session = Session::in_memory();
        session.storage().set(KEY_TOKEN, TOKEN_SENTINEL).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_wrong_token_value_is_not_authenticated() {
        let session = Session::in_memory();
        session.store_user(&sample_user()).unwrap();
        session.storage().set(KEY_TOKEN, "yes").unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), Some(12));
    }
}
