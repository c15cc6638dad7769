// ============================================================================
// SESSION STORE - Token + display name persisted in key-value storage
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::models::session::Session;
use crate::utils::constants::{TOKEN_STORAGE_KEY, USER_NAME_STORAGE_KEY};
use crate::utils::storage::get_local_storage;

/// Durable string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Browser localStorage
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

impl KeyValueStore for LocalStorageBackend {
    // Raw values, not JSON: the keys hold bare strings
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        get_local_storage()
            .ok_or("localStorage is not available")?
            .set_item(key, value)
            .map_err(|_| format!("Error writing '{}' to localStorage", key))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        get_local_storage()
            .ok_or("localStorage is not available")?
            .remove_item(key)
            .map_err(|_| format!("Error removing '{}' from localStorage", key))
    }
}

/// In-memory storage, used in tests and when localStorage is unavailable
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Session context handed to components. Clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn local() -> Self {
        Self::new(Rc::new(LocalStorageBackend))
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::default()))
    }

    /// Persist token and display name together
    pub fn set_session(&self, token: &str, display_name: &str) {
        if let Err(e) = self.backend.set(TOKEN_STORAGE_KEY, token) {
            log::error!("❌ [SESSION] {}", e);
        }
        if let Err(e) = self.backend.set(USER_NAME_STORAGE_KEY, display_name) {
            log::error!("❌ [SESSION] {}", e);
        }
        log::info!("💾 [SESSION] Session stored for '{}'", display_name);
    }

    /// Remove both values. A failed removal is logged and the other key
    /// is still attempted.
    pub fn clear_session(&self) {
        let mut cleared = true;
        for key in [TOKEN_STORAGE_KEY, USER_NAME_STORAGE_KEY] {
            if let Err(e) = self.backend.remove(key) {
                log::error!("❌ [SESSION] {}", e);
                cleared = false;
            }
        }
        if cleared {
            log::info!("🗑️ [SESSION] Session cleared");
        }
    }

    /// Current session; absent when no (non-empty) token is stored
    pub fn get_session(&self) -> Option<Session> {
        let token = self.backend.get(TOKEN_STORAGE_KEY)?;
        if token.trim().is_empty() {
            return None;
        }
        let name = self.backend.get(USER_NAME_STORAGE_KEY).unwrap_or_default();
        Some(Session::new(token, name))
    }

    pub fn token(&self) -> Option<String> {
        self.get_session().map(|s| s.token)
    }

    pub fn display_name(&self) -> String {
        self.get_session()
            .map(|s| s.display_name_or_default().to_string())
            .unwrap_or_default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_session().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_until_set() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get_session(), None);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn set_then_get_then_clear() {
        let backend = MemoryStore::default();
        let store = SessionStore::new(Rc::new(backend.clone()));

        store.set_session("t1", "Ana");
        assert_eq!(store.get_session(), Some(Session::new("t1", "Ana")));
        assert_eq!(backend.get("token").as_deref(), Some("t1"));
        assert_eq!(backend.get("userName").as_deref(), Some("Ana"));

        store.clear_session();
        assert_eq!(store.get_session(), None);
        assert_eq!(backend.get("token"), None);
        assert_eq!(backend.get("userName"), None);
    }

    #[test]
    fn clones_share_backend() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set_session("t2", "Omar");
        assert_eq!(other.display_name(), "Omar");
        other.clear_session();
        assert!(!store.is_logged_in());
    }

    /// Storage that refuses to delete the token
    struct StuckToken(MemoryStore);

    impl KeyValueStore for StuckToken {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), String> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), String> {
            if key == TOKEN_STORAGE_KEY {
                return Err("quota".to_string());
            }
            self.0.remove(key)
        }
    }

    #[test]
    fn failed_removal_still_clears_the_other_key() {
        let memory = MemoryStore::default();
        let store = SessionStore::new(Rc::new(StuckToken(memory.clone())));
        store.set_session("t1", "Ana");

        store.clear_session();
        assert_eq!(memory.get("token").as_deref(), Some("t1"));
        assert_eq!(memory.get("userName"), None);
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let backend = MemoryStore::default();
        backend.set("token", "").unwrap();
        backend.set("userName", "Ana").unwrap();
        let store = SessionStore::new(Rc::new(backend));
        assert_eq!(store.get_session(), None);
    }
}
