use std::collections::HashMap;
use std::sync::Mutex;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Server-side session storage, keyed by the opaque cookie token. Kept
/// behind a trait so the in-memory map can be swapped for a shared store
/// without touching the handlers.
pub trait SessionStore: Send + Sync {
    fn put(&self, token: String, user_id: i64);
    fn get(&self, token: &str) -> Option<i64>;
    fn delete(&self, token: &str);
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, i64>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, i64>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn put(&self, token: String, user_id: i64) {
        self.lock().insert(token, user_id);
    }

    fn get(&self, token: &str) -> Option<i64> {
        self.lock().get(token).copied()
    }

    fn delete(&self, token: &str) {
        self.lock().remove(token);
    }
}

pub fn new_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete_round_trip() {
        let store = InMemorySessionStore::new();
        store.put("abc".to_string(), 7);
        assert_eq!(store.get("abc"), Some(7));
        store.delete("abc");
        assert_eq!(store.get("abc"), None);
    }

    #[test]
    fn tokens_are_long_and_distinct() {
        let a = new_token();
        let b = new_token();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
