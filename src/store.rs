use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;

use crate::error::ApiError;
use crate::keys::generate_key;
use crate::models::Paste;

/// Give up on finding a free key after this many draws.
const MAX_KEY_ATTEMPTS: usize = 1000;

/// Process-wide map of paste key to paste.
#[derive(Clone)]
pub struct PasteStore {
    pastes: Arc<Mutex<HashMap<String, Paste>>>,
    id_length: usize,
}

impl PasteStore {
    pub fn new(id_length: usize) -> Self {
        PasteStore {
            pastes: Arc::default(),
            id_length,
        }
    }

    /// Store a paste and return its key.
    pub fn create(&self, text: String, source_address: Option<IpAddr>) -> crate::ApiResult<String> {
        self.create_at(text, source_address, Utc::now())
    }

    pub fn create_at(
        &self,
        text: String,
        source_address: Option<IpAddr>,
        now: DateTime<Utc>,
    ) -> crate::ApiResult<String> {
        let mut pastes = self.lock()?;

        let key = (0..MAX_KEY_ATTEMPTS)
            .map(|_| generate_key(&mut OsRng, self.id_length))
            .find(|key| {
                pastes
                    .get(key)
                    .map_or(true, |paste| !paste.is_accessible_at(&now))
            })
            .ok_or(ApiError::KeySpaceExhausted {
                attempts: MAX_KEY_ATTEMPTS,
            })?;

        // an expired paste under the same key is simply replaced
        pastes.insert(key.clone(), Paste::new(text, source_address, now));
        Ok(key)
    }

    /// Read a paste, marking it as read.
    pub fn view(&self, key: &str) -> crate::ApiResult<Paste> {
        self.view_at(key, Utc::now())
    }

    pub fn view_at(&self, key: &str, now: DateTime<Utc>) -> crate::ApiResult<Paste> {
        let mut pastes = self.lock()?;

        let paste = pastes.get_mut(key).ok_or(ApiError::NotFound)?;
        if !paste.is_accessible_at(&now) {
            pastes.remove(key);
            return Err(ApiError::NotFound);
        }

        paste.last_read = Some(now);
        Ok(paste.clone())
    }

    /// Drop every paste that can no longer be read, returning how many were dropped.
    pub fn purge_expired(&self) -> crate::ApiResult<usize> {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> crate::ApiResult<usize> {
        let mut pastes = self.lock()?;
        let before = pastes.len();
        pastes.retain(|_, paste| paste.is_accessible_at(&now));
        Ok(before - pastes.len())
    }

    pub fn len(&self) -> crate::ApiResult<usize> {
        Ok(self.lock()?.len())
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<Paste> {
        self.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> crate::ApiResult<MutexGuard<'_, HashMap<String, Paste>>> {
        self.pastes.lock().map_err(|_| ApiError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::paste_lifetime;

    fn tick() -> Duration {
        Duration::nanoseconds(1)
    }

    #[test]
    fn create_then_view_returns_text() {
        let store = PasteStore::new(8);
        let key = store.create("hello".into(), None).unwrap();
        assert_eq!(key.len(), 8);

        assert_eq!(store.view(&key).unwrap().text, "hello");
        assert!(store.get(&key).unwrap().last_read.is_some());
    }

    #[test]
    fn records_source_address() {
        let store = PasteStore::new(8);
        let addr: IpAddr = "192.0.2.1".parse().unwrap();
        let key = store.create("hello".into(), Some(addr)).unwrap();
        assert_eq!(store.get(&key).unwrap().source_address, Some(addr));
    }

    #[test]
    fn unknown_key_is_not_found() {
        let store = PasteStore::new(8);
        store.create("hello".into(), None).unwrap();
        assert!(matches!(store.view("doesnotexist"), Err(ApiError::NotFound)));
    }

    #[test]
    fn expiry_boundary() {
        let store = PasteStore::new(8);
        let created = Utc::now();
        let key = store.create_at("hello".into(), None, created).unwrap();
        let expires = store.get(&key).unwrap().expires_at;
        assert_eq!(expires, created + paste_lifetime());

        assert_eq!(store.view_at(&key, expires - tick()).unwrap().text, "hello");
        assert_eq!(store.view_at(&key, expires).unwrap().text, "hello");
        assert!(matches!(
            store.view_at(&key, expires + tick()),
            Err(ApiError::NotFound)
        ));
    }

    #[test]
    fn expired_paste_is_dropped_on_access() {
        let store = PasteStore::new(8);
        let created = Utc::now();
        let key = store.create_at("hello".into(), None, created).unwrap();

        let late = created + paste_lifetime() + tick();
        assert!(store.view_at(&key, late).is_err());
        assert!(store.get(&key).is_none());
        // stays gone even for a reader whose clock says it is still live
        assert!(matches!(store.view_at(&key, created), Err(ApiError::NotFound)));
    }

    #[test]
    fn repeated_views_track_latest_read() {
        let store = PasteStore::new(8);
        let created = Utc::now();
        let key = store.create_at("hello".into(), None, created).unwrap();

        let first = created + Duration::minutes(1);
        let second = created + Duration::hours(2);
        store.view_at(&key, first).unwrap();
        assert_eq!(store.get(&key).unwrap().last_read, Some(first));

        assert_eq!(store.view_at(&key, second).unwrap().text, "hello");
        let paste = store.get(&key).unwrap();
        assert_eq!(paste.last_read, Some(second));
        assert_eq!(paste.text, "hello");
    }

    #[test]
    fn purge_drops_only_expired() {
        let store = PasteStore::new(8);
        let old = Utc::now() - Duration::hours(30);
        let stale = store.create_at("old".into(), None, old).unwrap();
        let fresh = store.create("new".into(), None).unwrap();

        assert_eq!(store.purge_expired().unwrap(), 1);
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.get(&stale).is_none());
        assert_eq!(store.view(&fresh).unwrap().text, "new");
    }

    #[test]
    fn live_keys_are_never_reused() {
        // one-character keys leave only 36 slots
        let store = PasteStore::new(1);
        let now = Utc::now();
        for i in 0..36 {
            store.create_at(format!("paste {i}"), None, now).unwrap();
        }
        assert_eq!(store.len().unwrap(), 36);
        assert!(matches!(
            store.create_at("one too many".into(), None, now),
            Err(ApiError::KeySpaceExhausted { .. })
        ));
    }

    #[test]
    fn expired_keys_can_be_reused() {
        let store = PasteStore::new(1);
        let then = Utc::now() - Duration::hours(25);
        for i in 0..36 {
            store.create_at(format!("paste {i}"), None, then).unwrap();
        }

        let key = store.create("fresh".into(), None).unwrap();
        assert_eq!(store.len().unwrap(), 36);
        assert_eq!(store.view(&key).unwrap().text, "fresh");
    }
}
