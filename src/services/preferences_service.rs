//! Per-client preferences: recent searches and colour theme, kept in an
//! injectable key-value store.

use log::warn;
use mongodb::{bson::doc, Client, Collection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::models::preferences::Theme;

pub const MAX_RECENT_SEARCHES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceError {
    InvalidClient(String),
    Storage(String),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::InvalidClient(id) => write!(f, "Invalid client id: {}", id),
            PreferenceError::Storage(err) => write!(f, "Preference storage error: {}", err),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl From<mongodb::error::Error> for PreferenceError {
    fn from(err: mongodb::error::Error) -> Self {
        PreferenceError::Storage(err.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PreferenceError::Storage("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PreferenceError::Storage("lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    #[serde(rename = "_id")]
    key: String,
    value: String,
}

pub struct MongoKeyValueStore {
    collection: Collection<Entry>,
}

impl MongoKeyValueStore {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }
}

impl KeyValueStore for MongoKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let entry = self.collection.find_one(doc! { "_id": key }).await?;
        Ok(entry.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.collection
            .update_one(doc! { "_id": key }, doc! { "$set": { "value": value } })
            .upsert(true)
            .await?;
        Ok(())
    }
}

pub enum KeyValueBackend {
    Mongo(MongoKeyValueStore),
    Memory(MemoryKeyValueStore),
}

impl KeyValueStore for KeyValueBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match self {
            KeyValueBackend::Mongo(store) => store.get(key).await,
            KeyValueBackend::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match self {
            KeyValueBackend::Mongo(store) => store.set(key, value).await,
            KeyValueBackend::Memory(store) => store.set(key, value).await,
        }
    }
}

fn client_key(client_id: &str, name: &str) -> Result<String, PreferenceError> {
    let valid = !client_id.is_empty()
        && client_id.len() <= 64
        && client_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(PreferenceError::InvalidClient(client_id.to_string()));
    }
    Ok(format!("{}:{}", client_id, name))
}

pub struct PreferenceStore<K> {
    store: K,
}

impl<K: KeyValueStore> PreferenceStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub async fn recent_searches(&self, client_id: &str) -> Result<Vec<String>, PreferenceError> {
        let key = client_key(client_id, "recent_searches")?;
        let stored = match self.store.get(&key).await? {
            Some(stored) => stored,
            None => return Ok(Vec::new()),
        };
        match serde_json::from_str::<Vec<String>>(&stored) {
            Ok(searches) => Ok(searches),
            Err(e) => {
                warn!("Discarding unreadable recent searches for {}: {}", client_id, e);
                Ok(Vec::new())
            }
        }
    }

    /// Moves `term` to the front of the client's recent searches, keeping at most five.
    pub async fn record_search(
        &self,
        client_id: &str,
        term: &str,
    ) -> Result<Vec<String>, PreferenceError> {
        let term = term.trim();
        let mut searches = self.recent_searches(client_id).await?;
        if term.is_empty() {
            return Ok(searches);
        }

        searches.retain(|existing| existing != term);
        searches.insert(0, term.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);

        let encoded = serde_json::to_string(&searches)
            .map_err(|e| PreferenceError::Storage(e.to_string()))?;
        self.store
            .set(&client_key(client_id, "recent_searches")?, &encoded)
            .await?;
        Ok(searches)
    }

    pub async fn theme(&self, client_id: &str) -> Result<Theme, PreferenceError> {
        let key = client_key(client_id, "theme")?;
        let stored = self.store.get(&key).await?;
        Ok(stored
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default())
    }

    pub async fn set_theme(&self, client_id: &str, theme: Theme) -> Result<Theme, PreferenceError> {
        let key = client_key(client_id, "theme")?;
        self.store.set(&key, theme.as_str()).await?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PreferenceStore<MemoryKeyValueStore> {
        PreferenceStore::new(MemoryKeyValueStore::default())
    }

    #[actix_rt::test]
    async fn test_recent_searches_dedupe_and_cap() {
        let prefs = store();
        for term in ["OMR", "BKC", "Guindy", "OMR", "Pune Camp", "Salt Lake", "Velachery"] {
            prefs.record_search("c1", term).await.unwrap();
        }
        let searches = prefs.recent_searches("c1").await.unwrap();
        assert_eq!(
            searches,
            vec!["Velachery", "Salt Lake", "Pune Camp", "OMR", "Guindy"]
        );
        assert!(prefs.recent_searches("c2").await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_blank_search_is_ignored() {
        let prefs = store();
        prefs.record_search("c1", "OMR").await.unwrap();
        let searches = prefs.record_search("c1", "  ").await.unwrap();
        assert_eq!(searches, vec!["OMR"]);
    }

    #[actix_rt::test]
    async fn test_unreadable_searches_reset() {
        let prefs = store();
        prefs.store.set("c1:recent_searches", "not json").await.unwrap();
        assert!(prefs.recent_searches("c1").await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_theme_defaults_to_light() {
        let prefs = store();
        assert_eq!(prefs.theme("c1").await.unwrap(), Theme::Light);
        prefs.set_theme("c1", Theme::Dark).await.unwrap();
        assert_eq!(prefs.theme("c1").await.unwrap(), Theme::Dark);

        prefs.store.set("c2:theme", "sepia").await.unwrap();
        assert_eq!(prefs.theme("c2").await.unwrap(), Theme::Light);
    }

    #[actix_rt::test]
    async fn test_client_id_is_checked() {
        let prefs = store();
        assert!(matches!(
            prefs.theme("bad id").await,
            Err(PreferenceError::InvalidClient(_))
        ));
        assert!(prefs.recent_searches("").await.is_err());
    }
}
