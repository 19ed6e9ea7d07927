use super::{keys, KeyValueStore};
use crate::error::AppError;
use crate::models::{
    InteractionPreferences, JournalEntry, Mood, MoodRecord, RecommendationKind, Tip,
};
use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

const USER_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const USER_ID_SUFFIX_LEN: usize = 13;

/// A collection read back from the store, with the number of records that
/// failed to parse or validate.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub dropped: usize,
}

impl<T> Loaded<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            dropped: 0,
        }
    }
}

/// Records stored as JSON arrays.
trait StoredRecord: Serialize + DeserializeOwned {
    fn is_valid(&self) -> bool {
        true
    }
}

impl StoredRecord for MoodRecord {}

impl StoredRecord for JournalEntry {
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl StoredRecord for Tip {
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

type PreferenceMap = HashMap<Mood, InteractionPreferences>;

/// `user-` followed by 13 random lower-case alphanumerics.
pub fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..USER_ID_SUFFIX_LEN)
        .map(|_| USER_ID_ALPHABET[rng.gen_range(0..USER_ID_ALPHABET.len())] as char)
        .collect();
    format!("user-{}", suffix)
}

/// Typed collections over a [`KeyValueStore`].
///
/// Every mutation reads the whole collection and writes it back; the write
/// lock keeps concurrent mutations from losing each other's updates.
#[derive(Clone)]
pub struct WellnessRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl WellnessRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load<T: StoredRecord>(&self, key: &str) -> Result<Loaded<T>, AppError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Loaded::empty());
        };

        let values = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(values)) => values,
            Ok(_) => {
                error!("Stored '{}' is not a list, treating as empty", key);
                return Ok(Loaded::empty());
            }
            Err(e) => {
                error!("Error loading '{}': {}", key, e);
                return Ok(Loaded::empty());
            }
        };

        let total = values.len();
        let items: Vec<T> = values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<T>(v).ok())
            .filter(|item| item.is_valid())
            .collect();

        let dropped = total - items.len();
        if dropped > 0 {
            warn!("Dropped {} invalid record(s) from '{}'", dropped, key);
        }
        Ok(Loaded { items, dropped })
    }

    async fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), AppError> {
        let json = serde_json::to_string(items)?;
        self.store.put(key, json).await
    }

    // --- Mood history ---

    pub async fn mood_history(&self) -> Result<Loaded<MoodRecord>, AppError> {
        self.load(keys::MOOD_HISTORY).await
    }

    #[instrument(skip(self))]
    pub async fn append_mood(&self, record: MoodRecord) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.mood_history().await?.items;
        history.push(record);
        self.save(keys::MOOD_HISTORY, &history).await
    }

    pub async fn clear_mood_history(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        info!("Clearing mood history");
        self.store.remove(keys::MOOD_HISTORY).await
    }

    // --- Journal ---

    pub async fn journal_entries(&self) -> Result<Loaded<JournalEntry>, AppError> {
        self.load(keys::JOURNAL).await
    }

    /// Adds an entry stamped with `mood`. Blank text is rejected.
    pub async fn add_journal_entry(
        &self,
        text: &str,
        mood: Mood,
    ) -> Result<JournalEntry, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(
                "Journal entry text cannot be empty".to_string(),
            ));
        }

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            text: text.to_string(),
            mood,
            timestamp: Utc::now(),
        };

        let _guard = self.write_lock.lock().await;
        let mut entries = self.journal_entries().await?.items;
        entries.push(entry.clone());
        self.save(keys::JOURNAL, &entries).await?;
        Ok(entry)
    }

    /// Returns whether an entry was removed.
    pub async fn delete_journal_entry(&self, id: Uuid) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.journal_entries().await?.items;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(keys::JOURNAL, &entries).await?;
        Ok(true)
    }

    // --- Tips ---

    /// Tips, newest first.
    pub async fn tips(&self) -> Result<Loaded<Tip>, AppError> {
        let mut loaded: Loaded<Tip> = self.load(keys::TIPS).await?;
        loaded.items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(loaded)
    }

    pub async fn add_tip(&self, tip: Tip) -> Result<Tip, AppError> {
        tip.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut tips = self.tips().await?.items;
        tips.insert(0, tip.clone());
        self.save(keys::TIPS, &tips).await?;
        Ok(tip)
    }

    /// Likes the tip for `user_id`, or removes the like if already present.
    /// Returns the updated tip, or `None` if no tip has that id.
    pub async fn toggle_like(
        &self,
        tip_id: &str,
        user_id: &str,
    ) -> Result<Option<Tip>, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut tips = self.tips().await?.items;

        let Some(tip) = tips.iter_mut().find(|t| t.id == tip_id) else {
            return Ok(None);
        };

        if let Some(pos) = tip.liked_by.iter().position(|u| u == user_id) {
            tip.liked_by.remove(pos);
            tip.likes = tip.likes.saturating_sub(1);
        } else {
            tip.liked_by.push(user_id.to_string());
            tip.likes += 1;
        }
        let updated = tip.clone();

        self.save(keys::TIPS, &tips).await?;
        Ok(Some(updated))
    }

    // --- Identity & preferences ---

    /// The anonymous user id, created on first use.
    pub async fn user_id(&self) -> Result<String, AppError> {
        let _guard = self.write_lock.lock().await;
        if let Some(raw) = self.store.get(keys::USER_ID).await? {
            match serde_json::from_str::<String>(&raw) {
                Ok(id) if !id.is_empty() => return Ok(id),
                _ => warn!("Stored user id is unreadable, generating a new one"),
            }
        }

        let id = generate_user_id();
        self.store
            .put(keys::USER_ID, serde_json::to_string(&id)?)
            .await?;
        info!("Created anonymous user id {}", id);
        Ok(id)
    }

    async fn preference_map(&self) -> Result<PreferenceMap, AppError> {
        let Some(raw) = self.store.get(keys::PREFERENCES).await? else {
            return Ok(PreferenceMap::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            error!("Error loading preferences: {}", e);
            PreferenceMap::new()
        }))
    }

    pub async fn preferences(&self, mood: Mood) -> Result<InteractionPreferences, AppError> {
        Ok(self
            .preference_map()
            .await?
            .get(&mood)
            .copied()
            .unwrap_or_default())
    }

    pub async fn record_interaction(
        &self,
        mood: Mood,
        kind: RecommendationKind,
    ) -> Result<InteractionPreferences, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.preference_map().await?;
        let prefs = map.entry(mood).or_default();
        prefs.increment(kind);
        let updated = *prefs;
        self.store
            .put(keys::PREFERENCES, serde_json::to_string(&map)?)
            .await?;
        Ok(updated)
    }
}
