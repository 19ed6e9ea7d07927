//! Persistence.
//!
//! A single [`KeyValueStore`] interface holds JSON blobs under well-known
//! keys. [`SqliteStore`] backs the application, [`MemoryStore`] backs tests,
//! and [`WellnessRepository`] layers typed collection operations on top.

pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::MemoryStore;
pub use repository::{Loaded, WellnessRepository};
pub use sqlite::SqliteStore;

use crate::error::AppError;
use async_trait::async_trait;

/// Storage keys, shared with every client of the store.
pub mod keys {
    pub const MOOD_HISTORY: &str = "moodHistory";
    pub const TIPS: &str = "mindMosaicTips";
    pub const JOURNAL: &str = "journalEntries";
    pub const USER_ID: &str = "mindMosaicUserId";
    pub const PREFERENCES: &str = "userPreferences";
}

/// Defines the public interface for a string key/value store.
///
/// Values are opaque strings (JSON in practice). Writes replace the whole value.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn put(&self, key: &str, value: String) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;

    /// Removes every key.
    async fn clear(&self) -> Result<(), AppError>;
}
