//! Storage Tests
//!
//! Key/value backends and the typed wellness repository.

use crate::models::{Mood, MoodRecord, RecommendationKind, Tip};
use crate::storage::{keys, KeyValueStore, MemoryStore, SqliteStore, WellnessRepository};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use uuid::Uuid;

/// SQLite store in a temporary directory. Keep the `TempDir` alive for the test.
async fn create_sqlite_store() -> (SqliteStore, TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SqliteStore::open(dir.path())
        .await
        .expect("Failed to open store");
    (store, dir)
}

fn memory_repo() -> (WellnessRepository, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (WellnessRepository::new(store.clone()), store)
}

fn tip(text: &str, minutes_ago: i64) -> Tip {
    Tip {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        timestamp: Utc::now() - chrono::Duration::minutes(minutes_ago),
        likes: 0,
        liked_by: vec![],
        location: None,
    }
}

#[cfg(test)]
mod backend_tests {
    use super::*;

    async fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.put("a", "1".to_string()).await.unwrap();
        store.put("a", "2".to_string()).await.unwrap();
        store.put("b", "3".to_string()).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));

        store.remove("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.clear().await.unwrap();
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_store_operations() {
        let (store, _dir) = create_sqlite_store().await;
        exercise(&store).await;
    }

    #[tokio::test]
    async fn test_memory_store_operations() {
        exercise(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_across_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = SqliteStore::open(dir.path()).await.unwrap();
            store.put("k", "v".to_string()).await.unwrap();
            store.pool().close().await;
        }
        let reopened = SqliteStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
    }
}

#[cfg(test)]
mod mood_history_tests {
    use super::*;

    #[tokio::test]
    async fn test_history_round_trip_preserves_order_and_timestamps() {
        let (store, _dir) = create_sqlite_store().await;
        let repo = WellnessRepository::new(Arc::new(store));

        let records = vec![
            MoodRecord {
                mood: Mood::Sad,
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            },
            MoodRecord {
                mood: Mood::Calm,
                timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 18, 5, 12).unwrap(),
            },
            MoodRecord::now(Mood::Happy),
        ];
        for record in &records {
            repo.append_mood(record.clone()).await.unwrap();
        }

        let loaded = repo.mood_history().await.unwrap();
        assert_eq!(loaded.items, records);
        assert_eq!(loaded.dropped, 0);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let (repo, _) = memory_repo();
        repo.append_mood(MoodRecord::now(Mood::Angry)).await.unwrap();

        repo.clear_mood_history().await.unwrap();

        assert!(repo.mood_history().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_records_are_dropped_and_counted() {
        let (repo, store) = memory_repo();
        store
            .put(
                keys::MOOD_HISTORY,
                r#"[
                    {"mood": "happy", "timestamp": "2024-03-01T10:00:00Z"},
                    {"mood": "happy"},
                    {"mood": "ecstatic", "timestamp": "2024-03-01T11:00:00Z"},
                    {"timestamp": "not a date", "mood": "sad"}
                ]"#
                .to_string(),
            )
            .await
            .unwrap();

        let loaded = repo.mood_history().await.unwrap();

        assert_eq!(loaded.dropped, 2);
        assert_eq!(loaded.items.len(), 2);
        assert_eq!(loaded.items[1].mood, Mood::Unknown);
    }

    #[tokio::test]
    async fn test_corrupted_blob_reads_as_empty() {
        let (repo, store) = memory_repo();
        store
            .put(keys::MOOD_HISTORY, "{not json".to_string())
            .await
            .unwrap();

        let loaded = repo.mood_history().await.unwrap();
        assert!(loaded.items.is_empty());

        // The next append starts a fresh history
        repo.append_mood(MoodRecord::now(Mood::Calm)).await.unwrap();
        assert_eq!(repo.mood_history().await.unwrap().items.len(), 1);
    }
}

#[cfg(test)]
mod journal_tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_add_and_delete_entry() {
        let (repo, _) = memory_repo();

        let entry = repo
            .add_journal_entry("  Walked by the river  ", Mood::Calm)
            .await
            .unwrap();
        assert_eq!(entry.text, "Walked by the river");
        assert_eq!(entry.mood, Mood::Calm);

        let entries = repo.journal_entries().await.unwrap().items;
        assert_eq!(entries, vec![entry.clone()]);

        assert!(repo.delete_journal_entry(entry.id).await.unwrap());
        assert!(!repo.delete_journal_entry(entry.id).await.unwrap());
        assert!(repo.journal_entries().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_blank_entry_is_rejected() {
        let (repo, _) = memory_repo();
        let result = repo.add_journal_entry("   ", Mood::Sad).await;

        if let Err(AppError::Validation(msg)) = result {
            assert!(msg.contains("empty"));
        } else {
            panic!("Expected AppError::Validation, got something else.");
        }
        assert!(repo.journal_entries().await.unwrap().items.is_empty());
    }
}

#[cfg(test)]
mod tip_tests {
    use super::*;

    #[tokio::test]
    async fn test_tips_are_listed_newest_first() {
        let (repo, _) = memory_repo();
        repo.add_tip(tip("older", 30)).await.unwrap();
        repo.add_tip(tip("newest", 0)).await.unwrap();
        repo.add_tip(tip("middle", 10)).await.unwrap();

        let texts: Vec<String> = repo
            .tips()
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["newest", "middle", "older"]);
    }

    #[tokio::test]
    async fn test_toggle_like_adds_then_removes() {
        let (repo, _) = memory_repo();
        let shared = repo.add_tip(tip("Drink water", 0)).await.unwrap();

        let liked = repo.toggle_like(&shared.id, "user-a").await.unwrap().unwrap();
        assert_eq!(liked.likes, 1);
        assert_eq!(liked.liked_by, vec!["user-a".to_string()]);

        let other = repo.toggle_like(&shared.id, "user-b").await.unwrap().unwrap();
        assert_eq!(other.likes, 2);

        let unliked = repo.toggle_like(&shared.id, "user-a").await.unwrap().unwrap();
        assert_eq!(unliked.likes, 1);
        assert_eq!(unliked.liked_by, vec!["user-b".to_string()]);
    }

    #[tokio::test]
    async fn test_toggle_like_unknown_tip() {
        let (repo, _) = memory_repo();
        assert!(repo
            .toggle_like(&Uuid::new_v4().to_string(), "user-a")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_legacy_tips_survive_a_new_share() {
        let (repo, store) = memory_repo();
        let legacy = r#"[
            {
                "id": "tip-1700000000000",
                "text": "Call a friend",
                "timestamp": "2023-11-14T22:13:20.000Z",
                "likes": 0,
                "likedBy": []
            },
            {
                "id": "8f14e45f-ceea-467a-9af2-3b1c2d6e7f80",
                "text": "Sleep early",
                "timestamp": "2023-11-15T08:00:00.000Z",
                "likes": 2
            }
        ]"#;
        store.put(keys::TIPS, legacy.to_string()).await.unwrap();

        repo.add_tip(tip("Drink water", 0)).await.unwrap();

        let loaded = repo.tips().await.unwrap();
        assert_eq!(loaded.dropped, 0);
        let ids: Vec<&str> = loaded.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&"tip-1700000000000"));
        assert!(ids.contains(&"8f14e45f-ceea-467a-9af2-3b1c2d6e7f80"));
        assert_eq!(loaded.items[2].text, "Call a friend");
    }

    #[tokio::test]
    async fn test_like_on_tip_without_liked_by() {
        let (repo, store) = memory_repo();
        let legacy = r#"[{
            "id": "tip-42",
            "text": "Stretch",
            "timestamp": "2024-01-01T09:00:00Z",
            "likes": 2
        }]"#;
        store.put(keys::TIPS, legacy.to_string()).await.unwrap();

        let liked = repo.toggle_like("tip-42", "user-a").await.unwrap().unwrap();
        assert_eq!(liked.likes, 3);
        assert_eq!(liked.liked_by, vec!["user-a".to_string()]);

        let unliked = repo.toggle_like("tip-42", "user-a").await.unwrap().unwrap();
        assert_eq!(unliked.likes, 2);
    }

    #[tokio::test]
    async fn test_tip_without_text_is_dropped() {
        let (repo, store) = memory_repo();
        let mut bad = tip("bad", 0);
        bad.text.clear();
        let good = tip("good", 1);
        store
            .put(keys::TIPS, serde_json::to_string(&vec![bad, good]).unwrap())
            .await
            .unwrap();

        let loaded = repo.tips().await.unwrap();
        assert_eq!(loaded.dropped, 1);
        assert_eq!(loaded.items[0].text, "good");
    }
}

#[cfg(test)]
mod identity_tests {
    use super::*;

    #[tokio::test]
    async fn test_user_id_is_created_once() {
        let (repo, store) = memory_repo();

        let first = repo.user_id().await.unwrap();
        let second = repo.user_id().await.unwrap();

        assert!(first.starts_with("user-"));
        assert_eq!(first, second);
        assert_eq!(
            store.get(keys::USER_ID).await.unwrap(),
            Some(format!("\"{}\"", first))
        );
    }

    #[tokio::test]
    async fn test_preferences_default_and_increment() {
        let (repo, store) = memory_repo();
        assert_eq!(repo.preferences(Mood::Sad).await.unwrap().music, 0);

        repo.record_interaction(Mood::Sad, RecommendationKind::Music)
            .await
            .unwrap();
        let prefs = repo
            .record_interaction(Mood::Sad, RecommendationKind::Music)
            .await
            .unwrap();
        repo.record_interaction(Mood::Happy, RecommendationKind::Book)
            .await
            .unwrap();

        assert_eq!(prefs.music, 2);
        assert_eq!(repo.preferences(Mood::Sad).await.unwrap().music, 2);
        assert_eq!(repo.preferences(Mood::Happy).await.unwrap().book, 1);

        let raw = store.get(keys::PREFERENCES).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["sad"]["music"], 2);
    }
}
