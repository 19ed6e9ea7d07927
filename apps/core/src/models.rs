use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Coarse emotional-state label driving all downstream content selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Neutral,
    Anxious,
    Stressed,
    Calm,
    /// Any label we do not recognise, including the state before the first message.
    #[default]
    #[serde(other)]
    Unknown,
}

impl Mood {
    /// Every mood, in declaration order.
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Stressed,
        Mood::Calm,
        Mood::Unknown,
    ];

    /// Returns the lower-case label used for persistence
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Stressed => "stressed",
            Mood::Calm => "calm",
            Mood::Unknown => "unknown",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😔",
            Mood::Angry => "😠",
            Mood::Anxious => "😰",
            Mood::Stressed => "😓",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
            Mood::Unknown => "❓",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = std::convert::Infallible;

    /// Unrecognised labels map to `Mood::Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mood = Mood::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Mood::Unknown);
        Ok(mood)
    }
}

/// A single entry of the mood history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
}

impl MoodRecord {
    pub fn now(mood: Mood) -> Self {
        Self {
            mood,
            timestamp: Utc::now(),
        }
    }
}

/// Kind of content suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Music,
    Movie,
    Book,
    Destination,
}

impl RecommendationKind {
    pub const ALL: [RecommendationKind; 4] = [
        RecommendationKind::Music,
        RecommendationKind::Movie,
        RecommendationKind::Book,
        RecommendationKind::Destination,
    ];
}

/// A single content suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Identifier in the music service's catalogue, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,
}

/// Everything the companion offers for one mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBundle {
    pub music: Recommendation,
    pub movie: Recommendation,
    pub book: Recommendation,
    pub destination: Recommendation,
    pub mindful_activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_support: Option<String>,
    pub meditation_script: String,
}

impl RecommendationBundle {
    pub fn get(&self, kind: RecommendationKind) -> &Recommendation {
        match kind {
            RecommendationKind::Music => &self.music,
            RecommendationKind::Movie => &self.movie,
            RecommendationKind::Book => &self.book,
            RecommendationKind::Destination => &self.destination,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Represents a single chat message. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Meditation script to narrate alongside a bot reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_up_questions: Vec<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            audio: None,
            follow_up_questions: Vec::new(),
        }
    }

    pub fn with_audio(mut self, script: impl Into<String>) -> Self {
        self.audio = Some(script.into());
        self
    }

    pub fn with_follow_ups(mut self, questions: Vec<String>) -> Self {
        self.follow_up_questions = questions;
        self
    }
}

/// A private journal entry, stamped with the mood at writing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct JournalEntry {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub text: String,
    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
}

/// Where a community tip was shared from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TipLocation {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A wellness tip shared with the community.
///
/// Ids are opaque strings: older clients wrote `tip-<millis>`, newer ones UUIDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub location: Option<TipLocation>,
}

/// How often the user opened each kind of recommendation for a mood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPreferences {
    pub music: u32,
    pub movie: u32,
    pub book: u32,
    pub destination: u32,
}

impl InteractionPreferences {
    pub fn increment(&mut self, kind: RecommendationKind) {
        let counter = match kind {
            RecommendationKind::Music => &mut self.music,
            RecommendationKind::Movie => &mut self.movie,
            RecommendationKind::Book => &mut self.book,
            RecommendationKind::Destination => &mut self.destination,
        };
        *counter = counter.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");
    }

    #[test]
    fn test_unrecognised_mood_is_unknown() {
        let mood: Mood = serde_json::from_str("\"elated\"").unwrap();
        assert_eq!(mood, Mood::Unknown);
        assert_eq!("ecstatic".parse::<Mood>().unwrap(), Mood::Unknown);
        assert_eq!(" Calm ".parse::<Mood>().unwrap(), Mood::Calm);
    }

    #[test]
    fn test_tip_uses_camel_case_fields() {
        let raw = r#"{
            "id": "7f1c6a64-3f0e-4a8e-9f44-0a3b8b8f0d11",
            "text": "Drink water",
            "timestamp": "2024-03-01T10:00:00.000Z",
            "likedBy": ["user-abc"],
            "likes": 1
        }"#;
        let tip: Tip = serde_json::from_str(raw).unwrap();
        assert_eq!(tip.liked_by, vec!["user-abc".to_string()]);
        assert!(tip.location.is_none());
        assert!(tip.validate().is_ok());
    }

    #[test]
    fn test_legacy_tip_shape_is_accepted() {
        let raw = r#"{
            "id": "tip-1700000000000",
            "text": "Take a short walk after lunch",
            "timestamp": "2023-11-14T22:13:20.000Z",
            "likes": null,
            "likedBy": null
        }"#;
        let tip: Tip = serde_json::from_str(raw).unwrap();
        assert_eq!(tip.id, "tip-1700000000000");
        assert_eq!(tip.likes, 0);
        assert!(tip.liked_by.is_empty());
        assert!(tip.validate().is_ok());
    }

    #[test]
    fn test_long_tip_text_is_valid() {
        let raw = format!(
            r#"{{"id": "tip-1", "text": "{}", "timestamp": "2024-03-01T10:00:00Z"}}"#,
            "breathe ".repeat(100)
        );
        let tip: Tip = serde_json::from_str(&raw).unwrap();
        assert!(tip.validate().is_ok());
    }

    #[test]
    fn test_tip_with_out_of_range_location_fails_validation() {
        let tip = Tip {
            id: Uuid::new_v4().to_string(),
            text: "Walk outside".to_string(),
            timestamp: Utc::now(),
            likes: 0,
            liked_by: vec![],
            location: Some(TipLocation {
                latitude: 123.0,
                longitude: 0.0,
                location_name: None,
            }),
        };
        assert!(tip.validate().is_err());
    }

    #[test]
    fn test_preferences_increment() {
        let mut prefs = InteractionPreferences::default();
        prefs.increment(RecommendationKind::Book);
        prefs.increment(RecommendationKind::Book);
        assert_eq!(prefs.book, 2);
        assert_eq!(prefs.music, 0);
    }
}
