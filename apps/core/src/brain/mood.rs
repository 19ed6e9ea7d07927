//! Mood classification.
//!
//! Ordered keyword rules (explicit self-report) take precedence; when none
//! matches, the lexical sentiment score decides.

use serde::{Deserialize, Serialize};

use super::sentiment::{SentimentAnalysis, SentimentAnalyzer};
use crate::models::Mood;

/// Score above which an unmatched text reads as happy.
const HAPPY_SCORE_THRESHOLD: i32 = 2;
/// Score below which an unmatched text reads as sad.
const SAD_SCORE_THRESHOLD: i32 = -2;
/// Comparative score below which an unmatched text with negative tokens reads as angry.
const ANGRY_COMPARATIVE_THRESHOLD: f32 = -1.0;

/// Keyword rule: any trigger contained in the lower-cased text selects `mood`.
struct MoodRule {
    mood: Mood,
    triggers: &'static [&'static str],
}

/// Evaluated top to bottom, first match wins.
const RULES: &[MoodRule] = &[
    MoodRule {
        mood: Mood::Anxious,
        triggers: &["anxious", "anxiety", "nervous", "worry", "worried", "panic"],
    },
    MoodRule {
        mood: Mood::Stressed,
        triggers: &["stress", "stressed", "overwhelm", "pressure", "burden"],
    },
    MoodRule {
        mood: Mood::Calm,
        triggers: &["calm", "peaceful", "relaxed", "tranquil", "serene"],
    },
    MoodRule {
        mood: Mood::Happy,
        triggers: &["happy", "joy", "great", "excited", "good"],
    },
    MoodRule {
        mood: Mood::Sad,
        triggers: &["sad", "depressed", "unhappy", "down", "blue"],
    },
    MoodRule {
        mood: Mood::Angry,
        triggers: &["angry", "mad", "frustrated", "annoyed", "upset"],
    },
];

/// How a mood was decided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MoodEvidence {
    /// A keyword rule matched
    Keyword { trigger: String },
    /// No keyword matched; the sentiment fallback decided
    Sentiment(SentimentAnalysis),
}

/// Result of mood classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReading {
    pub mood: Mood,
    pub evidence: MoodEvidence,
}

/// Keyword-first mood classifier with a sentiment fallback
#[derive(Debug, Default, Clone, Copy)]
pub struct MoodClassifier {
    sentiment: SentimentAnalyzer,
}

impl MoodClassifier {
    pub fn new() -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
        }
    }

    /// Classify the mood of a text. Never fails.
    pub fn classify(&self, text: &str) -> MoodReading {
        let lower = text.to_lowercase();

        for rule in RULES {
            if let Some(trigger) = rule.triggers.iter().find(|t| lower.contains(*t)) {
                return MoodReading {
                    mood: rule.mood,
                    evidence: MoodEvidence::Keyword {
                        trigger: (*trigger).to_string(),
                    },
                };
            }
        }

        let analysis = self.sentiment.analyze(text);
        let mood = Self::mood_from_sentiment(&analysis);
        MoodReading {
            mood,
            evidence: MoodEvidence::Sentiment(analysis),
        }
    }

    /// Shorthand for `classify(text).mood`.
    pub fn detect(&self, text: &str) -> Mood {
        self.classify(text).mood
    }

    fn mood_from_sentiment(analysis: &SentimentAnalysis) -> Mood {
        if analysis.score > HAPPY_SCORE_THRESHOLD {
            Mood::Happy
        } else if analysis.score < SAD_SCORE_THRESHOLD {
            Mood::Sad
        } else if analysis.comparative < ANGRY_COMPARATIVE_THRESHOLD
            && !analysis.negative.is_empty()
        {
            Mood::Angry
        } else {
            Mood::Neutral
        }
    }
}
