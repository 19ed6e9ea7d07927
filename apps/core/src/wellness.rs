//! Wellness progress and mood chart values derived from the mood history.

use serde::{Deserialize, Serialize};

use crate::models::{Mood, MoodRecord};

/// Number of most recent records the score is computed over.
const WINDOW: usize = 5;
const NEUTRAL_SCORE: u32 = 50;

/// Summary of recent mood history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessProgress {
    /// 0..=100
    pub score: u32,
    /// Direction of change, expressed as a mood.
    pub trend: Mood,
    pub message: String,
}

pub fn mood_score(mood: Mood) -> u32 {
    match mood {
        Mood::Happy => 100,
        Mood::Calm => 80,
        Mood::Neutral | Mood::Unknown => 50,
        Mood::Anxious => 30,
        Mood::Stressed => 20,
        Mood::Sad => 10,
        Mood::Angry => 0,
    }
}

fn average(scores: &[u32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
}

fn trend_of(scores: &[u32]) -> Mood {
    if scores.len() < 3 {
        return Mood::Neutral;
    }
    let first = average(&scores[..2]);
    let last = average(&scores[scores.len() - 2..]);
    let delta = last - first;

    if delta > 15.0 {
        Mood::Happy
    } else if delta > 5.0 {
        Mood::Calm
    } else if delta < -15.0 {
        Mood::Sad
    } else if delta < -5.0 {
        Mood::Anxious
    } else {
        Mood::Neutral
    }
}

fn message_for(score: u32, record_count: usize) -> &'static str {
    if record_count < 3 {
        return "Keep checking in to track your wellness journey.";
    }
    match score {
        80.. => "You've been feeling great lately! Keep up the positive momentum.",
        60..=79 => "You're doing well! Your mood has been generally positive.",
        40..=59 => "Your mood has been balanced lately. Remember to practice self-care.",
        20..=39 => "You've been facing some challenges. Consider trying a mindful activity.",
        _ => "You've been going through a tough time. Remember that it's okay to seek support.",
    }
}

/// Progress over the most recent records. `history` is oldest first.
pub fn wellness_progress(history: &[MoodRecord]) -> WellnessProgress {
    let count = history.len();
    if count < 2 {
        return WellnessProgress {
            score: NEUTRAL_SCORE,
            trend: Mood::Neutral,
            message: message_for(NEUTRAL_SCORE, count).to_string(),
        };
    }

    let recent: Vec<u32> = history[count.saturating_sub(WINDOW)..]
        .iter()
        .map(|r| mood_score(r.mood))
        .collect();
    let score = average(&recent).round() as u32;

    WellnessProgress {
        score,
        trend: trend_of(&recent),
        message: message_for(score, count).to_string(),
    }
}

/// Numeric value plotted on the mood chart.
pub fn chart_value(mood: Mood) -> u8 {
    match mood {
        Mood::Happy => 4,
        Mood::Neutral => 3,
        Mood::Sad => 2,
        Mood::Angry => 1,
        _ => 0,
    }
}

/// Inverse of [`chart_value`], rounding to the nearest point.
pub fn mood_from_chart_value(value: f64) -> Mood {
    match value.round() as i64 {
        4 => Mood::Happy,
        3 => Mood::Neutral,
        2 => Mood::Sad,
        1 => Mood::Angry,
        _ => Mood::Unknown,
    }
}
