//! Lexical sentiment scoring.
//!
//! AFINN-165 valence table: each known word carries an integer score in
//! `-5..=5`, the text score is the sum, and the comparative score is that sum
//! divided by the number of tokens. A negator directly before a scored word
//! flips its sign.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// AFINN-165 word list, one `word<TAB>valence` pair per line.
const AFINN_165: &str = include_str!("AFINN-165.txt");

/// Words that flip the valence of the following token.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't",
    "isnt", "aren't", "arent", "wasn't", "wasnt", "can't", "cant", "cannot", "won't", "wont",
    "nor", "neither", "hardly",
];

static VALENCE_TABLE: LazyLock<HashMap<&'static str, i32>> = LazyLock::new(|| {
    AFINN_165
        .lines()
        .filter_map(|line| {
            let (word, valence) = line.split_once('\t')?;
            Some((word, valence.trim().parse().ok()?))
        })
        .collect()
});

static NEGATOR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATORS.iter().copied().collect());

// NOTE: expect() is acceptable here: the pattern is a literal and cannot fail at runtime.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.,/#!?$%^&*;:{}=_`"~()\[\]]"#).expect("Invalid regex: punctuation pattern")
});

/// Result of scoring a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// Sum of the valences of all scored tokens
    pub score: i32,
    /// `score` divided by the number of tokens (0.0 for empty input)
    pub comparative: f32,
    /// Tokens that contributed a negative valence
    pub negative: Vec<String>,
    /// Tokens that contributed a positive valence
    pub positive: Vec<String>,
    /// Number of tokens considered
    pub token_count: usize,
}

/// Scores text against the static valence table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        PUNCTUATION
            .replace_all(&lowered, " ")
            .split_whitespace()
            .map(|s| s.to_string())
            .collect()
    }

    /// Score a piece of text. Never fails.
    pub fn analyze(&self, text: &str) -> SentimentAnalysis {
        let tokens = Self::tokenize(text);

        let mut score = 0;
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = VALENCE_TABLE.get(token.as_str()) else {
                continue;
            };

            let negated = i > 0 && NEGATOR_SET.contains(tokens[i - 1].as_str());
            let valence = if negated { -valence } else { valence };

            if valence > 0 {
                positive.push(token.clone());
            } else if valence < 0 {
                negative.push(token.clone());
            }
            score += valence;
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            score as f32 / tokens.len() as f32
        };

        SentimentAnalysis {
            score,
            comparative,
            negative,
            positive,
            token_count: tokens.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text_scores_above_zero() {
        let result = SentimentAnalyzer::new().analyze("What a wonderful, excellent day!");
        assert_eq!(result.score, 7);
        assert_eq!(result.positive, vec!["wonderful", "excellent"]);
        assert!(result.negative.is_empty());
    }

    #[test]
    fn test_comparative_is_score_per_token() {
        let result = SentimentAnalyzer::new().analyze("terrible day");
        assert_eq!(result.token_count, 2);
        assert_eq!(result.score, -3);
        assert!((result.comparative - -1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_negation_flips_valence() {
        let result = SentimentAnalyzer::new().analyze("this is not bad");
        assert_eq!(result.score, 3);
        assert_eq!(result.positive, vec!["bad"]);
    }

    #[test]
    fn test_lexicon_covers_everyday_words() {
        let analyzer = SentimentAnalyzer::new();
        let cases = [
            ("heartbroken", -3),
            ("lonely", -2),
            ("grateful", 3),
            ("exhausted", -2),
            ("hopeless", -2),
            ("thrilled", 5),
            ("miserable", -3),
            ("cheerful", 2),
        ];
        for (word, expected) in cases {
            assert_eq!(analyzer.analyze(word).score, expected, "word: {}", word);
        }
    }

    #[test]
    fn test_lexicon_is_fully_loaded() {
        assert!(VALENCE_TABLE.len() > 3000);
        assert!(VALENCE_TABLE.values().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn test_empty_text() {
        let result = SentimentAnalyzer::new().analyze("   ");
        assert_eq!(result.score, 0);
        assert_eq!(result.comparative, 0.0);
        assert_eq!(result.token_count, 0);
    }
}
