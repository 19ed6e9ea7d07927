//! # Brain Module
//!
//! Fast, rule-based mood analysis for MindMosaic.
//!
//! ## Components
//! - `mood`: ordered keyword rules with a sentiment fallback
//! - `sentiment`: AFINN-style lexical valence scoring

pub mod mood;
pub mod sentiment;

pub use mood::{MoodClassifier, MoodEvidence, MoodReading};
pub use sentiment::{SentimentAnalysis, SentimentAnalyzer};
