//! Mood → content.
//!
//! - `catalog`: the static per-mood bundles
//! - `response`: empathetic replies, follow-up questions, journal prompts
//! - `music`: optional remote music enrichment with a local fallback

pub mod catalog;
pub mod music;
pub mod response;

pub use catalog::bundle_for;
pub use music::{audio_targets, fallback_tracks, MusicRecommender, Track, DEFAULT_FALLBACK_DELAY};
pub use response::{
    emergency_notice, follow_up_questions, generate_response, journal_prompt, TROUBLE_MESSAGE,
    WELCOME_MESSAGE,
};

use crate::models::{Mood, RecommendationBundle};
use tracing::instrument;

/// Resolves the bundle for a mood and lets the music enricher improve it.
#[derive(Clone, Default)]
pub struct RecommendationResolver {
    music: MusicRecommender,
}

impl RecommendationResolver {
    pub fn new(music: MusicRecommender) -> Self {
        Self { music }
    }

    /// Static bundle only, no network.
    pub fn resolve_static(&self, mood: Mood) -> RecommendationBundle {
        bundle_for(mood)
    }

    /// Static bundle with the music slot enriched. Never fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, mood: Mood) -> RecommendationBundle {
        let mut bundle = bundle_for(mood);
        self.music.enrich(&mut bundle, mood).await;
        bundle
    }
}
