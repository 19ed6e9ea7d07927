//! Music enrichment.
//!
//! `try_remote` asks the configured music service; `local_fallback` picks one
//! of three fixed tracks for the mood. `recommend` composes them so that an
//! error or a missing credential always ends in the fallback.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::clients::{AudioTargets, MusicService};
use crate::error::AppError;
use crate::models::{Mood, RecommendationBundle};

/// Delay applied before serving a fallback pick.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(500);

/// A music suggestion, remote or local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub id: String,
    pub description: String,
}

struct FallbackTrack {
    name: &'static str,
    artist: &'static str,
    id: &'static str,
    description: &'static str,
}

const fn track(
    name: &'static str,
    artist: &'static str,
    id: &'static str,
    description: &'static str,
) -> FallbackTrack {
    FallbackTrack {
        name,
        artist,
        id,
        description,
    }
}

const HAPPY_TRACKS: [FallbackTrack; 3] = [
    track(
        "Walking on Sunshine",
        "Katrina and The Waves",
        "05wIrZSwuaVWhcv5FfqeH0",
        "An upbeat classic to amplify your positive mood",
    ),
    track(
        "Happy",
        "Pharrell Williams",
        "60nZcImufyMA1MKQY3dcCH",
        "A joyful celebration of happiness",
    ),
    track(
        "Good as Hell",
        "Lizzo",
        "6uAm7pG66O1XesXS9bpHSF",
        "An empowering anthem about feeling good",
    ),
];

const SAD_TRACKS: [FallbackTrack; 3] = [
    track(
        "Clair de Lune",
        "Claude Debussy",
        "1BNCZGHj0VXxh5Usl9ajpf",
        "A gentle, soothing piano piece to comfort you",
    ),
    track(
        "Someone Like You",
        "Adele",
        "3bNv3VuUOKgrf5hu3YcuRo",
        "A moving ballad about acceptance and moving on",
    ),
    track("Fix You", "Coldplay", "7LVHVU3tWfcxj5aiPFEW4Q", "A song of comfort and healing"),
];

const ANGRY_TRACKS: [FallbackTrack; 3] = [
    track(
        "Weightless",
        "Marconi Union",
        "5rgGSDz0YlzrOx8m8YHM10",
        "Scientifically designed to reduce stress and anxiety",
    ),
    track("Take it Easy", "Eagles", "4yugZvBYaoREkJKtbG08Qr", "A relaxing reminder to slow down"),
    track(
        "Breathe",
        "Télépopmusik",
        "4GYrZBQA2fFi2QBxTic1FQ",
        "A calming electronic track to ease tension",
    ),
];

const ANXIOUS_TRACKS: [FallbackTrack; 3] = [
    track(
        "Weightless",
        "Marconi Union",
        "5rgGSDz0YlzrOx8m8YHM10",
        "Scientifically designed to reduce anxiety",
    ),
    track(
        "Northern Lights",
        "Ólafur Arnalds",
        "5FKDODVCjvcRNVD0xNI10j",
        "Gentle piano melodies to calm anxious thoughts",
    ),
    track(
        "Gymnopédie No.1",
        "Erik Satie",
        "5NGtFXVpXSvwunEIGeviY3",
        "A peaceful, meditative piece to slow racing thoughts",
    ),
];

const STRESSED_TRACKS: [FallbackTrack; 3] = [
    track(
        "Horizon Variations",
        "Max Richter",
        "3G3xH5CXjIrMDV9j3B3uRd",
        "Minimalist composition to reduce stress levels",
    ),
    track(
        "All of Me",
        "Jon Schmidt",
        "4JJCk26zUJSlZYl5BVYmRb",
        "Beautiful piano to release tension",
    ),
    track("Watermark", "Enya", "0W4Q442O0iHZgKNtOSOY7y", "Ethereal soundscapes for stress relief"),
];

const CALM_TRACKS: [FallbackTrack; 3] = [
    track(
        "Experience",
        "Ludovico Einaudi",
        "1BncfTJAWxrsxyT9culBrj",
        "Serene piano composition to enhance your peaceful state",
    ),
    track(
        "Holocene",
        "Bon Iver",
        "3jG4MuRRvFBGUQcuBzrXl4",
        "Atmospheric folk to maintain your calm",
    ),
    track(
        "Ocean",
        "John Butler",
        "6nWRMP5hhvhrPkR57kzJ0I",
        "Intricate acoustic guitar patterns for mindfulness",
    ),
];

const NEUTRAL_TRACKS: [FallbackTrack; 3] = [
    track(
        "Gymnopédie No.1",
        "Erik Satie",
        "5NGtFXVpXSvwunEIGeviY3",
        "A peaceful, contemplative piano piece to inspire reflection",
    ),
    track(
        "Intro",
        "The xx",
        "0J80S4nCD5XhI40J8ulZwE",
        "A minimalist track perfect for focus and mindfulness",
    ),
    track(
        "Both Sides Now",
        "Joni Mitchell",
        "2JPCO3NkHJFmKSI2Qo42GO",
        "A thoughtful reflection on perspective",
    ),
];

const UNKNOWN_TRACKS: [FallbackTrack; 3] = [
    track(
        "Here Comes the Sun",
        "The Beatles",
        "6dGnYIeXmHdcikdzNNDMm2",
        "A gentle reminder that things are looking up",
    ),
    track(
        "What a Wonderful World",
        "Louis Armstrong",
        "29U7stRjqHU6rMiS8BfaI9",
        "A classic celebration of life's simple beauties",
    ),
    track(
        "Somewhere Over the Rainbow",
        "Israel Kamakawiwoʻole",
        "1PmXm1881bonBI1AlG5uaH",
        "A hopeful ukulele rendition of the timeless classic",
    ),
];

fn fallback_pool(mood: Mood) -> &'static [FallbackTrack; 3] {
    match mood {
        Mood::Happy => &HAPPY_TRACKS,
        Mood::Sad => &SAD_TRACKS,
        Mood::Angry => &ANGRY_TRACKS,
        Mood::Anxious => &ANXIOUS_TRACKS,
        Mood::Stressed => &STRESSED_TRACKS,
        Mood::Calm => &CALM_TRACKS,
        Mood::Neutral => &NEUTRAL_TRACKS,
        Mood::Unknown => &UNKNOWN_TRACKS,
    }
}

impl FallbackTrack {
    fn to_track(&self) -> Track {
        Track {
            name: self.name.to_string(),
            artist: self.artist.to_string(),
            id: self.id.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// The fixed local alternatives for a mood.
pub fn fallback_tracks(mood: Mood) -> Vec<Track> {
    fallback_pool(mood).iter().map(FallbackTrack::to_track).collect()
}

/// Audio-feature targets the remote service should aim for.
pub fn audio_targets(mood: Mood) -> AudioTargets {
    let (valence, energy, tempo) = match mood {
        Mood::Happy => (0.8, 0.8, None),
        Mood::Sad => (0.2, 0.3, None),
        Mood::Angry => (0.3, 0.9, None),
        Mood::Anxious => (0.4, 0.3, Some(80)),
        Mood::Stressed => (0.3, 0.2, Some(70)),
        Mood::Calm => (0.6, 0.2, Some(85)),
        Mood::Neutral => (0.5, 0.5, None),
        Mood::Unknown => (0.6, 0.6, None),
    };
    AudioTargets {
        valence,
        energy,
        tempo,
    }
}

fn remote_description(mood: Mood) -> String {
    let lead = match mood {
        Mood::Happy => "An uplifting",
        Mood::Sad => "A comforting",
        _ => "A helpful",
    };
    format!("{} track to match your current mood", lead)
}

/// Best-effort music suggestion with a local fallback.
#[derive(Clone)]
pub struct MusicRecommender {
    service: Option<Arc<dyn MusicService>>,
    fallback_delay: Duration,
}

impl Default for MusicRecommender {
    fn default() -> Self {
        Self::offline()
    }
}

impl MusicRecommender {
    pub fn new(service: Option<Arc<dyn MusicService>>, fallback_delay: Duration) -> Self {
        Self {
            service,
            fallback_delay,
        }
    }

    /// A recommender with no remote service and no fallback delay.
    pub fn offline() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn has_remote(&self) -> bool {
        self.service.is_some()
    }

    /// The service's answer for `mood`. `Ok(None)` covers a missing credential
    /// and an empty or refused answer; `Err` is a broken call.
    async fn lookup(&self, mood: Mood) -> Result<Option<Track>, AppError> {
        let Some(service) = &self.service else {
            return Ok(None);
        };

        let remote = service.recommend(audio_targets(mood)).await?;
        Ok(remote.map(|remote| Track {
            name: remote.name,
            artist: remote.artist,
            id: remote.id,
            description: remote_description(mood),
        }))
    }

    /// Ask the remote service. Absent credential and empty results are errors here.
    pub async fn try_remote(&self, mood: Mood) -> Result<Track, AppError> {
        if !self.has_remote() {
            return Err(AppError::Config(
                "No music service credential configured".to_string(),
            ));
        }

        self.lookup(mood)
            .await?
            .ok_or_else(|| AppError::Remote("Music service returned no tracks".to_string()))
    }

    /// Random pick among the mood's fixed alternatives.
    pub fn local_fallback(&self, mood: Mood) -> Track {
        let pool = fallback_pool(mood);
        pool.choose(&mut rand::thread_rng())
            .unwrap_or(&pool[0])
            .to_track()
    }

    /// Remote suggestion if possible, local pick otherwise. Never fails.
    ///
    /// The fallback delay applies when there was no usable answer; a broken
    /// call falls back at once.
    pub async fn recommend(&self, mood: Mood) -> Track {
        match self.lookup(mood).await {
            Ok(Some(track)) => {
                info!("Music service suggested '{}' for {}", track.name, mood);
                track
            }
            Ok(None) => {
                if self.has_remote() {
                    info!("Music service had no suggestion for {}, using local pick", mood);
                }
                if !self.fallback_delay.is_zero() {
                    tokio::time::sleep(self.fallback_delay).await;
                }
                self.local_fallback(mood)
            }
            Err(e) => {
                warn!("Music enrichment failed, using local pick: {}", e);
                self.local_fallback(mood)
            }
        }
    }

    /// Overwrite the bundle's music suggestion with a livelier pick.
    pub async fn enrich(&self, bundle: &mut RecommendationBundle, mood: Mood) {
        let track = self.recommend(mood).await;
        bundle.music.title = format!("{} by {}", track.name, track.artist);
        bundle.music.description = track.description;
        bundle.music.spotify_id = Some(track.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::RemoteTrack;
    use crate::recommendations::catalog::bundle_for;
    use async_trait::async_trait;

    struct StubService(Result<Option<RemoteTrack>, AppError>);

    #[async_trait]
    impl MusicService for StubService {
        async fn recommend(&self, _targets: AudioTargets) -> Result<Option<RemoteTrack>, AppError> {
            self.0.clone()
        }
    }

    fn with_stub(result: Result<Option<RemoteTrack>, AppError>) -> MusicRecommender {
        MusicRecommender::new(Some(Arc::new(StubService(result))), Duration::ZERO)
    }

    #[test]
    fn test_every_mood_has_three_alternatives() {
        for mood in Mood::ALL {
            assert_eq!(fallback_tracks(mood).len(), 3, "mood {}", mood);
        }
    }

    #[test]
    fn test_audio_targets() {
        let anxious = audio_targets(Mood::Anxious);
        assert_eq!(anxious.tempo, Some(80));
        assert!(audio_targets(Mood::Happy).tempo.is_none());
        assert_eq!(audio_targets(Mood::Angry).energy, 0.9);
    }

    #[tokio::test]
    async fn test_remote_success_is_used() {
        let recommender = with_stub(Ok(Some(RemoteTrack {
            name: "Sunrise".to_string(),
            artist: "Norah Jones".to_string(),
            id: "xyz".to_string(),
        })));

        let track = recommender.recommend(Mood::Happy).await;
        assert_eq!(track.name, "Sunrise");
        assert_eq!(track.description, "An uplifting track to match your current mood");
    }

    #[tokio::test]
    async fn test_remote_error_falls_back() {
        let recommender = with_stub(Err(AppError::Remote("boom".to_string())));
        let track = recommender.recommend(Mood::Sad).await;
        assert!(fallback_tracks(Mood::Sad).contains(&track));
    }

    #[tokio::test]
    async fn test_empty_remote_result_falls_back() {
        let recommender = with_stub(Ok(None));
        assert!(recommender.try_remote(Mood::Calm).await.is_err());
        let track = recommender.recommend(Mood::Calm).await;
        assert!(fallback_tracks(Mood::Calm).contains(&track));
    }

    #[tokio::test]
    async fn test_no_credential_falls_back() {
        let recommender = MusicRecommender::offline();
        assert!(matches!(
            recommender.try_remote(Mood::Neutral).await,
            Err(AppError::Config(_))
        ));
        for _ in 0..20 {
            let track = recommender.recommend(Mood::Neutral).await;
            assert!(fallback_tracks(Mood::Neutral).contains(&track));
        }
    }

    fn with_slow_stub(result: Result<Option<RemoteTrack>, AppError>) -> MusicRecommender {
        MusicRecommender::new(
            Some(Arc::new(StubService(result))),
            Duration::from_millis(300),
        )
    }

    #[tokio::test]
    async fn test_broken_call_falls_back_without_delay() {
        let recommender = with_slow_stub(Err(AppError::Remote("connection reset".to_string())));

        let start = std::time::Instant::now();
        let track = recommender.recommend(Mood::Angry).await;

        assert!(start.elapsed() < Duration::from_millis(300));
        assert!(fallback_tracks(Mood::Angry).contains(&track));
    }

    #[tokio::test]
    async fn test_empty_answer_falls_back_after_delay() {
        let recommender = with_slow_stub(Ok(None));

        let start = std::time::Instant::now();
        let track = recommender.recommend(Mood::Anxious).await;

        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(fallback_tracks(Mood::Anxious).contains(&track));
    }

    #[tokio::test]
    async fn test_enrich_overwrites_music_only() {
        let recommender = with_stub(Ok(Some(RemoteTrack {
            name: "Lullaby".to_string(),
            artist: "Brahms".to_string(),
            id: "b-1".to_string(),
        })));
        let mut bundle = bundle_for(Mood::Stressed);
        let original_movie = bundle.movie.clone();

        recommender.enrich(&mut bundle, Mood::Stressed).await;

        assert_eq!(bundle.music.title, "Lullaby by Brahms");
        assert_eq!(bundle.music.spotify_id.as_deref(), Some("b-1"));
        assert_eq!(bundle.movie, original_movie);
    }
}
