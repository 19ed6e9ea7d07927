use crate::clients::traits::{AudioTargets, MusicService, RemoteTrack};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com";

#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

/// Client for the Spotify recommendations endpoint, authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl SpotifyClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            token: token.into(),
        })
    }

    fn recommendations_url(&self, targets: AudioTargets) -> Result<Url, AppError> {
        let mut url = self.base_url.join("v1/recommendations")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", "1")
                .append_pair("seed_genres", "pop")
                .append_pair("target_valence", &targets.valence.to_string())
                .append_pair("target_energy", &targets.energy.to_string());
            if let Some(tempo) = targets.tempo {
                query.append_pair("target_tempo", &tempo.to_string());
            }
        }
        Ok(url)
    }

    fn auth_headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", self.token)
            .parse::<HeaderValue>()
            .map_err(|_| {
                AppError::Config("Music service token is not a valid header value".to_string())
            })?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

#[async_trait]
impl MusicService for SpotifyClient {
    #[instrument(skip(self))]
    async fn recommend(&self, targets: AudioTargets) -> Result<Option<RemoteTrack>, AppError> {
        let url = self.recommendations_url(targets)?;
        debug!("Requesting music recommendation: {}", url);

        let res = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        // A refused request is an empty answer; only transport and body errors are failures
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!("Recommendation request failed with status {}: {}", status, body);
            return Ok(None);
        }

        let payload: RecommendationsResponse = res
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Malformed recommendation response: {}", e)))?;

        Ok(payload.tracks.into_iter().next().map(|track| RemoteTrack {
            artist: track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            name: track.name,
            id: track.id,
        }))
    }
}
