use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Target audio features handed to a music recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioTargets {
    pub valence: f32,
    pub energy: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<u32>,
}

/// A track returned by a music service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTrack {
    pub name: String,
    /// Artist names joined with ", "
    pub artist: String,
    pub id: String,
}

/// Defines the public interface for a remote music recommendation service.
///
/// Abstracts the concrete provider so the recommender can run against a live
/// service, a mock server, or nothing at all.
#[async_trait]
pub trait MusicService: Send + Sync + 'static {
    /// Returns the service's best track for the given targets, or `None` if it
    /// had nothing or declined the request. `Err` means the call itself broke.
    async fn recommend(&self, targets: AudioTargets) -> Result<Option<RemoteTrack>, AppError>;
}

/// Defines the public interface for a reverse-geocoding lookup.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + 'static {
    /// Returns a locality name (city, town or village) for the coordinates, if any.
    async fn locality(&self, latitude: f64, longitude: f64) -> Result<Option<String>, AppError>;
}
