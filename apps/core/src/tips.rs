//! Community tips: sharing, likes and the nearby filter.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::clients::{location_label, ReverseGeocoder};
use crate::error::AppError;
use crate::models::{Tip, TipLocation};
use crate::storage::{Loaded, WellnessRepository};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Tips within this distance of the user count as nearby.
pub const NEARBY_RADIUS_KM: f64 = 20.0;

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Tips that carry a location within [`NEARBY_RADIUS_KM`] of the point.
pub fn nearby(tips: &[Tip], latitude: f64, longitude: f64) -> Vec<Tip> {
    tips.iter()
        .filter(|tip| {
            tip.location.as_ref().is_some_and(|loc| {
                haversine_km(latitude, longitude, loc.latitude, loc.longitude) <= NEARBY_RADIUS_KM
            })
        })
        .cloned()
        .collect()
}

/// Tip operations for one anonymous user.
pub struct TipBoard {
    repo: WellnessRepository,
    geocoder: Option<Box<dyn ReverseGeocoder>>,
}

impl TipBoard {
    pub fn new(repo: WellnessRepository, geocoder: Option<Box<dyn ReverseGeocoder>>) -> Self {
        Self { repo, geocoder }
    }

    /// Shares a tip. Text is trimmed and must not be empty; a location, when
    /// given, is labelled through the reverse geocoder.
    #[instrument(skip(self, text))]
    pub async fn share(
        &self,
        text: &str,
        coordinates: Option<(f64, f64)>,
    ) -> Result<Tip, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Tip text cannot be empty".to_string()));
        }

        let location = match coordinates {
            Some((latitude, longitude)) => {
                let location_name = match &self.geocoder {
                    Some(geocoder) => {
                        Some(location_label(geocoder.as_ref(), latitude, longitude).await)
                    }
                    None => None,
                };
                Some(TipLocation {
                    latitude,
                    longitude,
                    location_name,
                })
            }
            None => None,
        };

        let tip = Tip {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
            likes: 0,
            liked_by: Vec::new(),
            location,
        };

        let tip = self.repo.add_tip(tip).await?;
        info!("Shared tip {}", tip.id);
        Ok(tip)
    }

    /// Toggles the current user's like on a tip.
    pub async fn toggle_like(&self, tip_id: &str) -> Result<Option<Tip>, AppError> {
        let user_id = self.repo.user_id().await?;
        self.repo.toggle_like(tip_id, &user_id).await
    }

    /// All tips, newest first.
    pub async fn all(&self) -> Result<Loaded<Tip>, AppError> {
        self.repo.tips().await
    }

    /// Tips shared near a point, newest first.
    pub async fn near(&self, latitude: f64, longitude: f64) -> Result<Vec<Tip>, AppError> {
        let tips = self.repo.tips().await?.items;
        Ok(nearby(&tips, latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip_at(lat: f64, lon: f64) -> Tip {
        Tip {
            id: Uuid::new_v4().to_string(),
            text: "Stretch".to_string(),
            timestamp: Utc::now(),
            likes: 0,
            liked_by: vec![],
            location: Some(TipLocation {
                latitude: lat,
                longitude: lon,
                location_name: None,
            }),
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // Paris to London is roughly 344 km
        let d = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d - 344.0).abs() < 5.0, "got {}", d);
        assert_eq!(haversine_km(10.0, 10.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_nearby_filter() {
        let close = tip_at(48.86, 2.35);
        let far = tip_at(51.5, -0.12);
        let mut nowhere = tip_at(0.0, 0.0);
        nowhere.location = None;

        let result = nearby(&[close.clone(), far, nowhere], 48.8566, 2.3522);
        assert_eq!(result, vec![close]);
    }
}
