use crate::clients::traits::ReverseGeocoder;
use crate::error::AppError;
use async_trait::async_trait;
use lru::LruCache;
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Label used whenever a locality cannot be resolved.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

/// Coordinates rounded to roughly 100 m, used as cache key.
type CacheKey = (i64, i64);

fn cache_key(latitude: f64, longitude: f64) -> CacheKey {
    (
        (latitude * 1_000.0).round() as i64,
        (longitude * 1_000.0).round() as i64,
    )
}

/// Reverse geocoder for a Nominatim-compatible `/reverse` endpoint.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    cache: Mutex<LruCache<CacheKey, Option<String>>>,
}

impl NominatimClient {
    const CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(size) => size,
        None => panic!("Cache size must be non-zero"),
    };

    pub fn new(base_url: &str) -> Result<Self, AppError> {
        // Nominatim's usage policy requires an identifying user agent.
        let client = Client::builder()
            .user_agent(concat!("mindmosaic/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            cache: Mutex::new(LruCache::new(Self::CACHE_SIZE)),
        })
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Option<String>, AppError> {
        let mut url = self.base_url.join("reverse")?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &latitude.to_string())
            .append_pair("lon", &longitude.to_string());

        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::Remote(format!(
                "Reverse geocoding failed with status {}",
                status
            )));
        }

        let payload: ReverseResponse = res
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Malformed geocoding response: {}", e)))?;

        Ok(payload
            .address
            .and_then(|a| a.city.or(a.town).or(a.village)))
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn locality(&self, latitude: f64, longitude: f64) -> Result<Option<String>, AppError> {
        let key = cache_key(latitude, longitude);
        if let Some(hit) = self.cache.lock().await.get(&key) {
            debug!("Geocoding cache hit for {:?}", key);
            return Ok(hit.clone());
        }

        let locality = self.fetch(latitude, longitude).await?;
        self.cache.lock().await.put(key, locality.clone());
        Ok(locality)
    }
}

/// Resolve a display label for coordinates, falling back to [`UNKNOWN_LOCATION`].
pub async fn location_label(
    geocoder: &dyn ReverseGeocoder,
    latitude: f64,
    longitude: f64,
) -> String {
    match geocoder.locality(latitude, longitude).await {
        Ok(Some(name)) => name,
        Ok(None) => UNKNOWN_LOCATION.to_string(),
        Err(e) => {
            tracing::warn!("Error getting location name: {}", e);
            UNKNOWN_LOCATION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_locality_prefers_city_then_town() {
        let mock_server = MockServer::start().await;
        let client = NominatimClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": {"town": "Hebden Bridge", "village": "Heptonstall"}
            })))
            .mount(&mock_server)
            .await;

        let name = location_label(&client, 53.74, -2.01).await;
        assert_eq!(name, "Hebden Bridge");
    }

    #[tokio::test]
    async fn test_lookups_are_cached() {
        let mock_server = MockServer::start().await;
        let client = NominatimClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": {"city": "Lyon"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let first = client.locality(45.764, 4.8357).await.unwrap();
        let second = client.locality(45.764, 4.8357).await.unwrap();
        assert_eq!(first.as_deref(), Some("Lyon"));
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_failure_yields_unknown_location() {
        let mock_server = MockServer::start().await;
        let client = NominatimClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        assert_eq!(location_label(&client, 0.0, 0.0).await, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_missing_address_yields_unknown_location() {
        let mock_server = MockServer::start().await;
        let client = NominatimClient::new(&mock_server.uri()).unwrap();

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})),
            )
            .mount(&mock_server)
            .await;

        assert_eq!(location_label(&client, 10.0, -140.0).await, UNKNOWN_LOCATION);
    }
}
