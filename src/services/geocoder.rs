use lru::LruCache;
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

use crate::config::GeocoderSettings;
use crate::models::GeoPoint;

/// Errors that can occur when resolving a location
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),
}

/// One place from a Nominatim-style `/search` response
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Client for a Nominatim-compatible geocoding endpoint
///
/// Turns free-text job and profile locations ("Atlanta, GA") into
/// coordinates. Answers, including "no match", are memoised in an LRU.
pub struct GeocoderClient {
    base_url: String,
    client: Client,
    memo: Mutex<LruCache<String, Option<GeoPoint>>>,
}

impl GeocoderClient {
    pub fn new(
        base_url: String,
        user_agent: &str,
        cache_size: usize,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            base_url,
            client,
            memo: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// Build the client when geocoding is enabled
    pub fn from_settings(settings: &GeocoderSettings) -> Result<Option<Self>, GeocodeError> {
        if !settings.enabled {
            return Ok(None);
        }

        Self::new(
            settings.endpoint.clone(),
            &settings.user_agent,
            settings.cache_size,
            Duration::from_secs(settings.timeout_secs),
        )
        .map(Some)
    }

    /// Resolve a location to its best match, `None` when nothing matches
    pub async fn geocode(&self, location: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        let key = location.trim().to_lowercase();
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(hit) = self.memo_get(&key) {
            tracing::trace!("Geocode memo hit: {}", key);
            return Ok(hit);
        }

        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(location.trim())
        );

        tracing::debug!("Geocoding location: {}", location);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Failed to geocode '{}': {}",
                location,
                response.status()
            )));
        }

        let places: Vec<Place> = response.json().await?;
        let point = places
            .first()
            .and_then(|place| GeoPoint::parse(&place.lat, &place.lon));

        if let Ok(mut memo) = self.memo.lock() {
            memo.put(key, point);
        }

        Ok(point)
    }

    /// Fill in missing coordinates, never failing the caller
    pub async fn resolve_or_keep(&self, location: &str, current: Option<GeoPoint>) -> Option<GeoPoint> {
        if current.is_some() {
            return current;
        }

        match self.geocode(location).await {
            Ok(point) => point,
            Err(e) => {
                tracing::warn!("Geocoding failed for '{}', leaving coordinates unset: {}", location, e);
                None
            }
        }
    }

    fn memo_get(&self, key: &str) -> Option<Option<GeoPoint>> {
        self.memo.lock().ok()?.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> GeocoderClient {
        GeocoderClient::new(server.url(), "jobmatch-test", 16, Duration::from_secs(2))
            .expect("Failed to build geocoder")
    }

    #[tokio::test]
    async fn test_geocode_parses_first_place() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Atlanta, GA".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": "33.7489954", "lon": "-84.3879824", "display_name": "Atlanta"}]"#)
            .expect(1)
            .create_async()
            .await;

        let geocoder = client_for(&server);

        let point = geocoder.geocode("Atlanta, GA").await.unwrap().unwrap();
        assert!((point.latitude - 33.7489954).abs() < 1e-9);

        // Second lookup is served from the memo
        let again = geocoder.geocode("  atlanta, ga ").await.unwrap();
        assert_eq!(again, Some(point));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_geocode_no_match() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let geocoder = client_for(&server);
        assert_eq!(geocoder.geocode("Nowhere").await.unwrap(), None);
        assert_eq!(geocoder.geocode("   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_resolve_or_keep_fails_soft() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let geocoder = client_for(&server);
        assert!(geocoder.geocode("Boston").await.is_err());
        assert_eq!(geocoder.resolve_or_keep("Boston", None).await, None);

        let known = Some(GeoPoint::new(42.36, -71.06));
        assert_eq!(geocoder.resolve_or_keep("Boston", known).await, known);
    }

    #[test]
    fn test_blank_location_skips_lookup() {
        // Nothing listens on the discard port; a request would fail
        let geocoder =
            GeocoderClient::new("http://127.0.0.1:9".to_string(), "jobmatch-test", 4, Duration::from_secs(1))
                .expect("Failed to build geocoder");

        assert_eq!(tokio_test::block_on(geocoder.geocode("  ")).unwrap(), None);
    }

    #[test]
    fn test_disabled_settings_build_nothing() {
        let settings = GeocoderSettings::default();
        assert!(GeocoderClient::from_settings(&settings).unwrap().is_none());
    }
}
