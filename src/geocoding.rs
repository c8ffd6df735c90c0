//! Address <-> coordinate lookups against the Nominatim API, used by the
//! listing form. Treated as an opaque collaborator; results are memoized
//! in-process because Nominatim rate-limits aggressively.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// A resolved place.
#[derive(Debug, Clone)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
    cache: Mutex<HashMap<String, GeocodeResult>>,
}

impl GeocodingService {
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            // Nominatim requires an identifying user agent.
            .user_agent(concat!("stayhub-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create geocoding HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Resolve a free-form address to coordinates. `Ok(None)` means the
    /// lookup ran but found nothing.
    pub async fn geocode_address(&self, address: &str) -> Result<Option<GeocodeResult>> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let cache_key = address.to_lowercase();
        if let Some(hit) = self.cached(&cache_key) {
            return Ok(Some(hit));
        }

        debug!("geocoding \"{}\"", address);
        let places: Vec<NominatimPlace> = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .context("Geocoding request failed")?
            .error_for_status()
            .context("Geocoding request rejected")?
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        match parse_place(place) {
            Some(result) => {
                self.remember(cache_key, result.clone());
                Ok(Some(result))
            }
            None => {
                warn!("geocoder returned unparseable coordinates");
                Ok(None)
            }
        }
    }

    /// Coordinates back to a display address.
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<GeocodeResult>> {
        let cache_key = format!("{latitude},{longitude}");
        if let Some(hit) = self.cached(&cache_key) {
            return Ok(Some(hit));
        }

        let place: NominatimPlace = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .context("Reverse geocoding request failed")?
            .error_for_status()
            .context("Reverse geocoding request rejected")?
            .json()
            .await
            .context("Failed to parse reverse geocoding response")?;

        let result = GeocodeResult {
            latitude,
            longitude,
            display_name: place.display_name,
        };
        self.remember(cache_key, result.clone());
        Ok(Some(result))
    }

    /// Just the coordinate pair for a city or area name.
    pub async fn location_coordinates(&self, location: &str) -> Result<Option<(f64, f64)>> {
        Ok(self
            .geocode_address(location)
            .await?
            .map(|place| (place.latitude, place.longitude)))
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn cached(&self, key: &str) -> Option<GeocodeResult> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn remember(&self, key: String, result: GeocodeResult) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, result);
        }
    }
}

fn parse_place(place: NominatimPlace) -> Option<GeocodeResult> {
    Some(GeocodeResult {
        latitude: place.lat.parse().ok()?,
        longitude: place.lon.parse().ok()?,
        display_name: place.display_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_coordinates() {
        let place = NominatimPlace {
            lat: "38.7100".into(),
            lon: "-9.1400".into(),
            display_name: "Lisbon, Portugal".into(),
        };
        let result = parse_place(place).unwrap();
        assert_eq!(result.latitude, 38.71);
        assert_eq!(result.longitude, -9.14);
    }

    #[test]
    fn rejects_garbage_coordinates() {
        let place = NominatimPlace {
            lat: "not-a-number".into(),
            lon: "-9.14".into(),
            display_name: "??".into(),
        };
        assert!(parse_place(place).is_none());
    }

    #[tokio::test]
    async fn empty_address_short_circuits() {
        let service = GeocodingService::new().unwrap();
        assert!(service.geocode_address("   ").await.unwrap().is_none());
    }
}
