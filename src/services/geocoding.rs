// ============================================================================
// GEOCODING - Free-text location search through the Mapbox places API
// ============================================================================

use gloo_net::http::Request;
use serde::Deserialize;

use crate::config::CONFIG;
use crate::error::GeocodeError;
use crate::models::Coordinates;

const GEOCODING_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingFeature {
    #[serde(default)]
    pub place_name: String,
    /// [lng, lat]
    pub center: [f64; 2],
}

/// Resolved search hit
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub coordinates: Coordinates,
}

impl GeocodingResponse {
    /// First feature with valid coordinates
    pub fn first_place(self, query: &str) -> Result<Place, GeocodeError> {
        self.features
            .into_iter()
            .map(|f| Place {
                name: f.place_name,
                coordinates: Coordinates::new(f.center[1], f.center[0]),
            })
            .find(|place| place.coordinates.is_valid())
            .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))
    }
}

#[derive(Clone)]
pub struct GeocodingClient {
    access_token: String,
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self {
            access_token: CONFIG.mapbox_token().to_string(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        let encoded: String = js_sys::encode_uri_component(query).into();
        format!(
            "{}/{}.json?limit=1&access_token={}",
            GEOCODING_URL, encoded, self.access_token
        )
    }

    pub async fn resolve(&self, query: &str) -> Result<Place, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        log::info!("🔍 [SEARCH] Resolving '{}'", query);

        let response = Request::get(&self.search_url(query))
            .send()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| response.status_text());
            return Err(GeocodeError::Http { status, body });
        }

        let place = response
            .json::<GeocodingResponse>()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?
            .first_place(query)?;

        log::info!(
            "✅ [SEARCH] '{}' → {} ({}, {})",
            query, place.name, place.coordinates.latitude, place.coordinates.longitude
        );
        Ok(place)
    }
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_place_swaps_lng_lat() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                { "place_name": "San Francisco, California, United States", "center": [-122.4194, 37.7749] }
            ]
        }"#;
        let response: GeocodingResponse = serde_json::from_str(json).unwrap();
        let place = response.first_place("sf").unwrap();

        assert_eq!(place.coordinates, Coordinates::new(37.7749, -122.4194));
        assert!(place.name.starts_with("San Francisco"));
    }

    #[test]
    fn no_features_is_no_match() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert_eq!(
            response.first_place("atlantis"),
            Err(GeocodeError::NoMatch("atlantis".to_string()))
        );
    }
}
