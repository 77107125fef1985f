//! Forward geocoding: place name to coordinates via Nominatim (OpenStreetMap).
//! Free, no API key required.

use reqwest::Client;
use serde::Deserialize;

use crate::error::QueryError;
use crate::model::{GeoLocation, PlaceQuery};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = "eltiempo/0.1";

const SERVICE: &str = "Nominatim";

/// Nominatim serves coordinates as JSON strings, not numbers.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    http: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, NOMINATIM_URL)
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Resolve a place name to coordinates and a canonical label.
    ///
    /// The provider's ranking is trusted as-is: the first candidate wins.
    /// One request, no retry; any failure is terminal for the action.
    pub async fn geocode(&self, query: &PlaceQuery) -> Result<GeoLocation, QueryError> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(query.as_str())
        );

        tracing::debug!(query = %query, "geocoding place name");

        let res = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| QueryError::send(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(%status, "geocoding request failed");
            return Err(QueryError::status(SERVICE, status, &body));
        }

        let candidates: Vec<Candidate> = res
            .json()
            .await
            .map_err(|e| QueryError::parse(SERVICE, e))?;

        let first = candidates.into_iter().next().ok_or_else(|| {
            QueryError::NoMatch {
                query: query.as_str().to_string(),
            }
        })?;

        let latitude: f64 = first
            .lat
            .parse()
            .map_err(|_| QueryError::parse(SERVICE, format!("latitud no numérica '{}'", first.lat)))?;
        let longitude: f64 = first
            .lon
            .parse()
            .map_err(|_| QueryError::parse(SERVICE, format!("longitud no numérica '{}'", first.lon)))?;

        tracing::debug!(lat = latitude, lon = longitude, label = %first.display_name, "geocoded");

        Ok(GeoLocation {
            latitude,
            longitude,
            display_name: first.display_name,
        })
    }
}
