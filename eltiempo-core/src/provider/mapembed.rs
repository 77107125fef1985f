//! Map-embed adapter: builds OpenStreetMap viewer URLs from the resolved
//! coordinates. Performs no request of its own.

use async_trait::async_trait;

use crate::error::QueryError;
use crate::model::{DisplayPayload, GeoLocation, MapDescriptor};

use super::ProviderAdapter;

const OSM_URL: &str = "https://www.openstreetmap.org";

/// Bounding-box margin around the point, in degrees.
const BBOX_MARGIN: f64 = 0.05;

const EMBED_ZOOM: u8 = 12;

#[derive(Debug, Clone, Default)]
pub struct MapEmbedAdapter;

impl MapEmbedAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProviderAdapter for MapEmbedAdapter {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError> {
        let lat = location.latitude;
        let lon = location.longitude;

        // bbox order is west,south,east,north; commas go URL-encoded.
        // Edges are rounded to 4 decimals (≈11 m) so the offset arithmetic
        // doesn't leak float noise into the URL.
        let embed_url = format!(
            "{OSM_URL}/export/embed.html?bbox={}%2C{}%2C{}%2C{}&layer=mapnik&marker={}%2C{}",
            round4(lon - BBOX_MARGIN),
            round4(lat - BBOX_MARGIN),
            round4(lon + BBOX_MARGIN),
            round4(lat + BBOX_MARGIN),
            lat,
            lon,
        );

        let viewer_url =
            format!("{OSM_URL}/?mlat={lat}&mlon={lon}#map={EMBED_ZOOM}/{lat}/{lon}");

        Ok(DisplayPayload::Map(MapDescriptor {
            embed_url,
            viewer_url,
        }))
    }
}

fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}
