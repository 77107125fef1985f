use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A validated, trimmed place-name query. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Trim the raw input and reject empty or whitespace-only strings.
    /// This runs before any network call.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::EmptyInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved coordinates plus the canonical label the geocoder returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Current conditions normalized across providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub condition_text: String,
    pub wind_speed: f64,
    pub observed_at: String,
    /// Relative humidity in percent; not every provider reports it.
    pub humidity_pct: Option<u8>,
}

/// One day of a daily series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub condition_text: String,
}

/// Short-range daily forecast, capped at [`ForecastSeries::MAX_DAYS`] entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub days: Vec<ForecastDay>,
}

impl ForecastSeries {
    pub const MAX_DAYS: usize = 15;

    /// Keep at most `MAX_DAYS` entries, dropping the tail.
    pub fn truncated(mut days: Vec<ForecastDay>) -> Self {
        days.truncate(Self::MAX_DAYS);
        Self { days }
    }
}

/// Sparse sample of a long daily series: a handful of representative days
/// spread evenly across the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongRangeSample {
    pub days: Vec<ForecastDay>,
}

impl LongRangeSample {
    pub const SAMPLE_COUNT: usize = 5;

    /// Sample `days` at `interval = floor(len / SAMPLE_COUNT)` starting at
    /// index 0. The interval is clamped to at least 1 so short series
    /// terminate instead of looping on a zero step.
    pub fn spread(days: Vec<ForecastDay>) -> Self {
        let sampled = sample_indices(days.len(), Self::SAMPLE_COUNT)
            .into_iter()
            .map(|i| days[i].clone())
            .collect();
        Self { days: sampled }
    }
}

/// Indices `0, interval, 2*interval, ...` below `len`, with
/// `interval = max(len / count, 1)`.
pub(crate) fn sample_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }
    let interval = (len / count).max(1);
    (0..len).step_by(interval).collect()
}

/// Map-viewer link descriptor; no weather data involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub embed_url: String,
    pub viewer_url: String,
}

/// What an adapter hands to the presenter.
#[derive(Debug, Clone)]
pub enum DisplayPayload {
    Current(WeatherSnapshot),
    Forecast(ForecastSeries),
    LongRange(LongRangeSample),
    Map(MapDescriptor),
}
