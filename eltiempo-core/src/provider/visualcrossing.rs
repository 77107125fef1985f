//! Visual Crossing timeline adapter: a 90-day window sampled down to a
//! handful of representative days.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::QueryError;
use crate::model::{DisplayPayload, ForecastDay, GeoLocation, LongRangeSample};

use super::ProviderAdapter;

pub const VISUAL_CROSSING_URL: &str = "https://weather.visualcrossing.com";

const SERVICE: &str = "Visual Crossing";

/// Window length in days, starting today (UTC).
const WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone)]
pub struct VisualCrossingLongRange {
    http: Client,
    api_key: String,
    base_url: String,
}

impl VisualCrossingLongRange {
    pub fn new(http: Client, api_key: String) -> Self {
        Self::with_base_url(http, api_key, VISUAL_CROSSING_URL)
    }

    pub fn with_base_url(http: Client, api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VcDay {
    datetime: String,
    tempmax: f64,
    tempmin: f64,
    #[serde(default)]
    conditions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VcTimelineResponse {
    days: Vec<VcDay>,
}

#[async_trait]
impl ProviderAdapter for VisualCrossingLongRange {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError> {
        // Window boundaries as ISO calendar dates, no time-of-day, at UTC.
        let start = Utc::now().date_naive();
        let end = start + Duration::days(WINDOW_DAYS);

        let url = format!(
            "{}/VisualCrossingWebServices/rest/services/timeline/{},{}/{}/{}",
            self.base_url,
            location.latitude,
            location.longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("unitGroup", "metric"),
                ("key", self.api_key.as_str()),
                ("include", "days"),
            ])
            .send()
            .await
            .map_err(|e| QueryError::send(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(QueryError::status(SERVICE, status, &body));
        }

        let parsed: VcTimelineResponse = res
            .json()
            .await
            .map_err(|e| QueryError::parse(SERVICE, e))?;

        let days: Vec<ForecastDay> = parsed
            .days
            .into_iter()
            .map(|d| ForecastDay {
                date: d.datetime,
                temp_max_c: d.tempmax,
                temp_min_c: d.tempmin,
                condition_text: d
                    .conditions
                    .unwrap_or_else(|| "Sin descripción disponible".to_string()),
            })
            .collect();

        Ok(DisplayPayload::LongRange(LongRangeSample::spread(days)))
    }
}
