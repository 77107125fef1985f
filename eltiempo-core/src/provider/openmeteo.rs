//! Open-Meteo adapters: current conditions and the 15-day daily forecast.
//! Keyless; conditions arrive as WMO codes and are translated locally.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::condition::describe_weather_code;
use crate::error::QueryError;
use crate::model::{
    DisplayPayload, ForecastDay, ForecastSeries, GeoLocation, WeatherSnapshot,
};

use super::ProviderAdapter;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";

const SERVICE: &str = "Open-Meteo";

// The provider caps daily forecasts at 16 days; we ask for all of them and
// keep the first 15.
const REQUESTED_DAYS: usize = 16;

#[derive(Debug, Clone)]
pub struct OpenMeteoCurrent {
    http: Client,
    base_url: String,
}

impl OpenMeteoCurrent {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, OPEN_METEO_URL)
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i64,
    time: String,
}

#[derive(Debug, Deserialize)]
struct OmCurrentResponse {
    current_weather: OmCurrentWeather,
}

#[async_trait]
impl ProviderAdapter for OpenMeteoCurrent {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| QueryError::send(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(QueryError::status(SERVICE, status, &body));
        }

        let parsed: OmCurrentResponse = res
            .json()
            .await
            .map_err(|e| QueryError::parse(SERVICE, e))?;

        let current = parsed.current_weather;

        Ok(DisplayPayload::Current(WeatherSnapshot {
            temperature_c: current.temperature,
            condition_text: describe_weather_code(current.weathercode).to_string(),
            wind_speed: current.windspeed,
            observed_at: current.time,
            humidity_pct: None,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoDaily {
    http: Client,
    base_url: String,
}

impl OpenMeteoDaily {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, OPEN_METEO_URL)
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

/// Index-aligned parallel arrays, one entry per day.
#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    weathercode: Vec<i64>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmDailyResponse {
    daily: OmDaily,
}

impl OmDaily {
    /// Zip the four arrays into per-day entries, stopping at the shortest so
    /// index correspondence is preserved even on a ragged response.
    fn into_days(self) -> Vec<ForecastDay> {
        let len = self
            .time
            .len()
            .min(self.weathercode.len())
            .min(self.temperature_2m_max.len())
            .min(self.temperature_2m_min.len());

        (0..len)
            .map(|i| ForecastDay {
                date: self.time[i].clone(),
                temp_max_c: self.temperature_2m_max[i],
                temp_min_c: self.temperature_2m_min[i],
                condition_text: describe_weather_code(self.weathercode[i]).to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl ProviderAdapter for OpenMeteoDaily {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                (
                    "daily",
                    "weathercode,temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("forecast_days", REQUESTED_DAYS.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|e| QueryError::send(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(QueryError::status(SERVICE, status, &body));
        }

        let parsed: OmDailyResponse = res
            .json()
            .await
            .map_err(|e| QueryError::parse(SERVICE, e))?;

        let series = ForecastSeries::truncated(parsed.daily.into_days());
        Ok(DisplayPayload::Forecast(series))
    }
}
