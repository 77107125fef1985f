//! Simulated provider: deterministic data derived from the coordinates, no
//! network at all. Useful for demos and for exercising the pipeline offline.

use async_trait::async_trait;
use chrono::Utc;

use crate::condition::describe_weather_code;
use crate::error::QueryError;
use crate::model::{DisplayPayload, GeoLocation, WeatherSnapshot};

use super::ProviderAdapter;

// Codes the simulator cycles through, all from the WMO table.
const SIM_CODES: [i64; 6] = [0, 1, 2, 3, 61, 80];

#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider;

impl SimulatedProvider {
    pub fn new() -> Self {
        Self
    }

    fn snapshot_for(location: &GeoLocation) -> WeatherSnapshot {
        // Same coordinates, same answer. No randomness.
        let seed = (location.latitude.abs() * 10.0 + location.longitude.abs() * 3.0).floor();

        let temperature_c = (seed % 350.0) / 10.0;
        let wind_speed = ((seed * 7.0) % 300.0) / 10.0;
        let code = SIM_CODES[(seed as usize) % SIM_CODES.len()];

        WeatherSnapshot {
            temperature_c,
            condition_text: describe_weather_code(code).to_string(),
            wind_speed,
            observed_at: Utc::now().format("%Y-%m-%dT%H:%M").to_string(),
            humidity_pct: Some(((seed as u64 % 60) + 30) as u8),
        }
    }
}

#[async_trait]
impl ProviderAdapter for SimulatedProvider {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError> {
        Ok(DisplayPayload::Current(Self::snapshot_for(location)))
    }
}
