use crate::{
    Config,
    error::QueryError,
    model::{DisplayPayload, GeoLocation},
    provider::{
        mapembed::MapEmbedAdapter,
        openmeteo::{OpenMeteoCurrent, OpenMeteoDaily},
        openweather::OpenWeatherCurrent,
        simulated::SimulatedProvider,
        visualcrossing::VisualCrossingLongRange,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug};

pub mod mapembed;
pub mod openmeteo;
pub mod openweather;
pub mod simulated;
pub mod visualcrossing;

/// The closed set of adapter variants, one per user-facing trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Current conditions via Open-Meteo (keyless, WMO condition codes).
    CurrentConditions,
    /// Current conditions via OpenWeatherMap (keyed, textual conditions).
    CurrentOpenWeather,
    /// 15-day daily forecast via Open-Meteo.
    ShortForecast,
    /// 90-day window via Visual Crossing, sampled down to representative days.
    LongForecast,
    /// Embedded map links; no weather request at all.
    MapEmbed,
    /// Deterministic in-process data behind the same interface.
    Simulated,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::CurrentConditions => "actual",
            ProviderKind::CurrentOpenWeather => "openweather",
            ProviderKind::ShortForecast => "quincena",
            ProviderKind::LongForecast => "trimestre",
            ProviderKind::MapEmbed => "mapa",
            ProviderKind::Simulated => "simulado",
        }
    }

    pub const fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::CurrentConditions,
            ProviderKind::CurrentOpenWeather,
            ProviderKind::ShortForecast,
            ProviderKind::LongForecast,
            ProviderKind::MapEmbed,
            ProviderKind::Simulated,
        ]
    }

    /// The keyed service this variant depends on, if any.
    pub fn required_service(&self) -> Option<ApiService> {
        match self {
            ProviderKind::CurrentOpenWeather => Some(ApiService::OpenWeather),
            ProviderKind::LongForecast => Some(ApiService::VisualCrossing),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External services that require an API key in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiService {
    OpenWeather,
    VisualCrossing,
}

impl ApiService {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiService::OpenWeather => "openweather",
            ApiService::VisualCrossing => "visualcrossing",
        }
    }

    pub const fn all() -> &'static [ApiService] {
        &[ApiService::OpenWeather, ApiService::VisualCrossing]
    }
}

impl std::fmt::Display for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ApiService {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ApiService::OpenWeather),
            "visualcrossing" => Ok(ApiService::VisualCrossing),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: openweather, visualcrossing."
            )),
        }
    }
}

/// One GET request against one external source, shaped into a display payload.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError>;
}

/// Base URLs for the external endpoints, overridable in tests.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub open_meteo: String,
    pub openweather: String,
    pub visual_crossing: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            open_meteo: openmeteo::OPEN_METEO_URL.to_string(),
            openweather: openweather::OPENWEATHER_URL.to_string(),
            visual_crossing: visualcrossing::VISUAL_CROSSING_URL.to_string(),
        }
    }
}

/// Construct the adapter for a variant, pulling API keys from config.
///
/// Fails with [`QueryError::MissingApiKey`] when a keyed variant has no key
/// configured; keyless variants never consult the config.
pub fn adapter_from_config(
    kind: ProviderKind,
    config: &Config,
    http: &Client,
    endpoints: &Endpoints,
) -> Result<Box<dyn ProviderAdapter>, QueryError> {
    let key_for = |service: ApiService| {
        config
            .api_key(service)
            .map(str::to_owned)
            .ok_or(QueryError::MissingApiKey {
                provider: service.as_str(),
            })
    };

    let boxed: Box<dyn ProviderAdapter> = match kind {
        ProviderKind::CurrentConditions => Box::new(OpenMeteoCurrent::with_base_url(
            http.clone(),
            endpoints.open_meteo.clone(),
        )),
        ProviderKind::CurrentOpenWeather => Box::new(OpenWeatherCurrent::with_base_url(
            http.clone(),
            key_for(ApiService::OpenWeather)?,
            endpoints.openweather.clone(),
        )),
        ProviderKind::ShortForecast => Box::new(OpenMeteoDaily::with_base_url(
            http.clone(),
            endpoints.open_meteo.clone(),
        )),
        ProviderKind::LongForecast => Box::new(VisualCrossingLongRange::with_base_url(
            http.clone(),
            key_for(ApiService::VisualCrossing)?,
            endpoints.visual_crossing.clone(),
        )),
        ProviderKind::MapEmbed => Box::new(MapEmbedAdapter::new()),
        ProviderKind::Simulated => Box::new(SimulatedProvider::new()),
    };

    Ok(boxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_service_as_str_roundtrip() {
        for service in ApiService::all() {
            let s = service.as_str();
            let parsed = ApiService::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*service, parsed);
        }
    }

    #[test]
    fn unknown_service_error() {
        let err = ApiService::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[test]
    fn keyless_variants_need_no_config() {
        let cfg = Config::default();
        let http = Client::new();
        let endpoints = Endpoints::default();

        for kind in [
            ProviderKind::CurrentConditions,
            ProviderKind::ShortForecast,
            ProviderKind::MapEmbed,
            ProviderKind::Simulated,
        ] {
            assert!(adapter_from_config(kind, &cfg, &http, &endpoints).is_ok());
        }
    }

    #[test]
    fn keyed_variants_error_without_api_key() {
        let cfg = Config::default();
        let http = Client::new();
        let endpoints = Endpoints::default();

        let err = adapter_from_config(ProviderKind::LongForecast, &cfg, &http, &endpoints)
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::MissingApiKey {
                provider: "visualcrossing"
            }
        ));

        let err = adapter_from_config(ProviderKind::CurrentOpenWeather, &cfg, &http, &endpoints)
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::MissingApiKey {
                provider: "openweather"
            }
        ));
    }

    #[test]
    fn keyed_variants_build_with_api_key() {
        let mut cfg = Config::default();
        cfg.set_api_key(ApiService::OpenWeather, "KEY".into());
        cfg.set_api_key(ApiService::VisualCrossing, "KEY".into());
        let http = Client::new();
        let endpoints = Endpoints::default();

        for kind in [ProviderKind::CurrentOpenWeather, ProviderKind::LongForecast] {
            assert!(adapter_from_config(kind, &cfg, &http, &endpoints).is_ok());
        }
    }

    #[test]
    fn required_service_matches_keyed_variants() {
        assert_eq!(
            ProviderKind::CurrentOpenWeather.required_service(),
            Some(ApiService::OpenWeather)
        );
        assert_eq!(
            ProviderKind::LongForecast.required_service(),
            Some(ApiService::VisualCrossing)
        );
        assert_eq!(ProviderKind::CurrentConditions.required_service(), None);
        assert_eq!(ProviderKind::MapEmbed.required_service(), None);
    }
}
