//! OpenWeatherMap current-conditions adapter. Keyed; conditions arrive as
//! localized text, so no code table is involved.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::QueryError;
use crate::model::{DisplayPayload, GeoLocation, WeatherSnapshot};

use super::ProviderAdapter;

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org";

const SERVICE: &str = "OpenWeatherMap";

#[derive(Debug, Clone)]
pub struct OpenWeatherCurrent {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherCurrent {
    pub fn new(http: Client, api_key: String) -> Self {
        Self::with_base_url(http, api_key, OPENWEATHER_URL)
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
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl ProviderAdapter for OpenWeatherCurrent {
    async fn fetch(&self, location: &GeoLocation) -> Result<DisplayPayload, QueryError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("lang", "es".to_string()),
            ])
            .send()
            .await
            .map_err(|e| QueryError::send(SERVICE, e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(QueryError::status(SERVICE, status, &body));
        }

        let parsed: OwCurrentResponse = res
            .json()
            .await
            .map_err(|e| QueryError::parse(SERVICE, e))?;

        let observed_at = DateTime::<Utc>::from_timestamp(parsed.dt, 0)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M")
            .to_string();

        let condition_text = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Sin descripción disponible".to_string());

        Ok(DisplayPayload::Current(WeatherSnapshot {
            temperature_c: parsed.main.temp,
            condition_text,
            wind_speed: parsed.wind.speed,
            observed_at,
            humidity_pct: Some(parsed.main.humidity),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn madrid() -> GeoLocation {
        GeoLocation {
            latitude: 40.4168,
            longitude: -3.7038,
            display_name: "Madrid, España".to_string(),
        }
    }

    #[tokio::test]
    async fn maps_current_conditions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("appid", "OWM_KEY"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "es"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Madrid",
                "dt": 1714564800,
                "main": {"temp": 21.5, "humidity": 40},
                "weather": [{"description": "cielo claro"}],
                "wind": {"speed": 2.8}
            })))
            .mount(&server)
            .await;

        let adapter =
            OpenWeatherCurrent::with_base_url(Client::new(), "OWM_KEY".into(), server.uri());
        let payload = adapter.fetch(&madrid()).await.unwrap();

        let DisplayPayload::Current(snapshot) = payload else {
            panic!("expected current conditions");
        };
        assert_eq!(snapshot.temperature_c, 21.5);
        assert_eq!(snapshot.condition_text, "cielo claro");
        assert_eq!(snapshot.humidity_pct, Some(40));
        assert_eq!(snapshot.wind_speed, 2.8);
    }

    #[tokio::test]
    async fn empty_weather_list_uses_placeholder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "dt": 1714564800,
                "main": {"temp": 10.0, "humidity": 80},
                "weather": [],
                "wind": {"speed": 1.0}
            })))
            .mount(&server)
            .await;

        let adapter = OpenWeatherCurrent::with_base_url(Client::new(), "K".into(), server.uri());
        let payload = adapter.fetch(&madrid()).await.unwrap();

        let DisplayPayload::Current(snapshot) = payload else {
            panic!("expected current conditions");
        };
        assert_eq!(snapshot.condition_text, "Sin descripción disponible");
    }

    #[tokio::test]
    async fn unauthorized_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message":"Invalid API key"}"#),
            )
            .mount(&server)
            .await;

        let adapter = OpenWeatherCurrent::with_base_url(Client::new(), "BAD".into(), server.uri());
        let err = adapter.fetch(&madrid()).await.unwrap_err();

        assert!(matches!(err, QueryError::Transport { .. }));
        assert!(err.to_string().contains("401"));
    }
}
