//! The query pipeline: validate input, geocode, fetch from the chosen
//! provider, render. One sequential chain per action; the geocode call
//! completes before the provider fetch starts, and any failure short-circuits
//! into a rendered error.

use reqwest::Client;

use crate::config::Config;
use crate::error::QueryError;
use crate::geocode::Geocoder;
use crate::model::PlaceQuery;
use crate::provider::{Endpoints, ProviderKind, adapter_from_config};
use crate::render;

#[derive(Debug)]
pub struct WeatherQueryClient {
    http: Client,
    geocoder: Geocoder,
    endpoints: Endpoints,
    config: Config,
}

impl WeatherQueryClient {
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        let geocoder = Geocoder::new(http.clone());
        Self {
            http,
            geocoder,
            endpoints: Endpoints::default(),
            config,
        }
    }

    /// Construction with explicit collaborators, letting callers point the
    /// client at alternative endpoints.
    pub fn with_parts(config: Config, geocoder: Geocoder, endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            geocoder,
            endpoints,
            config,
        }
    }

    /// Run one action end to end and return the fragment to display.
    ///
    /// Errors never escape: the terminal catch renders them as
    /// `Error: <message>`, the only user-visible failure channel.
    pub async fn query(&self, raw_input: &str, kind: ProviderKind) -> String {
        match self.run(raw_input, kind).await {
            Ok(html) => html,
            Err(err) => {
                tracing::debug!(%err, "query chain failed");
                render::render_error(&err)
            }
        }
    }

    async fn run(&self, raw_input: &str, kind: ProviderKind) -> Result<String, QueryError> {
        let query = PlaceQuery::parse(raw_input)?;

        tracing::info!(%query, variant = %kind, "starting query");

        let location = self.geocoder.geocode(&query).await?;

        let adapter = adapter_from_config(kind, &self.config, &self.http, &self.endpoints)?;
        let payload = adapter.fetch(&location).await?;

        Ok(render::render(&location, &payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_against(server: &MockServer) -> WeatherQueryClient {
        let geocoder = Geocoder::with_base_url(Client::new(), server.uri());
        let endpoints = Endpoints {
            open_meteo: server.uri(),
            openweather: server.uri(),
            visual_crossing: server.uri(),
        };
        WeatherQueryClient::with_parts(Config::default(), geocoder, endpoints)
    }

    async fn mount_madrid_geocode(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Madrid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "40.4168", "lon": "-3.7038", "display_name": "Madrid, España"}
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn madrid_end_to_end_current_conditions() {
        let server = MockServer::start().await;
        mount_madrid_geocode(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("current_weather", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": {
                    "temperature": 21.5,
                    "windspeed": 10,
                    "weathercode": 1,
                    "time": "2024-05-01T12:00"
                }
            })))
            .mount(&server)
            .await;

        let html = client_against(&server)
            .query("Madrid", ProviderKind::CurrentConditions)
            .await;

        assert!(html.contains("Madrid, España"));
        assert!(html.contains("21.5"));
        assert!(html.contains("Principalmente despejado"));
        assert!(!html.starts_with("Error:"));
    }

    #[tokio::test]
    async fn empty_input_renders_prompt_without_network() {
        // No mocks mounted: a network call would fail loudly. The input
        // check has to reject before that point.
        let server = MockServer::start().await;
        let html = client_against(&server)
            .query("   ", ProviderKind::CurrentConditions)
            .await;

        assert_eq!(
            html,
            "Error: Por favor, introduce una localidad válida."
        );
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_place_renders_no_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let html = client_against(&server)
            .query("Nergenshuizen", ProviderKind::CurrentConditions)
            .await;

        assert!(html.starts_with("Error:"));
        assert!(html.contains("No se encontró la localidad: Nergenshuizen"));
    }

    #[tokio::test]
    async fn provider_failure_renders_error_string() {
        let server = MockServer::start().await;
        mount_madrid_geocode(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let html = client_against(&server)
            .query("Madrid", ProviderKind::ShortForecast)
            .await;

        assert!(html.starts_with("Error:"));
        assert!(html.contains("500"));
    }

    #[tokio::test]
    async fn missing_api_key_renders_configure_hint() {
        let server = MockServer::start().await;
        mount_madrid_geocode(&server).await;

        let html = client_against(&server)
            .query("Madrid", ProviderKind::LongForecast)
            .await;

        assert!(html.starts_with("Error:"));
        assert!(html.contains("configure visualcrossing"));
    }

    #[tokio::test]
    async fn map_variant_needs_only_the_geocode_call() {
        let server = MockServer::start().await;
        mount_madrid_geocode(&server).await;

        let html = client_against(&server)
            .query("Madrid", ProviderKind::MapEmbed)
            .await;

        assert!(html.contains("Mapa de Madrid, España"));
        assert!(html.contains("openstreetmap.org"));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
