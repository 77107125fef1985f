//! Markup rendering. Every payload and every error becomes one self-contained
//! HTML fragment; the presenter replaces the whole output region with it.

use crate::error::QueryError;
use crate::model::{
    DisplayPayload, ForecastDay, GeoLocation, MapDescriptor, PlaceQuery, WeatherSnapshot,
};

/// Progress line shown while the geocoder runs.
pub fn geocoding_progress(query: &PlaceQuery) -> String {
    format!("Geolocalizando \"{query}\"...")
}

/// Progress line shown between geocoding and the provider fetch.
pub fn fetch_progress(location: &GeoLocation) -> String {
    format!(
        "Obteniendo datos para <strong>{}</strong>...",
        location.display_name
    )
}

/// Terminal error rendering; the only user-visible failure channel.
pub fn render_error(err: &QueryError) -> String {
    format!("Error: {err}")
}

/// Render a payload into a self-contained fragment.
pub fn render(location: &GeoLocation, payload: &DisplayPayload) -> String {
    match payload {
        DisplayPayload::Current(snapshot) => render_current(location, snapshot),
        DisplayPayload::Forecast(series) => render_days(
            &format!("Pronóstico a 15 días para {}", location.display_name),
            None,
            &series.days,
        ),
        DisplayPayload::LongRange(sample) => render_days(
            &format!("Pronóstico a 3 meses para {}", location.display_name),
            Some("A continuación se muestran días representativos:"),
            &sample.days,
        ),
        DisplayPayload::Map(map) => render_map(location, map),
    }
}

fn render_current(location: &GeoLocation, snapshot: &WeatherSnapshot) -> String {
    let mut html = format!(
        "<h3>Tiempo Actual en {}</h3>\n\
         <p><strong>Condiciones:</strong> {}</p>\n\
         <p><strong>Temperatura:</strong> {} °C</p>\n\
         <p><strong>Viento:</strong> {} m/s</p>\n",
        location.display_name, snapshot.condition_text, snapshot.temperature_c, snapshot.wind_speed,
    );
    if let Some(humidity) = snapshot.humidity_pct {
        html.push_str(&format!("<p><strong>Humedad:</strong> {humidity}%</p>\n"));
    }
    html.push_str(&format!(
        "<p><strong>Observado:</strong> {}</p>",
        snapshot.observed_at
    ));
    html
}

fn render_days(title: &str, lead: Option<&str>, days: &[ForecastDay]) -> String {
    let mut html = format!("<h3>{title}</h3>\n");
    if let Some(lead) = lead {
        html.push_str(&format!("<p>{lead}</p>\n"));
    }
    for day in days {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}, Temp Máx: {} °C, Temp Mín: {} °C</p>\n",
            day.date, day.condition_text, day.temp_max_c, day.temp_min_c,
        ));
    }
    html
}

fn render_map(location: &GeoLocation, map: &MapDescriptor) -> String {
    format!(
        "<h3>Mapa de {}</h3>\n\
         <iframe width=\"425\" height=\"350\" src=\"{}\"></iframe>\n\
         <p><a href=\"{}\">Ver mapa más grande</a></p>",
        location.display_name, map.embed_url, map.viewer_url,
    )
}
