use anyhow::Context;
use clap::{Parser, Subcommand};
use eltiempo_core::{
    ApiService, Config, PlaceQuery, ProviderKind, WeatherQueryClient, render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "eltiempo", version, about = "Consulta el tiempo por localidad")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a keyed service.
    Configure {
        /// Service short name: "openweather" or "visualcrossing".
        service: String,
    },

    /// Current conditions for a place.
    Actual {
        /// Place name; prompted interactively when omitted.
        place: Option<String>,

        /// Use the keyed OpenWeatherMap source instead of Open-Meteo.
        #[arg(long)]
        openweather: bool,
    },

    /// 15-day daily forecast.
    Quincena {
        place: Option<String>,
    },

    /// 3-month outlook, sampled down to representative days.
    Trimestre {
        place: Option<String>,
    },

    /// Embedded map links for a place.
    Mapa {
        place: Option<String>,
    },

    /// Simulated conditions; no network beyond geocoding.
    Simulado {
        place: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service),
            Command::Actual { place, openweather } => {
                let kind = if openweather {
                    ProviderKind::CurrentOpenWeather
                } else {
                    ProviderKind::CurrentConditions
                };
                show(place, kind).await
            }
            Command::Quincena { place } => show(place, ProviderKind::ShortForecast).await,
            Command::Trimestre { place } => show(place, ProviderKind::LongForecast).await,
            Command::Mapa { place } => show(place, ProviderKind::MapEmbed).await,
            Command::Simulado { place } => show(place, ProviderKind::Simulated).await,
        }
    }
}

async fn show(place: Option<String>, kind: ProviderKind) -> anyhow::Result<()> {
    let raw = match place {
        Some(p) => p,
        None => inquire::Text::new("Localidad:")
            .prompt()
            .context("Failed to read place name")?,
    };

    let config = Config::load()?;
    let client = WeatherQueryClient::new(config);

    // Progress goes to stderr so stdout carries only the final fragment.
    if let Ok(query) = PlaceQuery::parse(&raw) {
        eprintln!("{}", render::geocoding_progress(&query));
    }

    println!("{}", client.query(&raw, kind).await);
    Ok(())
}

fn configure(service: &str) -> anyhow::Result<()> {
    let service = ApiService::try_from(service)?;

    let api_key = inquire::Password::new(&format!("Clave de API para {service}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.set_api_key(service, api_key);
    config.save()?;

    println!(
        "Clave guardada para '{}' en {}",
        service,
        Config::config_file_path()?.display()
    );
    Ok(())
}
