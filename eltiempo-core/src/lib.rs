//! Core library for the `eltiempo` weather query client.
//!
//! This crate defines:
//! - Input validation and geocoding (place name to coordinates)
//! - Abstraction over weather/map provider adapters
//! - Condition-code translation and markup rendering
//! - Configuration & credentials handling
//!
//! It is used by `eltiempo-cli`, but can also be reused by other binaries or
//! services.

pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod render;

pub use client::WeatherQueryClient;
pub use config::{Config, ServiceConfig};
pub use error::QueryError;
pub use geocode::Geocoder;
pub use model::{
    DisplayPayload, ForecastDay, ForecastSeries, GeoLocation, LongRangeSample, MapDescriptor,
    PlaceQuery, WeatherSnapshot,
};
pub use provider::{ApiService, Endpoints, ProviderAdapter, ProviderKind};
