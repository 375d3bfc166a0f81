//! # kona
//!
//! A small, read-only HTTP API over a climate observation dataset.
//!
//! The dataset is a SQLite file with a `station` table and a `measurement`
//! table (precipitation and temperature readings per station and date).
//! kona serves a fixed set of aggregate queries over it as JSON.
//!
//! ## Architecture
//!
//! - **Data Layer**: [`ClimateStore`] wraps a read-only connection pool
//! - **API Layer**: axum handlers, one per route, sharing an [`AppState`]
//! - **Configuration**: layered CLI / environment / JSON file settings

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{KonaError, Result};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_request_error,
};
pub use state::{
    AppState, DatasetStats, Measurement, PrecipitationReading, Station, StationActivity,
    TemperatureObservation, TemperatureSummary,
};
pub use store::{load_dataset, ClimateStore};
