//! Application state and row types for kona.
//!
//! The `station` and `measurement` tables are declared here as plain Rust
//! types instead of being discovered at runtime. The shared [`AppState`] is
//! handed to every handler through axum's `State` extractor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::store::ClimateStore;

/// A row of the `station` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Station {
    /// Surrogate key
    pub id: i64,
    /// Station code, e.g. `USC00519281`
    pub station: String,
    /// Human-readable station name
    pub name: String,
}

/// A row of the `measurement` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    /// Code of the reporting station
    pub station: String,
    /// Observation date
    pub date: NaiveDate,
    /// Precipitation amount, if recorded
    pub prcp: Option<f64>,
    /// Temperature observation, if recorded
    pub tobs: Option<f64>,
}

/// One precipitation reading, serialized as `{date, prcp}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
}

/// One temperature observation for a single station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TemperatureObservation {
    pub date: NaiveDate,
    pub tobs: Option<f64>,
}

/// Number of measurement rows reported by a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// Daily temperature statistics across all stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub date: NaiveDate,
    #[serde(rename = "TMIN")]
    pub tmin: f64,
    /// Mean rounded to two decimal places
    #[serde(rename = "TAVG")]
    pub tavg: f64,
    #[serde(rename = "TMAX")]
    pub tmax: f64,
}

/// Size and date span of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DatasetStats {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only access to the climate dataset
    pub store: ClimateStore,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: ClimateStore) -> Self {
        Self { config, store }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, store: ClimateStore) -> Arc<Self> {
        Arc::new(Self::new(config, store))
    }

    /// First date served by the precipitation and tobs routes
    pub fn observation_cutoff(&self) -> NaiveDate {
        self.config.data.observation_cutoff
    }

    /// Display form of the dataset location
    pub fn database_path(&self) -> String {
        self.config
            .data
            .database_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<in-memory>".to_string())
    }
}
