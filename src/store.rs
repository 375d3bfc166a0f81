//! SQLite access for the climate dataset.
//!
//! [`ClimateStore`] wraps a read-only connection pool and exposes one method
//! per query the API serves. Each query holds a pooled connection only while
//! it runs.

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{KonaError, Result};
use crate::logging::log_dataset_stats;
use crate::state::{
    AppState, DatasetStats, Measurement, PrecipitationReading, Station, StationActivity,
    TemperatureObservation, TemperatureSummary,
};

/// Column probes run at startup. Preparing them fails if a declared column is missing.
const SCHEMA_PROBES: [(&str, &str); 2] = [
    ("station", "SELECT id, station, name FROM station LIMIT 0"),
    (
        "measurement",
        "SELECT station, date, prcp, tobs FROM measurement LIMIT 0",
    ),
];

// Readings are cast to REAL in every query: datasets without column
// affinity may store whole-number readings as INTEGER.

/// Per-date aggregates before the mean is rounded
#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    date: NaiveDate,
    tmin: f64,
    tavg: f64,
    tmax: f64,
}

impl From<SummaryRow> for TemperatureSummary {
    fn from(row: SummaryRow) -> Self {
        // Rounding must not push the mean outside [min, max]
        let tavg = round_to_hundredths(row.tavg).clamp(row.tmin, row.tmax);
        TemperatureSummary {
            date: row.date,
            tmin: row.tmin,
            tavg,
            tmax: row.tmax,
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Read-only handle on the climate dataset
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the dataset at `path` read-only and verify its schema
    pub async fn connect(path: &Path, max_connections: u32) -> Result<Self> {
        if !path.exists() {
            return Err(KonaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Opened dataset: {}", path.display());

        let store = Self { pool };
        store.verify_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool, e.g. an in-memory fixture
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Check that both tables expose the declared columns
    pub async fn verify_schema(&self) -> Result<()> {
        for (table, probe) in SCHEMA_PROBES {
            sqlx::query(probe)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| KonaError::Schema {
                    message: format!("table `{}` does not match the expected layout: {}", table, e),
                })?;
            debug!(table = table, "Schema check passed");
        }
        Ok(())
    }

    /// Every measurement on or after `since`, one entry per row
    pub async fn precipitation_since(&self, since: NaiveDate) -> Result<Vec<PrecipitationReading>> {
        let rows = sqlx::query_as::<_, PrecipitationReading>(
            r#"
            SELECT date, CAST(prcp AS REAL) AS prcp
            FROM measurement
            WHERE date >= ?1
            ORDER BY date, station
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All stations ordered by id
    pub async fn stations(&self) -> Result<Vec<Station>> {
        let rows = sqlx::query_as::<_, Station>(
            r#"
            SELECT id, station, name
            FROM station
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Row counts per station, busiest first, ties by station code
    pub async fn station_activity(&self) -> Result<Vec<StationActivity>> {
        let rows = sqlx::query_as::<_, StationActivity>(
            r#"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The station with the most measurement rows, if any rows exist
    pub async fn most_active_station(&self) -> Result<Option<StationActivity>> {
        let row = sqlx::query_as::<_, StationActivity>(
            r#"
            SELECT station, COUNT(*) AS observations
            FROM measurement
            GROUP BY station
            ORDER BY observations DESC, station ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Raw temperature observations of one station on or after `since`
    pub async fn temperature_observations(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<TemperatureObservation>> {
        let rows = sqlx::query_as::<_, TemperatureObservation>(
            r#"
            SELECT date, CAST(tobs AS REAL) AS tobs
            FROM measurement
            WHERE station = ?1 AND date >= ?2
            ORDER BY date
            "#,
        )
        .bind(station)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Daily min/avg/max temperature for `start..=end`, or from `start` on when `end` is `None`.
    ///
    /// All three aggregates come from one grouped query, so every entry
    /// describes a single date. Dates with no temperature readings are omitted.
    pub async fn temperature_summary(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<TemperatureSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT date,
                   CAST(MIN(tobs) AS REAL) AS tmin,
                   CAST(AVG(tobs) AS REAL) AS tavg,
                   CAST(MAX(tobs) AS REAL) AS tmax
            FROM measurement
            WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)
            GROUP BY date
            HAVING COUNT(tobs) > 0
            ORDER BY date
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TemperatureSummary::from).collect())
    }

    /// The most recent `limit` measurement rows, newest first
    pub async fn latest_measurements(&self, limit: u32) -> Result<Vec<Measurement>> {
        let rows = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT station,
                   date,
                   CAST(prcp AS REAL) AS prcp,
                   CAST(tobs AS REAL) AS tobs
            FROM measurement
            ORDER BY date DESC, station
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Row counts and date span of the dataset
    pub async fn dataset_stats(&self) -> Result<DatasetStats> {
        let stats = sqlx::query_as::<_, DatasetStats>(
            r#"
            SELECT (SELECT COUNT(*) FROM station) AS station_count,
                   (SELECT COUNT(*) FROM measurement) AS measurement_count,
                   (SELECT MIN(date) FROM measurement) AS first_date,
                   (SELECT MAX(date) FROM measurement) AS last_date
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}

/// Open the dataset named by the configuration and build the application state
pub async fn load_dataset(path: &Path, mut config: Config) -> Result<AppState> {
    config
        .data
        .database_path
        .get_or_insert_with(|| path.to_path_buf());

    let store = ClimateStore::connect(path, config.data.max_connections).await?;

    let stats = store.dataset_stats().await?;
    log_dataset_stats(&path.display().to_string(), &stats);

    Ok(AppState::new(config, store))
}
