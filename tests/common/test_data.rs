//! Test data generation utilities.
//!
//! This module writes SQLite datasets laid out like `hawaii.sqlite`, filled
//! with deterministic readings so tests can compute expected answers.

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Executor;
use std::collections::HashMap;
use std::path::Path;

type Result<T> = std::result::Result<T, sqlx::Error>;

const SCHEMA: &str = r#"
    CREATE TABLE station (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
"#;

/// Stations written by [`create_generated_dataset`]
pub const STATIONS: [(&str, &str); 4] = [
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
    ("USC00511918", "HONOLULU OBSERVATORY 702.2, HI US"),
];

/// One measurement row as written to the fixture
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub station: String,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

impl FixtureRow {
    pub fn new(station: &str, date: NaiveDate, prcp: Option<f64>, tobs: Option<f64>) -> Self {
        Self {
            station: station.to_string(),
            date,
            prcp,
            tobs,
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Daily readings from 2016-06-01 to 2017-08-23.
///
/// Station `i` skips every `(i + 2)`th day, so the third station
/// (USC00519281) reports most often and the last one least often after it.
/// Every 17th day has no temperature, every 7th no precipitation.
pub fn generated_rows() -> Vec<FixtureRow> {
    let first = date(2016, 6, 1);
    let last = date(2017, 8, 23);
    let days = (last - first).num_days();

    let mut rows = Vec::new();
    for (i, (code, _)) in STATIONS.iter().enumerate().take(3) {
        for day in 0..=days {
            if day % (i as i64 + 2) == 0 {
                continue;
            }
            let tobs = if day % 17 == 0 {
                None
            } else {
                Some(65.0 + ((day + 3 * i as i64) % 11) as f64)
            };
            let prcp = if day % 7 == 0 {
                None
            } else {
                Some(((day * 13 + i as i64) % 50) as f64 / 100.0)
            };
            rows.push(FixtureRow::new(code, first + Duration::days(day), prcp, tobs));
        }
    }

    // The fourth station only reports a handful of days
    for day in 0..10 {
        rows.push(FixtureRow::new(
            STATIONS[3].0,
            date(2017, 8, 1) + Duration::days(day),
            Some(0.0),
            Some(80.0),
        ));
    }

    rows
}

/// Row count per station code
pub fn counts_by_station(rows: &[FixtureRow]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for row in rows {
        *counts.entry(row.station.clone()).or_insert(0) += 1;
    }
    counts
}

/// Write a dataset with the given stations and measurement rows
pub async fn create_dataset(
    path: &Path,
    stations: &[(&str, &str)],
    rows: &[FixtureRow],
) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    pool.execute(SCHEMA).await?;

    let mut tx = pool.begin().await?;
    for (i, (code, name)) in stations.iter().enumerate() {
        sqlx::query("INSERT INTO station (id, station, name) VALUES (?1, ?2, ?3)")
            .bind(i as i64 + 1)
            .bind(*code)
            .bind(*name)
            .execute(&mut *tx)
            .await?;
    }
    for row in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(&row.station)
            .bind(row.date)
            .bind(row.prcp)
            .bind(row.tobs)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    pool.close().await;
    Ok(())
}

/// Write the generated dataset and return the rows it contains
pub async fn create_generated_dataset(path: &Path) -> Result<Vec<FixtureRow>> {
    let rows = generated_rows();
    create_dataset(path, &STATIONS, &rows).await?;
    Ok(rows)
}

/// Write a dataset whose tables lack the columns kona expects
pub async fn create_mismatched_dataset(path: &Path) -> Result<()> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    pool.execute("CREATE TABLE station (id INTEGER PRIMARY KEY, code TEXT);")
        .await?;
    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_rows_busiest_station() {
        let counts = counts_by_station(&generated_rows());
        let (busiest, _) = counts.iter().max_by_key(|(_, c)| **c).unwrap();
        assert_eq!(busiest, "USC00519281");
    }
}
