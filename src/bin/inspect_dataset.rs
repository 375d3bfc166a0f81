//! Print a quick overview of a climate dataset without starting the server.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use kona::ClimateStore;

#[derive(Parser, Debug)]
#[command(name = "inspect_dataset", about = "Inspect a kona SQLite dataset")]
struct Args {
    /// Path to the SQLite dataset
    database: PathBuf,

    /// Number of busiest stations to list
    #[arg(short, long, default_value = "5")]
    top: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Inspecting dataset: {}", args.database.display());

    let store = ClimateStore::connect(&args.database, 1)
        .await
        .with_context(|| format!("failed to open {}", args.database.display()))?;

    let stats = store.dataset_stats().await.context("failed to read dataset stats")?;

    println!("\n=== DATASET ===");
    println!("  stations:     {}", stats.station_count);
    println!("  measurements: {}", stats.measurement_count);
    match (stats.first_date, stats.last_date) {
        (Some(first), Some(last)) => println!("  date span:    {} .. {}", first, last),
        _ => println!("  date span:    (no measurements)"),
    }

    println!("\nStations:");
    for station in store.stations().await.context("failed to list stations")? {
        println!("  {:>3}  {:<12} {}", station.id, station.station, station.name);
    }

    println!("\nMost active stations:");
    let activity = store
        .station_activity()
        .await
        .context("failed to count station activity")?;
    for entry in activity.iter().take(args.top) {
        println!("  {:<12} {} rows", entry.station, entry.observations);
    }

    println!("\nLatest measurements:");
    let latest = store
        .latest_measurements(args.top as u32)
        .await
        .context("failed to read latest measurements")?;
    for m in latest {
        println!(
            "  {}  {:<12} prcp={:<6} tobs={}",
            m.date,
            m.station,
            m.prcp.map_or("-".to_string(), |v| v.to_string()),
            m.tobs.map_or("-".to_string(), |v| v.to_string()),
        );
    }

    store.close().await;
    Ok(())
}
