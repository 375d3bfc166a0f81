//! Station listing endpoint handler.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::handlers::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests.
///
/// Each station is rendered as an `[id, station_code, name]` array.
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing station listing"
    );

    match state.store.stations().await {
        Ok(stations) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                station_count = stations.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Station listing successful"
            );

            let rows: Vec<(i64, String, String)> = stations
                .into_iter()
                .map(|s| (s.id, s.station, s.name))
                .collect();
            Json(rows).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
