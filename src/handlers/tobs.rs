//! Temperature observations of the most active station.
//!
//! The most active station is the one with the most measurement rows; its
//! readings on or after the observation cutoff are returned as `[date, tobs]`.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::handlers::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let cutoff = state.observation_cutoff();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        cutoff = %cutoff,
        "Processing temperature observation query"
    );

    let busiest = match state.store.most_active_station().await {
        Ok(Some(busiest)) => busiest,
        Ok(None) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                "No measurements recorded, returning empty list"
            );
            return Json(Vec::<(NaiveDate, Option<f64>)>::new()).into_response();
        }
        Err(error) => return error_response(error, ENDPOINT, &request_id, None),
    };

    let params = format!("station={}", busiest.station);
    match state
        .store
        .temperature_observations(&busiest.station, cutoff)
        .await
    {
        Ok(observations) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                station = %busiest.station,
                station_rows = busiest.observations,
                row_count = observations.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Temperature observation query successful"
            );

            let rows: Vec<(NaiveDate, Option<f64>)> =
                observations.into_iter().map(|o| (o.date, o.tobs)).collect();
            Json(rows).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, Some(&params)),
    }
}
