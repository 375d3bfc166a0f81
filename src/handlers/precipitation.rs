//! Precipitation endpoint handler.
//!
//! Returns every `{date, prcp}` reading on or after the observation cutoff,
//! one entry per measurement row.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::handlers::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let cutoff = state.observation_cutoff();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        cutoff = %cutoff,
        "Processing precipitation query"
    );

    match state.store.precipitation_since(cutoff).await {
        Ok(readings) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                row_count = readings.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Precipitation query successful"
            );
            Json(readings).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
