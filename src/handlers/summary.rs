//! Daily temperature summary handlers.
//!
//! `/api/v1.0/<start>` and `/api/v1.0/<start>/<end>` return one
//! `{date, TMIN, TAVG, TMAX}` entry per date in the requested range.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::handlers::{error_response, parse_date};
use crate::logging::generate_request_id;
use crate::state::AppState;

const SINCE_ENDPOINT: &str = "/api/v1.0/:start";
const RANGE_ENDPOINT: &str = "/api/v1.0/:start/:end";

/// Handle GET /api/v1.0/:start requests
pub async fn summary_since_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    let request_id = generate_request_id();
    let params = format!("start={}", start);

    let start = match parse_date("start", &start) {
        Ok(date) => date,
        Err(error) => return error_response(error, SINCE_ENDPOINT, &request_id, Some(&params)),
    };

    summarize(&state, SINCE_ENDPOINT, &request_id, &params, start, None).await
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn summary_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    let request_id = generate_request_id();
    let params = format!("start={}, end={}", start, end);

    let (start, end) = match (parse_date("start", &start), parse_date("end", &end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(error), _) | (_, Err(error)) => {
            return error_response(error, RANGE_ENDPOINT, &request_id, Some(&params))
        }
    };

    summarize(&state, RANGE_ENDPOINT, &request_id, &params, start, Some(end)).await
}

async fn summarize(
    state: &AppState,
    endpoint: &str,
    request_id: &str,
    params: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Response {
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        start = %start,
        end = ?end,
        "Processing temperature summary"
    );

    match state.store.temperature_summary(start, end).await {
        Ok(summary) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                row_count = summary.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Temperature summary successful"
            );
            Json(summary).into_response()
        }
        Err(error) => error_response(error, endpoint, request_id, Some(params)),
    }
}
