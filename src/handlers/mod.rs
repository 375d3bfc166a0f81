//! HTTP request handlers for the kona API.
//!
//! This module contains all the endpoint handlers for the web server, the
//! router that wires them together, and the helpers they share.

pub mod heartbeat;
pub mod home;
pub mod precipitation;
pub mod stations;
pub mod summary;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use home::home_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use summary::{summary_range_handler, summary_since_handler};
pub use tobs::tobs_handler;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::{KonaError, Result};
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Date format accepted in path parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the application router over the shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(summary_since_handler))
        .route("/api/v1.0/:start/:end", get(summary_range_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parse a `YYYY-MM-DD` path parameter
pub fn parse_date(param: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| KonaError::InvalidParameter {
        param: param.to_string(),
        message: format!("'{}' is not a YYYY-MM-DD date ({})", value, e),
    })
}

/// Log a failed request and render it as a JSON error body
pub fn error_response(
    error: KonaError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    let status = error.status_code();
    error_response_with_status(error, status, endpoint, request_id, params)
}

/// Same as [`error_response`] with an explicit status code
pub fn error_response_with_status(
    error: KonaError,
    status: StatusCode,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        status,
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
