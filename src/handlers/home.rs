//! Route listing served at `/`.

use tracing::debug;

/// Routes advertised by the landing page
pub const ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Handle GET / requests
pub async fn home_handler() -> String {
    debug!(endpoint = "/", "Serving route listing");

    let mut body = String::from("Welcome to the Climate API!\nAvailable Routes are:\n");
    for route in ROUTES {
        body.push_str(route);
        body.push('\n');
    }
    body
}
