//! Request helpers for the integration tests.

use once_cell::sync::Lazy;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
});

/// GET `path` on the server at `addr`, whatever the status.
pub async fn get(addr: &SocketAddr, path: &str) -> reqwest::Result<Response> {
    CLIENT.get(format!("http://{addr}{path}")).send().await
}

/// GET `path` and decode the body, failing on anything but 200.
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
) -> Result<T, Box<dyn Error>> {
    let response = get(addr, path).await?;
    match response.status() {
        StatusCode::OK => Ok(response.json().await?),
        status => Err(format!("GET {path} returned {status}: {}", response.text().await?).into()),
    }
}
