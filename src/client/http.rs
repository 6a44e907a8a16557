//! Blocking HTTP transport

use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Request, Response};
use tracing::{debug, info};

use crate::errors::Result;

/// Build the client used for one `run` invocation
///
/// No request timeout: a call blocks until the server answers or the
/// connection fails.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder().timeout(None::<Duration>).build()?)
}

/// Send `request`, returning the response and the time until its headers arrived
pub fn execute(client: &Client, request: Request) -> Result<(Response, Duration)> {
    debug!(method = %request.method(), url = %request.url(), "Sending request");

    let started = Instant::now();
    let response = client.execute(request)?;
    let elapsed = started.elapsed();

    info!(status = %response.status(), elapsed_ms = elapsed.as_millis() as u64, "Received response");
    Ok((response, elapsed))
}
