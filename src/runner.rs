//! single request run: fetch, report status, release
use crate::{error::Error, request, response::StatusCode};
use log::{debug, warn};
use std::io::Write;

/// Endpoint the binary reports on.
pub const ENDPOINT: &str = "http://example.com";

/// Sends one GET request to `uri`, writes `Status: <status text>` line to `out`
/// and releases the response.
///
/// Any failure of the request is returned as it is. The response is released
/// whatever its status code, also when writing to `out` fails.
pub fn run<W: Write + ?Sized>(uri: &str, out: &mut W) -> Result<StatusCode, Error> {
    let response = request::get(uri)?;
    let code = response.status_code();
    debug!("{} answered with {}", uri, response.status());

    writeln!(out, "Status: {}", response.status())?;
    out.flush()?;

    if let Err(e) = response.close() {
        warn!("failed to release response body: {}", e);
    }

    Ok(code)
}
