//!Sends a single HTTP GET request and reports the status of the response.
//!
//!The response body is never read by the runner. It is released as soon as the
//!status has been reported.
//!
//!## Example
//!```no_run
//!use fetch_status::runner;
//!
//!fn main() -> Result<(), fetch_status::error::Error> {
//!    let mut out = Vec::new();
//!    let code = runner::run(runner::ENDPOINT, &mut out)?;
//!
//!    assert!(code.is_success());
//!    Ok(())
//!}
//!```
pub mod body;
pub mod error;
pub mod request;
pub mod response;
pub mod runner;
pub mod stream;
pub mod uri;

#[cfg(test)]
mod testing;
