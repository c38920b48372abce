use fetch_status::{error::Error, runner};
use std::io;

fn main() -> Result<(), Error> {
    env_logger::init();

    let stdout = io::stdout();
    runner::run(runner::ENDPOINT, &mut stdout.lock())?;

    Ok(())
}
