//! `sequence` binary: lay out an HTML file for a viewport width.

use env_logger::{Builder, Env};
use log::error;
use sequence_cli::{Options, USAGE, run};
use std::env;
use std::io::{self, Write as _};
use std::process::exit;

fn main() {
    let _log_init: Result<(), _> = Builder::from_env(Env::default().filter_or("RUST_LOG", "warn"))
        .is_test(false)
        .try_init();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            let _written: io::Result<()> = io::stdout().lock().write_all(USAGE.as_bytes());
            return;
        }
        Err(err) => {
            error!("{err}");
            let _written: io::Result<()> = io::stderr().lock().write_all(USAGE.as_bytes());
            exit(2);
        }
    };

    match run(&options) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(err) = writeln!(stdout, "{output}") {
                error!("failed to write output: {err}");
                exit(1);
            }
        }
        Err(err) => {
            error!("error: {err:#}");
            exit(1);
        }
    }
}
