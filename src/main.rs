//! WFQ scheduler simulation binary (C9): reads packet arrivals from stdin,
//! runs the simulation, and writes departures to stdout. Takes no
//! arguments and reads no environment configuration — every run uses the
//! default `Config`.

use std::io::{self, BufReader};
use std::process::ExitCode;

use wfq_sched::{run, Config};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();

    match run(&Config::default(), BufReader::new(stdin.lock()), stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
