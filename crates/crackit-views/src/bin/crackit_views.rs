//! Derive a listing view from a JSON snapshot and print it as JSON.
//!
//! This binary delegates to `crackit_views::cli` for argument handling and
//! composition, keeping the behaviour testable without spawning a process.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use crackit_views::cli::{Args, run};
use crackit_views::{CliError, ViewSettings};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let args = Args::parse();
    match execute(&args) {
        Ok(output) => {
            write_output(&output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "view derivation failed");
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<String, CliError> {
    let settings = match ViewSettings::load_layered() {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(false);
            return Err(err);
        }
    };
    init_tracing(settings.json_logs);
    run(args, &settings)
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        drop(err);
    }
}

fn write_output(output: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{output}") {
        drop(err);
    }
}
