//! Round-trips a message through a compressed stage buffer and prints it.

use std::process::ExitCode;

use anyhow::{Context, Result};
use bufcodec::roundtrip::{self, RoundTripConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    // stdout carries the program's output; logs go to stderr
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).without_time())
        .try_init()
        .ok();
}

fn load_config() -> Result<RoundTripConfig> {
    dotenv::dotenv().ok();
    RoundTripConfig::load().context("loading round-trip configuration")
}

fn main() -> ExitCode {
    init_tracing();

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };

    match roundtrip::run(&cfg) {
        Ok(rt) => {
            println!("{}", rt.text());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
