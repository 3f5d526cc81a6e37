//! smartplot - plot S.M.A.R.T. attribute logs written by smartd
//!
//! Reads a smartd attribute log and writes a PDF report or one PNG chart per
//! attribute.

use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use smartplot::config::{Cli, RunConfig};
use smartplot::parsers::SystemClock;
use smartplot::pipeline;
use smartplot::settings::UserSettings;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => UserSettings::load_from(path),
        None => UserSettings::load(),
    };
    let config = RunConfig::resolve(&cli, &settings)?;
    tracing::debug!("Run configuration: {:?}", config);

    if cli.save_settings {
        let updated = config.to_settings(&settings);
        let saved = match &cli.config {
            Some(path) => updated.save_to(path),
            None => updated.save(),
        };
        if let Err(e) = saved {
            tracing::warn!("Could not save settings: {}", e);
        }
    }

    let run_time = Local::now();
    let report = pipeline::build_report(&config, SystemClock)
        .with_context(|| format!("failed to read {}", config.input.display()))?;

    println!("{}", report.summary);

    let written =
        pipeline::render(&config, &report, run_time).context("failed to write output")?;
    for path in &written {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    println!(
        "smartplot v{} - S.M.A.R.T. attribute log plotter\n",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
