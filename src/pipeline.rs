//! One run: parse, aggregate, render.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::aggregate::{aggregate, Report};
use crate::config::RunConfig;
use crate::error::Result;
use crate::export::{renderer_for, DocumentInfo};
use crate::parsers::{Clock, Smartd};

/// Parse the input and build the report. The input file is closed when this
/// returns.
pub fn build_report<C: Clock>(config: &RunConfig, clock: C) -> Result<Report> {
    let parser = Smartd::with_clock(config.parse_options(), clock);
    let log = parser.parse_file(&config.input)?;
    Ok(aggregate(log, &config.aggregate_options()))
}

/// Render a report to the outputs the run asks for
pub fn render(
    config: &RunConfig,
    report: &Report,
    run_time: DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    let info = DocumentInfo {
        source_name: config.source_name(),
        author: config.author.clone(),
        created: run_time,
    };
    renderer_for(config, info).render(report)
}
