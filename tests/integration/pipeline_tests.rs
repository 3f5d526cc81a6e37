//! End-to-end tests from attribute log to output files
//!
//! Tests cover:
//! - PDF report generation
//! - PNG image generation
//! - Trailing window with a fixed clock
//! - Failing runs leave no output behind

use std::fs;
use std::path::Path;

use chrono::Local;
use clap::Parser;

use crate::common::synthetic::*;
use crate::common::at;
use smartplot::config::{Cli, RunConfig};
use smartplot::parsers::FixedClock;
use smartplot::pipeline;
use smartplot::settings::UserSettings;
use smartplot::SmartPlotError;

fn config(args: &[&str]) -> RunConfig {
    let mut argv = vec!["smartplot"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    RunConfig::resolve(&cli, &UserSettings::default()).unwrap()
}

fn write_log(dir: &Path, contents: &str) -> String {
    let path = dir.join("attrlog.ST3000DM001-1CH166-Z1F5HEZ6.ata.csv");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

/// Names of everything in `dir` except the input log
fn outputs(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| !n.starts_with("attrlog."))
        .collect();
    names.sort();
    names
}

fn clock() -> FixedClock {
    FixedClock(nov_2016(30))
}

// ============================================
// PDF Tests
// ============================================

#[test]
fn test_pdf_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &daily_log(nov_2016(30), 3));
    let output = dir.path().join("report.pdf");
    let config = config(&["-o", output.to_str().unwrap(), input.as_str()]);

    let report = pipeline::build_report(&config, clock()).unwrap();
    assert_eq!(report.series.len(), 3);
    assert_eq!(report.summary.lines, 144);

    let written = pipeline::render(&config, &report, Local::now()).unwrap();
    assert_eq!(written, vec![output.clone()]);

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(outputs(dir.path()), vec!["report.pdf"]);
}

#[test]
fn test_pdf_report_with_event_and_window() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &daily_log(nov_2016(30), 30));
    let output = dir.path().join("last-week.pdf");
    let config = config(&[
        "-o",
        output.to_str().unwrap(),
        "-d",
        "7",
        "-e",
        "27.11.2016-12:00",
        input.as_str(),
    ]);

    let report = pipeline::build_report(&config, clock()).unwrap();
    assert_eq!(report.summary.first, Some(at("2016-11-23 00:00:00")));
    assert!(report.event.as_ref().unwrap().in_range);
    assert!(report.warnings.is_empty());

    pipeline::render(&config, &report, Local::now()).unwrap();
    assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_pdf_report_for_empty_window() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &daily_log(nov_2016(30), 2));
    let output = dir.path().join("empty.pdf");
    let config = config(&["-o", output.to_str().unwrap(), "-d", "1", input.as_str()]);

    let report = pipeline::build_report(&config, FixedClock(at("2017-06-01 00:00:00"))).unwrap();
    assert!(report.series.is_empty());

    pipeline::render(&config, &report, Local::now()).unwrap();
    assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
}

// ============================================
// PNG Tests
// ============================================

#[test]
fn test_png_images() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &daily_log(nov_2016(30), 2));
    let charts = dir.path().join("charts");
    let config = config(&[
        "-f",
        "PNG",
        "-o",
        charts.to_str().unwrap(),
        "--values",
        "normalized",
        input.as_str(),
    ]);

    let report = pipeline::build_report(&config, clock()).unwrap();
    let written = pipeline::render(&config, &report, Local::now()).unwrap();

    assert_eq!(written.len(), 3);
    assert_eq!(
        outputs(&charts),
        vec!["attr-194.png", "attr-5.png", "attr-9.png"]
    );
    for path in &written {
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

#[test]
fn test_png_selected_attribute() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &daily_log(nov_2016(30), 1));
    let config = config(&[
        "-f",
        "png",
        "-o",
        dir.path().to_str().unwrap(),
        "-a",
        "194",
        input.as_str(),
    ]);

    let report = pipeline::build_report(&config, clock()).unwrap();
    pipeline::render(&config, &report, Local::now()).unwrap();
    assert_eq!(outputs(dir.path()), vec!["attr-194.png"]);
}

// ============================================
// Failure Tests
// ============================================

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    let config = config(&[missing.to_str().unwrap()]);

    let err = pipeline::build_report(&config, clock()).unwrap_err();
    assert!(matches!(err, SmartPlotError::InputNotFound { .. }));
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let contents = daily_log(nov_2016(30), 1) + "\n30.11.2016 01:00;\t5;100;0;";
    let input = write_log(dir.path(), &contents);
    let output = dir.path().join("report.pdf");
    let config = config(&["-o", output.to_str().unwrap(), input.as_str()]);

    let err = pipeline::build_report(&config, clock()).unwrap_err();
    assert_eq!(err.line(), Some(49));
    assert!(outputs(dir.path()).is_empty());
}

#[test]
fn test_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), &daily_log(nov_2016(30), 1));
    let output = dir.path().join("missing-dir").join("report.pdf");
    let config = config(&["-o", output.to_str().unwrap(), input.as_str()]);

    let report = pipeline::build_report(&config, clock()).unwrap();
    let err = pipeline::render(&config, &report, Local::now()).unwrap_err();
    assert!(matches!(err, SmartPlotError::OutputWriteFailure { .. }));
    assert!(!output.exists());
}
