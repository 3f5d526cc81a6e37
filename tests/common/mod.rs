//! Common test utilities shared across all test modules
//!
//! Builders for synthetic smartd attribute logs and assertion helpers.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Timestamp from `YYYY-MM-DD HH:MM:SS`, panicking on bad input
pub fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad test timestamp '{}': {}", text, e))
}

/// Test data generators for synthetic logs
pub mod synthetic {
    use super::*;

    /// One smartd line with record terminator
    pub fn line(timestamp: NaiveDateTime, attrs: &[(u8, u16, u64)]) -> String {
        let mut out = timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        out.push(';');
        for (id, value, raw) in attrs {
            out.push_str(&format!("\t{};{};{};", id, value, raw));
        }
        out
    }

    /// `days` days of half-hourly checks ending at `end`, each reporting
    /// temperature (194), reallocated sectors (5) and power-on hours (9)
    pub fn daily_log(end: NaiveDateTime, days: i64) -> String {
        let samples = days * 48;
        let start = end - TimeDelta::minutes(30 * (samples - 1));
        (0..samples)
            .map(|i| {
                let ts = start + TimeDelta::minutes(30 * i);
                line(
                    ts,
                    &[
                        (194, 100, 0x0028_0014_0000 + 30 + (i as u64 % 10)),
                        (5, 100, (i / 100) as u64),
                        (9, 99, 1000 + (i / 2) as u64),
                    ],
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Midnight of a day in November 2016
    pub fn nov_2016(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }
}

/// Assertion helpers for common test patterns
pub mod assertions {
    use smartplot::parsers::ParsedLog;

    /// Every series is non-empty and ordered by time
    pub fn assert_valid_series(log: &ParsedLog) {
        for series in &log.series {
            assert!(!series.is_empty(), "Series {} should not be empty", series.id);
            assert_eq!(series.normalized_values().len(), series.raw_values().len());
            assert_eq!(series.timestamps().len(), series.raw_values().len());
            for window in series.timestamps().windows(2) {
                assert!(
                    window[1] >= window[0],
                    "Series {} timestamps should be monotonic",
                    series.id
                );
            }
        }
    }

    /// Every sample timestamp appears on the global timeline
    pub fn assert_samples_on_timeline(log: &ParsedLog) {
        let timeline = log.timeline.as_slice();
        for series in &log.series {
            for ts in series.timestamps() {
                assert!(
                    timeline.contains(&ts),
                    "Sample at {} of attribute {} is not on the timeline",
                    ts,
                    series.id
                );
            }
        }
    }
}
