//! smartd attribute log parser
//!
//! smartd (started with `-A` / `--attributelog`) appends one line per check:
//!
//! ```text
//! 2016-11-18 13:13:59;\t1;117;163158944;\t3;95;0;\t194;100;34;
//! ```
//!
//! Fields are separated by the two-character sequence `;\t`. The first field
//! is the local timestamp, every following field is `id;value;raw`. smartd
//! ends each record with a single `;`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;

use super::types::{
    AttributeSeries, Clock, GlobalTimeline, ParseOptions, Parseable, ParsedLog, Sample,
    SystemClock,
};
use crate::correction::CorrectionRules;
use crate::error::{Result, SmartPlotError};

/// Separator between the timestamp and attribute fields
pub const FIELD_SEPARATOR: &str = ";\t";
/// Separator inside an attribute field
pub const SUBFIELD_SEPARATOR: char = ';';
/// Timestamp layout written by smartd
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("Failed to compile regex")
});

/// Parse a smartd timestamp (`YYYY-MM-DD HH:MM:SS`).
pub fn parse_timestamp(field: &str) -> Option<NaiveDateTime> {
    if !TIMESTAMP_SHAPE.is_match(field) {
        return None;
    }
    NaiveDateTime::parse_from_str(field, TIMESTAMP_FORMAT).ok()
}

/// smartd attribute log parser
pub struct Smartd<C: Clock = SystemClock> {
    options: ParseOptions,
    clock: C,
}

impl Smartd<SystemClock> {
    pub fn new(options: ParseOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl Default for Smartd<SystemClock> {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl<C: Clock> Smartd<C> {
    pub fn with_clock(options: ParseOptions, clock: C) -> Self {
        Self { options, clock }
    }

    /// Earliest timestamp a line may carry and still be kept
    fn cutoff(&self) -> Option<NaiveDateTime> {
        let days = self.options.window_days?;
        let now = self.clock.now();
        // a window too large to represent keeps everything
        TimeDelta::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
    }

    fn builder(&self) -> LogBuilder {
        LogBuilder::new(self.cutoff(), CorrectionRules::new(self.options.seagate))
    }

    /// Parse a log file. The file is closed before this returns.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedLog> {
        let file = File::open(path).map_err(|source| SmartPlotError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_buffered(BufReader::new(file), path)
    }

    /// Parse from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParsedLog> {
        self.parse_buffered(reader, Path::new("<reader>"))
    }

    fn parse_buffered<R: BufRead>(&self, reader: R, origin: &Path) -> Result<ParsedLog> {
        let mut builder = self.builder();

        // Split on raw bytes so an undecodable line is reported by number
        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.map_err(|source| SmartPlotError::InputNotFound {
                path: origin.to_path_buf(),
                source,
            })?;
            let line_no = index + 1;
            let line = std::str::from_utf8(&bytes).map_err(|source| {
                SmartPlotError::InvalidEncoding {
                    line: line_no,
                    source,
                }
            })?;
            builder.push_line(line_no, line)?;
        }

        Ok(builder.finish())
    }

    /// Parse an iterator of lines, numbering them from 1
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<ParsedLog>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = self.builder();
        for (index, line) in lines.into_iter().enumerate() {
            builder.push_line(index + 1, line.as_ref())?;
        }
        Ok(builder.finish())
    }
}

impl<C: Clock> Parseable for Smartd<C> {
    fn parse(&self, file_contents: &str) -> Result<ParsedLog> {
        self.parse_lines(file_contents.lines())
    }
}

/// Accumulates series while lines are fed in file order
struct LogBuilder {
    cutoff: Option<NaiveDateTime>,
    rules: CorrectionRules,
    timeline: GlobalTimeline,
    series: Vec<AttributeSeries>,
    index: HashMap<u8, usize>,
    dropped: usize,
}

impl LogBuilder {
    fn new(cutoff: Option<NaiveDateTime>, rules: CorrectionRules) -> Self {
        Self {
            cutoff,
            rules,
            timeline: GlobalTimeline::default(),
            series: Vec::new(),
            index: HashMap::new(),
            dropped: 0,
        }
    }

    fn push_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim_end();
        if line.is_empty() {
            return Ok(());
        }
        // record terminator
        let line = line.strip_suffix(SUBFIELD_SEPARATOR).unwrap_or(line);

        let mut fields = line.split(FIELD_SEPARATOR);
        let time_field = fields.next().unwrap_or_default();
        let timestamp =
            parse_timestamp(time_field).ok_or_else(|| SmartPlotError::MalformedTimestamp {
                line: line_no,
                field: time_field.to_string(),
            })?;

        if let Some(cutoff) = self.cutoff {
            if timestamp < cutoff {
                self.dropped += 1;
                return Ok(());
            }
        }

        // Decode the whole line before storing anything from it
        let attributes = fields
            .map(|field| parse_attribute_field(line_no, field))
            .collect::<Result<Vec<_>>>()?;

        self.timeline.push(timestamp);
        for (id, normalized, raw) in attributes {
            let sample = Sample {
                timestamp,
                normalized,
                raw: self.rules.apply(id, raw),
            };
            let slot = match self.index.get(&id) {
                Some(&slot) => slot,
                None => {
                    self.series.push(AttributeSeries::new(id));
                    self.index.insert(id, self.series.len() - 1);
                    self.series.len() - 1
                }
            };
            self.series[slot].push(sample);
        }

        Ok(())
    }

    fn finish(self) -> ParsedLog {
        if self.dropped > 0 {
            tracing::debug!("Dropped {} lines outside the trailing window", self.dropped);
        }
        let log = ParsedLog {
            timeline: self.timeline,
            series: self.series,
        };
        tracing::info!(
            "Parsed {} lines, {} attributes, {} samples",
            log.timeline.len(),
            log.series.len(),
            log.sample_count()
        );
        log
    }
}

/// Split `id;value;raw` into its three numbers
fn parse_attribute_field(line_no: usize, field: &str) -> Result<(u8, u16, u64)> {
    let malformed = |reason: String| SmartPlotError::MalformedAttributeField {
        line: line_no,
        field: field.to_string(),
        reason,
    };

    let parts: Vec<&str> = field.split(SUBFIELD_SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(malformed(format!(
            "expected id;value;raw, found {} subfields",
            parts.len()
        )));
    }

    let id = parts[0]
        .parse::<u8>()
        .map_err(|e| malformed(format!("attribute id {:?}: {}", parts[0], e)))?;
    let normalized = parts[1]
        .parse::<u16>()
        .map_err(|e| malformed(format!("value {:?}: {}", parts[1], e)))?;
    let raw = parts[2]
        .parse::<u64>()
        .map_err(|e| malformed(format!("raw value {:?}: {}", parts[2], e)))?;

    Ok((id, normalized, raw))
}
