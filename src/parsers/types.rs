use chrono::{Local, NaiveDateTime};

use crate::error::Result;

/// One decoded observation of one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// Vendor-scaled health value, usually 1..=253
    pub normalized: u16,
    /// Raw value after corrections
    pub raw: u64,
}

/// All samples of one attribute id, in file order.
///
/// Each sample carries its own timestamp, so a series stays correct when the
/// attribute is missing from some lines of the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSeries {
    pub id: u8,
    pub samples: Vec<Sample>,
}

impl AttributeSeries {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn normalized_values(&self) -> Vec<u16> {
        self.samples.iter().map(|s| s.normalized).collect()
    }

    pub fn raw_values(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.raw).collect()
    }
}

/// One timestamp per accepted log line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalTimeline {
    times: Vec<NaiveDateTime>,
}

impl GlobalTimeline {
    pub fn push(&mut self, timestamp: NaiveDateTime) {
        self.times.push(timestamp);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Earliest timestamp. Local clocks can step back, so this is not
    /// necessarily the first line.
    pub fn earliest(&self) -> Option<NaiveDateTime> {
        self.times.iter().min().copied()
    }

    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.times.iter().max().copied()
    }

    /// `(earliest, latest)` or `None` for an empty timeline
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.earliest()?, self.latest()?))
    }

    pub fn as_slice(&self) -> &[NaiveDateTime] {
        &self.times
    }
}

/// Parsed attribute log
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub timeline: GlobalTimeline,
    /// Series in the order their id was first seen
    pub series: Vec<AttributeSeries>,
}

impl ParsedLog {
    /// Find the series for an attribute id
    pub fn get(&self, id: u8) -> Option<&AttributeSeries> {
        self.series.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> Vec<u8> {
        self.series.iter().map(|s| s.id).collect()
    }

    pub fn sample_count(&self) -> usize {
        self.series.iter().map(AttributeSeries::len).sum()
    }
}

/// Trait for attribute log parsers
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<ParsedLog>;
}

/// Options that change what the parser keeps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep only lines from the last N days before parse time
    pub window_days: Option<u32>,
    /// Seagate interpretation of raw read/seek error rates
    pub seagate: bool,
}

/// Source of "now" for the trailing window cutoff
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
