//! Turns a parsed log into named series ready for rendering.
//!
//! No numbers are changed here. The aggregator resolves display names,
//! applies the optional attribute selection, checks the event marker against
//! the timeline and computes the run summary.

use std::fmt;

use chrono::NaiveDateTime;

use crate::catalog::AttributeName;
use crate::error::{Result, SmartPlotError};
use crate::parsers::smartd::TIMESTAMP_FORMAT;
use crate::parsers::types::{AttributeSeries, ParsedLog, Sample};

/// Layout of the event marker on the command line (`DD.MM.YYYY-HH:MM`)
pub const EVENT_FORMAT: &str = "%d.%m.%Y-%H:%M";

/// Parse an event marker such as `24.12.2016-18:30`.
pub fn parse_event(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), EVENT_FORMAT).map_err(|e| {
        SmartPlotError::InvalidRunParameter(format!(
            "event date {:?} does not match DD.MM.YYYY-HH:MM: {}",
            text, e
        ))
    })
}

/// An attribute series with its display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedSeries {
    pub name: AttributeName,
    pub series: AttributeSeries,
}

impl NamedSeries {
    pub fn id(&self) -> u8 {
        self.series.id
    }

    pub fn display_name(&self) -> String {
        self.name.to_string()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.series.samples
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.series.timestamps()
    }

    pub fn normalized_values(&self) -> Vec<u16> {
        self.series.normalized_values()
    }

    pub fn raw_values(&self) -> Vec<u64> {
        self.series.raw_values()
    }
}

/// Event annotation handed to the renderer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventMarker {
    pub at: NaiveDateTime,
    /// False when the event lies outside the plotted timeline
    pub in_range: bool,
}

/// Numbers for the textual run summary
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    /// Accepted log lines
    pub lines: usize,
    pub attributes: usize,
    /// Accepted samples over all packaged attributes
    pub samples: usize,
    pub event: Option<NaiveDateTime>,
}

impl Summary {
    /// `first - last`, or `(empty)` when nothing was accepted
    pub fn time_range(&self) -> String {
        match (self.first, self.last) {
            (Some(first), Some(last)) => format!(
                "{} - {}",
                first.format(TIMESTAMP_FORMAT),
                last.format(TIMESTAMP_FORMAT)
            ),
            _ => "(empty)".to_string(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time range: {}", self.time_range())?;
        writeln!(f, "Got {} values...", self.lines)?;
        write!(
            f,
            "{} attributes, {} samples",
            self.attributes, self.samples
        )?;
        if let Some(event) = self.event {
            write!(f, "\nEvent: {}", event.format(EVENT_FORMAT))?;
        }
        Ok(())
    }
}

/// Everything a renderer needs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub series: Vec<NamedSeries>,
    pub summary: Summary,
    pub event: Option<EventMarker>,
    pub warnings: Vec<String>,
}

impl Report {
    /// Shared x range of all charts
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.summary.first?, self.summary.last?))
    }
}

/// Aggregation settings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    pub event: Option<NaiveDateTime>,
    /// Only package these ids, in log order. `None` keeps all.
    pub attributes: Option<Vec<u8>>,
}

/// Name, select and summarize the parsed series.
pub fn aggregate(log: ParsedLog, options: &AggregateOptions) -> Report {
    let mut warnings = Vec::new();

    if let Some(wanted) = &options.attributes {
        for id in wanted {
            if log.get(*id).is_none() {
                let msg = format!(
                    "Attribute {} ({}) does not appear in the log",
                    id,
                    AttributeName::resolve(*id)
                );
                tracing::warn!("{}", msg);
                warnings.push(msg);
            }
        }
    }

    let span = log.timeline.span();
    let series: Vec<NamedSeries> = log
        .series
        .into_iter()
        .filter(|s| match &options.attributes {
            Some(wanted) => wanted.contains(&s.id),
            None => true,
        })
        .map(|series| NamedSeries {
            name: AttributeName::resolve(series.id),
            series,
        })
        .collect();

    let event = options.event.map(|at| {
        let in_range = matches!(span, Some((first, last)) if first <= at && at <= last);
        if !in_range {
            let msg = "Event date is outside of plot limit.".to_string();
            tracing::warn!("{}", msg);
            warnings.push(msg);
        }
        EventMarker { at, in_range }
    });

    let summary = Summary {
        first: span.map(|(first, _)| first),
        last: span.map(|(_, last)| last),
        lines: log.timeline.len(),
        attributes: series.len(),
        samples: series.iter().map(|s| s.series.len()).sum(),
        event: options.event,
    };

    Report {
        series,
        summary,
        event,
        warnings,
    }
}
