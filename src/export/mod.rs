//! Chart export (PDF, PNG).
//!
//! Both exporters draw the same layout: one page or image per attribute,
//! one panel per selected value kind, x axis spanning the whole timeline.

pub mod atomic;
pub mod pdf;
pub mod png;

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::aggregate::{NamedSeries, Report};
use crate::config::{OutputKind, RunConfig};
use crate::error::Result;

pub use pdf::PdfRenderer;
pub use png::PngRenderer;

/// Which value of a sample a panel shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Raw,
    Normalized,
}

impl ValueKind {
    /// Panel title suffix
    pub fn title_suffix(&self) -> &'static str {
        match self {
            ValueKind::Raw => "RAW_VALUE",
            ValueKind::Normalized => "VALUE",
        }
    }

    pub fn legend(&self) -> &'static str {
        match self {
            ValueKind::Raw => "Raw Value",
            ValueKind::Normalized => "Current Value",
        }
    }

    /// Line color as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            ValueKind::Raw => [0, 0, 0],
            ValueKind::Normalized => [0, 0, 255],
        }
    }

    pub fn points(&self, series: &NamedSeries) -> Vec<(NaiveDateTime, f64)> {
        series
            .samples()
            .iter()
            .map(|s| {
                let value = match self {
                    ValueKind::Raw => s.raw as f64,
                    ValueKind::Normalized => f64::from(s.normalized),
                };
                (s.timestamp, value)
            })
            .collect()
    }
}

/// Event marker color
pub const EVENT_COLOR: [u8; 3] = [255, 0, 0];

/// Metadata shared by all outputs of one run
#[derive(Clone, Debug)]
pub struct DocumentInfo {
    /// Input file name
    pub source_name: String,
    pub author: String,
    pub created: DateTime<Local>,
}

impl DocumentInfo {
    pub fn title(&self) -> String {
        format!("Analysis of {}", self.source_name)
    }
}

/// Something that turns a report into files
pub trait Renderer {
    /// Render every series. Returns the paths written. Nothing is left on
    /// disk when this fails.
    fn render(&self, report: &Report) -> Result<Vec<PathBuf>>;
}

/// Pick the renderer for a run
pub fn renderer_for(config: &RunConfig, info: DocumentInfo) -> Box<dyn Renderer> {
    match config.kind {
        OutputKind::Pdf => Box::new(PdfRenderer::new(config.output.clone(), config.values, info)),
        OutputKind::Png => Box::new(PngRenderer::new(config.output.clone(), config.values)),
    }
}

/// Maps timestamps and values of one panel to `0.0..=1.0`
#[derive(Clone, Copy, Debug)]
pub struct Scale {
    start: NaiveDateTime,
    span_secs: f64,
    min: f64,
    range: f64,
}

impl Scale {
    pub fn new(span: (NaiveDateTime, NaiveDateTime), points: &[(NaiveDateTime, f64)]) -> Self {
        let mut data_min = f64::MAX;
        let mut data_max = f64::MIN;
        for &(_, val) in points {
            data_min = data_min.min(val);
            data_max = data_max.max(val);
        }
        if points.is_empty() {
            data_min = 0.0;
            data_max = 0.0;
        }

        // flat series sit in the middle of the panel
        let (min, range) = if (data_max - data_min).abs() < 0.0001 {
            (data_min - 0.5, 1.0)
        } else {
            (data_min, data_max - data_min)
        };

        Self {
            start: span.0,
            span_secs: (span.1 - span.0).num_seconds() as f64,
            min,
            range,
        }
    }

    pub fn x_ratio(&self, at: NaiveDateTime) -> f64 {
        if self.span_secs <= 0.0 {
            return 0.5;
        }
        (at - self.start).num_seconds() as f64 / self.span_secs
    }

    pub fn y_ratio(&self, value: f64) -> f64 {
        (value - self.min) / self.range
    }

    /// Bottom and top of the value axis
    pub fn value_bounds(&self) -> (f64, f64) {
        (self.min, self.min + self.range)
    }
}

/// Keep at most `max` points, always including the last one
pub fn downsample<T: Copy>(points: &[T], max: usize) -> Vec<T> {
    let step = (points.len() / max.max(1)).max(1);
    let mut out: Vec<T> = points.iter().step_by(step).copied().collect();
    if step > 1 && (points.len() - 1) % step != 0 {
        if let Some(last) = points.last() {
            out.push(*last);
        }
    }
    out
}

/// Split `0.0..=1.0` into dash intervals for a dashed marker line
pub fn dashes(dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut pos = 0.0;
    while pos < 1.0 {
        out.push((pos, (pos + dash).min(1.0)));
        pos += dash + gap;
    }
    out
}

/// Format an axis value without a trailing `.0` for integers
pub fn format_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
