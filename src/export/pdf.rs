//! Multi-page PDF report.
//!
//! Page 1 summarizes the run, every following page holds one attribute.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use printpdf::*;

use super::atomic::PendingFile;
use super::{
    dashes, downsample, format_value, DocumentInfo, Renderer, Scale, ValueKind, EVENT_COLOR,
};
use crate::aggregate::{EventMarker, NamedSeries, Report, EVENT_FORMAT};
use crate::config::ValueSelection;
use crate::error::{Result, SmartPlotError};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f64 = 20.0;
/// Room left of the chart for value labels
const AXIS_MARGIN: f64 = 25.0;
/// Max points per line
const MAX_POINTS: usize = 2000;

const GENERATOR: &str = concat!("smartplot v", env!("CARGO_PKG_VERSION"));

pub struct PdfRenderer {
    path: PathBuf,
    values: ValueSelection,
    info: DocumentInfo,
}

struct Fonts {
    bold: IndirectFontRef,
    regular: IndirectFontRef,
}

/// Panel rectangle in mm
#[derive(Clone, Copy)]
struct Area {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

impl PdfRenderer {
    pub fn new(path: PathBuf, values: ValueSelection, info: DocumentInfo) -> Self {
        Self { path, values, info }
    }

    fn fail(&self, reason: impl ToString) -> SmartPlotError {
        SmartPlotError::output(&self.path, reason)
    }

    fn build(&self, report: &Report) -> Result<PdfDocumentReference> {
        let (doc, page1, layer1) = PdfDocument::new(
            self.info.title(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Summary",
        );

        let created = OffsetDateTime::from_unix_timestamp(self.info.created.timestamp())
            .map_err(|e| self.fail(e))?;
        let doc = doc
            .with_author(self.info.author.clone())
            .with_subject(self.info.title())
            .with_keywords(vec!["S.M.A.R.T. report by smartplot".to_string()])
            .with_creator(GENERATOR.to_string())
            .with_creation_date(created)
            .with_mod_date(created);

        let fonts = Fonts {
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| self.fail(e))?,
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| self.fail(e))?,
        };

        let layer = doc.get_page(page1).get_layer(layer1);
        self.draw_summary_page(&layer, &fonts, report);

        for series in &report.series {
            tracing::info!("Plotting {}...", series.display_name());
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Attribute {}", series.id()),
            );
            let layer = doc.get_page(page).get_layer(layer);
            self.draw_attribute_page(&layer, &fonts, report, series);
        }

        Ok(doc)
    }

    fn draw_summary_page(&self, layer: &PdfLayerReference, fonts: &Fonts, report: &Report) {
        let summary = &report.summary;
        layer.use_text(
            format!("S.M.A.R.T. report generated by {}", GENERATOR),
            20.0,
            Mm(MARGIN as f32),
            Mm(185.0),
            &fonts.bold,
        );

        let mut lines = vec![
            format!("Report date: {}", self.info.created.format("%Y-%m-%d %H:%M:%S")),
            format!("Source file: {}", self.info.source_name),
            format!("Analysis time span: {}", summary.time_range()),
            format!("Total number different attribute ids: {}", summary.attributes),
            format!("Total number of data sets per attribute: {}", summary.lines),
            format!("Total number of samples: {}", summary.samples),
        ];
        if let Some(event) = &report.event {
            lines.push(format!(
                "Configured event on date: {}",
                event.at.format(EVENT_FORMAT)
            ));
        }
        for warning in &report.warnings {
            lines.push(format!("Warning: {}", warning));
        }

        let mut y = 165.0;
        for line in lines {
            layer.use_text(line, 14.0, Mm(MARGIN as f32), Mm(y), &fonts.regular);
            y -= 10.0;
        }
    }

    fn draw_attribute_page(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        report: &Report,
        series: &NamedSeries,
    ) {
        let kinds = self.values.kinds();
        let gap = 18.0;
        let top = f64::from(PAGE_HEIGHT) - MARGIN - 5.0;
        let bottom = MARGIN + 10.0;
        let height = (top - bottom - gap * (kinds.len() as f64 - 1.0)) / kinds.len() as f64;

        for (i, kind) in kinds.iter().enumerate() {
            let panel_top = top - i as f64 * (height + gap);
            let area = Area {
                left: MARGIN + AXIS_MARGIN,
                right: f64::from(PAGE_WIDTH) - MARGIN,
                bottom: panel_top - height,
                top: panel_top,
            };
            self.draw_panel(layer, fonts, report, series, *kind, area);
        }
    }

    fn draw_panel(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        report: &Report,
        series: &NamedSeries,
        kind: ValueKind,
        area: Area,
    ) {
        // Title
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.use_text(
            format!("{} ({})", series.display_name(), kind.title_suffix()),
            12.0,
            Mm(area.left as f32),
            Mm((area.top + 3.0) as f32),
            &fonts.bold,
        );

        // Border
        layer.set_outline_color(Color::Rgb(Rgb::new(0.3, 0.3, 0.3, None)));
        layer.set_outline_thickness(0.5);
        layer.add_line(Line {
            points: vec![
                (pt(area.left, area.bottom), false),
                (pt(area.right, area.bottom), false),
                (pt(area.right, area.top), false),
                (pt(area.left, area.top), false),
            ],
            is_closed: true,
        });

        let Some(span) = report.time_span() else {
            return;
        };
        let points = kind.points(series);
        let scale = Scale::new(span, &points);
        let width = area.right - area.left;
        let height = area.top - area.bottom;

        // Axis labels
        let (low, high) = scale.value_bounds();
        layer.use_text(
            format_value(high),
            8.0,
            Mm(MARGIN as f32),
            Mm((area.top - 3.0) as f32),
            &fonts.regular,
        );
        layer.use_text(
            format_value(low),
            8.0,
            Mm(MARGIN as f32),
            Mm(area.bottom as f32),
            &fonts.regular,
        );
        layer.use_text(
            time_label(span.0),
            8.0,
            Mm(area.left as f32),
            Mm((area.bottom - 5.0) as f32),
            &fonts.regular,
        );
        layer.use_text(
            time_label(span.1),
            8.0,
            Mm((area.right - 30.0) as f32),
            Mm((area.bottom - 5.0) as f32),
            &fonts.regular,
        );

        // Data
        let color = rgb(kind.color());
        layer.set_outline_color(color.clone());
        layer.set_outline_thickness(0.75);

        let mut coords: Vec<(f64, f64)> = downsample(&points, MAX_POINTS)
            .iter()
            .map(|&(at, value)| {
                (
                    area.left + scale.x_ratio(at) * width,
                    area.bottom + scale.y_ratio(value) * height,
                )
            })
            .collect();
        if coords.len() == 1 {
            // single sample: short horizontal tick
            let (x, y) = coords[0];
            coords = vec![(x - 1.0, y), (x + 1.0, y)];
        }
        if coords.len() >= 2 {
            layer.add_line(Line {
                points: coords.iter().map(|&(x, y)| (pt(x, y), false)).collect(),
                is_closed: false,
            });
        }

        // Legend
        layer.set_fill_color(color);
        layer.use_text(
            kind.legend(),
            8.0,
            Mm((area.right - 25.0) as f32),
            Mm((area.top + 3.0) as f32),
            &fonts.regular,
        );

        if let Some(event) = &report.event {
            draw_event(layer, event, &scale, area);
        }
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, report: &Report) -> Result<Vec<PathBuf>> {
        let doc = self.build(report)?;

        let mut pending = PendingFile::create(&self.path)?;
        {
            let mut writer = BufWriter::new(pending.as_file_mut());
            doc.save(&mut writer).map_err(|e| self.fail(e))?;
            writer.flush().map_err(|e| self.fail(e))?;
        }
        let written = pending.commit()?;
        tracing::info!("Saved report to {}", written.display());
        Ok(vec![written])
    }
}

fn draw_event(layer: &PdfLayerReference, event: &EventMarker, scale: &Scale, area: Area) {
    if !event.in_range {
        return;
    }
    let x = area.left + scale.x_ratio(event.at) * (area.right - area.left);
    let height = area.top - area.bottom;

    layer.set_outline_color(rgb(EVENT_COLOR));
    layer.set_outline_thickness(0.75);
    for (from, to) in dashes(0.03, 0.02) {
        layer.add_line(Line {
            points: vec![
                (pt(x, area.bottom + from * height), false),
                (pt(x, area.bottom + to * height), false),
            ],
            is_closed: false,
        });
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(Mm(x as f32), Mm(y as f32))
}

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        None,
    ))
}

fn time_label(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
