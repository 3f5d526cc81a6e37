//! One PNG chart per attribute.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use super::atomic::{commit_all, PendingFile};
use super::{dashes, downsample, Renderer, Scale, ValueKind, EVENT_COLOR};
use crate::aggregate::{NamedSeries, Report};
use crate::config::ValueSelection;
use crate::error::{Result, SmartPlotError};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;
/// Max points per line
const MAX_POINTS: usize = 4000;

/// File name of the chart for one attribute
pub fn image_file_name(id: u8) -> String {
    format!("attr-{}.png", id)
}

pub struct PngRenderer {
    dir: PathBuf,
    values: ValueSelection,
}

impl PngRenderer {
    pub fn new(dir: PathBuf, values: ValueSelection) -> Self {
        Self { dir, values }
    }

    /// Render one attribute into an image buffer
    pub fn render_image(&self, report: &Report, series: &NamedSeries) -> RgbaImage {
        let mut imgbuf = RgbaImage::new(WIDTH, HEIGHT);

        for pixel in imgbuf.pixels_mut() {
            *pixel = Rgba([255, 255, 255, 255]);
        }

        let kinds = self.values.kinds();
        let gap = 60u32;
        let top = 40u32;
        let bottom = HEIGHT - 60;
        let panel_height = (bottom - top - gap * (kinds.len() as u32 - 1)) / kinds.len() as u32;

        for (i, kind) in kinds.iter().enumerate() {
            let panel_top = top + i as u32 * (panel_height + gap);
            let area = Area {
                left: 80,
                right: WIDTH - 40,
                top: panel_top,
                bottom: panel_top + panel_height,
            };
            draw_panel(&mut imgbuf, report, series, *kind, area);
        }

        imgbuf
    }

    fn encode(&self, imgbuf: &RgbaImage, dest: &Path) -> Result<PendingFile> {
        let mut pending = PendingFile::create(dest)?;
        {
            let mut writer = BufWriter::new(pending.as_file_mut());
            imgbuf
                .write_to(&mut writer, ImageFormat::Png)
                .map_err(|e| SmartPlotError::output(dest, e))?;
            writer.flush().map_err(|e| SmartPlotError::output(dest, e))?;
        }
        Ok(pending)
    }
}

impl Renderer for PngRenderer {
    fn render(&self, report: &Report) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir).map_err(|e| SmartPlotError::output(&self.dir, e))?;

        // Nothing is moved into place until every image is encoded
        let mut pending = Vec::with_capacity(report.series.len());
        for series in &report.series {
            tracing::info!("Plotting {}...", series.display_name());
            let imgbuf = self.render_image(report, series);
            let dest = self.dir.join(image_file_name(series.id()));
            pending.push(self.encode(&imgbuf, &dest)?);
        }

        let written = commit_all(pending)?;
        tracing::info!("Saved {} images to {}", written.len(), self.dir.display());
        Ok(written)
    }
}

/// Panel rectangle in pixels
#[derive(Clone, Copy)]
struct Area {
    left: u32,
    right: u32,
    top: u32,
    bottom: u32,
}

fn draw_panel(
    imgbuf: &mut RgbaImage,
    report: &Report,
    series: &NamedSeries,
    kind: ValueKind,
    area: Area,
) {
    for y in area.top..area.bottom {
        for x in area.left..area.right {
            imgbuf.put_pixel(x, y, Rgba([245, 245, 245, 255]));
        }
    }

    let border = Rgba([77, 77, 77, 255]);
    draw_line(imgbuf, area.left, area.top, area.right, area.top, border);
    draw_line(imgbuf, area.right, area.top, area.right, area.bottom, border);
    draw_line(imgbuf, area.right, area.bottom, area.left, area.bottom, border);
    draw_line(imgbuf, area.left, area.bottom, area.left, area.top, border);

    let Some(span) = report.time_span() else {
        return;
    };
    let points = kind.points(series);
    let scale = Scale::new(span, &points);

    let chart_width = (area.right - area.left) as f64;
    let chart_height = (area.bottom - area.top) as f64;
    let [r, g, b] = kind.color();
    let pixel_color = Rgba([r, g, b, 255]);

    let coords: Vec<(u32, u32)> = downsample(&points, MAX_POINTS)
        .iter()
        .map(|&(at, value)| {
            let x = area.left + (scale.x_ratio(at) * chart_width) as u32;
            let y = area.bottom - (scale.y_ratio(value) * chart_height) as u32;
            (x, y)
        })
        .collect();

    match coords.as_slice() {
        [] => {}
        // single sample: short horizontal tick
        [(x, y)] => draw_line(
            imgbuf,
            x.saturating_sub(10),
            *y,
            (x + 10).min(area.right),
            *y,
            pixel_color,
        ),
        _ => {
            for pair in coords.windows(2) {
                let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
                draw_line(imgbuf, x0, y0, x1, y1, pixel_color);
            }
        }
    }

    if let Some(event) = report.event.as_ref().filter(|e| e.in_range) {
        let x = area.left + (scale.x_ratio(event.at) * chart_width) as u32;
        let [r, g, b] = EVENT_COLOR;
        let red = Rgba([r, g, b, 255]);
        for (from, to) in dashes(0.03, 0.02) {
            let y0 = area.bottom - (from * chart_height) as u32;
            let y1 = area.bottom - (to * chart_height) as u32;
            draw_line(imgbuf, x, y0, x, y1, red);
        }
    }
}

/// Draw a line using Bresenham's algorithm
fn draw_line(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    let dx = (x1 as i32 - x0 as i32).abs();
    let dy = -(y1 as i32 - y0 as i32).abs();
    let sx: i32 = if x0 < x1 { 1 } else { -1 };
    let sy: i32 = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0 as i32;
    let mut y = y0 as i32;

    let (width, height) = img.dimensions();

    loop {
        if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
            img.put_pixel(x as u32, y as u32, color);
        }

        if x == x1 as i32 && y == y1 as i32 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
