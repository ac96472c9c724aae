//! Line chart renderer: raw values against their rolling mean.
//!
//! Absent points are gaps; no segment is drawn to or from them. The output
//! format follows the file extension (`.png`, `.jpg`, `.bmp`).

mod canvas;
mod font;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::{Interval, RollingResult, Symbol};

use canvas::{colors, Canvas};

pub const MIN_WIDTH: u32 = 200;
pub const MIN_HEIGHT: u32 = 120;

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 50;
const MARGIN_BOTTOM: u32 = 60;
const Y_TICKS: u32 = 5;

/// Chart rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart size {width}x{height} is below the minimum 200x120")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("failed to encode chart: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Labels and pixel size of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub value_label: String,
    pub mean_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            title: String::from("Price & moving average"),
            x_label: String::from("Date"),
            y_label: String::from("Price"),
            value_label: String::from("Close price"),
            mean_label: String::from("Moving average"),
            width: 1000,
            height: 500,
        }
    }
}

impl ChartSpec {
    /// Default labels for a close-price chart, e.g.
    /// `AAPL stock price & 50-day moving average`.
    pub fn for_symbol(symbol: &Symbol, window: usize, interval: Interval) -> Self {
        let unit = interval.unit_label();
        Self {
            title: format!("{symbol} stock price & {window}-{unit} moving average"),
            mean_label: format!("{window}-{unit} SMA"),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Renders `result` and writes it to `path`.
pub fn render(result: &RollingResult, spec: &ChartSpec, path: &Path) -> Result<(), RenderError> {
    let img = rasterize(result, spec)?;
    let format = ImageFormat::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    img.write_to(&mut writer, format)?;
    writer.flush()?;
    debug!(path = %path.display(), width = spec.width, height = spec.height, "chart written");
    Ok(())
}

/// Renders `result` into an in-memory RGB image.
pub fn rasterize(result: &RollingResult, spec: &ChartSpec) -> Result<RgbImage, RenderError> {
    if spec.width < MIN_WIDTH || spec.height < MIN_HEIGHT {
        return Err(RenderError::InvalidDimensions {
            width: spec.width,
            height: spec.height,
        });
    }

    let plot = PlotArea::new(spec.width, spec.height, value_range(result));
    let mut canvas = Canvas::new(spec.width, spec.height, colors::WHITE);

    draw_grid(&mut canvas, &plot);
    draw_series(&mut canvas, &plot, result, |p| p.value, colors::VALUE);
    draw_series(&mut canvas, &plot, result, |p| p.mean, colors::MEAN);
    canvas.stroke_rect(plot.left, plot.top, plot.width, plot.height, colors::FRAME);

    draw_x_labels(&mut canvas, &plot, result);
    draw_legend(&mut canvas, &plot, spec);

    let center = spec.width as i64 / 2;
    canvas.text_centered(center, 16, &spec.title, 2, colors::BLACK);
    canvas.text_centered(center, spec.height as i64 - 22, &spec.x_label, 2, colors::BLACK);
    canvas.text(8, plot.top - 14, &spec.y_label, 1, colors::BLACK);

    Ok(canvas.into_image())
}

/// Pixel rectangle of the plot plus its value scale.
struct PlotArea {
    left: i64,
    top: i64,
    width: u32,
    height: u32,
    min: f64,
    max: f64,
}

impl PlotArea {
    fn new(width: u32, height: u32, (min, max): (f64, f64)) -> Self {
        Self {
            left: MARGIN_LEFT as i64,
            top: MARGIN_TOP as i64,
            width: width - MARGIN_LEFT - MARGIN_RIGHT,
            height: height - MARGIN_TOP - MARGIN_BOTTOM,
            min,
            max,
        }
    }

    fn bottom(&self) -> i64 {
        self.top + self.height as i64
    }

    fn x_at(&self, index: usize, len: usize) -> i64 {
        if len <= 1 {
            return self.left + self.width as i64 / 2;
        }
        self.left + (index as f64 * self.width as f64 / (len - 1) as f64).round() as i64
    }

    fn y_at(&self, value: f64) -> i64 {
        let fraction = ((value - self.min) / (self.max - self.min)).clamp(-1.0, 2.0);
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        self.bottom() - (fraction * self.height as f64).round() as i64
    }
}

/// Min/max over every defined value and mean, padded by 5%.
fn value_range(result: &RollingResult) -> (f64, f64) {
    let (min, max) = result
        .iter()
        .flat_map(|point| [point.value, point.mean])
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    if !pad.is_finite() || !(min - pad).is_finite() || !(max + pad).is_finite() {
        return (min, max);
    }
    (min - pad, max + pad)
}

fn draw_grid(canvas: &mut Canvas, plot: &PlotArea) {
    let right = plot.left + plot.width as i64;
    for tick in 0..=Y_TICKS {
        let value = plot.min + (plot.max - plot.min) * tick as f64 / Y_TICKS as f64;
        let y = plot.y_at(value);
        canvas.hline(y, plot.left, right, colors::GRID);

        let label = format!("{value:.2}");
        let label_x = plot.left - 6 - font::text_width(&label, 1) as i64;
        canvas.text(label_x, y - 3, &label, 1, colors::FRAME);
    }
}

fn draw_series(
    canvas: &mut Canvas,
    plot: &PlotArea,
    result: &RollingResult,
    select: impl Fn(&crate::RollingPoint) -> Option<f64>,
    color: image::Rgb<u8>,
) {
    let len = result.len();
    let points: Vec<Option<(i64, i64)>> = result
        .iter()
        .enumerate()
        .map(|(index, point)| {
            select(point)
                .filter(|v| v.is_finite())
                .map(|v| (plot.x_at(index, len), plot.y_at(v)))
        })
        .collect();

    for index in 0..points.len() {
        let Some(current) = points[index] else {
            continue;
        };
        let previous = index.checked_sub(1).and_then(|i| points[i]);
        let next = points.get(index + 1).copied().flatten();

        match next {
            Some(next) => canvas.line(current, next, 2, color),
            // Isolated point between gaps.
            None if previous.is_none() => canvas.fill_rect(current.0 - 1, current.1 - 1, 3, 3, color),
            None => {}
        }
    }
}

fn draw_x_labels(canvas: &mut Canvas, plot: &PlotArea, result: &RollingResult) {
    let len = result.len();
    let label_y = plot.bottom() + 8;
    let indices = match len {
        0 => Vec::new(),
        1 => vec![0],
        2 => vec![0, 1],
        _ => vec![0, len / 2, len - 1],
    };

    for index in indices {
        let x = plot.x_at(index, len);
        canvas.vline(x, plot.bottom(), plot.bottom() + 4, colors::FRAME);
        canvas.text_centered(x, label_y, &result.points[index].ts.format_date(), 1, colors::FRAME);
    }
}

fn draw_legend(canvas: &mut Canvas, plot: &PlotArea, spec: &ChartSpec) {
    let entries = [(&spec.value_label, colors::VALUE), (&spec.mean_label, colors::MEAN)];
    let text_width = entries
        .iter()
        .map(|(label, _)| font::text_width(label, 1))
        .max()
        .unwrap_or(0);

    let (x, y) = (plot.left + 10, plot.top + 10);
    let box_width = text_width + 40;
    let box_height = 12 * entries.len() as u32 + 8;
    canvas.fill_rect(x, y, box_width, box_height, colors::WHITE);
    canvas.stroke_rect(x, y, box_width, box_height, colors::GRID);

    for (row, (label, color)) in entries.iter().enumerate() {
        let row_y = y + 6 + 12 * row as i64;
        canvas.fill_rect(x + 6, row_y + 2, 20, 3, *color);
        canvas.text(x + 32, row_y, label, 1, colors::BLACK);
    }
}
