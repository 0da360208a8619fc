use crate::error::ChartError;
use crate::min_and_max;
use crate::request::{ChartRequest, LineStyle};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_SVG_SIZE: (u32, u32) = (1600, 800);

const LINE_COLOR: RGBColor = RGBColor(180, 10, 180);

/// Draws a validated chart.
pub trait Render {
    fn render(&mut self, request: &ChartRequest) -> Result<(), ChartError>;
}

/// Symbol drawn at each point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Point,
    Square,
    Triangle,
    Cross,
    /// any other code, drawn as text
    Symbol(String),
}

impl Marker {
    pub fn from_code(code: &str) -> Marker {
        match code {
            "o" => Marker::Circle,
            "." => Marker::Point,
            "s" => Marker::Square,
            "^" => Marker::Triangle,
            "x" | "+" => Marker::Cross,
            other => Marker::Symbol(other.to_string()),
        }
    }
}

/// on/off lengths in pixels, repeated along the line; none for a solid line
pub fn dash_pattern(style: LineStyle) -> Option<&'static [f64]> {
    match style {
        LineStyle::Solid => None,
        LineStyle::Dotted => Some(&[3., 6.][..]),
        LineStyle::Dashed => Some(&[16., 8.][..]),
        LineStyle::DashDot => Some(&[16., 6., 3., 6.][..]),
    }
}

/// Cuts the polyline into the visible pieces of the on/off `pattern`.
/// The pattern is in pixels, `scale` converts data units to pixels for each axis,
/// so the dashes look the same whatever the slope of the line.
pub fn dash_segments(
    points: &[(f64, f64)],
    scale: (f64, f64),
    pattern: &[f64],
) -> Vec<Vec<(f64, f64)>> {
    let mut pieces: Vec<Vec<(f64, f64)>> = Vec::new();
    let (first, rest) = match points.split_first() {
        Some(fr) => fr,
        None => return pieces,
    };
    let no_scale = !scale.0.is_finite() || !scale.1.is_finite();
    if no_scale || pattern.is_empty() || pattern.iter().all(|p| *p <= 0.) {
        pieces.push(points.to_vec());
        return pieces;
    }
    let mut idx = 0;
    let mut remaining = pattern[0];
    let mut on = true;
    let mut current = vec![*first];
    let mut a = *first;
    for &b in rest {
        let (dx, dy) = ((b.0 - a.0) * scale.0, (b.1 - a.1) * scale.1);
        let len = (dx * dx + dy * dy).sqrt();
        if !len.is_finite() {
            // too long to measure in pixels, drawn whole and the pattern restarts after it
            if !on {
                current = vec![a];
                on = true;
            }
            current.push(b);
            idx = 0;
            remaining = pattern[0];
            a = b;
            continue;
        }
        let mut t = 0.;
        while len * (1. - t) > remaining {
            t += remaining / len;
            let p = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
            if on {
                current.push(p);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            on = !on;
            idx = (idx + 1) % pattern.len();
            remaining = pattern[idx];
        }
        remaining -= len * (1. - t);
        if on {
            current.push(b);
        }
        a = b;
    }
    if current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

/// Splits the points into runs of finite values, a non-finite x or y breaks the line.
pub fn finite_runs(points: &[(f64, f64)]) -> Vec<&[(f64, f64)]> {
    points
        .split(|(x, y)| !x.is_finite() || !y.is_finite())
        .filter(|run| !run.is_empty())
        .collect()
}

/// Axis range over the finite values, extended by `margin` times the span on each side.
/// The returned span is always finite; when padding would overflow the range is not padded.
pub fn padded_range(values: &[f64], margin: f64) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    match min_and_max(&finite[..]) {
        None => (0., 1.),
        Some((min, max)) if min == max => (min - 1., max + 1.),
        Some((min, max)) => {
            let pad = (max - min) * margin;
            let (lo, hi) = (min - pad, max + pad);
            if pad.is_finite() && lo.is_finite() && hi.is_finite() && (hi - lo).is_finite() {
                (lo, hi)
            } else if (max - min).is_finite() {
                (min, max)
            } else {
                // the span must stay finite, values beyond half of f64::MAX are clipped
                (min.max(-f64::MAX / 2.), max.min(f64::MAX / 2.))
            }
        }
    }
}

/// Renders the chart to an svg file.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    fout: PathBuf,
    size: (u32, u32),
}

impl SvgRenderer {
    pub fn new(fout: PathBuf) -> SvgRenderer {
        SvgRenderer {
            fout,
            size: DEFAULT_SVG_SIZE,
        }
    }

    pub fn with_size(mut self, size: (u32, u32)) -> SvgRenderer {
        self.size = size;
        self
    }

    pub fn path(&self) -> &Path {
        &self.fout
    }

    fn draw(&self, request: &ChartRequest) -> Result<(), Box<dyn std::error::Error>> {
        let points: Vec<(f64, f64)> = request.points().collect();
        let (xmin, xmax) = padded_range(request.x_values(), 1. / 20.);
        let (ymin, ymax) = padded_range(request.y_values(), 1. / 10.);

        let root = SVGBackend::new(&self.fout, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100);
        if let Some(title) = request.title() {
            builder.caption(title, ("sans-serif", 40));
        }
        let mut chart = builder.build_cartesian_2d(xmin..xmax, ymin..ymax)?;

        let y_fmt = |y: &f64| format!("{:5}", y);
        {
            let mut mesh = chart.configure_mesh();
            mesh.light_line_style(&TRANSPARENT)
                .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
                .set_all_tick_mark_size(2)
                .label_style(("sans-serif", 24))
                .y_label_formatter(&y_fmt);
            if let Some(x_label) = request.x_label() {
                mesh.x_desc(x_label);
            }
            if let Some(y_label) = request.y_label() {
                mesh.y_desc(y_label);
            }
            mesh.draw()?;
        }

        let stroke = LINE_COLOR.stroke_width(2);
        let runs = finite_runs(&points);
        if runs.len() > 1 {
            debug!("line broken in {} runs by non-finite values", runs.len());
        }
        let (w, h) = chart.plotting_area().dim_in_pixel();
        let scale = (w as f64 / (xmax - xmin), h as f64 / (ymax - ymin));
        let measurable = scale.0.is_finite() && scale.1.is_finite();
        let pattern = dash_pattern(request.line_style());
        if pattern.is_some() && !measurable {
            warn!("axis span too small to measure dashes, drawing a solid line");
        }
        match pattern.filter(|_| measurable) {
            None => {
                for run in runs.iter() {
                    chart.draw_series(LineSeries::new(run.iter().copied(), stroke))?;
                }
            }
            Some(pattern) => {
                for run in runs.iter() {
                    let dashes = dash_segments(run, scale, pattern);
                    let dashes = dashes.into_iter().map(|d| PathElement::new(d, stroke));
                    chart.draw_series(dashes)?;
                }
            }
        }

        if let Some(code) = request.marker_style() {
            let finite = points
                .iter()
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite());
            let fill = LINE_COLOR.filled();
            match Marker::from_code(code) {
                Marker::Circle => {
                    chart.draw_series(finite.map(|c| Circle::new(c, 6, fill)))?;
                }
                Marker::Point => {
                    chart.draw_series(finite.map(|c| Circle::new(c, 3, fill)))?;
                }
                Marker::Square => {
                    chart.draw_series(finite.map(|c| {
                        EmptyElement::at(c) + Rectangle::new([(-5, -5), (5, 5)], fill)
                    }))?;
                }
                Marker::Triangle => {
                    chart.draw_series(finite.map(|c| TriangleMarker::new(c, 7, fill)))?;
                }
                Marker::Cross => {
                    chart.draw_series(finite.map(|c| Cross::new(c, 6, stroke)))?;
                }
                Marker::Symbol(s) => {
                    warn!("marker {:?} has no shape, drawing it as text", s);
                    let font = ("sans-serif", 24).into_font();
                    chart.draw_series(finite.map(|c| {
                        EmptyElement::at(c) + Text::new(s.clone(), (-6, -12), font.clone())
                    }))?;
                }
            }
        }
        root.present()?;
        Ok(())
    }
}

impl Render for SvgRenderer {
    fn render(&mut self, request: &ChartRequest) -> Result<(), ChartError> {
        info!("plotting {} to {}", request, self.fout.display());
        self.draw(request).map_err(|e| ChartError::Render(e.to_string()))
    }
}
