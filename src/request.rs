use crate::error::ChartError;
use tracing::debug;

/// The axis a series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Stroke pattern of the line connecting the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
    DashDot,
}

impl LineStyle {
    /// Maps the menu / file code, 1 to 4; any other code falls back to solid.
    pub fn from_code(code: i64) -> LineStyle {
        match code {
            1 => LineStyle::Solid,
            2 => LineStyle::Dotted,
            3 => LineStyle::Dashed,
            4 => LineStyle::DashDot,
            _ => LineStyle::default(),
        }
    }

    /// Same as `from_code`, but a code that is not an integer is also solid.
    pub fn from_code_str(code: &str) -> LineStyle {
        match code.trim().parse::<i64>() {
            Ok(c) => LineStyle::from_code(c),
            Err(_) => {
                debug!("line style code {:?} is not an integer, using solid", code);
                LineStyle::default()
            }
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Solid
    }
}

impl std::fmt::Display for LineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LineStyle::Solid => "solid",
            LineStyle::Dotted => "dotted",
            LineStyle::Dashed => "dashed",
            LineStyle::DashDot => "dash-dot",
        };
        write!(f, "{}", name)
    }
}

/// Chart data and presentation fields as collected from the user or a file,
/// before any check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub line_style: Option<LineStyle>,
    pub marker_style: Option<String>,
}

impl RawRequest {
    /// Checks that both series have the same length and normalizes the optional fields:
    /// empty or blank text is absent, a missing line style is solid.
    pub fn validate(self) -> Result<ChartRequest, ChartError> {
        if self.x_values.len() != self.y_values.len() {
            return Err(ChartError::LengthMismatch {
                x: self.x_values.len(),
                y: self.y_values.len(),
            });
        }
        let request = ChartRequest {
            x_values: self.x_values,
            y_values: self.y_values,
            title: non_blank(self.title),
            x_label: non_blank(self.x_label),
            y_label: non_blank(self.y_label),
            line_style: self.line_style.unwrap_or_default(),
            marker_style: non_blank(self.marker_style),
        };
        debug!("validated request: {}", request);
        Ok(request)
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// A validated chart, ready for the renderer.
/// Only obtained from `RawRequest::validate`, the series always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    line_style: LineStyle,
    marker_style: Option<String>,
}

impl ChartRequest {
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn marker_style(&self) -> Option<&str> {
        self.marker_style.as_deref()
    }

    /// the (x, y) pairs in plotting order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values
            .iter()
            .copied()
            .zip(self.y_values.iter().copied())
    }
}

impl std::fmt::Display for ChartRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} points, title {:?}, x label {:?}, y label {:?}, {} line, marker {:?}",
            self.x_values.len(),
            self.title(),
            self.x_label(),
            self.y_label(),
            self.line_style,
            self.marker_style(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(x: Vec<f64>, y: Vec<f64>) -> RawRequest {
        RawRequest {
            x_values: x,
            y_values: y,
            ..RawRequest::default()
        }
    }

    #[test]
    fn line_style_codes() {
        assert_eq!(LineStyle::from_code(1), LineStyle::Solid);
        assert_eq!(LineStyle::from_code(2), LineStyle::Dotted);
        assert_eq!(LineStyle::from_code(3), LineStyle::Dashed);
        assert_eq!(LineStyle::from_code(4), LineStyle::DashDot);
    }

    #[test]
    fn unknown_line_style_code_is_solid() {
        for code in &[0, 5, -1, 42, i64::MAX, i64::MIN] {
            assert_eq!(LineStyle::from_code(*code), LineStyle::Solid);
        }
        assert_eq!(LineStyle::from_code_str(""), LineStyle::Solid);
        assert_eq!(LineStyle::from_code_str("dashed"), LineStyle::Solid);
        assert_eq!(LineStyle::from_code_str(" 3 "), LineStyle::Dashed);
    }

    #[test]
    fn equal_lengths_keep_order() {
        let x = vec![3., 1., 2., 1.];
        let y = vec![-1., f64::INFINITY, 0.5, 7.];
        let request = raw(x.clone(), y.clone()).validate().unwrap();
        assert_eq!(request.x_values(), &x[..]);
        assert_eq!(request.y_values(), &y[..]);
        let points: Vec<(f64, f64)> = request.points().collect();
        assert_eq!(points[1], (1., f64::INFINITY));
    }

    #[test]
    fn different_lengths_are_rejected() {
        match raw(vec![1., 2.], vec![3., 4., 5.]).validate() {
            Err(ChartError::LengthMismatch { x, y }) => assert_eq!((x, y), (2, 3)),
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn empty_series_are_accepted() {
        let request = raw(vec![], vec![]).validate().unwrap();
        assert_eq!(request.points().count(), 0);
    }

    #[test]
    fn blank_fields_become_absent() {
        let request = RawRequest {
            x_values: vec![1.],
            y_values: vec![2.],
            title: Some(String::new()),
            x_label: Some("   ".to_string()),
            y_label: Some("load".to_string()),
            line_style: None,
            marker_style: Some(String::new()),
        }
        .validate()
        .unwrap();
        assert_eq!(request.title(), None);
        assert_eq!(request.x_label(), None);
        assert_eq!(request.y_label(), Some("load"));
        assert_eq!(request.line_style(), LineStyle::Solid);
        assert_eq!(request.marker_style(), None);
    }
}
