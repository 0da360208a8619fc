use crate::error::ChartError;
use crate::prompt::Prompter;
use crate::request::{Axis, LineStyle, RawRequest};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MENU_MANUAL: u32 = 1;
pub const MENU_FILE: u32 = 2;

/// Where the chart data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Manual,
    File(PathBuf),
}

/// Shows the start menu and asks for the data source,
/// for the file source also asks for an existing file.
pub fn choose_source<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Source, ChartError> {
    prompter.say(
        "Welcome to the chartmaker! Please begin by choosing one of the following options:",
    )?;
    prompter.say(format!("Option {}: Manual Data Entry", MENU_MANUAL))?;
    prompter.say(format!("Option {}: Enter Data From Text File", MENU_FILE))?;
    let source = match prompter.ask_choice(&[MENU_MANUAL, MENU_FILE])? {
        MENU_FILE => Source::File(prompter.ask_existing_path("Please enter the file name")?),
        _ => Source::Manual,
    };
    info!("data source: {:?}", source);
    Ok(source)
}

pub fn acquire<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    source: &Source,
) -> Result<RawRequest, ChartError> {
    match source {
        Source::Manual => acquire_manual(prompter),
        Source::File(path) => read_request_file(path),
    }
}

/// Interactive entry: both series, then the optional fields, each behind a yes/no question.
/// A value that is not a number restarts the entry from the x values.
/// Series of different lengths end the entry before the optional fields are asked.
pub fn acquire_manual<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<RawRequest, ChartError> {
    let (x_values, y_values) = loop {
        match ask_series(prompter) {
            Ok(xy) => break xy,
            Err(e @ ChartError::NumberParse { .. }) => {
                warn!("{}", e);
                prompter.say(format!("Error: {}. Please enter the data again.", e))?;
            }
            Err(e) => return Err(e),
        }
    };
    if x_values.len() != y_values.len() {
        return Err(ChartError::LengthMismatch {
            x: x_values.len(),
            y: y_values.len(),
        });
    }
    let title = prompter.ask_optional(
        "Would you like a plot title?",
        "Please enter a plot title.",
    )?;
    let x_label = prompter.ask_optional(
        "Would you like an x-axis label?",
        "Please enter an x-axis label.",
    )?;
    let y_label = prompter.ask_optional(
        "Would you like a y-axis label?",
        "Please enter a y-axis label.",
    )?;
    let line_style = ask_line_style(prompter)?;
    let marker_style = prompter.ask_optional(
        "Would you like to choose a custom marker style?",
        "Please choose a marker style (e.g. 'o' for circle, '.' for point, etc.):",
    )?;
    Ok(RawRequest {
        x_values,
        y_values,
        title,
        x_label,
        y_label,
        line_style,
        marker_style,
    })
}

fn ask_series<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<(Vec<f64>, Vec<f64>), ChartError> {
    let x_values = parse_series(Axis::X, &prompter.ask("Please enter the x-axis values.")?)?;
    let y_values = parse_series(Axis::Y, &prompter.ask("Please enter the y-axis values.")?)?;
    Ok((x_values, y_values))
}

fn ask_line_style<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<LineStyle>, ChartError> {
    if !prompter.ask_yes_no("Would you like to choose a custom line style?")? {
        return Ok(None);
    }
    prompter.say("Please choose a line style:")?;
    prompter.say("1. Solid Line")?;
    prompter.say("2. Dotted Line")?;
    prompter.say("3. Dashed Line")?;
    prompter.say("4. Dashed/Dotted Line")?;
    let code = prompter.ask_choice(&[1, 2, 3, 4])?;
    Ok(Some(LineStyle::from_code(i64::from(code))))
}

/// Reads a request from a data file, the file is closed before returning.
pub fn read_request_file(path: &Path) -> Result<RawRequest, ChartError> {
    info!("reading data from {}", path.display());
    let file = File::open(path)?;
    parse_request(BufReader::new(file))
}

/// Parses the data file layout, one field per line:
/// x values, y values, title, x label, y label, line style code, marker.
/// Missing lines are empty fields, lines after the seventh are ignored.
pub fn parse_request<B: BufRead>(buf: B) -> Result<RawRequest, ChartError> {
    let mut lines: Vec<String> = Vec::with_capacity(7);
    for l in buf.lines() {
        let l = l?;
        if lines.len() == 7 {
            debug!("ignoring lines after the seventh");
            break;
        }
        lines.push(l.trim().to_string());
    }
    lines.resize(7, String::new());
    let mut fields = lines.into_iter();
    let mut next_field = || fields.next().unwrap_or_default();

    let x_values = parse_series(Axis::X, &next_field())?;
    let y_values = parse_series(Axis::Y, &next_field())?;
    let title = Some(next_field());
    let x_label = Some(next_field());
    let y_label = Some(next_field());
    let line_style = Some(LineStyle::from_code_str(&next_field()));
    let marker_style = Some(next_field());
    Ok(RawRequest {
        x_values,
        y_values,
        title,
        x_label,
        y_label,
        line_style,
        marker_style,
    })
}

/// Splits a comma-separated line into numbers, every token must parse.
pub fn parse_series(axis: Axis, line: &str) -> Result<Vec<f64>, ChartError> {
    line.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|source| ChartError::NumberParse {
                    axis,
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn series_from_line() {
        assert_eq!(
            parse_series(Axis::X, "1, 2.5,-3,1e2").unwrap(),
            vec![1., 2.5, -3., 100.]
        );
    }

    #[test]
    fn series_keeps_bad_tokens_as_errors() {
        match parse_series(Axis::Y, "1,two,3") {
            Err(ChartError::NumberParse { axis, token, .. }) => {
                assert_eq!(axis, Axis::Y);
                assert_eq!(token, "two");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(parse_series(Axis::X, "").is_err());
        assert!(parse_series(Axis::X, "1,2,").is_err());
    }

    #[test]
    fn data_file_layout() {
        let raw = parse_request(Cursor::new("1,2,3\n4,5,6\nT\nX\nY\n3\no\n")).unwrap();
        assert_eq!(raw.x_values, vec![1., 2., 3.]);
        assert_eq!(raw.y_values, vec![4., 5., 6.]);
        assert_eq!(raw.title.as_deref(), Some("T"));
        assert_eq!(raw.x_label.as_deref(), Some("X"));
        assert_eq!(raw.y_label.as_deref(), Some("Y"));
        assert_eq!(raw.line_style, Some(LineStyle::Dashed));
        assert_eq!(raw.marker_style.as_deref(), Some("o"));
    }

    #[test]
    fn data_file_series_are_independent() {
        let raw = parse_request(Cursor::new("1,2\n3,4,5\n\n\n\n1\n\n")).unwrap();
        assert_eq!(raw.x_values.len(), 2);
        assert_eq!(raw.y_values, vec![3., 4., 5.]);
    }

    #[test]
    fn data_file_short_and_bad_code() {
        let raw = parse_request(Cursor::new("1,2\r\n3,4\r\n  Title  \r\n")).unwrap();
        assert_eq!(raw.title.as_deref(), Some("Title"));
        assert_eq!(raw.x_label.as_deref(), Some(""));
        assert_eq!(raw.line_style, Some(LineStyle::Solid));
        assert_eq!(raw.marker_style.as_deref(), Some(""));

        let raw = parse_request(Cursor::new("1\n2\n\n\n\nnine\n*\nextra\n")).unwrap();
        assert_eq!(raw.line_style, Some(LineStyle::Solid));
        assert_eq!(raw.marker_style.as_deref(), Some("*"));
    }

    #[test]
    fn data_file_bad_number_is_fatal() {
        assert!(matches!(
            parse_request(Cursor::new("1,2\n3,x\n")),
            Err(ChartError::NumberParse { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn manual_entry_all_declined() {
        let mut p = prompter("1,2,3\n4,5,6\nn\nn\nn\nn\nn\n");
        let raw = acquire_manual(&mut p).unwrap();
        assert_eq!(raw.x_values, vec![1., 2., 3.]);
        assert_eq!(raw.y_values, vec![4., 5., 6.]);
        assert_eq!(raw.title, None);
        assert_eq!(raw.x_label, None);
        assert_eq!(raw.y_label, None);
        assert_eq!(raw.line_style, None);
        assert_eq!(raw.marker_style, None);
    }

    #[test]
    fn manual_entry_all_accepted() {
        let input = "0,1\n2,3\ny\nT\ny\nX\ny\nY\ny\n9\n4\ny\n^\n";
        let mut p = prompter(input);
        let raw = acquire_manual(&mut p).unwrap();
        assert_eq!(raw.title.as_deref(), Some("T"));
        assert_eq!(raw.x_label.as_deref(), Some("X"));
        assert_eq!(raw.y_label.as_deref(), Some("Y"));
        assert_eq!(raw.line_style, Some(LineStyle::DashDot));
        assert_eq!(raw.marker_style.as_deref(), Some("^"));
        let out = String::from_utf8(p.into_inner().1).unwrap();
        assert_eq!(out.matches("invalid choice").count(), 1);
    }

    #[test]
    fn manual_entry_restarts_after_bad_number() {
        let mut p = prompter("1,a\n1,2\n3,b\n1,2\n3,4\nn\nn\nn\nn\nn\n");
        let raw = acquire_manual(&mut p).unwrap();
        assert_eq!(raw.x_values, vec![1., 2.]);
        assert_eq!(raw.y_values, vec![3., 4.]);
        let out = String::from_utf8(p.into_inner().1).unwrap();
        assert_eq!(out.matches("Please enter the data again").count(), 2);
        assert_eq!(out.matches("Please enter the x-axis values.").count(), 3);
    }

    #[test]
    fn manual_entry_stops_at_length_mismatch() {
        let mut p = prompter("1,2\n3,4,5\n");
        match acquire_manual(&mut p) {
            Err(ChartError::LengthMismatch { x, y }) => assert_eq!((x, y), (2, 3)),
            other => panic!("expected length mismatch, got {:?}", other),
        }
        let out = String::from_utf8(p.into_inner().1).unwrap();
        assert!(!out.contains("plot title"));
    }

    #[test]
    fn file_source_from_menu() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.txt");
        std::fs::write(&data, "1\n2\n").unwrap();
        let mut p = prompter(&format!("2\n{}\n", data.display()));
        assert_eq!(choose_source(&mut p).unwrap(), Source::File(data));
    }
}
