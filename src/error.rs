use crate::request::Axis;
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// menu input outside the allowed set, recovered by asking again
    #[error("invalid choice {input:?}, please choose one of {allowed:?}")]
    InvalidChoice { input: String, allowed: Vec<u32> },

    #[error("could not parse {axis}-axis value {token:?}")]
    NumberParse {
        axis: Axis,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    /// recovered by asking for another path
    #[error("file {} does not exist, please try again", .0.display())]
    FileNotFound(PathBuf),

    #[error("x and y axis data sets are not the same size ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("input closed before a value was entered")]
    InputClosed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render the chart: {0}")]
    Render(String),
}
