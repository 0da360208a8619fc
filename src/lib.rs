use std::io::{BufRead, Write};
use tracing::{info, warn};
pub mod acquire;
pub mod error;
pub mod plot;
pub mod prompt;
pub mod render;
pub mod request;

pub use error::ChartError;
pub use prompt::Prompter;
pub use render::{Render, SvgRenderer};
pub use request::{Axis, ChartRequest, LineStyle, RawRequest};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// datetime format used to name the default output file
pub const FILE_DT_FORMAT: &str = "%Y%m%d_%H%M%S";

/// How a run ended when no fatal error occurred.
#[derive(Debug)]
pub enum Outcome {
    Rendered,
    /// the request did not validate, nothing was drawn
    Rejected(ChartError),
}

/// One full run: pick the source, collect the data, validate it and hand it to the renderer.
/// A request that fails validation is reported to the user and never reaches the renderer.
pub fn run<R: BufRead, W: Write, T: Render>(
    prompter: &mut Prompter<R, W>,
    renderer: &mut T,
) -> Result<Outcome, ChartError> {
    let source = acquire::choose_source(prompter)?;
    let request = match acquire::acquire(prompter, &source).and_then(RawRequest::validate) {
        Ok(r) => r,
        Err(e @ ChartError::LengthMismatch { .. }) => {
            warn!("request rejected: {}", e);
            prompter.say(format!("Error: {}.", e))?;
            return Ok(Outcome::Rejected(e));
        }
        Err(e) => return Err(e),
    };
    renderer.render(&request)?;
    info!("chart rendered");
    Ok(Outcome::Rendered)
}

/// min and max of a slice, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}
