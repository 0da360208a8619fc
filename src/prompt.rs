use crate::error::ChartError;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Asks questions on `output` and reads the answers line by line from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// writes one line for the user
    pub fn say<T: std::fmt::Display>(&mut self, msg: T) -> Result<(), ChartError> {
        writeln!(self.output, "{}", msg)?;
        Ok(())
    }

    /// Prints the prompt (if any) and the `> ` marker, then reads one line
    /// without its line ending.
    pub fn ask(&mut self, prompt: &str) -> Result<String, ChartError> {
        if !prompt.is_empty() {
            writeln!(self.output, "{}", prompt)?;
        }
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ChartError::InputClosed);
        }
        let answer = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        debug!("read answer {:?}", answer);
        Ok(answer)
    }

    /// Asks until the answer is one of the allowed integers.
    pub fn ask_choice(&mut self, allowed: &[u32]) -> Result<u32, ChartError> {
        loop {
            let answer = self.ask("")?;
            match parse_choice(&answer, allowed) {
                Ok(c) => return Ok(c),
                Err(e @ ChartError::InvalidChoice { .. }) => {
                    warn!("{}", e);
                    self.say(&e)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// `y` or `yes`, in any case, is yes; everything else is no.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool, ChartError> {
        let answer = self.ask(&format!("{} [Y/N]", question))?;
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    /// Gated optional field: asks the question, and only if accepted asks for the value.
    pub fn ask_optional(
        &mut self,
        question: &str,
        prompt: &str,
    ) -> Result<Option<String>, ChartError> {
        if self.ask_yes_no(question)? {
            Ok(Some(self.ask(prompt)?))
        } else {
            Ok(None)
        }
    }

    /// Asks until the answer is the path of an existing file.
    pub fn ask_existing_path(&mut self, prompt: &str) -> Result<PathBuf, ChartError> {
        loop {
            let path = PathBuf::from(self.ask(prompt)?.trim());
            if path.is_file() {
                return Ok(path);
            }
            let e = ChartError::FileNotFound(path);
            warn!("{}", e);
            self.say(&e)?;
        }
    }
}

pub fn parse_choice(input: &str, allowed: &[u32]) -> Result<u32, ChartError> {
    match input.trim().parse::<u32>() {
        Ok(c) if allowed.contains(&c) => Ok(c),
        _ => Err(ChartError::InvalidChoice {
            input: input.to_string(),
            allowed: allowed.to_vec(),
        }),
    }
}
