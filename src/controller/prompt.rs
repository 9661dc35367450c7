//! Prompts
//!
//! Line-oriented input helpers. Every reader returns `Ok(None)` once the
//! input is exhausted so callers can wind down instead of spinning.

use std::io::{self, BufRead, Write};

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of output
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Show `prompt` and read one line without its terminator
    pub fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    /// Ask until the answer parses as an integer
    pub fn integer(&mut self, prompt: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(answer) = self.line(prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Invalid number. Try again.")?,
            }
        }
    }

    /// Yes only for an answer starting with `y` or `Y`
    pub fn confirm(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        Ok(self
            .line(prompt)?
            .map(|answer| matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))))
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
