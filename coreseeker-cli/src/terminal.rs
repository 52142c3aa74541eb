//! Console implementation of the engine's [`Frontend`].

use std::io::{BufRead, Write};

use colored::Colorize;
use coreseeker_game::{Frontend, GameError, Tone};

/// Moves the cursor up one line and erases it.
const ERASE_LINE: &str = "\x1b[1A\x1b[2K";

pub struct Terminal<R, W> {
    input: R,
    output: W,
    /// Only erase lines when a person is watching; piped output keeps them.
    erase: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub const fn new(input: R, output: W, erase: bool) -> Self {
        Self {
            input,
            output,
            erase,
        }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.output.flush()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Frontend for Terminal<R, W> {
    fn read_line(&mut self) -> Result<String, GameError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn render(&mut self, text: &str, tone: Tone) {
        let painted = match tone {
            Tone::Plain => text.normal(),
            Tone::Danger => text.bright_red(),
            Tone::Success => text.bright_green(),
            Tone::Highlight => text.bright_yellow(),
            Tone::Info => text.bright_blue(),
        };
        if let Err(err) = write!(self.output, "{painted}") {
            log::warn!("failed to write to terminal: {err}");
        }
    }

    fn clear_last_lines(&mut self, count: usize) {
        if !self.erase {
            return;
        }
        if let Err(err) = write!(self.output, "{}", ERASE_LINE.repeat(count)) {
            log::warn!("failed to clear terminal lines: {err}");
        }
    }
}
