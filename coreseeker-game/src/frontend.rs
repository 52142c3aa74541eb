//! The narrow surface between the engine and whatever draws the game.
//!
//! The engine only ever asks for the next input line, writes toned text, and
//! asks for the last few lines to be erased (used to swallow invalid input).

use std::collections::VecDeque;

use crate::error::GameError;

/// Semantic color of a piece of narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    /// Misses, death, blocked map cells.
    Danger,
    /// Prompts, the player marker, good news.
    Success,
    /// Names of items, amounts, headings.
    Highlight,
    /// Enemies, menu options, the NPC.
    Info,
}

/// A piece of text with its tone.
pub type Span<'a> = (&'a str, Tone);

pub trait Frontend {
    /// Block until the next line of input is available, without its newline.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InputClosed`] once the input stream is exhausted
    /// and [`GameError::Io`] if reading fails.
    fn read_line(&mut self) -> Result<String, GameError>;

    /// Write `text` using `tone`. Newlines are part of `text`.
    fn render(&mut self, text: &str, tone: Tone);

    /// Erase the last `count` rendered lines.
    fn clear_last_lines(&mut self, count: usize);

    /// Render a sequence of spans followed by a line break.
    fn line(&mut self, spans: &[Span<'_>]) {
        for (text, tone) in spans {
            self.render(text, *tone);
        }
        self.render("\n", Tone::Plain);
    }

    /// Render a plain line.
    fn say(&mut self, text: &str) {
        self.line(&[(text, Tone::Plain)]);
    }

    fn blank(&mut self) {
        self.render("\n", Tone::Plain);
    }

    /// Render the input marker and read the answer.
    ///
    /// # Errors
    ///
    /// Propagates [`Frontend::read_line`] failures.
    fn prompt(&mut self) -> Result<String, GameError> {
        self.render(" > ", Tone::Success);
        self.read_line()
    }
}

/// First character of an answer, upper-cased. `None` for blank input.
#[must_use]
pub fn first_char(answer: &str) -> Option<char> {
    answer
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
}

/// In-memory frontend: replays scripted input and records plain output.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    input: VecDeque<String>,
    output: String,
    cleared: usize,
}

impl Transcript {
    #[must_use]
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: String::new(),
            cleared: 0,
        }
    }

    /// Everything rendered so far, without tones.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Total number of lines the engine asked to erase.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared
    }

    /// Drop recorded output, keeping queued input.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Frontend for Transcript {
    fn read_line(&mut self) -> Result<String, GameError> {
        self.input.pop_front().ok_or(GameError::InputClosed)
    }

    fn render(&mut self, text: &str, _tone: Tone) {
        self.output.push_str(text);
    }

    fn clear_last_lines(&mut self, count: usize) {
        self.cleared = self.cleared.saturating_add(count);
    }
}
