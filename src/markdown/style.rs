//! Styled span data model and the ANSI output adapter.
//!
//! The renderer only ever produces data ([`RenderedLine`]s made of
//! [`StyledSpan`]s). Turning that data into escape sequences happens in the
//! `Display` impls below, which delegate to `colored` so that `NO_COLOR`,
//! `CLICOLOR` and `--no-color` are honoured in one place.

use colored::{ColoredString, Colorize};
use std::fmt;
use unicode_width::UnicodeWidthChar;

/// Foreground colours used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Blue,
}

impl From<Color> for colored::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Cyan => colored::Color::Cyan,
            Color::Yellow => colored::Color::Yellow,
            Color::Magenta => colored::Color::Magenta,
            Color::Green => colored::Color::Green,
            Color::Blue => colored::Color::Blue,
        }
    }
}

/// Terminal columns taken by `ch`. Control characters take none.
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Terminal columns taken by `text`, summed per character so that control
/// characters such as `\r` count as zero.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// A single text attribute. Several of them compose on one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Underline,
    Reverse,
    Color(Color),
}

/// A run of text carrying zero or more styles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledSpan {
    pub text: String,
    pub styles: Vec<Style>,
}

impl StyledSpan {
    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Vec::new(),
        }
    }

    pub fn styled(text: impl Into<String>, styles: &[Style]) -> Self {
        let mut span = Self::plain(text);
        for style in styles {
            span = span.with(*style);
        }
        span
    }

    /// Add a style, ignoring duplicates.
    pub fn with(mut self, style: Style) -> Self {
        if !self.styles.contains(&style) {
            self.styles.push(style);
        }
        self
    }

    pub fn is_plain(&self) -> bool {
        self.styles.is_empty()
    }

    /// Display width of the text, excluding any escape sequences.
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    fn paint(&self) -> ColoredString {
        let mut painted = self.text.as_str().normal();
        for style in &self.styles {
            painted = match style {
                Style::Bold => painted.bold(),
                Style::Underline => painted.underline(),
                Style::Reverse => painted.reversed(),
                Style::Color(color) => painted.color(colored::Color::from(*color)),
            };
        }
        painted
    }
}

impl fmt::Display for StyledSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() || self.styles.is_empty() {
            return f.write_str(&self.text);
        }
        write!(f, "{}", self.paint())
    }
}

/// One row of terminal output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedLine {
    pub spans: Vec<StyledSpan>,
}

impl RenderedLine {
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self { spans }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn styled(text: impl Into<String>, styles: &[Style]) -> Self {
        Self::new(vec![StyledSpan::styled(text, styles)])
    }

    /// Text with all styling removed.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Visible width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(StyledSpan::width).sum()
    }
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            write!(f, "{}", span)?;
        }
        Ok(())
    }
}
