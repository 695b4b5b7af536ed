//! Terminal output formatting with ANSI colors.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Delay between dots of the thinking indicator.
const DOT_INTERVAL: Duration = Duration::from_millis(500);

/// Print the welcome banner.
pub fn print_welcome(name: &str) {
    println!("{}", format!("Welcome to {}!", name).green().bold());
    println!(
        "{}",
        "Start typing below to start chatting! Ctrl+C to quit.".yellow()
    );
    println!();
}

/// The input prompt marker.
pub fn prompt_marker() -> ColoredString {
    "> ".blue().bold()
}

/// Print the input prompt without a newline.
pub fn print_prompt() -> Result<()> {
    print!("{}", prompt_marker());
    io::stdout().flush()?;
    Ok(())
}

/// Print the warning for an empty prompt.
pub fn print_empty_prompt() {
    println!("{}", "Please enter a message!".red());
}

/// Print a labelled, already-rendered reply followed by a blank line.
pub fn print_reply(name: &str, rendered: &str) {
    println!();
    println!("{} {}", format!("{}:", name).green().bold(), rendered);
    println!();
}

/// Print an error from the model backend.
pub fn print_error(err: &anyhow::Error) {
    println!("{}", format!("Error: {:#}", err).red().bold());
    println!();
}

/// Print the notice for a request abandoned with Ctrl+C.
pub fn print_cancelled() {
    println!("{}", "Request cancelled.".yellow());
    println!();
}

/// Print where the transcript is being written.
pub fn print_log_location(path: &Path) {
    println!("{}", log_location_line(path));
}

fn log_location_line(path: &Path) -> String {
    format!(
        "{}{}",
        "Transcript: ".dimmed(),
        hyperlink(&path.to_string_lossy())
    )
}

/// A clickable file hyperlink (OSC 8).
pub fn hyperlink(path: &str) -> String {
    format!("\x1b]8;;file://{path}\x1b\\{path}\x1b]8;;\x1b\\")
}

/// Animated "Thinking..." line shown while a request is in flight.
///
/// Only animates when stdout is a terminal. The line is cleared on
/// [`stop`](Self::stop); dropping the indicator stops the animation too.
pub struct ThinkingIndicator {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ThinkingIndicator {
    /// Start animating. Must be called from within a tokio runtime.
    pub fn start() -> Self {
        let token = CancellationToken::new();
        if !io::stdout().is_terminal() {
            return Self {
                token,
                handle: None,
            };
        }

        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            loop {
                print_dimmed("Thinking");
                for _ in 0..3 {
                    tokio::select! {
                        _ = cancelled.cancelled() => return,
                        _ = tokio::time::sleep(DOT_INTERVAL) => print_dimmed("."),
                    }
                }
                tokio::select! {
                    _ = cancelled.cancelled() => return,
                    _ = tokio::time::sleep(DOT_INTERVAL) => clear_line(),
                }
            }
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Stop animating and clear the line.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
            clear_line();
        }
    }
}

impl Drop for ThinkingIndicator {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn print_dimmed(text: &str) {
    print!("{}", text.dimmed());
    let _ = io::stdout().flush();
}

fn clear_line() {
    let _ = execute!(io::stdout(), MoveToColumn(0), Clear(ClearType::CurrentLine));
}
