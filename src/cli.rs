//! CLI argument parsing using clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Chat with Gemini in the terminal, with replies rendered as styled markdown.
///
/// Running `aeros` with no subcommand starts a chat session. Ctrl+C or
/// Ctrl+D ends it.
#[derive(Parser, Debug)]
#[command(name = "aeros", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub chat: ChatArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive chat session (the default)
    Chat(ChatArgs),
    /// Render a markdown file (or stdin) to the terminal
    Render {
        /// File to render; reads stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Create a commented .aeros.toml in the current directory
    Init,
}

/// Options for a chat session.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct ChatArgs {
    /// Gemini model to talk to
    #[arg(long, value_name = "MODEL", env = "AEROS_MODEL")]
    pub model: Option<String>,

    /// Assistant name used in the banner, labels and default persona
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Disable Google Search grounding
    #[arg(long)]
    pub no_search: bool,

    /// Do not write a transcript log
    #[arg(long)]
    pub no_log: bool,

    /// Gemini API key
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Options shared by everything that renders markdown.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct DisplayArgs {
    /// Wrap paragraphs wider than this many columns
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Disable ANSI colors and styles
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, defaulting to `chat` with the top-level flags.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Chat(self.chat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_chat() {
        let args = Args::try_parse_from(["aeros", "--model", "gemini-2.5-pro"]).unwrap();
        match args.into_command() {
            Command::Chat(chat) => assert_eq!(chat.model.as_deref(), Some("gemini-2.5-pro")),
            other => panic!("expected Chat, got {:?}", other),
        }
    }

    #[test]
    fn chat_subcommand_flags() {
        let args = Args::try_parse_from([
            "aeros", "chat", "--name", "Nova", "--no-search", "--width", "100", "--no-color",
        ])
        .unwrap();
        match args.into_command() {
            Command::Chat(chat) => {
                assert_eq!(chat.name.as_deref(), Some("Nova"));
                assert!(chat.no_search);
                assert_eq!(chat.display.width, Some(100));
                assert!(chat.display.no_color);
            }
            other => panic!("expected Chat, got {:?}", other),
        }
    }

    #[test]
    fn render_with_file() {
        let args = Args::try_parse_from(["aeros", "render", "notes.md", "--width", "60"]).unwrap();
        match args.into_command() {
            Command::Render { file, display } => {
                assert_eq!(file, Some(PathBuf::from("notes.md")));
                assert_eq!(display.width, Some(60));
            }
            other => panic!("expected Render, got {:?}", other),
        }
    }

    #[test]
    fn render_without_file_reads_stdin() {
        let args = Args::try_parse_from(["aeros", "render"]).unwrap();
        assert!(matches!(
            args.into_command(),
            Command::Render { file: None, .. }
        ));
    }

    #[test]
    fn init_subcommand() {
        let args = Args::try_parse_from(["aeros", "init"]).unwrap();
        assert!(matches!(args.into_command(), Command::Init));
    }

    #[test]
    fn top_level_flags_conflict_with_subcommand() {
        let result = Args::try_parse_from(["aeros", "--no-search", "init"]);
        assert!(result.is_err());
    }

    #[test]
    fn width_must_be_a_number() {
        let result = Args::try_parse_from(["aeros", "render", "--width", "wide"]);
        assert!(result.is_err());
    }
}
