//! Runtime configuration: command line flags merged over `.aeros.toml`.

use anyhow::{bail, Result};
use std::env;

use crate::cli::{ChatArgs, DisplayArgs};
use crate::markdown::RenderOptions;
use crate::project::{ChatSettings, ProjectConfig};

/// Fallback environment variable for the API key.
const FALLBACK_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Everything a chat session needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub chat: ChatSettings,
    pub render: RenderOptions,
    pub api_key: String,
    /// Emit ANSI styling.
    pub color: bool,
    /// Write a transcript log.
    pub log: bool,
}

impl Config {
    /// Build config from chat args and project config.
    ///
    /// Flags win over the file, the file wins over built-in defaults. The
    /// API key comes from `--api-key` / `GEMINI_API_KEY`, then
    /// `GOOGLE_API_KEY`.
    pub fn from_chat_args(args: ChatArgs, project: ProjectConfig) -> Result<Self> {
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env::var(FALLBACK_API_KEY_VAR).ok())
            .filter(|key| !key.trim().is_empty());
        let Some(api_key) = api_key else {
            bail!(
                "no API key found. Set GEMINI_API_KEY in the environment or in .env.local, or pass --api-key"
            );
        };

        let mut chat = project.config.chat;
        if let Some(model) = args.model {
            chat.model = model;
        }
        if let Some(name) = args.name {
            chat.name = name;
        }
        if args.no_search {
            chat.search = false;
        }
        if chat.model.trim().is_empty() {
            bail!("model name must not be empty");
        }

        Ok(Self {
            chat,
            render: render_options(&args.display, project.config.render)?,
            api_key,
            color: !args.display.no_color,
            log: !args.no_log,
        })
    }
}

/// Apply display flags to the file's render options.
pub fn render_options(display: &DisplayArgs, base: RenderOptions) -> Result<RenderOptions> {
    let mut options = base;
    if let Some(width) = display.width {
        options.width = width;
    }
    if options.width == 0 {
        bail!("--width must be greater than zero");
    }
    if options.indent >= options.width {
        bail!(
            "indent ({}) must be smaller than width ({})",
            options.indent,
            options.width
        );
    }
    Ok(options)
}
