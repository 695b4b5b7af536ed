//! Project configuration discovery and loading.
//!
//! Settings live in an optional `.aeros.toml`. This module walks up the
//! directory tree to find it, parses it, and writes a commented template
//! for `aeros init`. Without a file every setting takes its default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::markdown::RenderOptions;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = ".aeros.toml";

/// Project configuration, possibly loaded from `.aeros.toml`.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// The directory containing `.aeros.toml`, if one was found.
    pub root: Option<PathBuf>,
    /// The parsed configuration.
    pub config: AerosConfig,
}

/// Contents of `.aeros.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AerosConfig {
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub render: RenderOptions,
}

/// Chat configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_model")]
    pub model: String,
    /// Assistant name shown in the banner and reply label.
    #[serde(default = "default_name")]
    pub name: String,
    /// System instruction. Defaults to a friendly persona built from `name`.
    #[serde(default)]
    pub behavior: Option<String>,
    /// Enable Google Search grounding.
    #[serde(default = "default_true")]
    pub search: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            name: default_name(),
            behavior: None,
            search: true,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ChatSettings {
    /// The system instruction sent with every request.
    pub fn system_instruction(&self) -> String {
        match &self.behavior {
            Some(behavior) if !behavior.trim().is_empty() => behavior.clone(),
            _ => format!(
                "You are {}, a helpful, warm, and friendly AI assistant that helps users with their queries.",
                self.name
            ),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_name() -> String {
    "Aeros AI".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

/// Discover the project configuration by walking up from CWD.
pub fn discover() -> Result<ProjectConfig> {
    let cwd = env::current_dir()?;
    discover_from(&cwd)
}

/// Discover the project configuration starting from a specific directory.
///
/// Returns defaults when no `.aeros.toml` exists between `start` and the
/// filesystem root. A file that exists but does not parse is an error.
fn discover_from(start: &Path) -> Result<ProjectConfig> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.is_file() {
            let config = load_config(&config_path)?;
            return Ok(ProjectConfig {
                root: Some(current.to_path_buf()),
                config,
            });
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Ok(ProjectConfig::default()),
        }
    }
}

/// Load and parse a `.aeros.toml` file.
fn load_config(path: &Path) -> Result<AerosConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: AerosConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Load `.env.local` then `.env` from the current directory.
///
/// Variables already set in the environment win, and so does `.env.local`
/// over `.env`. Missing files are not an error.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
}

/// Write a commented `.aeros.toml` into the current directory.
pub fn init() -> Result<()> {
    let cwd = env::current_dir()?;
    init_in_dir(&cwd)
}

/// Internal implementation of init that accepts a target directory.
/// Does nothing if the file already exists.
fn init_in_dir(cwd: &Path) -> Result<()> {
    let config_path = cwd.join(CONFIG_FILE);
    if config_path.exists() {
        println!("{} already exists, skipping.", CONFIG_FILE);
        return Ok(());
    }

    let default_config = r#"[chat]
# model = "gemini-2.5-flash"
# name = "Aeros AI"
# behavior = "You are Aeros AI, a helpful, warm, and friendly AI assistant."
# search = true
# timeout_secs = 120

[render]
# width = 80
# indent = 2
"#;
    fs::write(&config_path, default_config)
        .with_context(|| format!("Failed to create {}", CONFIG_FILE))?;
    println!("Created {}", CONFIG_FILE);
    println!("Put your GEMINI_API_KEY in .env.local or the environment, then run 'aeros'.");

    Ok(())
}
