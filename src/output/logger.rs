//! Transcript logging for debugging.
//!
//! Each exchange is appended to a JSON-lines file under
//! `$TMPDIR/aeros/logs/<project>/`.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Set up the log directory and return the log file path.
pub fn setup_log_file() -> PathBuf {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).ok();

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    log_dir.join(format!("{}.jsonl", timestamp))
}

/// Get the log directory path.
pub fn log_directory() -> PathBuf {
    let base_dir = env::var("TMPDIR")
        .or_else(|_| env::var("XDG_RUNTIME_DIR"))
        .unwrap_or_else(|_| "/tmp".to_string());

    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "unknown".to_string());

    PathBuf::from(base_dir)
        .join("aeros")
        .join("logs")
        .join(project_name)
}

/// One logged exchange.
#[derive(Debug, Serialize)]
pub struct TranscriptEntry<'a> {
    pub timestamp: String,
    pub model: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> TranscriptEntry<'a> {
    pub fn reply(model: &'a str, prompt: &'a str, reply: &'a str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            model,
            prompt,
            reply: Some(reply),
            error: None,
        }
    }

    pub fn error(model: &'a str, prompt: &'a str, err: &anyhow::Error) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            model,
            prompt,
            reply: None,
            error: Some(format!("{:#}", err)),
        }
    }
}

/// Append-only transcript file.
#[derive(Debug, Clone)]
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    /// Transcript in a fresh timestamped file in the log directory.
    pub fn create() -> Self {
        Self::at(setup_log_file())
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a JSON line.
    pub fn record(&self, entry: &TranscriptEntry<'_>) -> Result<()> {
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
