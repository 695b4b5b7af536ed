//! The interactive chat loop.
//!
//! Reads a prompt, sends it to the backend while the thinking indicator
//! runs, renders the reply as markdown and prints it. Ctrl+C at the prompt
//! (or end of input) says goodbye to the model and ends the session;
//! Ctrl+C during a request abandons that request only.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::chat::gemini::GeminiClient;
use crate::chat::{ChatBackend, GOODBYE};
use crate::config::Config;
use crate::markdown::Renderer;
use crate::output::formatter::{self, ThinkingIndicator};
use crate::output::logger::{Transcript, TranscriptEntry};

/// Where prompts come from.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// The next prompt, or `None` when the user wants to leave.
    async fn next_prompt(&mut self) -> Result<Option<String>>;

    /// Resolves when the user asks to abandon the request in flight.
    async fn interrupted(&self);
}

/// Prompts typed at the terminal.
pub struct TerminalInput;

#[async_trait]
impl PromptSource for TerminalInput {
    async fn next_prompt(&mut self) -> Result<Option<String>> {
        formatter::print_prompt()?;

        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            let n = std::io::stdin().read_line(&mut line)?;
            Ok::<_, std::io::Error>((n, line))
        });

        tokio::select! {
            result = read => {
                let (n, line) = result
                    .context("Input reader stopped unexpectedly")?
                    .context("Failed to read input")?;
                if n == 0 {
                    // EOF (Ctrl+D)
                    println!();
                    return Ok(None);
                }
                Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                Ok(None)
            }
        }
    }

    async fn interrupted(&self) {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Counters for a finished session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub replies: usize,
    pub errors: usize,
    pub cancelled: usize,
}

/// Presentation settings for one session.
pub struct Session {
    pub name: String,
    pub renderer: Renderer,
    pub transcript: Option<Transcript>,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.chat.name.clone(),
            renderer: Renderer::new(config.render),
            transcript: config.log.then(Transcript::create),
        }
    }

    fn record_reply(&self, model: &str, prompt: &str, reply: &str) {
        if let Some(transcript) = &self.transcript {
            let _ = transcript.record(&TranscriptEntry::reply(model, prompt, reply));
        }
    }

    fn record_error(&self, model: &str, prompt: &str, err: &anyhow::Error) {
        if let Some(transcript) = &self.transcript {
            let _ = transcript.record(&TranscriptEntry::error(model, prompt, err));
        }
    }

    fn show_reply(&self, reply: &str) {
        formatter::print_reply(&self.name, &self.renderer.render(reply));
    }
}

/// Run an interactive session against Gemini.
pub async fn run(config: Config) -> Result<SessionSummary> {
    let mut backend = GeminiClient::new(&config.chat, config.api_key.clone())?;
    let session = Session::from_config(&config);

    if let Some(transcript) = &session.transcript {
        formatter::print_log_location(transcript.path());
    }
    formatter::print_welcome(&session.name);

    run_session(&mut backend, &mut TerminalInput, &session).await
}

/// Drive a session until the prompt source runs dry.
pub async fn run_session<B, P>(
    backend: &mut B,
    input: &mut P,
    session: &Session,
) -> Result<SessionSummary>
where
    B: ChatBackend,
    P: PromptSource,
{
    let mut summary = SessionSummary::default();

    loop {
        let Some(prompt) = input.next_prompt().await? else {
            say_goodbye(backend, session, &mut summary).await;
            return Ok(summary);
        };

        if prompt.trim().is_empty() {
            formatter::print_empty_prompt();
            continue;
        }

        let thinking = ThinkingIndicator::start();
        let result = tokio::select! {
            result = backend.send_message(&prompt) => Some(result),
            _ = input.interrupted() => None,
        };
        thinking.stop().await;

        match result {
            Some(Ok(reply)) => {
                session.record_reply(backend.model(), &prompt, &reply);
                session.show_reply(&reply);
                summary.replies += 1;
            }
            Some(Err(err)) => {
                session.record_error(backend.model(), &prompt, &err);
                formatter::print_error(&err);
                summary.errors += 1;
            }
            None => {
                formatter::print_cancelled();
                summary.cancelled += 1;
            }
        }
    }
}

async fn say_goodbye<B: ChatBackend>(
    backend: &mut B,
    session: &Session,
    summary: &mut SessionSummary,
) {
    let thinking = ThinkingIndicator::start();
    let result = backend.send_message(GOODBYE).await;
    thinking.stop().await;

    match result {
        Ok(reply) => {
            session.record_reply(backend.model(), GOODBYE, &reply);
            session.show_reply(&reply);
            summary.replies += 1;
        }
        Err(err) => {
            session.record_error(backend.model(), GOODBYE, &err);
            formatter::print_error(&err);
            summary.errors += 1;
        }
    }
}
