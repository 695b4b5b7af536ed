//! Conversation with the remote model.
//!
//! The renderer never talks to the network. Everything that does lives
//! behind [`ChatBackend`], so the interactive loop can be driven by a
//! scripted backend in tests.

pub mod events;
pub mod gemini;
pub mod parser;

use anyhow::Result;
use async_trait::async_trait;

/// Message sent when the user leaves the session.
pub const GOODBYE: &str = "Goodbye!";

/// A stateful chat session with some model.
#[async_trait]
pub trait ChatBackend: Send {
    /// Send one user message and return the reply text.
    ///
    /// Implementations keep the conversation history themselves. A failed
    /// or cancelled call must leave the history as it was before the call.
    async fn send_message(&mut self, prompt: &str) -> Result<String>;

    /// Model identifier, used for transcript entries.
    fn model(&self) -> &str;
}
