//! Aeros library — the markdown renderer plus the chat client around it.
//!
//! `markdown` is self-contained and has no I/O: `markdown::render(text)`
//! turns model output into an ANSI-styled, wrapped string. The remaining
//! modules make up the `aeros` binary and are exposed so that integration
//! tests in `tests/` can drive a chat session with a scripted backend.

pub mod chat;
pub mod cli;
pub mod config;
pub mod markdown;
pub mod output;
pub mod project;
pub mod repl;
