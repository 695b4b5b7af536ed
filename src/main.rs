//! Aeros - chat with Gemini in the terminal

use anyhow::{Context, Result};
use std::io::Read;
use std::process::ExitCode;

use aeros::cli::{self, Command};
use aeros::markdown::Renderer;
use aeros::{config, project, repl};

fn main() -> ExitCode {
    match run() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    // Before parsing so clap's `env` fallbacks can see .env.local values.
    project::load_env_files();
    let args = cli::Args::parse_args();

    match args.into_command() {
        Command::Init => {
            project::init()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { file, display } => {
            apply_color_choice(!display.no_color);
            let project = project::discover()?;
            let options = config::render_options(&display, project.config.render)?;

            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };

            println!("{}", Renderer::new(options).render(&text));
            Ok(ExitCode::SUCCESS)
        }
        Command::Chat(chat) => {
            let project = project::discover()?;
            let config = config::Config::from_chat_args(chat, project)?;
            apply_color_choice(config.color);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            let result = runtime.block_on(repl::run(config));
            // A terminal read may still be blocked on stdin; don't wait for it.
            runtime.shutdown_background();

            result?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn apply_color_choice(color: bool) {
    if !color {
        colored::control::set_override(false);
    }
}
