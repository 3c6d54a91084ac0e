//! `tutor chat` interactive session.
//!
//! The transcript lives in memory for the length of the session only.

use std::io::BufRead;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::mpsc;
use tutor_constant::app;
use tutor_core::{ConversationTurn, Role, Transcript};
use tutor_runtime::{RelayEngine, RuntimeConfig};

use crate::cli::GenerationArgs;
use crate::commands::{relay, request_for, runtime_config};
use crate::output;

const QUIT_COMMANDS: &[&str] = &["/quit", "/exit"];

#[derive(Serialize)]
struct Exchange<'a> {
    turn: usize,
    message: &'a str,
    reply: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

pub async fn handle(args: GenerationArgs) -> Result<()> {
    let config = runtime_config(&args)?;
    let engine = RelayEngine::from_config(&config)?;

    output::header(&format!("{} ({})", app::DISPLAY_NAME, config.model));
    output::dim(app::DESCRIPTION);
    output::dim("Type /quit to leave. Ctrl-C stops a reply; at the prompt it exits.");

    let mut lines = spawn_line_reader();
    let transcript = run_session(&engine, &config, &mut lines, output::is_json()).await?;

    let turns = transcript.iter().filter(|t| t.role == Role::User).count();
    tracing::info!(turns, "Chat session ended");
    output::dim("Goodbye! Keep practicing.");
    Ok(())
}

/// Read stdin lines on a plain thread.
///
/// A thread blocked in `read` cannot be interrupted, so it is left detached:
/// the session stops listening and the process exits without joining it.
fn spawn_line_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Run the prompt loop until `/quit`, end of input or Ctrl-C at the prompt.
async fn run_session(
    engine: &RelayEngine,
    config: &RuntimeConfig,
    lines: &mut mpsc::Receiver<std::io::Result<String>>,
    json: bool,
) -> Result<Transcript> {
    let mut transcript = Transcript::new();
    let mut turn = 0usize;

    loop {
        if !json {
            println!();
            output::prompt_label("You:");
        }

        let line = tokio::select! {
            line = lines.recv() => line,
            Ok(()) = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        // EOF
        let Some(line) = line else { break };
        let line = line?;

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&message) {
            break;
        }

        if !json {
            output::prompt_label("Tutor:");
        }
        let request = request_for(config, message, transcript.clone());
        let outcome = relay(engine, request, !json).await;
        turn += 1;

        if json {
            output::data(
                "exchange",
                &Exchange {
                    turn,
                    message,
                    reply: &outcome.reply,
                    notice: outcome.notice.as_deref(),
                },
            );
        } else {
            println!();
        }

        transcript.push(ConversationTurn::user(message));
        if !outcome.reply.is_empty() {
            transcript.push(ConversationTurn::assistant(outcome.reply));
        }
    }

    Ok(transcript)
}
