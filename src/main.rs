//! Loan assistant - terminal chat front-end
//!
//! A line-oriented presentation layer over the session controller: prints
//! the transcript, offers the suggested questions until the first message,
//! and holds input while an answer is pending.

use loan_assistant::canned::SUGGESTED_QUESTIONS;
use loan_assistant::{
    spawn_session, ChatConfig, HttpFetcher, Role, SendOutcome, SessionContext, Snapshot, TurnId,
};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they stay out of the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_assistant=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ChatConfig::from_env();
    let fetcher = HttpFetcher::new(&config)?;
    tracing::info!(url = %fetcher.answer_url(), "Using answer service");

    match fetcher.health().await {
        Ok(health) if health.is_up() => tracing::info!("Answer service is up"),
        Ok(health) => tracing::warn!(status = %health.status, "Answer service reports not up"),
        Err(e) => tracing::warn!(
            error = %e,
            url = %config.health_url(),
            "Answer service health check failed"
        ),
    }

    let session = spawn_session(fetcher, SessionContext::default());
    let mut printed = print_new_turns(&session.snapshot(), None);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let snapshot = session.snapshot();
        if snapshot.shows_suggestions() {
            print_suggestions();
        }
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "/quit" | "/exit") {
            break;
        }

        let text = resolve_input(line, snapshot.shows_suggestions());
        match session.send(text).await? {
            SendOutcome::Accepted => {
                printed = print_new_turns(&session.snapshot(), printed);
                println!("  ...");
                let snapshot = session.wait_until_idle().await?;
                printed = print_new_turns(&snapshot, printed);
            }
            SendOutcome::Ignored(reason) => tracing::debug!(%reason, "Input ignored"),
        }
    }

    Ok(())
}

/// A bare number picks a suggested question while suggestions are shown
fn resolve_input(line: &str, suggestions_shown: bool) -> &str {
    if suggestions_shown {
        if let Some(preset) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| SUGGESTED_QUESTIONS.get(i).copied())
        {
            return preset;
        }
    }
    line
}

fn print_suggestions() {
    println!("Suggested questions:");
    for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
        println!("  {}. {question}", i + 1);
    }
}

/// Print turns newer than `after`; returns the id of the last turn printed
fn print_new_turns(snapshot: &Snapshot, after: Option<TurnId>) -> Option<TurnId> {
    let mut last = after;
    for turn in snapshot
        .turns
        .iter()
        .filter(|t| after.map_or(true, |id| t.id() > id))
    {
        let label = match turn.role() {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("{label}: {}", turn.content());
        last = Some(turn.id());
    }
    last
}
