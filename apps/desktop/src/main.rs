use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use client_core::{
    format_score, AnalyzerController, DisplayState, InputBuffer, IDLE_MESSAGE, PENDING_MESSAGE,
};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the scoring server.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Analyze this text once and exit instead of starting the prompt loop.
    #[arg(long)]
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let controller = AnalyzerController::new(args.server_url);
    let mut buffer = InputBuffer::new();
    let mut score_text = String::from("0.00");

    if let Some(text) = args.text {
        buffer.set_text(text);
        run_analysis(&controller, &buffer, &mut score_text).await?;
        return Ok(());
    }

    println!("How are you feeling today? Type your thoughts and press Enter.");
    println!("(an empty line analyzes the empty string, Ctrl-D exits)");
    render(&score_text, IDLE_MESSAGE);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        buffer.set_text(line?);
        run_analysis(&controller, &buffer, &mut score_text).await?;
    }

    Ok(())
}

async fn run_analysis(
    controller: &Arc<AnalyzerController>,
    buffer: &InputBuffer,
    score_text: &mut String,
) -> Result<()> {
    let handle = controller.analyze(buffer);
    render(score_text, PENDING_MESSAGE);
    handle.await?;

    let state = controller.display_state();
    apply_score(&state, score_text);
    render(score_text, state.message());
    Ok(())
}

/// Only a fresh result moves the score display; failures leave it alone.
fn apply_score(state: &DisplayState, score_text: &mut String) {
    if let DisplayState::Result { score, .. } = state {
        *score_text = format_score(*score);
    }
}

fn render(score_text: &str, message: &str) {
    println!("Anxiety Score: {score_text}");
    println!("{message}");
}
