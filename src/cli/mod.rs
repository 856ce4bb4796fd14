use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use vidchat::backends::{FastEmbedder, FileTranscript, GroqClient};
use vidchat::config::Config;
use vidchat::domain::Turn;
use vidchat::ports::TranscriptSource;
use vidchat::services::Pipeline;
use vidchat::{Result, VidchatError};

#[derive(Parser)]
#[command(name = "vidchat")]
#[command(about = "Chat with a video's transcript using retrieval-augmented generation")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Ask a single question about a transcript")]
    Ask {
        #[arg(help = "Question to ask")]
        question: String,

        #[arg(long, help = "Path to a plain-text transcript file")]
        transcript: PathBuf,
    },

    #[command(about = "Interactive chat over a transcript")]
    Chat {
        #[arg(long, help = "Path to a plain-text transcript file")]
        transcript: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Ask {
            question,
            transcript,
        } => {
            let pipeline = build_pipeline(&config).await?;
            index_transcript(&pipeline, &transcript).await?;

            let answer = pipeline.ask(&question, &[]).await?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "question": question,
                        "answer": answer,
                    }))?
                );
            } else {
                println!("{answer}");
            }
            Ok(())
        }
        Commands::Chat { transcript } => {
            let pipeline = build_pipeline(&config).await?;
            index_transcript(&pipeline, &transcript).await?;
            chat_loop(&pipeline).await
        }
    }
}

async fn build_pipeline(config: &Config) -> Result<Pipeline<FastEmbedder, GroqClient>> {
    // Model init downloads weights on first run; keep it off the async
    // worker threads.
    let embedder = tokio::task::spawn_blocking(FastEmbedder::new)
        .await
        .map_err(|e| VidchatError::EmbeddingBackend(format!("embedder init failed: {e}")))??;
    let generator = GroqClient::new(&config.generation)?;

    Ok(Pipeline::new(
        Arc::new(embedder),
        Arc::new(generator),
        config,
    ))
}

async fn index_transcript(
    pipeline: &Pipeline<FastEmbedder, GroqClient>,
    transcript: &Path,
) -> Result<()> {
    let text = FileTranscript
        .fetch_transcript(&transcript.to_string_lossy())
        .await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Building semantic index...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    match pipeline.build_index(&text).await {
        Ok(stats) => {
            spinner.finish_with_message(format!(
                "Indexed {} passages in {:.1}s",
                stats.passage_count,
                stats.elapsed.as_secs_f32()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e)
        }
    }
}

async fn chat_loop(pipeline: &Pipeline<FastEmbedder, GroqClient>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut turns: Vec<Turn> = Vec::new();

    println!("Ask questions about the video. Type 'exit' to quit.");

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        // A failed question leaves the index and history intact, so the
        // user can simply try again.
        match pipeline.ask(question, &turns).await {
            Ok(answer) => {
                println!("{answer}\n");
                turns.push(Turn::new(question, &answer));
            }
            Err(e) => {
                eprintln!("error: {e}\n");
            }
        }
    }

    Ok(())
}
