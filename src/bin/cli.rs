//! CLI binary for heron.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use heron::{
    AgentOptions, AgentOutput, HeronConfig, OpenAiComposer, answer, answer_many,
    answer_with_composer, render,
};
use heron_search::QueryBatch;
use tracing_subscriber::EnvFilter;

/// Heron: answer a question, run a search, or let a model answer with sources.
#[derive(Parser)]
#[command(name = "heron", version, about)]
struct Cli {
    /// The question to answer.
    #[arg(default_value = "hello")]
    question: Vec<String>,

    /// Log debug details to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Results requested per query.
    #[arg(short = 'c', long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Run several searches at once, separated by ';' (e.g. "python;golang;rust").
    #[arg(long)]
    multi: Option<String>,

    /// Search provider: fakeA, fakeB, searxng or brave.
    #[arg(short, long, default_value = "fakeA")]
    provider: String,

    /// Let the configured language model answer, searching as it needs.
    #[arg(long)]
    llm: bool,

    /// Path to TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let default_filter = if cli.verbose {
        "heron=debug,heron_search=debug"
    } else {
        "heron=info,heron_search=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HeronConfig::load(cli.config.as_deref())?;
    let options = AgentOptions {
        provider: cli.provider.clone(),
        count: cli.count as usize,
    };
    let question = cli.question.join(" ");

    let output = if let Some(batch) = multi_batch(cli.multi.as_deref()) {
        answer_many(&batch, &options, &config).await
    } else if cli.llm {
        match OpenAiComposer::new(config.llm.clone()) {
            Ok(composer) => answer_with_composer(&question, &composer, &options, &config).await,
            Err(e) => AgentOutput::Error(e.to_string()),
        }
    } else {
        answer(&question, &options, &config).await
    };

    if cli.json {
        println!("{}", render::to_json(&output)?);
    } else {
        println!("{}", render::to_text(&output));
    }

    Ok(if output.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// The `--multi` batch, or `None` when no query survives cleaning so the
/// positional question is answered instead.
fn multi_batch(list: Option<&str>) -> Option<QueryBatch> {
    list.map(QueryBatch::parse).filter(|batch| !batch.is_empty())
}
