//! debate - scripted Pro/Con debate with an LLM judge
//!
//! Run with: cargo run -- "Should AI replace teachers?" --rounds 2 --free-rounds 1
//! Or without a topic to be asked for each setting on stdin.
//!
//! Requires DEEPSEEK_API_KEY (any OpenAI-compatible endpoint works via
//! DEEPSEEK_BASE_URL and DEEPSEEK_MODEL).

use anyhow::Result;
use clap::Parser;
use debate_council::{
    ChatClient, ChatConfig, Debate, DebateConfig, DebateOutcome, JudgeInput, RawDebateInput,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "debate",
    version,
    about = "Scripted Pro/Con debate between two LLM personas, judged by a third"
)]
struct Cli {
    /// Debate topic. When omitted, every setting is asked for interactively.
    topic: Vec<String>,

    /// Regular rounds (default 3; invalid values fall back to 3)
    #[arg(long, allow_hyphen_values = true)]
    rounds: Option<String>,

    /// Free-debate question/answer rounds (default 0, no free debate)
    #[arg(long, allow_hyphen_values = true)]
    free_rounds: Option<String>,

    /// Own statements each side keeps as opponent context (1-5, default 1)
    #[arg(long, allow_hyphen_values = true)]
    context_rounds: Option<String>,

    /// Stance argued by the Pro side
    #[arg(long)]
    pro_stance: Option<String>,

    /// Stance argued by the Con side
    #[arg(long)]
    con_stance: Option<String>,

    /// Working language of the whole debate
    #[arg(long)]
    language: Option<String>,

    /// Chat model to use
    #[arg(long, env = "DEEPSEEK_MODEL")]
    model: Option<String>,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "DEBATE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = if cli.topic.is_empty() {
        let mut stderr = io::stderr();
        writeln!(stderr, "=== Debate Council ===")?;
        prompt_for_input(&cli, &mut io::stdin().lock(), &mut stderr)?
    } else {
        raw_from_args(&cli)
    };
    let config = DebateConfig::from_raw(&raw);

    let mut chat = ChatConfig::default();
    if let Some(model) = &cli.model {
        chat.model = model.clone();
    }
    chat.timeout = cli.timeout_secs.map(Duration::from_secs);
    let generator = Arc::new(ChatClient::new(chat)?);

    if !cli.json {
        print_header(&config);
    }

    match Debate::new(config, generator).run().await {
        Ok(outcome) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }
        Err(e) => {
            if cli.json {
                let error = serde_json::json!({"error": e.to_string()});
                println!("{}", serde_json::to_string_pretty(&error)?);
            } else {
                return Err(e.into());
            }
        }
    }

    Ok(())
}

fn raw_from_args(cli: &Cli) -> RawDebateInput {
    RawDebateInput {
        topic: Some(cli.topic.join(" ")),
        rounds: cli.rounds.clone(),
        free_debate_rounds: cli.free_rounds.clone(),
        context_rounds: cli.context_rounds.clone(),
        pro_stance: cli.pro_stance.clone(),
        con_stance: cli.con_stance.clone(),
        language: cli.language.clone(),
    }
}

/// Ask for every core setting not already given as a flag. Blank answers
/// take the defaults. Questions go to `prompts` so stdout stays free for the
/// transcripts or the JSON document.
fn prompt_for_input(
    cli: &Cli,
    input: &mut impl BufRead,
    prompts: &mut impl Write,
) -> Result<RawDebateInput> {
    let mut ask = |question: &str, given: &Option<String>| -> Result<Option<String>> {
        if given.is_some() {
            return Ok(given.clone());
        }
        write!(prompts, "{question}: ")?;
        prompts.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(Some(line.trim().to_string()))
    };

    let topic = ask("Topic (e.g. Should AI replace teachers?)", &None)?;
    let rounds = ask("Regular rounds (default 3)", &cli.rounds)?;
    let free_debate_rounds = ask("Free-debate rounds (default 0, none)", &cli.free_rounds)?;
    let context_rounds = ask("Context rounds kept (default 1, 1-5)", &cli.context_rounds)?;

    Ok(RawDebateInput {
        topic,
        rounds,
        free_debate_rounds,
        context_rounds,
        pro_stance: cli.pro_stance.clone(),
        con_stance: cli.con_stance.clone(),
        language: cli.language.clone(),
    })
}

fn print_header(config: &DebateConfig) {
    println!("\n=== Debate starting ===");
    println!("Topic: {}", config.topic);
    println!("Pro: {}  |  Con: {}", config.pro_stance, config.con_stance);
    println!("Regular rounds: {}", config.rounds);
    println!("Free-debate rounds: {}", config.free_debate_rounds);
    println!("Context rounds: {}", config.context_rounds);
    println!();
}

fn print_outcome(outcome: &DebateOutcome) {
    println!("=== Debate ===");
    println!("{}", outcome.pro_transcript);
    println!("{}", outcome.con_transcript);

    if outcome.judge_input == JudgeInput::Summarized {
        println!(
            "(transcripts were {} characters long; the judge saw summaries)\n",
            outcome.transcript_chars
        );
    }

    println!("=== Verdict ===");
    println!("{}", outcome.verdict);
}
