use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use libespanol::{AssessmentContext, AssessmentResult, Engine, SpanishConfig};

/// Assess spoken Spanish verb forms against their targets.
///
/// Without a subcommand, reads `target|recognized` lines from stdin.
#[derive(Parser)]
#[command(name = "espanol", version)]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Assess one transcript against a target form
    Assess {
        target: String,
        recognized: String,
        /// recognizer confidence in [0, 1]
        #[arg(long, default_value_t = libpronuncia_core::context::DEFAULT_CONFIDENCE)]
        confidence: f32,
        /// elapsed time of the attempt
        #[arg(long, default_value_t = libpronuncia_core::context::DEFAULT_TIMING_MS)]
        timing_ms: u64,
        /// infinitive of the target verb
        #[arg(long)]
        lemma: Option<String>,
    },
    /// Show the phonetic breakdown of a word
    Breakdown { word: String },
    /// Show the pronunciation guide of a word
    Guide { word: String },
}

fn print_result(result: &AssessmentResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    let verdict = if result.is_correct_for_srs { "pass" } else { "retry" };
    println!("{:>3}  {}  {}", result.accuracy, verdict, result.feedback);
    for s in &result.suggestions {
        println!("     - {}", s);
    }
    Ok(())
}

fn run_stdin(engine: &Engine, json: bool) -> Result<()> {
    let stdin = io::stdin();
    for (n, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((target, recognized)) = line.split_once('|') else {
            tracing::warn!(line = n + 1, "expected 'target|recognized'");
            continue;
        };
        let result = engine.assess(
            target.trim(),
            recognized.trim(),
            &AssessmentContext::default(),
        );
        print_result(&result, json)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SpanishConfig::load_toml(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SpanishConfig::default(),
    };
    let engine = Engine::from_config(config)?;

    match args.command {
        Some(Command::Assess {
            target,
            recognized,
            confidence,
            timing_ms,
            lemma,
        }) => {
            let mut context = AssessmentContext::with_measurements(confidence, timing_ms);
            context.lemma = lemma;
            let result = engine.assess(&target, &recognized, &context);
            print_result(&result, args.json)?;
        }
        Some(Command::Breakdown { word }) => {
            let breakdown = engine.breakdown(&word);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                println!("word:       {}", breakdown.word);
                println!("syllables:  {}", breakdown.syllable_count);
                println!("vowels:     {}", breakdown.vowels);
                println!("consonants: {}", breakdown.consonants);
                println!("stress:     {}", breakdown.stress_class.label());
                for d in &breakdown.difficulties {
                    println!("  {} @{}: {}", d.element, d.position, d.tip);
                }
            }
        }
        Some(Command::Guide { word }) => println!("{}", libespanol::guide(&word)),
        None => run_stdin(&engine, args.json)?,
    }

    Ok(())
}
