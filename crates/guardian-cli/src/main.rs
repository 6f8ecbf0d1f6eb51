//! Guardian CLI
//!
//! Detects sensitive spans, scores risk, flags unsafe content and rewrites
//! text from the command line. Results are printed as JSON on stdout; logs go
//! to stderr.
//!
//! Usage:
//! ```bash
//! # Redact emails and phone numbers from a file
//! guardian rewrite notes.txt --mode redact --categories email,phone
//!
//! # Full analysis of stdin with a custom config
//! cat prompt.txt | guardian --config guardian.yaml analyze
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use guardian_core::Category;
use guardian_engine::{Engine, EngineConfig};
use guardian_pii::RewriteMode;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Guardian - sensitive data detection and rewriting
#[derive(Parser)]
#[command(name = "guardian")]
#[command(about = "Detect, score, flag and rewrite sensitive text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (YAML or TOML)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "GUARDIAN_CONFIG",
        global = true
    )]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List sensitive spans and per-category counts
    Detect(InputArgs),
    /// Score the privacy risk of the text
    Score(InputArgs),
    /// Flag unsafe or sensitive content
    Flag(InputArgs),
    /// Rewrite sensitive spans
    Rewrite(RewriteArgs),
    /// Run detection, scoring, flagging and rewriting together
    Analyze(RewriteArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// Input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,
}

#[derive(clap::Args)]
struct RewriteArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Rewrite mode: anonymize, redact or encrypt
    #[arg(short, long, default_value = "anonymize")]
    mode: RewriteMode,

    /// Categories to rewrite, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    categories: Vec<Category>,

    /// Keep original span text in the output
    #[arg(long)]
    include_originals: bool,
}

impl RewriteArgs {
    fn selected(&self) -> HashSet<Category> {
        if self.categories.is_empty() {
            Category::ALL.into_iter().collect()
        } else {
            self.categories.iter().copied().collect()
        }
    }
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    // Environment overrides the file
    config.merge_env();

    Ok(config)
}

/// Log to stderr at the configured level; `RUST_LOG` takes precedence
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_tracing(&config.logging.level)?;

    match &cli.config {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("Using default configuration"),
    }

    let engine = Engine::new(config).context("Invalid configuration")?;

    match cli.command {
        Commands::Detect(args) => {
            let text = read_input(&args)?;
            print_json(&engine.detect_sensitive_spans(&text), cli.pretty)?;
        }
        Commands::Score(args) => {
            let text = read_input(&args)?;
            let detected = engine.detect_sensitive_spans(&text);
            print_json(&engine.score_risk(&text, &detected.counts), cli.pretty)?;
        }
        Commands::Flag(args) => {
            let text = read_input(&args)?;
            print_json(&engine.flag_content(&text), cli.pretty)?;
        }
        Commands::Rewrite(args) => {
            let text = read_input(&args.input)?;
            let detected = engine.detect_sensitive_spans(&text);
            let mut output =
                engine.rewrite_text(&text, &detected.spans, &args.selected(), args.mode);
            if !args.include_originals {
                output.strip_originals();
            }
            print_json(&output, cli.pretty)?;
        }
        Commands::Analyze(args) => {
            let text = read_input(&args.input)?;
            let mut analysis = engine.analyze(&text, &args.selected(), args.mode);
            if !args.include_originals {
                analysis.rewrite.strip_originals();
                analysis.spans = analysis.rewrite.spans.clone();
            }
            print_json(&analysis, cli.pretty)?;
        }
    }

    Ok(())
}
