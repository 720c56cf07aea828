//! Command-line interface for randodo
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # One random string from the `email` generator
//! randodo generate --file people.rnd --name email
//!
//! # Ten reproducible strings as JSON lines
//! randodo generate --file people.rnd --name email \
//!   --count 10 --seed 42 --format jsonl
//! ```
//!
//! ## Inspect
//! ```bash
//! # Definitions as written
//! randodo list --file people.rnd
//!
//! # Optimized generator trees
//! randodo inspect --file people.rnd --name email
//! ```
//!
//! ## Template Format
//! ```text
//! # comment
//! first = (Ann|Bob|Eve)
//! email = $first[0-9]{2,4}@example\.com
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=pattern_generator=debug`).

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pattern_generator::{EntropySources, SeededSources, TemplateFile};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "randodo")]
#[command(about = "Generate random text from regex-like templates")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate strings from a named generator
    Generate {
        #[command(flatten)]
        template: TemplateArgs,

        /// Name of the generator to evaluate
        #[arg(long, short = 'n')]
        name: String,

        /// Number of strings to generate
        #[arg(long, short = 'c', default_value = "1")]
        count: u64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print every definition of a template as `name = pattern`
    List {
        #[command(flatten)]
        template: TemplateArgs,
    },

    /// Print the optimized generator trees of a template
    Inspect {
        #[command(flatten)]
        template: TemplateArgs,

        /// Only print this generator (default: all, in definition order)
        #[arg(long, short = 'n')]
        name: Option<String>,
    },
}

/// Arguments shared by every command that loads a template.
#[derive(Args, Clone, Debug)]
struct TemplateArgs {
    /// Path to the template file
    #[arg(long, short = 'f', env = "RANDODO_FILE")]
    file: PathBuf,

    /// Random seed for deterministic generation (same seed = same output);
    /// omitted means OS entropy
    #[arg(long, env = "RANDODO_SEED")]
    seed: Option<u64>,
}

impl TemplateArgs {
    fn load(&self) -> anyhow::Result<TemplateFile> {
        let template = match self.seed {
            Some(seed) => {
                tracing::debug!(seed, "using seeded random sources");
                TemplateFile::from_file(&self.file, SeededSources::new(seed))
            }
            None => TemplateFile::from_file(&self.file, EntropySources),
        };
        template.with_context(|| format!("Failed to load template from {:?}", self.file))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One generated string per line
    Text,
    /// One JSON object per line: {"name", "index", "value"}
    Jsonl,
}

#[derive(Serialize)]
struct Record<'a> {
    name: &'a str,
    index: u64,
    value: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            template,
            name,
            count,
            format,
        } => run_generate(&template, &name, count, format),
        Commands::List { template } => run_list(&template),
        Commands::Inspect { template, name } => run_inspect(&template, name.as_deref()),
    }
}

fn run_generate(
    args: &TemplateArgs,
    name: &str,
    count: u64,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let template = args.load()?;
    tracing::info!("Generating {} value(s) from '{}'", count, name);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for index in 0..count {
        let value = template
            .generate(name)
            .with_context(|| format!("Failed to generate from template {:?}", args.file))?;
        match format {
            OutputFormat::Text => writeln!(out, "{value}")?,
            OutputFormat::Jsonl => {
                let record = Record { name, index, value };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn run_list(args: &TemplateArgs) -> anyhow::Result<()> {
    let template = args.load()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for definition in template.definitions() {
        writeln!(out, "{} = {}", definition.name, definition.pattern)?;
    }
    Ok(())
}

fn run_inspect(args: &TemplateArgs, name: Option<&str>) -> anyhow::Result<()> {
    let template = args.load()?;
    let names = match name {
        Some(name) => vec![name.to_string()],
        None => template.environment().names(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for name in &names {
        let tree = template.describe(name)?;
        writeln!(out, "{name} = {tree}")?;
    }
    Ok(())
}
