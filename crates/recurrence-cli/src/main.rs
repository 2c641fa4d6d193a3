//! `recur` CLI: expand and validate recurrence rules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Expand a single rule over its own effective/expiration dates (stdin → stdout)
//! echo '{"effective_date":"2024-01-01","expiration_date":"2024-04-01",
//!        "recurrence_type":"monthly","ordinality":"second","weekday_mask":["Tue"]}' | recur expand
//!
//! # Expand an array of rules within a window, as JSON
//! recur expand -i rules.json --start 2024-01-01 --end 2024-12-31 --format json
//!
//! # Check rules for malformed fields before storing them
//! recur validate -i rules.json
//!
//! # Show which generator each rule selects
//! recur --debug expand -i rules.json --start 2024-01-01 --end 2024-03-31
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use recurrence_engine::{evaluate_batch, evaluate_single, DateRange, RecurrenceRule};
use serde::Deserialize;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recur", version, about = "Recurrence rule expansion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log generator selection and window decisions to stderr
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand one rule or an array of rules into occurrence dates
    Expand {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start (YYYY-MM-DD); requires --end
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        /// Window end (YYYY-MM-DD); requires --start
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check rules for malformed fields
    Validate {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One ISO date per line
    Text,
    /// A JSON array of ISO dates
    Json,
}

/// A rule file holds either one rule object or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleInput {
    Many(Vec<RecurrenceRule>),
    One(Box<RecurrenceRule>),
}

impl RuleInput {
    fn into_rules(self) -> Vec<RecurrenceRule> {
        match self {
            RuleInput::Many(rules) => rules,
            RuleInput::One(rule) => vec![*rule],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Expand {
            input,
            output,
            start,
            end,
            format,
        } => {
            let rules = read_rules(input.as_deref())?;
            let window = start.zip(end).map(|(start, end)| DateRange::new(start, end));
            let dates = expand(&rules, window)?;
            debug!(rules = rules.len(), occurrences = dates.len(), "expanded");
            write_output(output.as_deref(), &render(&dates, format)?)?;
        }
        Commands::Validate { input } => {
            let rules = read_rules(input.as_deref())?;
            let mut failures = 0usize;
            for (index, rule) in rules.iter().enumerate() {
                match rule.validate() {
                    Ok(()) => println!("rule {}: ok", index),
                    Err(e) => {
                        failures += 1;
                        println!("rule {}: {}", index, e);
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{} of {} rules are invalid", failures, rules.len());
            }
        }
    }

    Ok(())
}

/// `--debug` forces debug output; otherwise `RUST_LOG` applies, falling back
/// to warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// A single rule may omit the window and fall back to its own bounds; a batch
/// needs an explicit window shared by every rule.
fn expand(rules: &[RecurrenceRule], window: Option<DateRange>) -> Result<Vec<NaiveDate>> {
    match (rules, window) {
        ([rule], window) => evaluate_single(rule, window).context("Failed to expand rule"),
        (rules, Some(window)) => {
            evaluate_batch(rules, window).context("Failed to expand rules")
        }
        (_, None) => anyhow::bail!(
            "Expanding {} rules requires --start and --end",
            rules.len()
        ),
    }
}

fn render(dates: &[NaiveDate], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(dates.iter().map(|d| format!("{}\n", d)).collect()),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(dates).context("Failed to serialize dates")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn read_rules(path: Option<&str>) -> Result<Vec<RecurrenceRule>> {
    let raw = read_input(path)?;
    let parsed: RuleInput =
        serde_json::from_str(&raw).context("Failed to parse rule JSON")?;
    Ok(parsed.into_rules())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
