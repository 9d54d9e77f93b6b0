//! `freetime` CLI — compute free time from a class schedule and match events
//! into it.
//!
//! ## Usage
//!
//! ```sh
//! # Free time for each weekday (stdin → stdout)
//! echo '{"Mon": [["09:30", "10:50"]]}' | freetime free
//!
//! # Custom day window
//! freetime free -i schedule.json --window-start 07:00 --window-end 23:00
//!
//! # Normalized busy schedule (merged, sorted, all 7 days)
//! freetime normalize -i schedule.json
//!
//! # Events that fit, Monday and Wednesday only, 10 minutes of slack
//! freetime match --schedule schedule.json --events events.json \
//!     --days Mon,Wed --tolerance 10 --mode anchor
//!
//! # Validate a config file and print the effective settings
//! freetime check-config --config freetime.json
//! ```
//!
//! Logs go to stderr and honor `RUST_LOG`; `-v` turns on debug output.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use free_time_engine::{
    compute_availability, pipeline, EngineConfig, Event, MatchMode, WeekSchedule,
};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "freetime",
    version,
    about = "Free time from a class schedule, and the events that fit in it"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug details (skipped intervals and events) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the free-time map from a busy schedule
    Free {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the normalized busy schedule
    Normalize {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Recommend the events that fit into the schedule's free time
    Match {
        /// Schedule JSON file
        #[arg(short, long)]
        schedule: String,
        /// Events JSON file (an array of event objects)
        #[arg(short, long)]
        events: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Validate configuration and print the effective settings
    CheckConfig {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<String>,
    /// Start of the day window (HH:MM)
    #[arg(long)]
    window_start: Option<String>,
    /// End of the day window (HH:MM)
    #[arg(long)]
    window_end: Option<String>,
    /// Minutes of slack on each side of a free interval
    #[arg(long, allow_negative_numbers = true)]
    tolerance: Option<i64>,
    /// Matching policy
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Comma-separated weekdays to consider (e.g. "Mon,Wed,Fri")
    #[arg(long)]
    days: Option<String>,
    /// IANA timezone for offset-bearing event timestamps
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// The whole event must fit
    Strict,
    /// Only the event's start must fit
    Anchor,
}

impl From<ModeArg> for MatchMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Strict => MatchMode::Strict,
            ModeArg::Anchor => MatchMode::Anchor,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Free {
            input,
            output,
            config,
        } => {
            let validated = build_config(&config)?
                .validate()
                .context("Invalid configuration")?;
            let schedule = read_schedule(input.as_deref())?;
            let availability = compute_availability(schedule.as_ref(), validated.window);
            write_json(output.as_deref(), &availability)?;
        }
        Commands::Normalize { input, output } => {
            let schedule = read_schedule(input.as_deref())?
                .context("No schedule supplied: input is empty or null")?;
            write_json(output.as_deref(), &schedule.to_raw())?;
        }
        Commands::Match {
            schedule,
            events,
            output,
            config,
        } => {
            let config = build_config(&config)?;
            let schedule = read_schedule(Some(schedule.as_str()))?;
            let events = read_events(&events)?;
            let recommendation = pipeline::recommend(schedule.as_ref(), &events, &config)
                .context("Invalid configuration")?;
            write_json(output.as_deref(), &recommendation)?;
        }
        Commands::CheckConfig { config } => {
            let config = build_config(&config)?;
            config.validate().context("Invalid configuration")?;
            write_json(None, &config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Layer flags over the config file over built-in defaults.
fn build_config(args: &ConfigArgs) -> Result<EngineConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let json = read_document(Some(path), "config")?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => EngineConfig::default(),
    };

    if let Some(start) = &args.window_start {
        config.day_window.start = start.clone();
    }
    if let Some(end) = &args.window_end {
        config.day_window.end = end.clone();
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance_minutes = tolerance;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(days) = &args.days {
        config.days = days
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(tz) = &args.timezone {
        config.timezone = Some(tz.clone());
    }

    Ok(config)
}

/// An empty document or `null` means no schedule has been supplied yet.
fn read_schedule(path: Option<&str>) -> Result<Option<WeekSchedule>> {
    let json = read_document(path, "schedule")?;
    if json.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&json).context("Failed to parse schedule JSON")
}

fn read_events(path: &str) -> Result<Vec<Event>> {
    let json = read_document(Some(path), "events")?;
    let values: Vec<serde_json::Value> =
        serde_json::from_str(&json).context("Failed to parse events JSON (expected an array)")?;
    let total = values.len();
    let events: Vec<Event> = values.into_iter().filter_map(Event::from_value).collect();
    if events.len() < total {
        tracing::warn!(skipped = total - events.len(), "ignoring non-object event entries");
    }
    Ok(events)
}

/// Pretty JSON plus a trailing newline, to `path` or stdout.
fn write_json<T: serde::Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let mut sink: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output file: {}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut sink, value).context("Failed to serialize output JSON")?;
    writeln!(sink).and_then(|()| sink.flush()).context("Failed to write output")?;
    Ok(())
}

/// The text of the `what` document (schedule, events, config) at `path`, or
/// of stdin when no path is given.
fn read_document(path: Option<&str>, what: &str) -> Result<String> {
    let Some(path) = path else {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        return Ok(text);
    };
    fs::read_to_string(path).with_context(|| format!("Failed to read {} file: {}", what, path))
}
