//! `slots` CLI — find common meeting slots for people across time zones.
//!
//! ## Usage
//!
//! ```sh
//! # Rank common slots from a TOML config as a markdown table
//! slots find -c team.toml
//!
//! # YAML configs work too
//! slots find -c config.yaml
//!
//! # JSON output, top 5 only, for a fixed reference year
//! slots find -c team.json --format json --limit 5 --year 2026
//!
//! # Use the strict between-test instead of [begin, end)
//! slots find -c team.toml --boundary exclusive
//!
//! # Read the config from stdin
//! cat team.json | slots find
//!
//! # Validate a config and show the scan range
//! slots check -c team.toml
//! ```

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use std::io::{self, Read};

use config::{parse_config, Config, ConfigFormat};
use slot_engine::report::{render_json, render_markdown};
use slot_engine::{
    find_common_slots, normalize_people, scan_range, CoverageRule, DstPolicy, Granularity,
    NormalizeOptions, ScheduleOptions,
};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find common meeting slots across time zones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for common slots and print them ranked by total weight
    Find {
        #[command(flatten)]
        input: InputArgs,
        /// Scan step in whole hours (overrides the config)
        #[arg(long)]
        granularity_hours: Option<u32>,
        /// Which interval endpoints count as available
        #[arg(long, value_enum, default_value = "half-open")]
        boundary: Boundary,
        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: OutputFormat,
        /// Keep only the top N slots (N >= 1)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a config and print the scan range without scanning
    Check {
        #[command(flatten)]
        input: InputArgs,
        /// Scan step in whole hours (overrides the config)
        #[arg(long)]
        granularity_hours: Option<u32>,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Config file, YAML, TOML or JSON (reads JSON from stdin if omitted)
    #[arg(short, long)]
    config: Option<String>,
    /// Config format (inferred from the file extension if omitted)
    #[arg(long, value_enum)]
    config_format: Option<ConfigFormat>,
    /// Reference year for "MM-DD HH:mm" entries (overrides the config)
    #[arg(long)]
    year: Option<i32>,
    /// What to do with local times that fall in a DST gap
    #[arg(long, value_enum, default_value = "shift-forward")]
    dst: DstArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum Boundary {
    /// [begin, end): the begin instant counts, the end does not
    HalfOpen,
    /// (begin, end): neither endpoint counts
    Exclusive,
}

impl From<Boundary> for CoverageRule {
    fn from(b: Boundary) -> Self {
        match b {
            Boundary::HalfOpen => CoverageRule::HalfOpen,
            Boundary::Exclusive => CoverageRule::Exclusive,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DstArg {
    ShiftForward,
    Reject,
}

impl From<DstArg> for DstPolicy {
    fn from(d: DstArg) -> Self {
        match d {
            DstArg::ShiftForward => DstPolicy::ShiftForward,
            DstArg::Reject => DstPolicy::Reject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find {
            input,
            granularity_hours,
            boundary,
            format,
            limit,
            output,
        } => {
            let config = load_config(&input)?;
            let granularity = resolve_granularity(granularity_hours, &config)?;
            let options = ScheduleOptions {
                normalize: normalize_options(&input, &config),
                granularity,
                coverage: boundary.into(),
            };

            let mut schedule = find_common_slots(&config.people, &options)
                .context("Invalid configuration")?;
            if let Some(limit) = limit {
                schedule.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }

            let rendered = match format {
                OutputFormat::Markdown => render_markdown(&schedule),
                OutputFormat::Json => {
                    let mut json =
                        render_json(&schedule).context("Failed to serialize schedule")?;
                    json.push('\n');
                    json
                }
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check {
            input,
            granularity_hours,
        } => {
            let config = load_config(&input)?;
            let granularity = resolve_granularity(granularity_hours, &config)?;
            let people = normalize_people(&config.people, normalize_options(&input, &config))
                .context("Invalid configuration")?;
            let range = scan_range(&people).context("Invalid configuration")?;

            println!(
                "Scan range: {} .. {} ({} minutes)",
                range.start.to_rfc3339(),
                range.end.to_rfc3339(),
                range.duration_minutes()
            );
            println!("Granularity: {} hour(s)", granularity.num_hours());
            for person in &people {
                println!(
                    "  {} ({}): {} interval(s)",
                    person.name,
                    person.timezone,
                    person.availability.len()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// CLI flag first, then the config, then one hour.
fn resolve_granularity(flag: Option<u32>, config: &Config) -> Result<Granularity> {
    Granularity::hours(flag.or(config.granularity_hours).unwrap_or(1))
        .context("Invalid configuration")
}

/// CLI flags win over config values; the year falls back to the current year.
fn normalize_options(input: &InputArgs, config: &Config) -> NormalizeOptions {
    let mut options = match input.year.or(config.year) {
        Some(year) => NormalizeOptions::new(year),
        None => NormalizeOptions::default(),
    };
    options.dst_policy = input.dst.into();
    options
}

fn load_config(input: &InputArgs) -> Result<Config> {
    let text = read_input(input.config.as_deref())?;
    let format = input.config_format.unwrap_or_else(|| {
        input
            .config
            .as_deref()
            .map(ConfigFormat::from_path)
            .unwrap_or(ConfigFormat::Json)
    });
    debug!("loading config as {:?}", format);
    parse_config(&text, format)
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
