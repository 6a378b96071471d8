//! CLI entry point for the headcount analytics tool.
//!
//! Provides subcommands for ranking districts by statewide test growth and
//! for answering kindergarten-participation / graduation correlation
//! questions over a loaded district dataset.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use headcount::analyzers::correlation::CorrelationEngine;
use headcount::analyzers::query::{GrowthQuery, top_statewide_growth};
use headcount::data::{Grade, STATEWIDE_RECORD, Subject, Weighting};
use headcount::output::{GrowthReport, append_results, print_json, write_report};
use headcount::repository::{DataSources, DistrictRepository};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "headcount")]
#[command(about = "A tool to analyze school district growth and enrollment correlation", long_about = None)]
struct Cli {
    /// Directory containing the four source CSV files
    #[arg(short, long, default_value = "data", global = true)]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank districts by year-over-year statewide test growth
    TopGrowth {
        /// Grade level (3 or 8)
        #[arg(short, long)]
        grade: Option<u32>,

        /// Subject (math, reading, or writing); omit for composite growth
        #[arg(short, long)]
        subject: Option<String>,

        /// Number of highest-growth districts to return
        #[arg(short, long)]
        top: Option<usize>,

        /// Custom subject weights for composite growth, as math,reading,writing
        #[arg(short, long, value_name = "M,R,W")]
        weighting: Option<String>,

        /// Optional JSON report file to write
        #[arg(short, long)]
        output: Option<String>,

        /// Optional CSV file to append results to
        #[arg(long)]
        csv: Option<String>,
    },
    /// Check whether kindergarten participation correlates with graduation
    Correlates {
        /// District name, or STATEWIDE for the all-district group check
        #[arg(short, long, conflicts_with = "across")]
        r#for: Option<String>,

        /// Explicit set of district names for a group check
        #[arg(short, long, num_args = 1.., value_name = "DISTRICT")]
        across: Vec<String>,
    },
    /// Year-by-year kindergarten participation variation for a district
    Trend {
        /// District name
        district: String,

        /// Comparison district
        #[arg(short, long, default_value = STATEWIDE_RECORD)]
        against: String,
    },
}

fn main() -> Result<()> {
    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/headcount.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("headcount.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let repo = DistrictRepository::load(&DataSources::in_dir(&cli.data_dir))?;

    match cli.command {
        Commands::TopGrowth {
            grade,
            subject,
            top,
            weighting,
            output,
            csv,
        } => {
            let subject = subject.as_deref().map(parse_subject).transpose()?;
            let weighting = weighting.as_deref().map(parse_weighting).transpose()?;

            let query = GrowthQuery { grade, subject, top, weighting };
            let results = top_statewide_growth(&repo, &query)?;

            for result in &results {
                info!(district = %result.name, growth = result.growth, "Ranked");
            }

            let grade = query
                .grade
                .and_then(Grade::from_number)
                .expect("grade validated by the dispatcher");
            let report = GrowthReport::new(grade, subject, results);
            print_json(&report)?;

            if let Some(path) = output {
                write_report(&path, &report)?;
            }
            if let Some(path) = csv {
                append_results(&path, &report.results)?;
            }
        }
        Commands::Correlates { r#for, across } => {
            let engine = CorrelationEngine::new(&repo);
            let correlated = if let Some(name) = r#for {
                engine.correlates_for(&name)?
            } else {
                let names: Vec<&str> = across.iter().map(String::as_str).collect();
                engine.correlates_across(&names)?
            };
            info!(correlated, "Correlation check complete");
            println!("{correlated}");
        }
        Commands::Trend { district, against } => {
            let engine = CorrelationEngine::new(&repo);
            let trend = engine.variation_trend(&district, &against)?;
            for (year, variation) in &trend {
                info!(year, variation, "Trend");
                println!("{year}: {variation}");
            }
        }
    }

    Ok(())
}

fn parse_subject(raw: &str) -> Result<Subject> {
    match raw.to_ascii_lowercase().as_str() {
        "math" => Ok(Subject::Math),
        "reading" => Ok(Subject::Reading),
        "writing" => Ok(Subject::Writing),
        _ => bail!("{raw} is not a known subject"),
    }
}

fn parse_weighting(raw: &str) -> Result<Weighting> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [math, reading, writing] = parts.as_slice() else {
        bail!("weighting must be three comma-separated values: math,reading,writing");
    };
    let weighting = Weighting {
        math: math.trim().parse()?,
        reading: reading.trim().parse()?,
        writing: writing.trim().parse()?,
    };
    if weighting.math < 0.0 || weighting.reading < 0.0 || weighting.writing < 0.0 {
        bail!("weights must be non-negative");
    }
    Ok(weighting)
}
