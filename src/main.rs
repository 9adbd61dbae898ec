//! CLI entry point for the sample statistics tool.
//!
//! Provides subcommands for summarizing a set of numbers given on the
//! command line or in a file, and for running the built-in demonstration.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sample_stats::{
    Statistics, Summary,
    output::{append_error, append_record, format_report, print_pretty, to_json},
    parser::read_samples,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Ages of the people living in a street.
const DEMO_SAMPLES: [i32; 21] = [
    5, 31, 43, 48, 50, 41, 7, 11, 15, 39, 80, 82, 32, 2, 8, 6, 25, 36, 27, 61, 31,
];
const DEMO_PERCENTILE: f64 = 40.0;

#[derive(Parser)]
#[command(name = "sample_stats")]
#[command(about = "Descriptive statistics over a set of numbers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute mean, mode, median, percentile and deviation
    Summarize {
        /// Sample values
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        values: Vec<f64>,

        /// File with whitespace or comma separated values
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Fraction in (0, 1) or percentage in (1, 100]
        #[arg(short, long, default_value_t = DEMO_PERCENTILE)]
        percentile: f64,

        /// Use the sample (n - 1) standard deviation
        #[arg(short, long, default_value_t = false)]
        sample: bool,

        /// Report format written to stdout
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Optional: CSV file to append the summary to
        #[arg(short, long)]
        output: Option<String>,

        /// Optional: name recorded with the summary
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Run the built-in example data set
    Demo,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sample_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sample_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            values,
            file,
            percentile,
            sample,
            format,
            output,
            label,
        } => {
            let samples = match collect_samples(values, file.as_deref()) {
                Ok(samples) => samples,
                Err(e) => {
                    record_failure(output.as_deref(), "parse_error", &e, label.as_deref());
                    return Err(e);
                }
            };
            summarize(samples, percentile, sample, format, output, label)?;
        }
        Commands::Demo => {
            let stats = Statistics::new(DEMO_SAMPLES);
            let summary = Summary::from_statistics(&stats, DEMO_PERCENTILE, false);
            print!("{}", format_report(&summary));
        }
    }

    Ok(())
}

/// Merges values given as arguments with those read from `file`.
#[tracing::instrument(skip(values), fields(arg_count = values.len()))]
fn collect_samples(mut values: Vec<f64>, file: Option<&Path>) -> Result<Vec<f64>> {
    if let Some(path) = file {
        let from_file = read_samples(path)?;
        debug!(count = from_file.len(), "Samples read from file");
        values.extend(from_file);
    }
    Ok(values)
}

/// Computes a summary over `samples` and writes it in the requested format,
/// optionally appending it to a CSV file.
#[tracing::instrument(skip(samples, format), fields(count = samples.len()))]
fn summarize(
    samples: Vec<f64>,
    percentile: f64,
    sample: bool,
    format: Format,
    output: Option<String>,
    label: Option<String>,
) -> Result<()> {
    let stats = match Statistics::try_new(samples) {
        Ok(stats) => stats,
        Err(e) => {
            let kind = e.kind();
            let e = anyhow::Error::new(e).context("cannot summarize");
            record_failure(output.as_deref(), kind, &e, label.as_deref());
            return Err(e);
        }
    };

    let mut summary = Summary::from_statistics(&stats, percentile, sample);
    if let Some(label) = &label {
        summary = summary.with_label(label);
    }
    if !summary.is_complete() {
        warn!(
            error_type = summary.error_type.as_deref().unwrap_or_default(),
            error = summary.error_message.as_deref().unwrap_or_default(),
            "Summary is incomplete"
        );
    }
    print_pretty(&summary);

    match format {
        Format::Text => print!("{}", format_report(&summary)),
        Format::Json => println!("{}", to_json(&summary)?),
    }

    if let Some(path) = output {
        append_record(&path, &summary)?;
        info!(path = %path, "Summary appended");
    }

    Ok(())
}

/// Writes an error row for a failed run when a CSV output was requested.
fn record_failure(output: Option<&str>, error_type: &str, e: &anyhow::Error, label: Option<&str>) {
    let Some(path) = output else {
        return;
    };
    if let Err(write_err) = append_error(path, error_type, e, label) {
        error!(path, error = %write_err, "Failed to record error row");
    } else {
        info!(path, error_type, "Error row appended");
    }
}
