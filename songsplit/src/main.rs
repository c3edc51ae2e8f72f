//! songsplit - split a long recording into songs separated by silence
//!
//! Reads one audio file, detects silence gaps, writes each song next to the
//! input as `<stem>NN.<format>` and prints a report of song boundaries.
//!
//! stdout carries the parameter echo and the report; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use songsplit::config::{resolve_run_config, CliOverrides, RunConfig};
use songsplit::models::OutputFormat;
use songsplit::services::input_validator::validate_input;
use songsplit::services::report_formatter;
use songsplit::Pipeline;
use songsplit_common::config::resolve_toml_config;

/// Report rendering on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Command-line arguments for songsplit
#[derive(Parser, Debug)]
#[command(name = "songsplit")]
#[command(about = "Split a long audio file into individual songs.")]
#[command(version)]
struct Args {
    /// Path to the long audio file
    input_file: PathBuf,

    /// Threshold (dBFS) at or below which audio is considered silence [default: -50]
    #[arg(
        long = "silence_threshold",
        env = "SONGSPLIT_SILENCE_THRESHOLD",
        allow_negative_numbers = true
    )]
    silence_threshold: Option<f64>,

    /// Minimum silence (ms) that separates two songs [default: 1000]
    #[arg(
        long = "min_silence_duration",
        env = "SONGSPLIT_MIN_SILENCE_DURATION",
        allow_negative_numbers = true
    )]
    min_silence_duration: Option<i64>,

    /// Analysis window (ms) for loudness measurement [default: 100]
    #[arg(
        long = "chunk_size",
        env = "SONGSPLIT_CHUNK_SIZE",
        allow_negative_numbers = true
    )]
    chunk_size: Option<i64>,

    /// Output format: wav, mp3 or ogg [default: wav]
    #[arg(long = "output_format", env = "SONGSPLIT_OUTPUT_FORMAT")]
    output_format: Option<OutputFormat>,

    /// TOML config file (default: <config dir>/songsplit/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for exported songs (default: the input file's directory)
    #[arg(long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Report format printed to stdout
    #[arg(long = "report-format", value_enum, default_value_t = ReportFormat::Text)]
    report_format: ReportFormat,

    /// Detect and report songs without writing any files
    #[arg(long)]
    dry_run: bool,

    /// ffmpeg executable used for mp3/ogg export
    #[arg(long = "ffmpeg", env = "SONGSPLIT_FFMPEG", value_name = "PATH")]
    ffmpeg: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input: self.input_file.clone(),
            silence_threshold: self.silence_threshold,
            min_silence_duration: self.min_silence_duration,
            chunk_size: self.chunk_size,
            output_format: self.output_format,
            ffmpeg_path: self.ffmpeg.clone(),
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn main() -> ExitCode {
    // Parse command-line arguments (syntax errors exit with clap's status 2)
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    // Input problems are reported before any config file is read
    validate_input(&args.input_file)?;

    let toml_config = resolve_toml_config(args.config.as_deref())?;
    init_tracing(&toml_config.logging.level)?;

    let config = resolve_run_config(args.overrides(), &toml_config)?;
    let pipeline = Pipeline::new(config);

    pipeline.preflight()?;
    print_parameters(pipeline.config());

    let outcome = pipeline.process()?;

    match args.report_format {
        ReportFormat::Text => print!("{}", report_formatter::render_text(&outcome.report)),
        ReportFormat::Json => println!(
            "{}",
            report_formatter::render_json(&outcome.report).context("Failed to render report")?
        ),
    }

    if outcome.has_failures() {
        for failure in &outcome.failures {
            println!("{}", failure);
        }
        return Ok(ExitCode::FAILURE);
    }

    info!(songs = outcome.exported.len(), "Done");
    Ok(ExitCode::SUCCESS)
}

/// Echo the effective parameters before decoding starts
fn print_parameters(config: &RunConfig) {
    println!("Input file path: {}", config.input.display());
    println!("Silence threshold: {}", config.params.silence_threshold_db);
    println!(
        "Minimum silence duration: {}",
        config.params.min_silence_duration_ms
    );
    println!("Chunk size: {}", config.params.chunk_size_ms);
    println!("Output format: {}", config.params.output_format);
}

/// Logs to stderr; `RUST_LOG` wins over the config file level
fn init_tracing(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialize logging")
}
