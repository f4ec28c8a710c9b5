use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing::info;

use netevents_cli::stats::{self, ExecutionStatistic};
use netevents_cli::{CliError, LogFormat, init_logging, load_config};
use netevents_generate::GenerationEngine;

#[derive(Parser, Debug)]
#[command(
    name = "generator",
    version,
    about = "Generate synthetic network events into a JSON artifact"
)]
struct Args {
    /// Number of events to generate.
    count: u64,
    /// Path of the JSON artifact to write.
    output: PathBuf,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads synthesizing blocks.
    #[arg(long)]
    workers: Option<usize>,
    /// Events per block.
    #[arg(long)]
    block_size: Option<usize>,
    /// Append an execution statistic to this file and compare with earlier runs.
    #[arg(long, value_name = "PATH")]
    stats_file: Option<PathBuf>,
    /// TOML config file (defaults to ./netevents.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let started = Instant::now();
    let execution_start = Utc::now();
    let args = Args::parse();

    let result = run(args, execution_start, started);
    println!("================");
    println!("Execution time: {:?}", started.elapsed());
    result
}

fn run(
    args: Args,
    execution_start: chrono::DateTime<Utc>,
    started: Instant,
) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    init_logging(
        args.log_format.or(config.logging.format).unwrap_or_default(),
        args.log_file.as_deref().or(config.logging.file.as_deref()),
    )?;

    let options = config
        .generator
        .resolve(args.seed, args.workers, args.block_size);
    let engine = GenerationEngine::new(options)?;

    println!("number of events: {}", stats::format_count(args.count));
    println!("output: {}", args.output.display());
    info!(event = "run_started", count = args.count, output = %args.output.display());

    let report = engine.run(args.count, &args.output)?;
    info!(
        event = "run_finished",
        status = "success",
        seed = report.seed,
        events = report.events_written,
        blocks = report.blocks,
        bytes_written = report.bytes_written,
        duration_ms = report.duration_ms,
        throughput_events_per_sec = report.throughput_events_per_sec
    );
    println!("seed: {}", report.seed);

    if let Some(path) = args.stats_file.or(config.generator.stats_file) {
        let stat = ExecutionStatistic {
            execution_start,
            duration_ms: started.elapsed().as_millis() as u64,
            number_of_events: args.count,
        };
        stats::save_and_report(&stat, &path)?;
    }

    Ok(())
}
