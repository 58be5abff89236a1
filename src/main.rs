use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use station_mart::engine::backend::{AggregateEngine, ScanOptions, all_engines, engine_by_name};
use station_mart::engine::run::driver::{RunDriver, RunReport};
use station_mart::ingest::record::MeasurementParser;
use station_mart::logging;
use station_mart::output;
use station_mart::output::audit::AuditTrail;
use station_mart::shared::config::CONFIG;

#[derive(Parser)]
#[command(name = "stationmart")]
#[command(about = "Builds the station metrics mart from raw measurements", long_about = None)]
struct Args {
    /// Raw measurement file (station<delim>temperature per line)
    #[arg(short, long)]
    input: PathBuf,

    /// Engine to run: streaming, chunked, parallel, columnar, or all
    #[arg(short, long, default_value = "streaming")]
    engine: String,

    /// Mart destination; defaults to <data_dir>/measurements_<engine>.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Lines per chunk for the chunk-oriented engines
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Also write the mart as an Arrow IPC file next to the CSV
    #[arg(long)]
    arrow: bool,

    /// Skip the per-run audit trail
    #[arg(long)]
    no_audit: bool,

    /// Print run summaries as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    engine: &'a str,
    stations: usize,
    lines: u64,
    skipped: u64,
    elapsed_ms: u128,
    output: &'a Path,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let engines: Vec<Box<dyn AggregateEngine>> = if args.engine == "all" {
        all_engines()
    } else {
        vec![
            engine_by_name(&args.engine)
                .with_context(|| format!("unknown engine '{}'", args.engine))?,
        ]
    };

    let benchmark = engines.len() > 1;
    for engine in &engines {
        run_one(&args, engine.as_ref(), benchmark)?;
    }
    Ok(())
}

fn run_one(args: &Args, engine: &dyn AggregateEngine, benchmark: bool) -> anyhow::Result<()> {
    let delimiter = args.delimiter.unwrap_or(CONFIG.ingest.delimiter);
    let options = ScanOptions {
        chunk_size: args.chunk_size.unwrap_or(CONFIG.ingest.chunk_size),
    };

    let mut driver =
        RunDriver::new(engine, MeasurementParser::new(delimiter)).with_options(options);
    if CONFIG.logging.audit_enabled && !args.no_audit {
        driver = driver.with_observer(Box::new(AuditTrail::for_engine(
            Path::new(&CONFIG.logging.log_dir),
            engine.name(),
        )));
    }

    let report = driver.run(&args.input)?;

    // When several engines run in one invocation, each writes its own mart.
    let destination = match (&args.output, benchmark) {
        (Some(path), false) => path.clone(),
        _ => {
            Path::new(&CONFIG.output.data_dir).join(format!("measurements_{}.csv", engine.name()))
        }
    };
    output::csv::write_summaries(&destination, delimiter, &report.summaries)?;
    if args.arrow || CONFIG.output.write_arrow {
        output::ipc::write_summaries(&destination.with_extension("arrow"), &report.summaries)?;
    }

    emit_summary(args, &report, &destination)
}

fn emit_summary(args: &Args, report: &RunReport, destination: &Path) -> anyhow::Result<()> {
    if args.json {
        let summary = RunSummary {
            engine: report.engine,
            stations: report.summaries.len(),
            lines: report.lines,
            skipped: report.skipped,
            elapsed_ms: report.elapsed.as_millis(),
            output: destination,
        };
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "{}: {} stations from {} lines ({} skipped) in {:.2?} -> {}",
            report.engine,
            report.summaries.len(),
            report.lines,
            report.skipped,
            report.elapsed,
            destination.display()
        );
    }
    Ok(())
}
