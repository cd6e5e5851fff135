//! bedtuple CLI entry point
//!
//! Canonicalizes and sorts BED files using a fixed column schema.

use anyhow::Context;
use bedtuple::core::{create_writer, BedError, Record, Schema};
use bedtuple::formats::bed::{
    Bed12Columns, Bed3Columns, Bed4Columns, Bed5Columns, Bed6Columns, Bed8Columns, Bed9Columns,
};
use bedtuple::formats::{Reader, Writer};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bedtuple")]
#[command(about = "Typed BED record reader/writer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Number of leading BED columns to parse (and the types they get)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColumnsArg {
    #[value(name = "3")]
    Bed3,
    #[value(name = "4")]
    Bed4,
    #[value(name = "5")]
    Bed5,
    #[value(name = "6")]
    Bed6,
    #[value(name = "8")]
    Bed8,
    #[value(name = "9")]
    Bed9,
    #[value(name = "12")]
    Bed12,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite every record in canonical form
    Fmt {
        /// Input BED file (plain, .gz or .bz2; '-' for stdin)
        input: PathBuf,
        /// Output file ('-' for stdout, .gz to compress)
        #[arg(default_value = "-")]
        output: PathBuf,
        /// Number of columns of the schema
        #[arg(short = 'c', long, default_value = "3")]
        columns: ColumnsArg,
        /// Abort on the first malformed line instead of skipping it
        #[arg(long)]
        strict: bool,
    },
    /// Sort records column by column
    Sort {
        /// Input BED file (plain, .gz or .bz2; '-' for stdin)
        input: PathBuf,
        /// Output file ('-' for stdout, .gz to compress)
        #[arg(default_value = "-")]
        output: PathBuf,
        /// Number of columns of the schema
        #[arg(short = 'c', long, default_value = "3")]
        columns: ColumnsArg,
        /// Abort on the first malformed line instead of skipping it
        #[arg(long)]
        strict: bool,
        /// Number of threads used for sorting
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

#[derive(Debug, Default)]
struct RunStats {
    total: usize,
    written: usize,
    skipped: usize,
}

macro_rules! with_schema {
    ($columns:expr, $func:ident($($arg:expr),*)) => {
        match $columns {
            ColumnsArg::Bed3 => $func::<Bed3Columns>($($arg),*),
            ColumnsArg::Bed4 => $func::<Bed4Columns>($($arg),*),
            ColumnsArg::Bed5 => $func::<Bed5Columns>($($arg),*),
            ColumnsArg::Bed6 => $func::<Bed6Columns>($($arg),*),
            ColumnsArg::Bed8 => $func::<Bed8Columns>($($arg),*),
            ColumnsArg::Bed9 => $func::<Bed9Columns>($($arg),*),
            ColumnsArg::Bed12 => $func::<Bed12Columns>($($arg),*),
        }
    };
}

/// Pull the next record, logging and skipping malformed lines unless `strict`
fn next_record<R, T>(
    reader: &mut Reader<R, T>,
    stats: &mut RunStats,
    strict: bool,
) -> anyhow::Result<Option<Record<T>>>
where
    R: std::io::BufRead,
    T: Schema,
{
    while let Some(result) = reader.read_record() {
        stats.total += 1;
        match result {
            Ok(record) => return Ok(Some(record)),
            Err(e @ BedError::Parse { .. }) if !strict => {
                log::warn!("Skipping malformed line: {}", e);
                stats.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}

fn run_fmt<T: Schema>(input: &Path, output: &Path, strict: bool) -> anyhow::Result<RunStats> {
    let mut reader: Reader<_, T> =
        Reader::from_path(input).with_context(|| format!("Failed to open {:?}", input))?;
    let mut writer = Writer::new(
        create_writer(output).with_context(|| format!("Failed to create {:?}", output))?,
    );
    let mut stats = RunStats::default();
    let mut headers_written = 0;

    while let Some(record) = next_record(&mut reader, &mut stats, strict)? {
        // Headers keep their position relative to the records around them
        for header in &reader.headers()[headers_written..] {
            writer.write_header(header)?;
        }
        headers_written = reader.headers().len();
        writer.write_record(&record)?;
    }
    for header in &reader.headers()[headers_written..] {
        writer.write_header(header)?;
    }

    stats.written = writer.written();
    writer.finish()?;
    Ok(stats)
}

fn run_sort<T>(input: &Path, output: &Path, strict: bool, threads: usize) -> anyhow::Result<RunStats>
where
    T: Schema + Ord + Send,
{
    let mut reader: Reader<_, T> =
        Reader::from_path(input).with_context(|| format!("Failed to open {:?}", input))?;
    let mut stats = RunStats::default();
    let mut records = Vec::new();
    while let Some(record) = next_record(&mut reader, &mut stats, strict)? {
        records.push(record);
    }

    if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to create thread pool")?;
        pool.install(|| records.par_sort());
    } else {
        records.sort();
    }

    let mut writer = Writer::new(
        create_writer(output).with_context(|| format!("Failed to create {:?}", output))?,
    );
    for header in reader.headers() {
        writer.write_header(header)?;
    }
    writer.write_all_records(&records)?;

    stats.written = writer.written();
    writer.finish()?;
    Ok(stats)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let stats = match cli.command {
        Commands::Fmt { input, output, columns, strict } => {
            log::info!("Formatting {:?} -> {:?} ({:?})", input, output, columns);
            with_schema!(columns, run_fmt(&input, &output, strict))?
        }
        Commands::Sort { input, output, columns, strict, threads } => {
            log::info!("Sorting {:?} -> {:?} ({:?}, {} threads)", input, output, columns, threads);
            with_schema!(columns, run_sort(&input, &output, strict, threads))?
        }
    };

    eprintln!("\n=== Statistics ===");
    eprintln!("Total records:   {}", stats.total);
    eprintln!("Written:         {}", stats.written);
    eprintln!("Skipped:         {}", stats.skipped);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
