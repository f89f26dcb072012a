use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use urlfix_core::{scan_file, scan_file_parallel, DEFAULT_SEGMENT_SIZE};

mod logging;

#[derive(Parser)]
#[command(name = "top-urls")]
#[command(about = "Print the URLs with the highest counts in a fixture file", long_about = None)]
struct Args {
    /// Fixture file to read (defaults to the first line of standard input)
    path: Option<PathBuf>,

    /// Number of URLs to print
    #[arg(short = 'k', long = "top", default_value = "10")]
    top: usize,

    /// Scan in a single sequential pass instead of parallel segments
    #[arg(long = "sequential")]
    sequential: bool,

    /// Worker threads for the parallel scan (0 = auto-detect)
    #[arg(short = 't', long = "threads", default_value = "0")]
    threads: usize,

    /// Target segment size in bytes for the parallel scan
    #[arg(long = "segment-size", default_value_t = DEFAULT_SEGMENT_SIZE)]
    segment_size: u64,
}

/// Read the fixture path from the first line of standard input.
fn path_from_stdin() -> Result<PathBuf> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read fixture path from standard input")?;

    let path = line.trim_end_matches(['\n', '\r']);
    if path.is_empty() {
        bail!("expected the path of a fixture file on standard input");
    }
    Ok(PathBuf::from(path))
}

fn run(args: Args) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => path_from_stdin()?,
    };

    // Configure rayon thread pool if custom thread count specified
    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .ok(); // Ignore error if pool already initialized
    }

    let start = Instant::now();
    let top = if args.sequential {
        scan_file(&path, args.top)
    } else {
        scan_file_parallel(&path, args.top, args.segment_size)
    }
    .with_context(|| format!("failed to scan {}", path.display()))?;

    info!(
        path = %path.display(),
        kept = top.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "scan finished"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in top.into_sorted_vec() {
        writeln!(out, "{}", record.url)?;
    }
    out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    logging::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
