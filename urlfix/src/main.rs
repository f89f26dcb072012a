use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::debug;
use urlfix_core::{parse_count, write_fixtures};

mod logging;

/// Wrong number of arguments.
const EXIT_USAGE: u8 = 1;
/// Bad count or failed write.
const EXIT_FAILURE: u8 = 2;

/// File name of argv[0], as shown in the usage line.
fn program_name(arg0: Option<&OsString>) -> String {
    arg0.and_then(|a| Path::new(a).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "generate".to_string())
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<OsString> = std::env::args_os().collect();
    if args.len() != 2 {
        println!("Usage: {} <count>", program_name(args.first()));
        return ExitCode::from(EXIT_USAGE);
    }

    let count = match parse_count(&args[1].to_string_lossy()) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = write_fixtures(count, &mut out).and_then(|()| out.flush()) {
        eprintln!("error: failed to write fixtures: {}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    debug!(count, "fixtures written");
    ExitCode::SUCCESS
}
