//! Print `randint(1, high)` draws, one per line, for diffing against CPython:
//!
//! ```text
//! cargo run -p pyrandom --example dump -- 42 10 20 > rust.txt
//! python3 -c "import random; random.seed(42); [print(random.randint(1, 10)) for _ in range(20)]" > py.txt
//! diff rust.txt py.txt
//! ```

use std::process::ExitCode;
use std::str::FromStr;

use pyrandom::MersenneTwister;

fn parse_arg<T: FromStr>(args: &[String], index: usize, name: &str, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match args.get(index) {
        Some(text) => text
            .parse()
            .map_err(|e| format!("invalid {} {:?}: {}", name, text, e)),
        None => Ok(default),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 4 {
        eprintln!("Usage: dump [seed] [high] [draws]");
        return ExitCode::FAILURE;
    }

    let parsed = parse_arg(&args, 1, "seed", 42u64).and_then(|seed| {
        let high = parse_arg(&args, 2, "high", 10u64)?;
        let draws = parse_arg(&args, 3, "draws", 20usize)?;
        Ok((seed, high, draws))
    });

    let (seed, high, draws) = match parsed {
        Ok((_, 0, _)) => {
            eprintln!("error: high must be at least 1");
            return ExitCode::FAILURE;
        }
        Ok(values) => values,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let mut rng = MersenneTwister::new(seed);
    for _ in 0..draws {
        println!("{}", rng.randint(1, high));
    }

    ExitCode::SUCCESS
}
