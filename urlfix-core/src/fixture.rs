use std::fmt;
use std::io::{self, Write};

use pyrandom::MersenneTwister;
use tracing::debug;

use crate::FixtureError;

/// Seed for every fixture run. Fixed so files are reproducible between tests.
pub const FIXTURE_SEED: u64 = 42;

/// Every fixture URL is this prefix followed by the line index.
pub const URL_PREFIX: &str = "http://api.tech.com/item/";

/// Parse a fixture count the way the command line receives it.
///
/// Surrounding whitespace is ignored. Any negative integer, however large,
/// is rejected explicitly rather than producing an empty or undefined draw
/// range.
pub fn parse_count(input: &str) -> Result<u64, FixtureError> {
    let trimmed = input.trim();

    if let Some(digits) = trimmed.strip_prefix('-') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            // "-0", "-000"
            if digits.bytes().all(|b| b == b'0') {
                return Ok(0);
            }
            return Err(FixtureError::NegativeCount(trimmed.to_string()));
        }
    }

    trimmed
        .parse::<u64>()
        .map_err(|source| FixtureError::InvalidCount {
            input: input.to_string(),
            source,
        })
}

/// One generated line: a synthetic URL and a count in `[1, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureLine {
    pub index: u64,
    pub count: u64,
}

impl fmt::Display for FixtureLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", URL_PREFIX, self.index, self.count)
    }
}

/// Deterministic source of fixture lines.
///
/// Owns its own generator seeded with [`FIXTURE_SEED`], so two generators
/// for the same total yield the same lines in the same order. Counts are
/// drawn in index order; skipping or reordering draws changes every later
/// line.
pub struct FixtureGenerator {
    rng: MersenneTwister,
    total: u64,
    next_index: u64,
}

impl FixtureGenerator {
    /// Create a generator for `total` lines.
    pub fn new(total: u64) -> Self {
        FixtureGenerator {
            rng: MersenneTwister::new(FIXTURE_SEED),
            total,
            next_index: 0,
        }
    }

    /// Number of lines not yet produced.
    pub fn remaining(&self) -> u64 {
        self.total - self.next_index
    }
}

impl Iterator for FixtureGenerator {
    type Item = FixtureLine;

    fn next(&mut self) -> Option<FixtureLine> {
        if self.next_index >= self.total {
            return None;
        }

        // total >= 1 here, so [1, total] is never empty
        let count = self.rng.randint(1, self.total);
        let line = FixtureLine {
            index: self.next_index,
            count,
        };
        self.next_index += 1;

        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Write `total` fixture lines, one per line, to `out`.
///
/// Stops at the first write error. Flushing is left to the caller.
pub fn write_fixtures<W: Write>(total: u64, out: &mut W) -> io::Result<()> {
    debug!(total, seed = FIXTURE_SEED, "generating fixtures");

    for line in FixtureGenerator::new(total) {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
