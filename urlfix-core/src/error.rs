//! Error types for fixture generation and fixture scanning.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Rejected fixture count.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// The argument is not an integer.
    #[error("invalid count {input:?}: {source}")]
    InvalidCount {
        /// The text as given on the command line.
        input: String,
        /// Why it failed to parse.
        #[source]
        source: ParseIntError,
    },

    /// The argument is an integer below zero, kept as written since it may
    /// not fit any integer type.
    #[error("count must not be negative, got {0}")]
    NegativeCount(String),
}

/// A single line that is not `<url> <count>`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("no space between url and count")]
    MissingSeparator,

    #[error("url is not valid UTF-8")]
    InvalidUrl,

    #[error("invalid count {0:?}")]
    InvalidCount(String),
}

/// Failure while scanning a fixture file for its top URLs.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reported by the sequential scan, which counts lines.
    #[error("malformed record on line {line}: {source}")]
    MalformedLine { line: u64, source: RecordError },

    /// Reported by the parallel scan, which only knows byte positions.
    #[error("malformed record at byte offset {offset}: {source}")]
    MalformedAt { offset: u64, source: RecordError },
}
