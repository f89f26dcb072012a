//! Scanning fixture files for their top URLs.
//!
//! Two strategies with identical results:
//!
//! - [`scan_reader`] / [`scan_file`]: one sequential pass through a buffered
//!   reader, line by line.
//! - [`scan_file_parallel`]: the file is split into newline-aligned
//!   segments ([`SegmentMap`]); rayon workers each read and scan whole
//!   segments into a local [`TopK`], and the partial results are merged.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use memchr::memchr_iter;
use rayon::prelude::*;
use tracing::debug;

use crate::record::trim_line_ending;
use crate::{parse_record, ScanError, Segment, SegmentMap, TopK};

/// Scan `reader` line by line, keeping the `k` highest-count URLs.
///
/// Blank lines are skipped. The first malformed line aborts the scan with
/// its 1-based line number.
pub fn scan_reader<R: BufRead>(mut reader: R, k: usize) -> Result<TopK, ScanError> {
    let mut top = TopK::new(k);
    let mut line = Vec::new();
    let mut line_number = 0u64;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_number += 1;

        if trim_line_ending(&line).is_empty() {
            continue;
        }

        let record = parse_record(&line).map_err(|source| ScanError::MalformedLine {
            line: line_number,
            source,
        })?;
        top.offer(record);
    }

    debug!(lines = line_number, kept = top.len(), "sequential scan finished");
    Ok(top)
}

/// Sequential scan of the file at `path`.
pub fn scan_file(path: &Path, k: usize) -> Result<TopK, ScanError> {
    let file = File::open(path)?;
    scan_reader(BufReader::new(file), k)
}

/// Parallel scan of the file at `path` over segments of about
/// `segment_size` bytes, using the current rayon pool.
pub fn scan_file_parallel(path: &Path, k: usize, segment_size: u64) -> Result<TopK, ScanError> {
    let map = SegmentMap::build(path, segment_size)?;
    debug!(
        segments = map.len(),
        bytes = map.file_len(),
        threads = rayon::current_num_threads(),
        "parallel scan starting"
    );

    map.segments()
        .par_iter()
        .map(|segment| scan_segment(path, *segment, k))
        .try_reduce(|| TopK::new(k), |a, b| Ok(a.merge(b)))
}

/// Read one segment and scan it. Each call opens its own handle.
fn scan_segment(path: &Path, segment: Segment, k: usize) -> Result<TopK, ScanError> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(segment.start))?;

    let mut buf = vec![0u8; segment.len as usize];
    file.read_exact(&mut buf)?;

    scan_chunk(&buf, segment.start, k)
}

/// Scan an in-memory run of whole lines starting at byte `base` of the file.
fn scan_chunk(buf: &[u8], base: u64, k: usize) -> Result<TopK, ScanError> {
    let mut top = TopK::new(k);
    let mut line_start = 0;

    let ends = memchr_iter(b'\n', buf).map(|i| i + 1).chain(std::iter::once(buf.len()));
    for line_end in ends {
        if line_end <= line_start {
            continue;
        }
        let line = &buf[line_start..line_end];

        if !trim_line_ending(line).is_empty() {
            let record = parse_record(line).map_err(|source| ScanError::MalformedAt {
                offset: base + line_start as u64,
                source,
            })?;
            top.offer(record);
        }

        line_start = line_end;
    }

    Ok(top)
}
