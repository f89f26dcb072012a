//! Newline-aligned segmentation of a fixture file for parallel scanning.
//!
//! The file is cut into pieces of roughly `segment_size` bytes. Each cut is
//! moved forward to just past the next `\n`, so no line is split between
//! two segments. Only a small block around each cut is read; building the
//! map of a large file is cheap compared to scanning it.

use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use memchr::memchr;

/// Default target size of a segment (1 MiB).
pub const DEFAULT_SEGMENT_SIZE: u64 = 1024 * 1024;

/// Bytes read at a time while looking for the newline after a cut.
const PROBE_BLOCK_SIZE: usize = 512;

/// A byte range `[start, start + len)` of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u64,
    pub len: u64,
}

impl Segment {
    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// Segments covering a whole file, in file order, with no gaps or overlap.
#[derive(Debug, Clone)]
pub struct SegmentMap {
    segments: Vec<Segment>,
    file_len: u64,
}

impl SegmentMap {
    /// Map the file at `path`.
    pub fn build(path: &Path, segment_size: u64) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();
        Self::from_reader(&mut file, file_len, segment_size)
    }

    /// Map the first `file_len` bytes of `reader`.
    ///
    /// A `segment_size` of zero is treated as one. A line longer than a
    /// segment makes that segment longer; it is never split.
    pub fn from_reader<R: Read + Seek>(
        reader: &mut R,
        file_len: u64,
        segment_size: u64,
    ) -> io::Result<Self> {
        let segment_size = segment_size.max(1);
        let mut segments = Vec::new();
        let mut block = [0u8; PROBE_BLOCK_SIZE];
        let mut start = 0;

        while start < file_len {
            let cut = start.saturating_add(segment_size);
            if cut >= file_len {
                segments.push(Segment {
                    start,
                    len: file_len - start,
                });
                break;
            }

            // If the byte just before the cut is already a newline the
            // segment ends exactly at the cut.
            let end = match find_newline(reader, cut - 1, file_len, &mut block)? {
                Some(pos) => pos + 1,
                None => file_len,
            };

            segments.push(Segment {
                start,
                len: end - start,
            });
            start = end;
        }

        Ok(SegmentMap { segments, file_len })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }
}

/// Position of the first `\n` at or after `from`, looking no further than
/// `limit`.
fn find_newline<R: Read + Seek>(
    reader: &mut R,
    from: u64,
    limit: u64,
    block: &mut [u8],
) -> io::Result<Option<u64>> {
    let mut pos = reader.seek(SeekFrom::Start(from))?;

    while pos < limit {
        let want = block.len().min((limit - pos) as usize);
        let n = match reader.read(&mut block[..want]) {
            Ok(0) => return Ok(None),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if let Some(i) = memchr(b'\n', &block[..n]) {
            return Ok(Some(pos + i as u64));
        }
        pos += n as u64;
    }

    Ok(None)
}
