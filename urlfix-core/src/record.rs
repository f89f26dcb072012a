use memchr::memchr;

use crate::RecordError;

/// An owned `<url> <count>` record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub url: String,
    pub count: u64,
}

/// A record borrowing its URL from the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef<'a> {
    pub url: &'a str,
    pub count: u64,
}

impl RecordRef<'_> {
    pub fn to_record(&self) -> Record {
        Record {
            url: self.url.to_string(),
            count: self.count,
        }
    }
}

/// Strip a trailing `\n` and/or `\r`.
pub(crate) fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse one line of a fixture file.
///
/// The URL is everything before the first space and the count everything
/// after it. A trailing line ending is ignored.
pub fn parse_record(line: &[u8]) -> Result<RecordRef<'_>, RecordError> {
    let line = trim_line_ending(line);

    let space = memchr(b' ', line).ok_or(RecordError::MissingSeparator)?;
    let (url, rest) = (&line[..space], &line[space + 1..]);

    let url = std::str::from_utf8(url).map_err(|_| RecordError::InvalidUrl)?;
    let count = std::str::from_utf8(rest)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| RecordError::InvalidCount(String::from_utf8_lossy(rest).into_owned()))?;

    Ok(RecordRef { url, count })
}
