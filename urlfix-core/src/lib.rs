mod error;
mod fixture;
mod record;
mod scan;
mod segment;
mod top;

pub use error::{FixtureError, RecordError, ScanError};
pub use fixture::{
    parse_count, write_fixtures, FixtureGenerator, FixtureLine, FIXTURE_SEED, URL_PREFIX,
};
pub use record::{parse_record, Record, RecordRef};
pub use scan::{scan_file, scan_file_parallel, scan_reader};
pub use segment::{Segment, SegmentMap, DEFAULT_SEGMENT_SIZE};
pub use top::TopK;
