//! In-memory record source.

use std::collections::VecDeque;

use logfind::{Record, RecordSource, SourceError, Timestamp};

/// Replay a fixed list of records.
///
/// Useful for tests and for callers that already hold parsed records.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use logfind::{with_count_concern, CountConcern, Finder};
/// use logfind_input::{MemoryRecord, MemorySource};
///
/// let at = Utc.with_ymd_and_hms(2020, 3, 12, 22, 10, 38).unwrap();
/// let source = MemorySource::new([
///     MemoryRecord::new(at, "kyle123", "upload", 10),
///     MemoryRecord::new(at, "kyle123", "download", 20),
/// ]);
///
/// let result = Finder::new(source)
///     .find([with_count_concern(CountConcern::User)])
///     .unwrap();
/// assert_eq!(result.count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource<R = MemoryRecord> {
    records: VecDeque<R>,
}

impl<R> MemorySource<R> {
    /// Create a source yielding `records` in order.
    pub fn new(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Number of records not yet read.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl<R> Default for MemorySource<R> {
    fn default() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }
}

impl<R: Record> RecordSource for MemorySource<R> {
    type Record = R;

    fn read_next(&mut self) -> Result<Option<R>, SourceError> {
        Ok(self.records.pop_front())
    }
}

/// A record with owned, always-readable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRecord {
    timestamp: Timestamp,
    username: String,
    operation: String,
    size: i64,
}

impl MemoryRecord {
    /// Create a record.
    pub fn new(
        timestamp: impl Into<Timestamp>,
        username: impl Into<String>,
        operation: impl Into<String>,
        size: i64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            username: username.into(),
            operation: operation.into(),
            size,
        }
    }
}

impl Record for MemoryRecord {
    fn timestamp(&self) -> Result<Timestamp, SourceError> {
        Ok(self.timestamp.clone())
    }

    fn username(&self) -> Result<&str, SourceError> {
        Ok(&self.username)
    }

    fn operation(&self) -> Result<&str, SourceError> {
        Ok(&self.operation)
    }

    fn size(&self) -> Result<i64, SourceError> {
        Ok(self.size)
    }
}
