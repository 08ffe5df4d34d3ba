//! Record and record-source contracts.
//!
//! The engine never sees a concrete log format. A source hands out
//! [`Record`]s one at a time, and each record exposes its four fields through
//! accessors that may fail independently (a malformed timestamp does not make
//! the username unreadable).
//!
//! # Implementing a source
//!
//! ```
//! use logfind::{Record, RecordSource, SourceError, Timestamp};
//!
//! struct Line(String);
//!
//! impl Record for Line {
//!     fn timestamp(&self) -> Result<Timestamp, SourceError> {
//!         Timestamp::parse_unix_date(&self.0[..28])
//!     }
//!     fn username(&self) -> Result<&str, SourceError> {
//!         Ok("anonymous")
//!     }
//!     fn operation(&self) -> Result<&str, SourceError> {
//!         Ok("download")
//!     }
//!     fn size(&self) -> Result<i64, SourceError> {
//!         Ok(0)
//!     }
//! }
//!
//! struct Lines(std::vec::IntoIter<String>);
//!
//! impl RecordSource for Lines {
//!     type Record = Line;
//!
//!     fn read_next(&mut self) -> Result<Option<Line>, SourceError> {
//!         Ok(self.0.next().map(Line))
//!     }
//! }
//! ```

use std::fmt;

use crate::error::SourceError;
use crate::timestamp::Timestamp;

/// A single log entry.
pub trait Record {
    /// When the event happened.
    fn timestamp(&self) -> Result<Timestamp, SourceError>;

    /// Who performed the operation.
    fn username(&self) -> Result<&str, SourceError>;

    /// What was done, e.g. `upload` or `download`.
    fn operation(&self) -> Result<&str, SourceError>;

    /// Transfer size in kilobytes.
    fn size(&self) -> Result<i64, SourceError>;
}

/// A forward-only, stateful stream of records.
///
/// Each call to [`read_next`](Self::read_next) advances the source.
/// `Ok(None)` signals end of stream; sources are never rewound.
pub trait RecordSource {
    /// The record type produced by this source.
    type Record: Record;

    /// Reads the next record, `Ok(None)` once the stream is exhausted.
    fn read_next(&mut self) -> Result<Option<Self::Record>, SourceError>;
}

impl<S: RecordSource + ?Sized> RecordSource for &mut S {
    type Record = S::Record;

    fn read_next(&mut self) -> Result<Option<Self::Record>, SourceError> {
        (**self).read_next()
    }
}

/// The resolved fields of one record.
///
/// Its [`Display`](fmt::Display) output is the match line reported for each
/// matching record: `<timestamp> <username> <operation> <size>`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent<'a> {
    pub timestamp: Timestamp,
    pub username: &'a str,
    pub operation: &'a str,
    pub size: i64,
}

impl<'a> LogEvent<'a> {
    /// Reads all four fields of `record`, in timestamp, username, operation,
    /// size order. The first failing accessor wins.
    pub fn read<R: Record>(record: &'a R) -> Result<Self, SourceError> {
        Ok(LogEvent {
            timestamp: record.timestamp()?,
            username: record.username()?,
            operation: record.operation()?,
            size: record.size()?,
        })
    }
}

impl fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.timestamp, self.username, self.operation, self.size
        )
    }
}
