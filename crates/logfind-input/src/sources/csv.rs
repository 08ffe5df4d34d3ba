//! CSV record source.

use std::fs::File;
use std::io;
use std::path::Path;

use ::csv::{Reader, ReaderBuilder, StringRecord, Trim};
use logfind::{Record, RecordSource, SourceError, Timestamp};
use tracing::{debug, trace};

/// Number of columns in a log row.
pub const FIELD_COUNT: usize = 4;

/// Column names of the optional header row, in order.
pub const HEADER: [&str; FIELD_COUNT] = ["timestamp", "username", "operation", "size"];

const INDEX_TIMESTAMP: usize = 0;
const INDEX_USERNAME: usize = 1;
const INDEX_OPERATION: usize = 2;
const INDEX_SIZE: usize = 3;

/// Read access-log records from comma separated text.
///
/// Columns are timestamp (Unix `date` layout), username, operation and size
/// in kilobytes. If the first row is exactly the [`HEADER`], it is skipped.
/// Cells are trimmed; blank lines are ignored.
///
/// # Example
///
/// ```
/// use logfind::{Record, RecordSource};
/// use logfind_input::CsvSource;
///
/// let line = "Sun Apr 12 22:10:38 UTC 2020,sarah94,download,34";
/// let mut source = CsvSource::from_reader(line.as_bytes());
/// let record = source.read_next().unwrap().unwrap();
/// assert_eq!(record.username().unwrap(), "sarah94");
/// assert!(source.read_next().unwrap().is_none());
/// ```
pub struct CsvSource<R> {
    reader: Reader<R>,
    past_header: bool,
}

impl CsvSource<File> {
    /// Open a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening csv log");
        let reader = builder().from_path(path).map_err(SourceError::read)?;
        Ok(Self::with_reader(reader))
    }
}

impl<R: io::Read> CsvSource<R> {
    /// Read CSV from any reader, e.g. a byte slice or stdin.
    pub fn from_reader(rdr: R) -> Self {
        Self::with_reader(builder().from_reader(rdr))
    }

    fn with_reader(reader: Reader<R>) -> Self {
        Self {
            reader,
            past_header: false,
        }
    }

    fn read_raw(&mut self) -> Result<Option<StringRecord>, SourceError> {
        let mut record = StringRecord::new();
        let more = self
            .reader
            .read_record(&mut record)
            .map_err(SourceError::read)?;
        Ok(more.then_some(record))
    }
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(Trim::All);
    builder
}

fn is_header(record: &StringRecord) -> bool {
    record.len() == FIELD_COUNT && record.iter().eq(HEADER)
}

impl<R: io::Read> RecordSource for CsvSource<R> {
    type Record = CsvRecord;

    fn read_next(&mut self) -> Result<Option<CsvRecord>, SourceError> {
        let mut record = self.read_raw()?;

        if !self.past_header {
            self.past_header = true;
            if record.as_ref().is_some_and(is_header) {
                trace!("skipping header row");
                record = self.read_raw()?;
            }
        }

        Ok(record.map(CsvRecord))
    }
}

/// One CSV row.
///
/// Field accessors fail with [`SourceError::FieldCountMismatch`] when the row
/// does not have exactly [`FIELD_COUNT`] columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord(StringRecord);

impl CsvRecord {
    /// Build a record from raw cells.
    pub fn from_fields<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        CsvRecord(fields.into_iter().collect())
    }

    /// 1-based line number in the input, when known.
    pub fn line(&self) -> Option<u64> {
        self.0.position().map(|pos| pos.line())
    }

    fn field(&self, index: usize) -> Result<&str, SourceError> {
        if self.0.len() != FIELD_COUNT {
            return Err(SourceError::FieldCountMismatch {
                expected: FIELD_COUNT,
                found: self.0.len(),
            });
        }
        // length checked above
        Ok(&self.0[index])
    }
}

impl Record for CsvRecord {
    fn timestamp(&self) -> Result<Timestamp, SourceError> {
        Timestamp::parse_unix_date(self.field(INDEX_TIMESTAMP)?)
    }

    fn username(&self) -> Result<&str, SourceError> {
        self.field(INDEX_USERNAME)
    }

    fn operation(&self) -> Result<&str, SourceError> {
        self.field(INDEX_OPERATION)
    }

    fn size(&self) -> Result<i64, SourceError> {
        let raw = self.field(INDEX_SIZE)?;
        raw.parse()
            .map_err(|e| SourceError::invalid_field("size", raw, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sarah() -> CsvRecord {
        CsvRecord::from_fields(["Sun Apr 12 22:10:38 UTC 2020", "sarah94", "download", "34"])
    }

    #[test]
    fn respects_given_reader() {
        let mut source =
            CsvSource::from_reader("Sun Apr 12 22:10:38 UTC 2020,sarah94,download,34".as_bytes());
        let record = source.read_next().unwrap().unwrap();
        assert_eq!(record.0, sarah().0);
        assert!(source.read_next().unwrap().is_none());
    }

    #[test]
    fn skips_header_row() {
        let input = "timestamp,username,operation,size\nSun Apr 12 22:10:38 UTC 2020,sarah94,download,34\n";
        let mut source = CsvSource::from_reader(input.as_bytes());
        let record = source.read_next().unwrap().unwrap();
        assert_eq!(record.username().unwrap(), "sarah94");
        assert_eq!(record.line(), Some(2));
        assert!(source.read_next().unwrap().is_none());
    }

    #[test]
    fn header_only_is_empty() {
        let mut source = CsvSource::from_reader("timestamp,username,operation,size\n".as_bytes());
        assert!(source.read_next().unwrap().is_none());
    }

    #[test]
    fn header_must_match_exactly() {
        let mut source = CsvSource::from_reader("Timestamp,username,operation,size\n".as_bytes());
        let record = source.read_next().unwrap().unwrap();
        assert!(record.timestamp().is_err());
    }

    #[test]
    fn header_is_only_skipped_first() {
        let input = "Sun Apr 12 22:10:38 UTC 2020,sarah94,download,34\ntimestamp,username,operation,size\n";
        let mut source = CsvSource::from_reader(input.as_bytes());
        source.read_next().unwrap().unwrap();
        let second = source.read_next().unwrap().unwrap();
        assert_eq!(second.username().unwrap(), "username");
    }

    #[test]
    fn trims_cells() {
        let input = " Sun Apr 12 22:10:38 UTC 2020 , sarah94 ,download, 34 ";
        let mut source = CsvSource::from_reader(input.as_bytes());
        let record = source.read_next().unwrap().unwrap();
        assert_eq!(record.username().unwrap(), "sarah94");
        assert_eq!(record.size().unwrap(), 34);
    }

    #[test]
    fn parses_timestamp_as_unix_date() {
        let expected: Timestamp = Utc.with_ymd_and_hms(2020, 4, 12, 22, 10, 38).unwrap().into();
        assert_eq!(sarah().timestamp().unwrap(), expected);
    }

    #[test]
    fn fails_on_unexpected_timestamp_format() {
        let record =
            CsvRecord::from_fields(["2022-01-01T00:00:00.000Z", "sarah94", "download", "34"]);
        let err = record.timestamp().unwrap_err();
        assert!(matches!(err, SourceError::InvalidField { field: "timestamp", .. }));
    }

    #[test]
    fn fails_on_non_numeric_size() {
        let record =
            CsvRecord::from_fields(["Sun Apr 12 22:10:38 UTC 2020", "sarah94", "download", "34kB"]);
        let err = record.size().unwrap_err();
        assert!(matches!(err, SourceError::InvalidField { field: "size", .. }));
    }

    #[test]
    fn accessors_respect_field_count() {
        let empty = CsvRecord::from_fields(Vec::<String>::new());
        for err in [
            empty.timestamp().unwrap_err(),
            empty.username().unwrap_err(),
            empty.operation().unwrap_err(),
            empty.size().unwrap_err(),
        ] {
            assert!(matches!(
                err,
                SourceError::FieldCountMismatch {
                    expected: 4,
                    found: 0
                }
            ));
        }
    }

    #[test]
    fn accessors_read_their_column() {
        let record = sarah();
        assert_eq!(record.username().unwrap(), "sarah94");
        assert_eq!(record.operation().unwrap(), "download");
        assert_eq!(record.size().unwrap(), 34);
    }

    #[test]
    fn short_rows_are_yielded() {
        let input = "Sun Apr 12 22:10:38 UTC 2020,sarah94,download,34\nSun Apr 12 22:10:38 UTC 2020,sarah94\n";
        let mut source = CsvSource::from_reader(input.as_bytes());
        source.read_next().unwrap().unwrap();
        let short = source.read_next().unwrap().unwrap();
        assert!(matches!(
            short.username(),
            Err(SourceError::FieldCountMismatch { found: 2, .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let input = b"Sun Apr 12 22:10:38 UTC 2020,\xff\xfe,download,34\n";
        let mut source = CsvSource::from_reader(&input[..]);
        assert!(matches!(
            source.read_next(),
            Err(SourceError::ReadFailure(_))
        ));
    }
}
