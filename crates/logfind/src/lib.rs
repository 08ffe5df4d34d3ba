//! logfind - filter and count access-log records in a single streaming pass.
//!
//! Records come from any [`RecordSource`]; each carries a timestamp, a
//! username, an operation and a size in kilobytes. A find applies a set of
//! optional, AND-combined filters and reports either the number of matching
//! events or the number of distinct operations or users among them, together
//! with one formatted line per match.
//!
//! # Quick Start
//!
//! ```rust
//! use logfind::{
//!     where_operation_equals, with_count_concern, CountConcern, Finder, Record, RecordSource,
//!     SourceError, Timestamp,
//! };
//!
//! struct Entry {
//!     user: &'static str,
//!     op: &'static str,
//! }
//!
//! impl Record for Entry {
//!     fn timestamp(&self) -> Result<Timestamp, SourceError> {
//!         Timestamp::parse_unix_date("Sun Apr 12 22:10:38 UTC 2020")
//!     }
//!     fn username(&self) -> Result<&str, SourceError> { Ok(self.user) }
//!     fn operation(&self) -> Result<&str, SourceError> { Ok(self.op) }
//!     fn size(&self) -> Result<i64, SourceError> { Ok(34) }
//! }
//!
//! struct Entries(std::vec::IntoIter<Entry>);
//!
//! impl RecordSource for Entries {
//!     type Record = Entry;
//!     fn read_next(&mut self) -> Result<Option<Entry>, SourceError> {
//!         Ok(self.0.next())
//!     }
//! }
//!
//! let entries = vec![
//!     Entry { user: "sarah94", op: "upload" },
//!     Entry { user: "jeff22", op: "upload" },
//!     Entry { user: "sarah94", op: "download" },
//! ];
//!
//! let mut finder = Finder::new(Entries(entries.into_iter()));
//! let result = finder
//!     .find([with_count_concern(CountConcern::User), where_operation_equals("UPLOAD")])
//!     .unwrap();
//!
//! assert_eq!(result.count, 2);
//! assert_eq!(result.events.len(), 2);
//! ```
//!
//! # Match Semantics
//!
//! ```text
//! match = (no time range OR min < timestamp < max)
//!       ∧ (no username filter OR username equals, ignoring case)
//!       ∧ (no operation filter OR operation equals, ignoring case)
//!       ∧ (no min size OR size >= min)
//!       ∧ (no max size OR size <= max)
//! ```
//!
//! # Count Concerns
//!
//! | Concern | Reported count |
//! |---------|----------------|
//! | `Event` | number of matching records (default) |
//! | `Operation` | number of distinct operations among matches |
//! | `User` | number of distinct usernames among matches |
//!
//! # Errors
//!
//! Configuration errors ([`FindError::TimeRangeInvalid`]) are reported before
//! the source is touched. Any [`SourceError`] during the scan aborts it and
//! no partial result is returned. End of stream is `Ok(None)` from
//! [`RecordSource::read_next`], not an error.

mod concern;
mod error;
mod finder;
mod options;
mod predicate;
mod record;
mod timestamp;

// Re-export public API
pub use concern::CountConcern;
pub use error::{FindError, Result, SourceError};
pub use finder::{FindResult, Finder};
pub use options::{
    where_operation_equals, where_size_at_least, where_size_at_most, where_timestamp_between,
    where_username_equals, with_count_concern, FindOption, FindOptions, TimeRange,
};
pub use predicate::{matches_all, Predicate};
pub use record::{LogEvent, Record, RecordSource};
pub use timestamp::Timestamp;
