//! Record sources for the logfind query engine.
//!
//! `logfind-input` provides the concrete [`RecordSource`](logfind::RecordSource)
//! implementations that feed a [`Finder`](logfind::Finder):
//!
//! - [`CsvSource`] - comma separated access logs, one record per line
//! - [`MemorySource`] - records already held in memory
//!
//! # Quick Start
//!
//! ```
//! use logfind::{where_operation_equals, Finder};
//! use logfind_input::CsvSource;
//!
//! let log = "\
//! timestamp,username,operation,size
//! Sun Apr 12 22:10:38 UTC 2020,sarah94,download,34
//! Sun Apr 12 22:35:06 UTC 2020,Maia86,upload,86
//! ";
//!
//! let mut finder = Finder::new(CsvSource::from_reader(log.as_bytes()));
//! let result = finder.find([where_operation_equals("upload")]).unwrap();
//!
//! assert_eq!(result.count, 1);
//! assert_eq!(result.events, ["Sun Apr 12 22:35:06 UTC 2020 Maia86 upload 86"]);
//! ```
//!
//! # CSV Layout
//!
//! ```text
//! timestamp,username,operation,size        <- optional header, skipped
//! Sun Apr 12 22:10:38 UTC 2020,sarah94,download,34
//! ```
//!
//! Columns are positional. A row with the wrong number of columns is still
//! handed to the engine, and every field accessor on it reports
//! [`SourceError::FieldCountMismatch`](logfind::SourceError::FieldCountMismatch).

pub mod sources;

pub use sources::{CsvRecord, CsvSource, MemoryRecord, MemorySource, FIELD_COUNT, HEADER};
