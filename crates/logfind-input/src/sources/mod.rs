//! Record source implementations.
//!
//! - [`CsvSource`] - Read records from CSV text
//! - [`MemorySource`] - Replay records held in memory

mod csv;
mod memory;

pub use self::csv::{CsvRecord, CsvSource, FIELD_COUNT, HEADER};
pub use self::memory::{MemoryRecord, MemorySource};
