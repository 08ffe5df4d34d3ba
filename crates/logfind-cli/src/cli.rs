//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use logfind::{
    where_operation_equals, where_size_at_least, where_size_at_most, where_timestamp_between,
    where_username_equals, with_count_concern, CountConcern, FindOption, Timestamp,
};

/// Query an access-log CSV file.
///
/// Counts the records matching every given filter, or the number of distinct
/// users or operations among them.
#[derive(Parser, Debug)]
#[command(name = "lf", version, about)]
pub struct Args {
    /// What to count: event, operation or user
    #[arg(long, default_value = "event", value_parser = parse_concern)]
    pub count: CountConcern,

    /// Only match events after this RFC 3339 time (exclusive)
    #[arg(long, value_parser = parse_timestamp, requires = "max_timestamp")]
    pub min_timestamp: Option<Timestamp>,

    /// Only match events before this RFC 3339 time (exclusive)
    #[arg(long, value_parser = parse_timestamp, requires = "min_timestamp")]
    pub max_timestamp: Option<Timestamp>,

    /// Only match this username (case-insensitive)
    #[arg(long)]
    pub username: Option<String>,

    /// Only match this operation, e.g. upload (case-insensitive)
    #[arg(long)]
    pub operation: Option<String>,

    /// Only match sizes of at least this many kB (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub min_size: Option<i64>,

    /// Only match sizes of at most this many kB (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub max_size: Option<i64>,

    /// Print every matched event after the count
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// CSV log file, or - for stdin
    pub file: PathBuf,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `count: N` followed by matched lines
    Text,
    /// A JSON object with `count` and `events`
    Json,
}

impl Args {
    /// Turns the parsed flags into find options, in a fixed order.
    pub fn to_options(&self) -> Vec<FindOption> {
        let mut options = vec![with_count_concern(self.count)];

        if let (Some(min), Some(max)) = (&self.min_timestamp, &self.max_timestamp) {
            options.push(where_timestamp_between(min.clone(), max.clone()));
        }
        if let Some(username) = &self.username {
            options.push(where_username_equals(username.as_str()));
        }
        if let Some(operation) = &self.operation {
            options.push(where_operation_equals(operation.as_str()));
        }
        if let Some(min) = self.min_size {
            options.push(where_size_at_least(min));
        }
        if let Some(max) = self.max_size {
            options.push(where_size_at_most(max));
        }

        options
    }

    /// Returns `true` when the log should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }
}

fn parse_concern(s: &str) -> Result<CountConcern, String> {
    s.parse().map_err(|e: logfind::FindError| e.to_string())
}

fn parse_timestamp(s: &str) -> Result<Timestamp, String> {
    Timestamp::parse_rfc3339(s).map_err(|e| e.to_string())
}
