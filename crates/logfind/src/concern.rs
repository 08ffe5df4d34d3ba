//! Count concerns: what a find counts.
//!
//! [`CountConcern::Event`] counts every match. The other concerns count the
//! distinct values of one field across the matches.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::FindError;
use crate::record::LogEvent;

/// How matching records are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountConcern {
    /// Count every matching record. This is the default.
    #[default]
    Event,
    /// Count distinct operation values among matches.
    Operation,
    /// Count distinct usernames among matches.
    User,
}

impl CountConcern {
    /// Returns the name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            CountConcern::Event => "event",
            CountConcern::Operation => "operation",
            CountConcern::User => "user",
        }
    }
}

impl fmt::Display for CountConcern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountConcern {
    type Err = FindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "event" => Ok(CountConcern::Event),
            "operation" => Ok(CountConcern::Operation),
            "user" => Ok(CountConcern::User),
            _ => Err(FindError::UnknownCountConcern(s.to_string())),
        }
    }
}

/// Scan-scoped accumulator for a [`CountConcern`].
#[derive(Debug, Clone)]
pub(crate) enum Counter {
    Events(usize),
    Distinct {
        concern: CountConcern,
        seen: HashSet<String>,
    },
}

impl Counter {
    pub(crate) fn new(concern: CountConcern) -> Self {
        match concern {
            CountConcern::Event => Counter::Events(0),
            concern => Counter::Distinct {
                concern,
                seen: HashSet::new(),
            },
        }
    }

    pub(crate) fn record(&mut self, event: &LogEvent<'_>) {
        match self {
            Counter::Events(n) => *n += 1,
            Counter::Distinct { concern, seen } => {
                let value = match concern {
                    CountConcern::User => event.username,
                    _ => event.operation,
                };
                if !seen.contains(value) {
                    seen.insert(value.to_string());
                }
            }
        }
    }

    pub(crate) fn total(&self) -> usize {
        match self {
            Counter::Events(n) => *n,
            Counter::Distinct { seen, .. } => seen.len(),
        }
    }
}
