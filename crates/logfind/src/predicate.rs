//! Record predicates.
//!
//! A [`Predicate`] is one configured filter, borrowed from a
//! [`FindOptions`](crate::FindOptions). A record matches a configuration when
//! every predicate matches it; an empty predicate list matches everything.

use std::cmp::Ordering;

use crate::options::TimeRange;
use crate::record::LogEvent;

/// A single filter over a resolved record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate<'a> {
    /// `min < timestamp < max`.
    TimestampBetween(&'a TimeRange),
    /// Username equals, ignoring case.
    UsernameEquals(&'a str),
    /// Operation equals, ignoring case.
    OperationEquals(&'a str),
    /// `size >= n`.
    SizeAtLeast(i64),
    /// `size <= n`.
    SizeAtMost(i64),
}

impl Predicate<'_> {
    /// Evaluates this predicate against a record.
    pub fn matches(&self, event: &LogEvent<'_>) -> bool {
        match *self {
            Predicate::TimestampBetween(range) => range.contains(&event.timestamp),
            Predicate::UsernameEquals(username) => eq_fold(event.username, username),
            Predicate::OperationEquals(operation) => eq_fold(event.operation, operation),
            Predicate::SizeAtLeast(min) => event.size.cmp(&min) != Ordering::Less,
            Predicate::SizeAtMost(max) => event.size.cmp(&max) != Ordering::Greater,
        }
    }

    /// Returns the name of the field this predicate inspects.
    pub fn field(&self) -> &'static str {
        match self {
            Predicate::TimestampBetween(_) => "timestamp",
            Predicate::UsernameEquals(_) => "username",
            Predicate::OperationEquals(_) => "operation",
            Predicate::SizeAtLeast(_) | Predicate::SizeAtMost(_) => "size",
        }
    }
}

/// Returns `true` if every predicate matches `event`.
pub fn matches_all(predicates: &[Predicate<'_>], event: &LogEvent<'_>) -> bool {
    predicates.iter().all(|predicate| predicate.matches(event))
}

/// Case-insensitive equality under Unicode lowercase folding.
fn eq_fold(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
