//! Query configuration.
//!
//! A [`FindOptions`] is assembled from a sequence of [`FindOption`]s. Each
//! option touches exactly one field group, and either succeeds or fails
//! without changing anything. Building stops at the first failure.
//!
//! ```
//! use logfind::{CountConcern, FindOptions, where_operation_equals, where_size_at_least,
//!     with_count_concern};
//!
//! let options = FindOptions::from_options([
//!     with_count_concern(CountConcern::User),
//!     where_operation_equals("upload"),
//!     where_size_at_least(50),
//! ])
//! .unwrap();
//!
//! assert_eq!(options.count_concern(), CountConcern::User);
//! assert_eq!(options.min_size(), Some(50));
//! assert_eq!(options.max_size(), None);
//! ```

use tracing::trace;

use crate::concern::CountConcern;
use crate::error::{FindError, Result};
use crate::predicate::Predicate;
use crate::timestamp::Timestamp;

/// An exclusive time window: `min < t < max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    min: Timestamp,
    max: Timestamp,
}

impl TimeRange {
    /// Creates a range, rejecting it unless `max` is strictly after `min`.
    pub fn new(min: Timestamp, max: Timestamp) -> Result<Self> {
        if !max.is_after(&min) {
            return Err(FindError::TimeRangeInvalid { min, max });
        }
        Ok(TimeRange { min, max })
    }

    /// Lower bound (exclusive).
    pub fn min(&self) -> &Timestamp {
        &self.min
    }

    /// Upper bound (exclusive).
    pub fn max(&self) -> &Timestamp {
        &self.max
    }

    /// Returns `true` if `ts` lies strictly inside the range.
    pub fn contains(&self, ts: &Timestamp) -> bool {
        ts.is_after(&self.min) && ts.is_before(&self.max)
    }
}

/// A finalized filter configuration.
///
/// Every filter is optional; unset filters match everything. All set filters
/// must match for a record to be reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    count_concern: CountConcern,
    username: Option<String>,
    operation: Option<String>,
    time_range: Option<TimeRange>,
    min_size: Option<i64>,
    max_size: Option<i64>,
}

impl FindOptions {
    /// Creates the default configuration: count events, no filters.
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Builds a configuration by applying `options` in order.
    ///
    /// Returns the first error encountered; no configuration is produced
    /// in that case.
    pub fn from_options<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = FindOption>,
    {
        let mut built = FindOptions::new();
        for option in options {
            option.apply(&mut built)?;
        }
        Ok(built)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns how matches are counted.
    pub fn count_concern(&self) -> CountConcern {
        self.count_concern
    }

    /// Returns the username filter, if set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the operation filter, if set.
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Returns the time range filter, if set.
    pub fn time_range(&self) -> Option<&TimeRange> {
        self.time_range.as_ref()
    }

    /// Returns the inclusive lower size bound, if set.
    pub fn min_size(&self) -> Option<i64> {
        self.min_size
    }

    /// Returns the inclusive upper size bound, if set.
    pub fn max_size(&self) -> Option<i64> {
        self.max_size
    }

    /// Returns `true` if no filter is set (every record matches).
    pub fn is_unfiltered(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Returns the configured predicates, size bounds first.
    ///
    /// An empty list matches every record.
    pub fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = Vec::new();
        if let Some(min) = self.min_size {
            predicates.push(Predicate::SizeAtLeast(min));
        }
        if let Some(max) = self.max_size {
            predicates.push(Predicate::SizeAtMost(max));
        }
        if let Some(range) = &self.time_range {
            predicates.push(Predicate::TimestampBetween(range));
        }
        if let Some(username) = &self.username {
            predicates.push(Predicate::UsernameEquals(username));
        }
        if let Some(operation) = &self.operation {
            predicates.push(Predicate::OperationEquals(operation));
        }
        predicates
    }
}

/// A single configuration step.
#[derive(Debug, Clone, PartialEq)]
pub enum FindOption {
    /// Sets how matches are counted.
    CountConcern(CountConcern),
    /// Requires the username to equal this value, ignoring case.
    UsernameEquals(String),
    /// Requires the operation to equal this value, ignoring case.
    OperationEquals(String),
    /// Requires `min < timestamp < max`.
    TimestampBetween { min: Timestamp, max: Timestamp },
    /// Requires `size >= n` (kilobytes).
    SizeAtLeast(i64),
    /// Requires `size <= n` (kilobytes).
    SizeAtMost(i64),
}

impl FindOption {
    /// Applies this option to `options`.
    ///
    /// On error `options` is left untouched.
    pub fn apply(self, options: &mut FindOptions) -> Result<()> {
        trace!(option = ?self, "applying find option");
        match self {
            FindOption::CountConcern(concern) => options.count_concern = concern,
            FindOption::UsernameEquals(username) => options.username = Some(username),
            FindOption::OperationEquals(operation) => options.operation = Some(operation),
            FindOption::TimestampBetween { min, max } => {
                options.time_range = Some(TimeRange::new(min, max)?);
            }
            FindOption::SizeAtLeast(min) => options.min_size = Some(min),
            FindOption::SizeAtMost(max) => options.max_size = Some(max),
        }
        Ok(())
    }
}

/// Customizes how matches are counted. See [`CountConcern`].
pub fn with_count_concern(concern: CountConcern) -> FindOption {
    FindOption::CountConcern(concern)
}

/// Matching records must carry this username (case-insensitive).
pub fn where_username_equals(username: impl Into<String>) -> FindOption {
    FindOption::UsernameEquals(username.into())
}

/// Matching records must carry this operation (case-insensitive).
pub fn where_operation_equals(operation: impl Into<String>) -> FindOption {
    FindOption::OperationEquals(operation.into())
}

/// Matching records must fall strictly between `min` and `max`.
pub fn where_timestamp_between(min: impl Into<Timestamp>, max: impl Into<Timestamp>) -> FindOption {
    FindOption::TimestampBetween {
        min: min.into(),
        max: max.into(),
    }
}

/// Matching records must have `size >= min` kilobytes.
pub fn where_size_at_least(min: i64) -> FindOption {
    FindOption::SizeAtLeast(min)
}

/// Matching records must have `size <= max` kilobytes.
pub fn where_size_at_most(max: i64) -> FindOption {
    FindOption::SizeAtMost(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap().into()
    }

    #[test]
    fn default_configuration() {
        let opts = FindOptions::from_options(std::iter::empty()).unwrap();
        assert_eq!(opts.count_concern(), CountConcern::Event);
        assert_eq!(opts.username(), None);
        assert_eq!(opts.operation(), None);
        assert_eq!(opts.time_range(), None);
        assert_eq!(opts.min_size(), None);
        assert_eq!(opts.max_size(), None);
        assert!(opts.is_unfiltered());
    }

    #[test]
    fn sets_count_concern() {
        let mut opts = FindOptions::new();
        with_count_concern(CountConcern::Operation)
            .apply(&mut opts)
            .unwrap();
        assert_eq!(opts.count_concern(), CountConcern::Operation);
    }

    #[test]
    fn sets_username_and_operation() {
        let opts = FindOptions::from_options([
            where_username_equals("giggity"),
            where_operation_equals("upload"),
        ])
        .unwrap();
        assert_eq!(opts.username(), Some("giggity"));
        assert_eq!(opts.operation(), Some("upload"));
    }

    #[test]
    fn sets_time_range() {
        let opts = FindOptions::from_options([where_timestamp_between(
            utc(2022, 1, 1),
            utc(2022, 12, 31),
        )])
        .unwrap();
        let range = opts.time_range().unwrap();
        assert_eq!(range.min(), &utc(2022, 1, 1));
        assert_eq!(range.max(), &utc(2022, 12, 31));
    }

    #[test]
    fn rejects_reversed_time_range_without_mutation() {
        let mut opts = FindOptions::new();
        let err = where_timestamp_between(utc(2022, 12, 31), utc(2022, 1, 1))
            .apply(&mut opts)
            .unwrap_err();
        assert!(matches!(err, FindError::TimeRangeInvalid { .. }));
        assert_eq!(opts.time_range(), None);
        assert_eq!(opts, FindOptions::new());
    }

    #[test]
    fn rejects_empty_time_range() {
        let err = TimeRange::new(utc(2022, 1, 1), utc(2022, 1, 1)).unwrap_err();
        assert!(matches!(err, FindError::TimeRangeInvalid { .. }));
    }

    #[test]
    fn size_bounds_are_independent() {
        let opts = FindOptions::from_options([where_size_at_least(10)]).unwrap();
        assert_eq!(opts.min_size(), Some(10));
        assert_eq!(opts.max_size(), None);

        let opts = FindOptions::from_options([where_size_at_most(10)]).unwrap();
        assert_eq!(opts.min_size(), None);
        assert_eq!(opts.max_size(), Some(10));

        // min above max is accepted; it just matches nothing
        let opts =
            FindOptions::from_options([where_size_at_least(100), where_size_at_most(10)]).unwrap();
        assert_eq!(opts.min_size(), Some(100));
        assert_eq!(opts.max_size(), Some(10));
    }

    #[test]
    fn fails_on_first_error() {
        let result = FindOptions::from_options([
            where_username_equals("kyle123"),
            where_timestamp_between(utc(2022, 12, 31), utc(2022, 1, 1)),
            where_operation_equals("upload"),
        ]);
        assert!(matches!(result, Err(FindError::TimeRangeInvalid { .. })));
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let once = FindOptions::from_options([where_username_equals("kyle123")]).unwrap();
        let twice = FindOptions::from_options([
            where_username_equals("kyle123"),
            where_username_equals("kyle123"),
        ])
        .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn later_option_wins_within_a_field_group() {
        let opts = FindOptions::from_options([
            where_operation_equals("upload"),
            where_operation_equals("download"),
        ])
        .unwrap();
        assert_eq!(opts.operation(), Some("download"));
    }

    #[test]
    fn predicates_only_include_set_filters() {
        let opts = FindOptions::from_options([
            with_count_concern(CountConcern::User),
            where_size_at_most(5),
        ])
        .unwrap();
        assert_eq!(opts.predicates(), vec![Predicate::SizeAtMost(5)]);
    }
}
