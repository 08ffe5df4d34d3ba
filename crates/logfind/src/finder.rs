//! The query engine.
//!
//! A [`Finder`] makes a single forward pass over its [`RecordSource`],
//! evaluating the configured predicates against every record and counting
//! matches according to the configured [`CountConcern`](crate::CountConcern).

use tracing::{debug, trace, warn};

use crate::concern::Counter;
use crate::error::{FindError, Result};
use crate::options::{FindOption, FindOptions};
use crate::predicate::matches_all;
use crate::record::{LogEvent, RecordSource};

/// Outcome of a successful find.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindResult {
    /// Number of matching events, or of distinct values for the
    /// operation and user concerns.
    pub count: usize,
    /// One formatted line per matching record, in source order.
    pub events: Vec<String>,
}

/// Runs queries against a record source.
///
/// # Example
///
/// ```
/// use logfind::{Finder, Record, RecordSource, SourceError, Timestamp, where_size_at_least};
///
/// struct Transfer(i64);
///
/// impl Record for Transfer {
///     fn timestamp(&self) -> Result<Timestamp, SourceError> {
///         Timestamp::parse_unix_date("Sun Apr 12 22:10:38 UTC 2020")
///     }
///     fn username(&self) -> Result<&str, SourceError> { Ok("sarah94") }
///     fn operation(&self) -> Result<&str, SourceError> { Ok("upload") }
///     fn size(&self) -> Result<i64, SourceError> { Ok(self.0) }
/// }
///
/// struct Transfers(Vec<i64>);
///
/// impl RecordSource for Transfers {
///     type Record = Transfer;
///     fn read_next(&mut self) -> Result<Option<Transfer>, SourceError> {
///         Ok(self.0.pop().map(Transfer))
///     }
/// }
///
/// let mut finder = Finder::new(Transfers(vec![10, 60, 70]));
/// let result = finder.find([where_size_at_least(50)]).unwrap();
/// assert_eq!(result.count, 2);
/// assert_eq!(result.events[0], "Sun Apr 12 22:10:38 UTC 2020 sarah94 upload 70");
/// ```
#[derive(Debug)]
pub struct Finder<S> {
    source: S,
}

impl<S: RecordSource> Finder<S> {
    /// Creates a finder reading from `source`.
    pub fn new(source: S) -> Self {
        Finder { source }
    }

    /// Builds a configuration from `options` and scans the source with it.
    ///
    /// Configuration errors are returned before any record is read.
    pub fn find<I>(&mut self, options: I) -> Result<FindResult>
    where
        I: IntoIterator<Item = FindOption>,
    {
        let options = FindOptions::from_options(options)?;
        self.find_with(&options)
    }

    /// Scans the source to the end with a prebuilt configuration.
    ///
    /// Any error other than end of stream aborts the scan; results gathered
    /// up to that point are discarded.
    pub fn find_with(&mut self, options: &FindOptions) -> Result<FindResult> {
        debug!(?options, "starting scan");

        let predicates = options.predicates();
        let mut counter = Counter::new(options.count_concern());
        let mut events = Vec::new();
        let mut scanned = 0usize;

        loop {
            let record = match self.source.read_next() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(err) => return Err(abort(err.into(), scanned)),
            };
            scanned += 1;

            let event = LogEvent::read(&record).map_err(|err| abort(err.into(), scanned))?;
            if !matches_all(&predicates, &event) {
                continue;
            }

            trace!(%event, "match");
            counter.record(&event);
            events.push(event.to_string());
        }

        let result = FindResult {
            count: counter.total(),
            events,
        };
        debug!(
            scanned,
            matched = result.events.len(),
            count = result.count,
            "scan finished"
        );
        Ok(result)
    }

    /// Returns a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the finder, returning the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

fn abort(err: FindError, scanned: usize) -> FindError {
    warn!(error = %err, record = scanned, "scan aborted");
    err
}
