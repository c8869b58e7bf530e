//! Startup synchronization - repair counter drift before serving requests.
//!
//! Records may reach a collection without going through the allocator (bulk
//! import, manual insert, a counter store that was reset). `synchronize`
//! finds the highest sequence value encoded in the collection's short IDs
//! and raises the counter to at least that value. It never lowers a counter.
//!
//! The maximum is numeric over every parsed short ID, not the lexicographic
//! maximum of the raw strings: `PROD-10000` outranks `PROD-9999`, and a year
//! prefix cannot hide a larger value behind an older year.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

use crate::counter::{CounterError, CounterStore};
use crate::document::{DocumentError, DocumentStore};
use crate::entity::ShortIdentified;
use crate::short_id::ShortIdParseError;

/// What to do when synchronization fails at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Log the failure and keep booting with the counter as it is.
    #[default]
    FailOpen,
    /// Abort startup.
    FailClosed,
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPolicy::FailOpen => f.write_str("fail-open"),
            SyncPolicy::FailClosed => f.write_str("fail-closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sync policy {0:?} (expected fail-open or fail-closed)")]
pub struct UnknownSyncPolicy(pub String);

impl FromStr for SyncPolicy {
    type Err = UnknownSyncPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(SyncPolicy::FailOpen),
            "fail-closed" | "closed" => Ok(SyncPolicy::FailClosed),
            _ => Err(UnknownSyncPolicy(s.to_string())),
        }
    }
}

/// Result of one synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No record carries a short ID; the counter was not touched.
    Empty { sequence: &'static str },
    /// The counter was behind the collection and has been raised.
    Raised {
        sequence: &'static str,
        previous: Option<u64>,
        value: u64,
    },
    /// The counter already covered every existing short ID.
    Unchanged { sequence: &'static str, value: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("scanning {collection} failed: {source}")]
    Documents {
        collection: &'static str,
        source: DocumentError,
    },
    #[error(transparent)]
    Counter(#[from] CounterError),
    /// The well-formed short IDs were still synchronized; `value` is the
    /// counter afterwards.
    #[error("{collection} holds {skipped} malformed short id(s), first: {source}; counter at {value:?}")]
    Malformed {
        collection: &'static str,
        skipped: usize,
        value: Option<u64>,
        source: ShortIdParseError,
    },
}

/// Short IDs found in one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortIdScan {
    /// Highest value among the short IDs that parse.
    pub highest: Option<u64>,
    /// Short IDs that do not fit the collection's format.
    pub malformed: Vec<ShortIdParseError>,
}

/// Parse every short ID in `M`'s collection.
///
/// Records without a short ID are skipped. A short ID that does not parse is
/// collected in `malformed` and does not stop the scan.
pub fn scan_short_ids<M, S>(documents: &S) -> Result<ShortIdScan, SyncError>
where
    M: ShortIdentified,
    S: DocumentStore,
{
    let records = documents
        .find::<M>(&|entity| entity.short_id().is_some_and(|short_id| !short_id.is_empty()))
        .map_err(|source| SyncError::Documents {
            collection: M::COLLECTION,
            source,
        })?;

    let mut scan = ShortIdScan::default();
    for short_id in records.iter().filter_map(|record| record.data.short_id()) {
        match M::FORMAT.parse(short_id) {
            Ok(value) => scan.highest = scan.highest.max(Some(value)),
            Err(e) => scan.malformed.push(e),
        }
    }
    Ok(scan)
}

/// Raise `M::SEQUENCE` to the highest value already used in `M`'s collection.
///
/// The counter ends at `max(current, highest)` over the short IDs that parse.
/// An empty collection leaves the counter unset or unchanged. Malformed short
/// IDs are reported as `SyncError::Malformed` after the raise has happened.
pub fn synchronize<M, S, C>(documents: &S, counters: &C) -> Result<SyncOutcome, SyncError>
where
    M: ShortIdentified,
    S: DocumentStore,
    C: CounterStore,
{
    let sequence = M::SEQUENCE;
    let scan = scan_short_ids::<M, S>(documents)?;

    let outcome = match scan.highest {
        None => SyncOutcome::Empty { sequence },
        Some(highest) => {
            let previous = counters.current(sequence)?;
            let value = counters.raise(sequence, highest)?;
            match previous {
                Some(previous) if previous >= value => SyncOutcome::Unchanged { sequence, value },
                previous => SyncOutcome::Raised {
                    sequence,
                    previous,
                    value,
                },
            }
        }
    };

    let skipped = scan.malformed.len();
    match scan.malformed.into_iter().next() {
        Some(source) => Err(SyncError::Malformed {
            collection: M::COLLECTION,
            skipped,
            value: counters.current(sequence)?,
            source,
        }),
        None => Ok(outcome),
    }
}

/// Run `synchronize` for `M` at startup under `policy`.
///
/// Under `FailOpen` a failure is logged and `Ok(None)` returned. A collection
/// with malformed short IDs has already been raised past its well-formed ones
/// by then; any other failure leaves the counter as it was.
pub fn run_startup_sync<M, S, C>(
    documents: &S,
    counters: &C,
    policy: SyncPolicy,
) -> Result<Option<SyncOutcome>, SyncError>
where
    M: ShortIdentified,
    S: DocumentStore,
    C: CounterStore,
{
    match synchronize::<M, S, C>(documents, counters) {
        Ok(outcome) => {
            match &outcome {
                SyncOutcome::Empty { sequence } => {
                    info!(sequence, collection = M::COLLECTION, "no short ids yet, counter left as is")
                }
                SyncOutcome::Raised {
                    sequence,
                    previous,
                    value,
                } => info!(sequence, ?previous, value, "counter raised to match collection"),
                SyncOutcome::Unchanged { sequence, value } => {
                    info!(sequence, value, "counter already in sync")
                }
            }
            Ok(Some(outcome))
        }
        Err(error) => match policy {
            SyncPolicy::FailOpen => {
                warn!(
                    sequence = M::SEQUENCE,
                    %error,
                    "counter synchronization failed, continuing"
                );
                Ok(None)
            }
            SyncPolicy::FailClosed => Err(error),
        },
    }
}
