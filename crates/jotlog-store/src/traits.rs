use jotlog_core::{LogResult, Record};
use std::sync::Arc;

/// Pagination parameters for a fetch.
///
/// Both fields default to `None`, meaning "fetch everything". The reference
/// backends accept these but always return the full set, oldest first.
#[derive(Debug, Clone, Default)]
pub struct FetchQuery {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

/// Trait for abstract append-only log storage.
/// Implementations handle different backend storage (preferences, file, etc.)
///
/// The required methods are the strict variants: they surface backend failures
/// as [`LogResult`]. The provided `fetch`/`append` methods implement the
/// default policy callers normally want from a debug log: failures degrade to
/// an empty result or a dropped record, reported to the diagnostic sink and
/// never propagated.
pub trait LogStore<T: Record>: Send + Sync {
    /// Fetch all persisted records, oldest first, surfacing backend errors.
    fn try_fetch(&self, query: FetchQuery) -> LogResult<Vec<T>>;

    /// Durably persist one record, surfacing backend errors.
    ///
    /// The record must be visible to the next fetch on the same instance.
    fn try_append(&self, record: T) -> LogResult<()>;

    /// Fetch all persisted records; backend failure yields an empty result.
    fn fetch(&self) -> Vec<T> {
        self.fetch_with(FetchQuery::default())
    }

    /// Fetch with explicit pagination parameters; backend failure yields an
    /// empty result.
    fn fetch_with(&self, query: FetchQuery) -> Vec<T> {
        match self.try_fetch(query) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Log fetch failed, returning no records: {e}");
                Vec::new()
            }
        }
    }

    /// Persist one record; backend failure drops the record.
    fn append(&self, record: T) {
        if let Err(e) = self.try_append(record) {
            tracing::warn!("Log append failed, record dropped: {e}");
        }
    }
}

/// A shareable handle to some log store of records `T`, without naming the
/// concrete backend.
pub type SharedLogStore<T> = Arc<dyn LogStore<T>>;
