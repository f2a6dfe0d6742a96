use crate::traits::LogStore;
use jotlog_core::{LogRecord, Record, DEFAULT_IDENTIFIER};

/// Facade owning a log store and a local cache of its records.
///
/// The cache is filled once from the store at construction and grows with
/// every add; it is never re-synced afterwards, so mutation of the store
/// behind this logger's back leaves the cache stale. [`Logger::fetch_logs`]
/// always bypasses the cache and asks the backend.
pub struct Logger<T: Record = LogRecord> {
    store: Box<dyn LogStore<T>>,
    logs: Vec<T>,
    identifier: String,
}

impl<T: Record> Logger<T> {
    pub fn new(store: Box<dyn LogStore<T>>) -> Self {
        Self::with_identifier(store, DEFAULT_IDENTIFIER)
    }

    pub fn with_identifier(store: Box<dyn LogStore<T>>, identifier: impl Into<String>) -> Self {
        let logs = store.fetch();
        Self {
            store,
            logs,
            identifier: identifier.into(),
        }
    }

    /// Log a line of text: build a record timestamped now, persist it, then
    /// append it to the cache.
    ///
    /// Persistence happens first, but the cache update is unconditional:
    /// a failed append still shows up locally. Use the store's strict API for
    /// callers that need to know.
    pub fn add_to_logs(&mut self, text: impl Into<String>) {
        self.add_record(T::from_text(text.into()));
    }

    /// Log an already-constructed record.
    pub fn add_record(&mut self, record: T) {
        self.store.append(record.clone());
        self.logs.push(record);
    }

    /// Fetch straight from the backend, bypassing the cache.
    pub fn fetch_logs(&self) -> Vec<T> {
        self.store.fetch()
    }

    /// Cached records, oldest first.
    pub fn logs(&self) -> &[T] {
        &self.logs
    }

    /// Cached records in presentation order, newest first.
    pub fn logs_newest_first(&self) -> impl Iterator<Item = &T> {
        self.logs.iter().rev()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileLogStore, PreferencesLogStore};
    use jotlog_core::LogRecord;
    use tempfile::tempdir;

    #[test]
    fn test_default_identifier() {
        let store: PreferencesLogStore<LogRecord> = PreferencesLogStore::in_memory("hclogs");
        let logger: Logger<LogRecord> = Logger::new(Box::new(store));
        assert_eq!(logger.identifier(), "hclogs");
    }

    #[test]
    fn test_cache_populated_at_construction() {
        let store: PreferencesLogStore<LogRecord> = PreferencesLogStore::in_memory("hclogs");
        store.append(LogRecord::with_timestamp("08:00:00", "pre-existing"));

        let logger: Logger<LogRecord> = Logger::new(Box::new(store));
        assert_eq!(logger.logs().len(), 1);
        assert_eq!(logger.logs()[0].text(), "pre-existing");
    }

    #[test]
    fn test_add_updates_store_and_cache() {
        let store: PreferencesLogStore<LogRecord> = PreferencesLogStore::in_memory("hclogs");
        let mut logger: Logger<LogRecord> = Logger::new(Box::new(store));

        logger.add_to_logs("first");
        logger.add_to_logs("second");

        assert_eq!(logger.logs().len(), 2);
        assert_eq!(logger.logs()[0].text(), "first");
        assert_eq!(logger.logs()[1].text(), "second");

        // The same records made it to the backend, in the same order.
        let fetched = logger.fetch_logs();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].text(), "first");
        assert_eq!(fetched[1].text(), "second");
    }

    #[test]
    fn test_add_record_preserves_caller_timestamp() {
        let store: PreferencesLogStore<LogRecord> = PreferencesLogStore::in_memory("hclogs");
        let mut logger: Logger<LogRecord> = Logger::new(Box::new(store));

        logger.add_record(LogRecord::with_timestamp("09:00:00", "LAUNCHED"));

        assert_eq!(
            logger.fetch_logs(),
            vec![LogRecord::with_timestamp("09:00:00", "LAUNCHED")]
        );
    }

    #[test]
    fn test_fetch_logs_bypasses_stale_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let store: FileLogStore<LogRecord> = FileLogStore::new(&path);
        let logger: Logger<LogRecord> = Logger::new(Box::new(store));
        assert!(logger.logs().is_empty());

        // Mutate the backing file through a second store instance.
        let other: FileLogStore<LogRecord> = FileLogStore::new(&path);
        other.append(LogRecord::with_timestamp("12:00:00", "external"));

        // The explicit fetch sees the new record; the cache stays stale.
        assert_eq!(logger.fetch_logs().len(), 1);
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_newest_first_iteration() {
        let store: PreferencesLogStore<LogRecord> = PreferencesLogStore::in_memory("hclogs");
        let mut logger: Logger<LogRecord> = Logger::new(Box::new(store));

        logger.add_to_logs("A");
        logger.add_to_logs("B");

        let texts: Vec<&str> = logger.logs_newest_first().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["B", "A"]);
    }
}
