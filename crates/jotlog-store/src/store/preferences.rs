use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{FetchQuery, LogStore};
use jotlog_core::{LogConfig, LogError, LogResult, Record};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The full preferences area: identifier → one blob of per-record chunks.
type PreferencesMap = BTreeMap<String, Vec<Value>>;

/// Where the preferences area lives.
enum PreferencesArea {
    /// Process-local map. Contents vanish when the store is dropped.
    Memory(PreferencesMap),
    /// JSON file on disk, rewritten atomically on every append.
    File(PathBuf),
}

/// Log store backed by a key-value preferences area.
///
/// The entire record set is held as a single blob under `identifier`: a JSON
/// array whose elements are independently-decoded chunks, one per record.
/// Every append re-reads and rewrites the whole blob, O(n) per append, which
/// is fine for a debug log where n stays small.
pub struct PreferencesLogStore<T: Record> {
    identifier: String,
    area: Mutex<PreferencesArea>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> PreferencesLogStore<T> {
    /// Create a store over the default preferences file, resolved through
    /// [`LogConfig`].
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::at_path(identifier, LogConfig::load().effective_preferences_path())
    }

    /// Create a store over a specific preferences file.
    pub fn at_path(identifier: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            identifier: identifier.into(),
            area: Mutex::new(PreferencesArea::File(path.as_ref().to_path_buf())),
            _record: PhantomData,
        }
    }

    /// Create a purely in-memory store.
    pub fn in_memory(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            area: Mutex::new(PreferencesArea::Memory(PreferencesMap::new())),
            _record: PhantomData,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Read the whole preferences map. Missing file means an empty area;
    /// an unparseable file is surfaced as a serialization error.
    fn read_map(area: &PreferencesArea) -> LogResult<PreferencesMap> {
        match area {
            PreferencesArea::Memory(map) => Ok(map.clone()),
            PreferencesArea::File(path) => {
                if !path.exists() {
                    return Ok(PreferencesMap::new());
                }
                let bytes = AtomicWriter::read_all(path)?;
                serde_json::from_slice(&bytes)
                    .map_err(|e| LogError::Serialization(e.to_string()))
            }
        }
    }

    fn write_map(area: &mut PreferencesArea, map: PreferencesMap) -> LogResult<()> {
        match area {
            PreferencesArea::Memory(current) => {
                *current = map;
                Ok(())
            }
            PreferencesArea::File(path) => {
                let bytes = serde_json::to_vec_pretty(&map)
                    .map_err(|e| LogError::Serialization(e.to_string()))?;
                AtomicWriter::write_atomic(path, &bytes)
            }
        }
    }

    /// Decode the chunks under this store's identifier, dropping any chunk
    /// that fails to decode.
    fn decode_records(&self, map: &PreferencesMap) -> Vec<T> {
        let chunks = match map.get(&self.identifier) {
            Some(chunks) => chunks,
            None => return Vec::new(),
        };
        chunks
            .iter()
            .filter_map(|chunk| match serde_json::from_value(chunk.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(
                        "Dropping undecodable chunk under {}: {e}",
                        self.identifier
                    );
                    None
                }
            })
            .collect()
    }

    fn lock_area(&self) -> LogResult<std::sync::MutexGuard<'_, PreferencesArea>> {
        self.area
            .lock()
            .map_err(|_| LogError::Storage("preferences store mutex poisoned".to_string()))
    }
}

impl<T: Record> LogStore<T> for PreferencesLogStore<T> {
    fn try_fetch(&self, _query: FetchQuery) -> LogResult<Vec<T>> {
        let area = self.lock_area()?;
        let map = Self::read_map(&area)?;
        Ok(self.decode_records(&map))
    }

    fn try_append(&self, record: T) -> LogResult<()> {
        let mut area = self.lock_area()?;

        // Fetch entire set, append in memory, re-encode entire set, overwrite
        // the whole blob. A blob that cannot be read starts over empty, so a
        // corrupt preferences file heals on the next append.
        let map = Self::read_map(&area).unwrap_or_default();
        let mut records = self.decode_records(&map);
        records.push(record);

        let mut chunks = Vec::with_capacity(records.len());
        for record in &records {
            let chunk = serde_json::to_value(record)
                .map_err(|e| LogError::Serialization(e.to_string()))?;
            chunks.push(chunk);
        }

        let mut map = map;
        map.insert(self.identifier.clone(), chunks);
        Self::write_map(&mut area, map)
    }
}
