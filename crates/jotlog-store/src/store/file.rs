use crate::traits::{FetchQuery, LogStore};
use jotlog_core::{LogError, LogResult, Record};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Log store backed by a newline-delimited text file.
///
/// Each record is one line of the form `date=<timestamp> text=<text>`,
/// appended at the end of the file. The format is human-readable but fragile:
/// a newline inside the text splits the record, and the tail line is dropped
/// as malformed on the next fetch. A text value containing a further literal
/// ` text=` survives intact, because parsing splits at the first separator.
pub struct FileLogStore<T: Record> {
    path: PathBuf,
    // Serializes append/fetch pairs on this instance; the file itself carries
    // no lock, so concurrent writers through separate instances are still
    // unsupported.
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> FileLogStore<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(record: &T) -> String {
        format!("date={} text={}\n", record.timestamp(), record.text())
    }

    /// Parse one line back into a record. Returns `None` for lines that do
    /// not match the `date=... text=...` shape.
    fn parse_line(line: &str) -> Option<T> {
        let rest = line.strip_prefix("date=")?;
        let (timestamp, text) = rest.split_once(" text=")?;
        Some(T::from_parts(timestamp.to_string(), text.to_string()))
    }

    fn guard(&self) -> LogResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| LogError::Storage("file store mutex poisoned".to_string()))
    }
}

impl<T: Record> LogStore<T> for FileLogStore<T> {
    fn try_fetch(&self, _query: FetchQuery) -> LogResult<Vec<T>> {
        let _guard = self.guard()?;

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Read {} bytes from {}", content.len(), self.path.display());

        Ok(content.lines().filter_map(Self::parse_line).collect())
    }

    fn try_append(&self, record: T) -> LogResult<()> {
        let _guard = self.guard()?;

        let line = Self::format_line(&record);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        tracing::debug!(
            "Appended {} bytes to {}",
            line.len(),
            self.path.display()
        );
        Ok(())
    }
}
