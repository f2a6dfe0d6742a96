use chrono::Local;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Contract for log record types accepted by a store.
///
/// Stores are generic over the record type so applications can carry their own
/// entry shape; the two required constructors cover the two ways records come
/// into existence (freshly logged text, and reconstruction from a persisted
/// `timestamp`/`text` pair).
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Build a record from message text alone, timestamped now.
    fn from_text(text: String) -> Self;

    /// Build a record from an already-known timestamp and text.
    fn from_parts(timestamp: String, text: String) -> Self;

    fn timestamp(&self) -> &str;

    fn text(&self) -> &str;
}

/// A single immutable log entry: a timestamp and a line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    timestamp: String,
    text: String,
}

impl LogRecord {
    /// Create a record timestamped with the current local wall-clock time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: current_time(),
            text: text.into(),
        }
    }

    /// Create a record with a caller-supplied timestamp.
    ///
    /// The timestamp is treated as an opaque string; no format validation is
    /// performed.
    pub fn with_timestamp(timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Record for LogRecord {
    fn from_text(text: String) -> Self {
        Self::new(text)
    }

    fn from_parts(timestamp: String, text: String) -> Self {
        Self::with_timestamp(timestamp, text)
    }

    fn timestamp(&self) -> &str {
        self.timestamp()
    }

    fn text(&self) -> &str {
        self.text()
    }
}

/// Current local time as zero-padded `HH:MM:SS`.
fn current_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_timestamp_format() {
        let record = LogRecord::new("hello");
        let ts = record.timestamp();

        assert_eq!(ts.len(), 8);
        let bytes = ts.as_bytes();
        assert_eq!(bytes[2], b':');
        assert_eq!(bytes[5], b':');
        for (i, b) in bytes.iter().enumerate() {
            if i != 2 && i != 5 {
                assert!(b.is_ascii_digit(), "unexpected character in {ts}");
            }
        }
    }

    #[test]
    fn test_explicit_timestamp_preserved() {
        let record = LogRecord::with_timestamp("09:00:00", "LAUNCHED");
        assert_eq!(record.timestamp(), "09:00:00");
        assert_eq!(record.text(), "LAUNCHED");
    }

    #[test]
    fn test_empty_text_allowed() {
        let record = LogRecord::new("");
        assert_eq!(record.text(), "");
    }

    #[test]
    fn test_serde_field_names() {
        let record = LogRecord::with_timestamp("12:34:56", "boot");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "timestamp": "12:34:56", "text": "boot" })
        );

        let back: LogRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
