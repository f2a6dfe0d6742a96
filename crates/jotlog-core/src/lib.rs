pub mod config;
pub mod error;
pub mod record;
pub mod result;

pub use config::{LogConfig, DEFAULT_IDENTIFIER};
pub use error::LogError;
pub use record::{LogRecord, Record};
pub use result::LogResult;
