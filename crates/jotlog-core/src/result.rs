use crate::error::LogError;

pub type LogResult<T> = Result<T, LogError>;
