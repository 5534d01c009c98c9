use std::fmt;

/// Errors that can occur during media storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested file was not found.
    NotFound(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The logical path is empty, absolute, or escapes the store root.
    InvalidPath(String),
    /// The file exceeds the configured per-file size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file not found: {path}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidPath(msg) => write!(f, "invalid storage path: {msg}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "file exceeds size limit ({actual} > {limit} bytes)")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
