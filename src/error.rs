//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem (probe, read, write, rename).
    Io(String),
    /// The backing file is not valid JSON, or its top level is not an object.
    Parse(String),
    /// Failed to serialize a value or the document to bytes.
    Serialize(String),
    /// The construction-time probe found the file but could not open it
    /// read+write (permission denied, held exclusively by another process).
    /// Distinct from [`Error::Io`]: a missing file auto-creates instead.
    FileInUse(String),
    /// `delete` or `update` was called on a key absent from the document.
    /// Raised before any write, so the file is untouched.
    KeyNotFound(String),
    /// A caller-supplied transform in `update` failed. No write happened.
    Transform(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::FileInUse(path) => {
                write!(f, "file being used by another program: {path}")
            }
            Error::KeyNotFound(key) => write!(f, "key does not exist: {key}"),
            Error::Transform(msg) => write!(f, "transform error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
