//! File-backed JSON key-value store.
//!
//! One JSON file holds one object; its top-level keys and values are the
//! database. Pick cached mode (in-memory mirror, write-through) or
//! read-through mode (every call re-reads the file), and you're good to go.
//!
//! ```rust,no_run
//! use json_stash::Store;
//!
//! let db = Store::open("db.json").unwrap();
//! db.set("name", "John").unwrap();
//! assert_eq!(db.get("name").unwrap(), Some("John".into()));
//! ```
//!
//! **Single-writer only.** Writes replace the whole file, and nothing locks
//! it between instances or processes — two stores on the same file will
//! silently clobber each other. Coordinate writers yourself or use a real
//! database for shared access.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod persist;
pub mod serializer;
pub mod store;

pub use error::{Error, Result};
pub use store::{Document, Store, StoreBuilder, DEFAULT_FILE};
