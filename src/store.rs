//! Core store type and builder.

use crate::error::{Error, Result};
use crate::persist;
use crate::serializer::{JsonSerializer, Serializer};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The persisted database state: one JSON object mapping string keys to
/// arbitrary JSON values. The type itself enforces the "top level is always
/// an object" invariant.
pub type Document = serde_json::Map<String, Value>;

/// File name used when no path is supplied, resolved against the current
/// working directory.
pub const DEFAULT_FILE: &str = "stash.json";

/// File-backed JSON key-value store.
///
/// The whole document lives in one file. In cached mode (the default) the
/// store keeps an in-memory mirror of the document: reads hit the mirror,
/// writes go through to disk and refresh the mirror. With the cache off,
/// every operation re-reads the file, so external rewrites of the file are
/// visible immediately.
///
/// Use [`open`](Self::open) for a quick start or [`builder`](Self::builder)
/// for control over caching, pretty-printing, and atomic writes.
///
/// Every write serializes the full document and replaces the file contents,
/// so the last writer wins — two stores pointed at the same file will clobber
/// each other's changes.
pub struct Store {
    path: PathBuf,
    use_cache: bool,
    cache: RwLock<Document>,
    probe: Mutex<Option<File>>,
    serializer: JsonSerializer,
    atomic: bool,
}

impl Store {
    /// Open (or create) a store at `path` with the cache on and compact JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Store> {
        Self::builder(path).build()
    }

    /// Open (or create) a store at [`DEFAULT_FILE`] in the current directory.
    pub fn open_default() -> Result<Store> {
        Self::builder(DEFAULT_FILE).build()
    }

    /// Start configuring a new store. Call [`.build()`](StoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> StoreBuilder {
        StoreBuilder::new(path)
    }

    // ---- reads ----

    /// `true` if `key` exists in the document.
    ///
    /// Fallible because with the cache off this re-reads the file.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        if self.use_cache {
            Ok(self.cache.read().contains_key(key))
        } else {
            Ok(self.read_disk()?.contains_key(key))
        }
    }

    /// Get the value for `key`, or `Ok(None)` if absent. A missing key is
    /// not an error.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.use_cache {
            Ok(self.cache.read().get(key).cloned())
        } else {
            Ok(self.read_disk()?.get(key).cloned())
        }
    }

    /// Snapshot of the full document.
    ///
    /// The returned map is a copy: mutating it does not touch the store or
    /// the file. Go through [`set`](Self::set) / [`delete`](Self::delete) to
    /// change state.
    pub fn get_all(&self) -> Result<Document> {
        self.document()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> Result<usize> {
        if self.use_cache {
            Ok(self.cache.read().len())
        } else {
            Ok(self.read_disk()?.len())
        }
    }

    /// `true` when the document has no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of all top-level keys.
    pub fn keys(&self) -> Result<Vec<String>> {
        if self.use_cache {
            Ok(self.cache.read().keys().cloned().collect())
        } else {
            Ok(self.read_disk()?.keys().cloned().collect())
        }
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- writes ----

    /// Set `key` to `value`, creating or overwriting. Accepts anything
    /// serializable; a value that cannot become JSON fails with
    /// [`Error::Serialize`] before anything is written.
    pub fn set<T: Serialize>(&self, key: impl Into<String>, value: T) -> Result<()> {
        let value =
            serde_json::to_value(value).map_err(|e| Error::Serialize(e.to_string()))?;
        let mut doc = self.document()?;
        doc.insert(key.into(), value);
        self.commit(doc)
    }

    /// Remove `key` from the document.
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent; the file is
    /// left untouched in that case.
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut doc = self.document()?;
        if doc.remove(key).is_none() {
            return Err(Error::KeyNotFound(key.to_string()));
        }
        self.commit(doc)
    }

    /// Replace the value at `key` with `f(current)`.
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent. If `f` returns
    /// an error it propagates unchanged and nothing is written — use
    /// [`Error::Transform`] for your own failures.
    ///
    /// ```rust,no_run
    /// use json_stash::Store;
    /// use serde_json::json;
    ///
    /// let db = Store::open("db.json").unwrap();
    /// db.set("age", 20).unwrap();
    /// db.update("age", |v| Ok(json!(v.as_i64().unwrap() + 1))).unwrap();
    /// ```
    pub fn update<F>(&self, key: &str, f: F) -> Result<()>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let mut doc = self.document()?;
        let current = doc
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        let next = f(current)?;
        doc.insert(key.to_string(), next);
        self.commit(doc)
    }

    /// Drop every key: overwrite the document with `{}`. Idempotent.
    pub fn erase(&self) -> Result<()> {
        self.commit(Document::new())
    }

    // ---- housekeeping ----

    /// Release the handle opened by the construction-time probe.
    ///
    /// Optional: all reads and writes reopen the file by path, so the store
    /// keeps working after `close`.
    pub fn close(&self) {
        self.probe.lock().take();
    }

    // ---- internal ----

    /// The authoritative document: the cache mirror, or a fresh parse of the
    /// file when the cache is off.
    fn document(&self) -> Result<Document> {
        if self.use_cache {
            Ok(self.cache.read().clone())
        } else {
            self.read_disk()
        }
    }

    fn read_disk(&self) -> Result<Document> {
        persist::load(&self.path, &self.serializer)
    }

    /// Serialize `doc`, replace the file contents, then refresh the cache.
    /// The cache is only touched after the write succeeds, so a failed write
    /// leaves both file and mirror as they were.
    fn commit(&self, doc: Document) -> Result<()> {
        let bytes = self.serializer.serialize(&doc)?;
        if self.atomic {
            persist::atomic_write(&self.path, &bytes)?;
        } else {
            persist::overwrite(&self.path, &bytes)?;
        }
        if self.use_cache {
            *self.cache.write() = doc;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("use_cache", &self.use_cache)
            .field("atomic", &self.atomic)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`Store`].
///
/// ```rust,no_run
/// use json_stash::Store;
///
/// let db = Store::builder("db.json")
///     .cache(false)
///     .pretty(true)
///     .build()
///     .unwrap();
/// ```
pub struct StoreBuilder {
    path: PathBuf,
    cache: bool,
    pretty: bool,
    atomic: bool,
}

impl StoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: true,
            pretty: false,
            atomic: false,
        }
    }

    /// Keep an in-memory mirror of the document (default: on). With the
    /// cache off, every operation re-reads the file from disk.
    pub fn cache(mut self, yes: bool) -> Self {
        self.cache = yes;
        self
    }

    /// Write human-readable JSON with indentation (default: compact).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Write via temp-file-and-rename instead of overwriting in place
    /// (default: off). The in-place overwrite matches the store's historical
    /// behavior but can corrupt the file if the process dies mid-write;
    /// turning this on changes what a concurrent reader may observe.
    pub fn atomic(mut self, yes: bool) -> Self {
        self.atomic = yes;
        self
    }

    /// Probe (or create) the backing file and return the store.
    ///
    /// A missing file is created containing `{}`. A file that exists but
    /// cannot be opened read+write fails with [`Error::FileInUse`]. In cached
    /// mode the document is loaded once here; a corrupt file fails the build
    /// with [`Error::Parse`]. With the cache off nothing is read until the
    /// first operation.
    pub fn build(self) -> Result<Store> {
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };

        let probe = persist::ensure_file(&self.path)?;

        let initial = if self.cache {
            persist::load(&self.path, &serializer)?
        } else {
            Document::new()
        };

        Ok(Store {
            path: self.path,
            use_cache: self.cache,
            cache: RwLock::new(initial),
            probe: Mutex::new(Some(probe)),
            serializer,
            atomic: self.atomic,
        })
    }
}

impl std::fmt::Debug for StoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreBuilder")
            .field("path", &self.path)
            .field("cache", &self.cache)
            .field("pretty", &self.pretty)
            .field("atomic", &self.atomic)
            .finish()
    }
}
