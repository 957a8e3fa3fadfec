//! Disk I/O helpers: the construction-time probe, full-file load, and the
//! two write strategies.
//!
//! The default write is a plain truncate-and-overwrite, so a crash mid-write
//! can leave a half-written file. That matches how this store has always
//! behaved; opt into [`atomic_write`] via the builder if you want the
//! rename-over approach instead. Rename-over is close to atomic on most
//! platforms — reliable on NTFS, no hard guarantees on FAT32 or network
//! shares.

use crate::error::{Error, Result};
use crate::serializer::Serializer;
use crate::store::Document;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Probe `path` for read+write access, creating it with an empty object if it
/// does not exist. Returns the opened handle, kept by the store purely as
/// proof the file was accessible at construction.
///
/// Any open failure other than the file being absent is reported as
/// [`Error::FileInUse`] — permission denied and exclusive locks land here.
pub fn ensure_file(path: &Path) -> Result<File> {
    match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            std::fs::write(path, b"{}")?;
            Ok(OpenOptions::new().read(true).write(true).open(path)?)
        }
        Err(_) => Err(Error::FileInUse(path.display().to_string())),
    }
}

/// Read and parse the whole file at `path` as one JSON object.
///
/// Unlike the probe, a missing file here is an error: after construction the
/// file is expected to exist, so a `NotFound` means it was deleted out from
/// under the store.
pub fn load<S: Serializer>(path: &Path, serializer: &S) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    serializer.deserialize(&bytes)
}

/// Overwrite `path` with `bytes` in place. Not atomic.
pub fn overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
