//! On-disk persistence for the result cache.
//!
//! Entries are written least recently used first, with their original
//! insertion time and TTL, behind a magic + version header. Loading skips
//! entries that expired while the process was down.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::{now_ms, Entry, ResultCache};
use crate::error::CacheError;
use crate::key::CacheKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: [u8; 8],
    pub version: u32,
}

impl SnapshotHeader {
    pub const MAGIC: [u8; 8] = *b"MSPEAKRC";
    pub const VERSION: u32 = 1;

    pub fn current() -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == Self::MAGIC && self.version == Self::VERSION
    }
}

#[derive(Serialize, Deserialize)]
struct CacheSnapshot<V> {
    header: SnapshotHeader,
    entries: Vec<(CacheKey, Entry<V>)>,
}

impl<V> ResultCache<V>
where
    V: Clone + Serialize + DeserializeOwned,
{
    /// Write every live entry to `path` (atomically, via a temp file).
    /// Returns the number of entries written.
    pub fn save_snapshot(&self, path: &Path) -> Result<usize, CacheError> {
        let now = now_ms();
        let entries: Vec<(CacheKey, Entry<V>)> = {
            let guard = self.entries.lock();
            guard
                .iter()
                .rev()
                .filter(|(_, e)| !e.is_expired(now))
                .map(|(k, e)| (*k, e.clone()))
                .collect()
        };
        let count = entries.len();
        let snapshot = CacheSnapshot {
            header: SnapshotHeader::current(),
            entries,
        };

        let bytes = bincode::serialize(&snapshot)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), entries = count, "cache snapshot saved");
        Ok(count)
    }

    /// Merge the entries stored at `path` into this cache. Returns the
    /// number of entries restored.
    pub fn load_snapshot(&self, path: &Path) -> Result<usize, CacheError> {
        let bytes = fs::read(path)?;
        let snapshot: CacheSnapshot<V> = bincode::deserialize(&bytes)?;
        if !snapshot.header.is_valid() {
            return Err(CacheError::IncompatibleSnapshot {
                version: snapshot.header.version,
            });
        }

        let now = now_ms();
        let mut restored = 0;
        for (key, entry) in snapshot.entries {
            if entry.is_expired(now) {
                continue;
            }
            self.put_entry(key, entry);
            restored += 1;
        }
        tracing::debug!(path = %path.display(), entries = restored, "cache snapshot loaded");
        Ok(restored)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
