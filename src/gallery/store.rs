//! File-backed storage for submitted drawings.
//!
//! The store is a single pretty-printed JSON array, newest entry first.
//! Writes go through a temp file and rename under an exclusive advisory lock,
//! so a crash mid-write never leaves a truncated store. There is no
//! concurrent-writer protection beyond this process-level serialization.

use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;

/// One persisted submission. Field names match the wire format the gallery
/// frontend consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingEntry {
    /// Random v4 id assigned at submission time
    pub id: String,
    /// RFC 3339 submission timestamp
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// The submitted raster, as the client sent it (a base64 data URL)
    #[serde(rename = "imageData")]
    pub image_data: String,
}

/// Result of clearing the on-disk store.
#[derive(Debug, Clone, Copy)]
pub struct ClearOutcome {
    pub removed_data: bool,
    pub removed_lock: bool,
}

/// Summary information about the store file for CLI reporting.
#[derive(Debug, Clone)]
pub struct StoreInspection {
    pub data_path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    pub entry_count: Option<usize>,
    pub newest_created_at: Option<String>,
}

/// Capacity-bounded drawing store rooted in a directory.
pub struct DrawingStore {
    base_dir: PathBuf,
    max_entries: usize,
}

impl DrawingStore {
    pub fn new(base_dir: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_entries: max_entries.max(1),
        }
    }

    /// Path of the JSON store file.
    pub fn data_file_path(&self) -> PathBuf {
        self.base_dir.join("drawings.json")
    }

    fn lock_file_path(&self) -> PathBuf {
        self.base_dir.join("drawings.lock")
    }

    /// All stored entries, newest first. An absent store file is an empty
    /// store, not an error.
    pub fn list(&self) -> Result<Vec<DrawingEntry>> {
        let data_path = self.data_file_path();
        if !data_path.exists() {
            debug!("No store file at {}, treating as empty", data_path.display());
            return Ok(Vec::new());
        }

        let lock_path = self.lock_file_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&lock_path)
            .with_context(|| format!("failed to open store lock file {}", lock_path.display()))?;
        lock_file
            .lock_shared()
            .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

        let result = read_entries(&data_path);

        lock_file.unlock().unwrap_or_else(|err| {
            warn!("failed to unlock store file {}: {}", lock_path.display(), err)
        });

        result
    }

    /// Appends a submission at the front, evicting the oldest entries past
    /// the cap, and persists the updated store atomically.
    pub fn insert(&self, image_data: String) -> Result<DrawingEntry> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "failed to create store directory {}",
                self.base_dir.display()
            )
        })?;

        let lock_path = self.lock_file_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&lock_path)
            .with_context(|| format!("failed to open store lock file {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("failed to lock store file {}", lock_path.display()))?;

        let result = self.insert_inner(image_data);

        lock_file.unlock().unwrap_or_else(|err| {
            warn!("failed to unlock store file {}: {}", lock_path.display(), err)
        });

        result
    }

    fn insert_inner(&self, image_data: String) -> Result<DrawingEntry> {
        let data_path = self.data_file_path();
        let mut entries = if data_path.exists() {
            read_entries(&data_path)?
        } else {
            Vec::new()
        };

        let entry = DrawingEntry {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            image_data,
        };

        entries.insert(0, entry.clone());
        entries.truncate(self.max_entries);

        let json_bytes =
            serde_json::to_vec_pretty(&entries).context("failed to serialise drawings store")?;

        let tmp_path = temp_path(&data_path)?;
        {
            let mut tmp_file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp_path)
                .with_context(|| {
                    format!("failed to open temporary store file {}", tmp_path.display())
                })?;
            tmp_file
                .write_all(&json_bytes)
                .context("failed to write drawings store")?;
            tmp_file
                .sync_all()
                .context("failed to sync temporary store file")?;
        }

        fs::rename(&tmp_path, &data_path).with_context(|| {
            format!(
                "failed to move temporary store file {} -> {}",
                tmp_path.display(),
                data_path.display()
            )
        })?;

        info!(
            "Stored drawing {} ({} entries, {} bytes)",
            entry.id,
            entries.len(),
            json_bytes.len()
        );

        Ok(entry)
    }

    /// Removes the store and lock files.
    pub fn clear(&self) -> Result<ClearOutcome> {
        Ok(ClearOutcome {
            removed_data: remove_file_if_exists(&self.data_file_path())?,
            removed_lock: remove_file_if_exists(&self.lock_file_path())?,
        })
    }

    /// Inspects the store file without modifying it.
    pub fn inspect(&self) -> Result<StoreInspection> {
        let data_path = self.data_file_path();
        let metadata = fs::metadata(&data_path).ok();
        let exists = metadata.is_some();
        let size_bytes = metadata.as_ref().map(|m| m.len());
        let modified = metadata.as_ref().and_then(|m| m.modified().ok());

        let (entry_count, newest_created_at) = if exists {
            let entries = self.list()?;
            let newest = entries.first().map(|e| e.created_at.clone());
            (Some(entries.len()), newest)
        } else {
            (None, None)
        };

        Ok(StoreInspection {
            data_path,
            exists,
            size_bytes,
            modified,
            entry_count,
            newest_created_at,
        })
    }
}

fn read_entries(path: &Path) -> Result<Vec<DrawingEntry>> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read store file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse store file {}", path.display()))
}

fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}

fn temp_path(target: &Path) -> Result<PathBuf> {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(tag: &str) -> String {
        format!("data:image/png;base64,{tag}{}", "A".repeat(32))
    }

    #[test]
    fn absent_file_reads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 50);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn insert_prepends_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 50);

        let first = store.insert(payload("first")).unwrap();
        let second = store.insert(payload("second")).unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], second);
        assert_eq!(entries[1], first);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn cap_evicts_oldest_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 3);

        let first = store.insert(payload("a")).unwrap();
        for tag in ["b", "c", "d"] {
            store.insert(payload(tag)).unwrap();
        }

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.id != first.id));
    }

    #[test]
    fn store_file_is_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 50);
        store.insert(payload("x")).unwrap();

        let raw = fs::read_to_string(store.data_file_path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_array());
        assert!(raw.contains("createdAt"));
        assert!(raw.contains("imageData"));
    }

    #[test]
    fn corrupt_store_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 50);
        fs::write(store.data_file_path(), b"not json").unwrap();
        assert!(store.list().is_err());
    }

    #[test]
    fn clear_removes_store_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 50);
        store.insert(payload("x")).unwrap();

        let outcome = store.clear().unwrap();
        assert!(outcome.removed_data);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn inspect_reports_count_and_newest() {
        let dir = tempfile::tempdir().unwrap();
        let store = DrawingStore::new(dir.path(), 50);

        let empty = store.inspect().unwrap();
        assert!(!empty.exists);
        assert_eq!(empty.entry_count, None);

        let entry = store.insert(payload("x")).unwrap();
        let inspection = store.inspect().unwrap();
        assert!(inspection.exists);
        assert_eq!(inspection.entry_count, Some(1));
        assert_eq!(inspection.newest_created_at, Some(entry.created_at));
        assert!(inspection.size_bytes.unwrap() > 0);
    }
}
