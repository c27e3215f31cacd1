//! JSON document file store.
//!
//! # Responsibility
//! - Persist the full record set as one human-readable JSON document.
//! - Support re-pointing the store at another file at runtime.
//!
//! # Invariants
//! - Every mutation rewrites the document through a temp sibling + rename.
//! - The in-memory view changes only after the write succeeded.
//! - `last_id` is persisted so ids stay unique across restarts.
//! - Loaded records must pass the same entry checks as inserted ones.

use crate::model::entry::{Entry, EntryId, EntryRecord};
use crate::repo::entry_repo::{EntryRepository, RecordSet, RepoError, RepoResult};
use crate::validate::entry_validator::check_entry_invariants;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// On-disk layout version written by this binary.
pub const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    format_version: u32,
    last_id: EntryId,
    entries: Vec<EntryRecord>,
}

/// File-backed entry store.
#[derive(Debug)]
pub struct JsonEntryRepository {
    path: PathBuf,
    set: RecordSet,
}

impl JsonEntryRepository {
    /// Opens an existing store file.
    ///
    /// A zero-length (or whitespace-only) file is treated as an empty store.
    ///
    /// # Errors
    /// - `RepoError::Io` when the file is missing or unreadable.
    /// - `RepoError::Json` / `RepoError::InvalidData` for malformed content.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let started_at = Instant::now();
        info!("event=store_open module=repo status=start mode=load");

        match load_document(&path) {
            Ok(set) => {
                info!(
                    "event=store_open module=repo status=ok mode=load records={} duration_ms={}",
                    set.records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self { path, set })
            }
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error mode=load duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Starts an empty store at `path`, replacing any existing file.
    pub fn create(path: impl AsRef<Path>) -> RepoResult<Self> {
        let repo = Self {
            path: path.as_ref().to_path_buf(),
            set: RecordSet::default(),
        };
        let started_at = Instant::now();
        info!("event=store_open module=repo status=start mode=create");

        match write_document(&repo.path, &repo.set) {
            Ok(()) => {
                info!(
                    "event=store_open module=repo status=ok mode=create duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(repo)
            }
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error mode=create duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Backing file of the current store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the whole state with the store at `path`.
    ///
    /// On failure the current store stays active.
    pub fn switch_to(&mut self, path: impl AsRef<Path>) -> RepoResult<()> {
        *self = Self::open(path)?;
        Ok(())
    }

    /// Replaces the whole state with a new empty store at `path`.
    ///
    /// On failure the current store stays active.
    pub fn create_at(&mut self, path: impl AsRef<Path>) -> RepoResult<()> {
        *self = Self::create(path)?;
        Ok(())
    }

    fn commit(&mut self, next: RecordSet) -> RepoResult<()> {
        if let Err(err) = write_document(&self.path, &next) {
            error!(
                "event=store_write module=repo status=error records={} error={}",
                next.records.len(),
                err
            );
            return Err(err);
        }
        self.set = next;
        Ok(())
    }
}

impl EntryRepository for JsonEntryRepository {
    fn insert(&mut self, entry: &Entry) -> RepoResult<EntryId> {
        let mut next = self.set.clone();
        let id = next.push(entry)?;
        self.commit(next)?;
        Ok(id)
    }

    fn all(&self) -> Vec<EntryRecord> {
        self.set.records.clone()
    }

    fn remove(&mut self, id: EntryId) -> RepoResult<bool> {
        let Some(index) = self.set.position(id) else {
            return Ok(false);
        };
        let mut next = self.set.clone();
        next.records.remove(index);
        self.commit(next)?;
        Ok(true)
    }

    fn remove_many(&mut self, ids: &[EntryId]) -> RepoResult<usize> {
        let mut next = self.set.clone();
        let removed = next.remove_ids(ids);
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.set.records.len()
    }
}

fn load_document(path: &Path) -> RepoResult<RecordSet> {
    let text = std::fs::read_to_string(path).map_err(|source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(RecordSet::default());
    }

    let document: StoreDocument =
        serde_json::from_str(&text).map_err(|source| RepoError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let invalid = |message: String| RepoError::InvalidData {
        path: path.to_path_buf(),
        message,
    };

    if document.format_version != STORE_FORMAT_VERSION {
        return Err(invalid(format!(
            "unsupported format_version {}; expected {STORE_FORMAT_VERSION}",
            document.format_version
        )));
    }

    if document.last_id == EntryId::MAX {
        return Err(invalid(format!(
            "last_id {} leaves no room for new entries",
            document.last_id
        )));
    }

    let mut seen = HashSet::new();
    for record in &document.entries {
        if record.id == 0 || record.id > document.last_id {
            return Err(invalid(format!(
                "entry id {} is outside 1..={}",
                record.id, document.last_id
            )));
        }
        if !seen.insert(record.id) {
            return Err(invalid(format!("duplicate entry id {}", record.id)));
        }
        check_entry_invariants(&record.entry)
            .map_err(|err| invalid(format!("entry id {}: {err}", record.id)))?;
    }

    Ok(RecordSet {
        last_id: document.last_id,
        records: document.entries,
    })
}

fn write_document(path: &Path, set: &RecordSet) -> RepoResult<()> {
    let document = StoreDocument {
        format_version: STORE_FORMAT_VERSION,
        last_id: set.last_id,
        entries: set.records.clone(),
    };
    let mut json = serde_json::to_string_pretty(&document).map_err(|source| RepoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    crate::fs_util::atomic_write(path, json.as_bytes()).map_err(|source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    })
}
