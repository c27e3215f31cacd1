//! Entry repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide a stable store API shared by both front-end variants.
//! - Keep id assignment inside the store boundary.
//!
//! # Invariants
//! - `insert` rejects entries with a blank domain/responsibility or a bad date.
//! - `insert` never reuses an id, including ids of removed records.
//! - A failed write leaves the store exactly as it was.

use crate::model::entry::{Entry, EntryId, EntryRecord};
use crate::validate::entry_validator::{check_entry_invariants, EntryValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error covering open/read/write failures on the backing file.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    /// The id counter reached `EntryId::MAX`.
    IdsExhausted,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidData {
        path: PathBuf,
        message: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IdsExhausted => write!(f, "store has no entry ids left"),
            Self::Io { path, source } => {
                write!(f, "store I/O error at `{}`: {source}", path.display())
            }
            Self::Json { path, source } => write!(
                f,
                "store file `{}` is not a valid document: {source}",
                path.display()
            ),
            Self::InvalidData { path, message } => {
                write!(f, "invalid store data in `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IdsExhausted => None,
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidData { .. } => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for entry storage.
pub trait EntryRepository {
    /// Stores `entry` under a freshly assigned id and returns the id.
    fn insert(&mut self, entry: &Entry) -> RepoResult<EntryId>;
    /// Returns every stored record in insertion order.
    fn all(&self) -> Vec<EntryRecord>;
    /// Removes `id`; returns `Ok(false)` when it was not present.
    fn remove(&mut self, id: EntryId) -> RepoResult<bool>;
    /// Removes every id in `ids` as one write; returns how many were present.
    ///
    /// On failure nothing is removed.
    fn remove_many(&mut self, ids: &[EntryId]) -> RepoResult<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered record set with a monotonic id counter.
///
/// Shared by the in-memory store and as the loaded view of the file store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordSet {
    pub(crate) last_id: EntryId,
    pub(crate) records: Vec<EntryRecord>,
}

impl RecordSet {
    /// Checks `entry` and appends it under the next id.
    pub(crate) fn push(&mut self, entry: &Entry) -> RepoResult<EntryId> {
        check_entry_invariants(entry)?;
        let id = self.last_id.checked_add(1).ok_or(RepoError::IdsExhausted)?;
        self.last_id = id;
        self.records.push(EntryRecord {
            id,
            entry: entry.clone(),
        });
        Ok(id)
    }

    /// Drops every record whose id is in `ids`; returns how many went.
    pub(crate) fn remove_ids(&mut self, ids: &[EntryId]) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !ids.contains(&record.id));
        before - self.records.len()
    }

    pub(crate) fn position(&self, id: EntryId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

/// Non-persistent store backing the table-only front end.
#[derive(Debug, Clone, Default)]
pub struct MemoryEntryRepository {
    set: RecordSet,
}

impl MemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryRepository for MemoryEntryRepository {
    fn insert(&mut self, entry: &Entry) -> RepoResult<EntryId> {
        self.set.push(entry)
    }

    fn all(&self) -> Vec<EntryRecord> {
        self.set.records.clone()
    }

    fn remove(&mut self, id: EntryId) -> RepoResult<bool> {
        match self.set.position(id) {
            Some(index) => {
                self.set.records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_many(&mut self, ids: &[EntryId]) -> RepoResult<usize> {
        Ok(self.set.remove_ids(ids))
    }

    fn len(&self) -> usize {
        self.set.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryRepository, MemoryEntryRepository, RecordSet, RepoError};
    use crate::model::entry::{Entry, EntryField};
    use crate::validate::entry_validator::EntryValidationError;

    fn entry(responsibility: &str) -> Entry {
        Entry {
            domain: "Home & Environment".to_string(),
            responsibility: responsibility.to_string(),
            status: String::new(),
            priority: String::new(),
            actions: String::new(),
            notes: String::new(),
            assigned_date: String::new(),
            due_date: String::new(),
            completed_date: String::new(),
        }
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut repo = MemoryEntryRepository::new();
        let first = repo.insert(&entry("vacuum")).unwrap();
        let second = repo.insert(&entry("dishes")).unwrap();
        assert!(repo.remove(second).unwrap());

        let third = repo.insert(&entry("laundry")).unwrap();
        assert_eq!((first, second, third), (1, 2, 3));
        let ids: Vec<_> = repo.all().into_iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut repo = MemoryEntryRepository::new();
        let id = repo.insert(&entry("vacuum")).unwrap();

        assert!(repo.remove(id).unwrap());
        assert!(!repo.remove(id).unwrap());
        assert!(repo.is_empty());
    }

    #[test]
    fn remove_many_counts_present_ids_only() {
        let mut repo = MemoryEntryRepository::new();
        for name in ["vacuum", "dishes", "laundry"] {
            repo.insert(&entry(name)).unwrap();
        }

        assert_eq!(repo.remove_many(&[1, 3, 3, 42]).unwrap(), 2);
        let ids: Vec<_> = repo.all().into_iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn insert_rejects_blank_required_fields_and_bad_dates() {
        let mut repo = MemoryEntryRepository::new();

        let err = repo.insert(&entry("  ")).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(EntryValidationError::MissingField(
                EntryField::Responsibility
            ))
        ));

        let mut bad_date = entry("vacuum");
        bad_date.due_date = "2023-02-30".to_string();
        let err = repo.insert(&bad_date).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(EntryValidationError::InvalidCalendarDate { .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn exhausted_id_counter_is_an_error() {
        let mut set = RecordSet {
            last_id: u64::MAX,
            records: Vec::new(),
        };

        let err = set.push(&entry("vacuum")).unwrap_err();
        assert!(matches!(err, RepoError::IdsExhausted));
        assert!(set.records.is_empty());
        assert_eq!(set.last_id, u64::MAX);
    }
}
