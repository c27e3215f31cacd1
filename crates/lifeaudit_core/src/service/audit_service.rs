//! Life-audit use-case service.
//!
//! # Responsibility
//! - Provide add/delete/list/export entry points for front ends.
//! - Own the domain registry and validator for one interactive session.
//! - Swap the backing store for file-backed sessions.
//!
//! # Invariants
//! - A failed action leaves the store and registry unchanged.
//! - Edit is not offered; callers delete and re-add.

use crate::config::{AuditConfig, AuditProfile};
use crate::export::csv::{export_csv, ExportError};
use crate::model::entry::{EntryDraft, EntryField, EntryId, EntryRecord};
use crate::repo::entry_repo::{EntryRepository, RepoError};
use crate::repo::json_store::JsonEntryRepository;
use crate::validate::entry_validator::{EntryValidationError, EntryValidator};
use crate::validate::registry::DomainRegistry;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Error surfaced to the operator for any failed action.
#[derive(Debug)]
pub enum AuditError {
    Validation(EntryValidationError),
    Store(RepoError),
    Export(ExportError),
}

impl Display for AuditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for AuditError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for AuditError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<ExportError> for AuditError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

pub type AuditResult<T> = Result<T, AuditError>;

/// Session-level service over one entry repository.
pub struct AuditService<R: EntryRepository> {
    repo: R,
    validator: EntryValidator,
    registry: DomainRegistry,
    seed_domains: Vec<String>,
}

impl<R: EntryRepository> AuditService<R> {
    /// Creates a service from a repository and runtime configuration.
    ///
    /// Domains already present in `repo` are appended to the seed list.
    pub fn new(repo: R, config: AuditConfig) -> Self {
        let mut service = Self {
            repo,
            validator: EntryValidator::new(config.profile),
            registry: DomainRegistry::new(config.domains.iter().cloned()),
            seed_domains: config.domains,
        };
        service.absorb_store_domains();
        service
    }

    pub fn profile(&self) -> &AuditProfile {
        self.validator.profile()
    }

    pub fn known_domains(&self) -> &[String] {
        self.registry.known()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Fresh draft pre-filled the way the entry form resets: today's
    /// assigned date, first known domain and first status/priority choice.
    pub fn blank_draft(&self) -> EntryDraft {
        let mut draft = EntryDraft::dated_today();
        if let Some(domain) = self.registry.first() {
            draft.domain = domain.to_string();
        }
        for field in [EntryField::Status, EntryField::Priority] {
            if let Some(choice) = self.profile().default_choice(field) {
                draft.set(field, choice);
            }
        }
        draft
    }

    /// Validates `draft`, stores it, and returns the stored record.
    ///
    /// # Errors
    /// - `AuditError::Validation` when the draft is rejected.
    /// - `AuditError::Store` when the backing store cannot be written.
    pub fn add_entry(&mut self, draft: &EntryDraft) -> AuditResult<EntryRecord> {
        let mut registry = self.registry.clone();
        let entry = match self.validator.validate(draft, &mut registry) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    "event=entry_add module=service status=rejected field={}",
                    err.field().key()
                );
                return Err(err.into());
            }
        };

        let id = self.repo.insert(&entry)?;
        self.registry = registry;
        info!(
            "event=entry_add module=service status=ok id={} records={}",
            id,
            self.repo.len()
        );
        Ok(EntryRecord { id, entry })
    }

    /// Returns every stored record in store order.
    pub fn entries(&self) -> Vec<EntryRecord> {
        self.repo.all()
    }

    /// Deletes one record; returns whether it existed.
    pub fn delete_entry(&mut self, id: EntryId) -> AuditResult<bool> {
        let removed = self.repo.remove(id)?;
        info!(
            "event=entry_delete module=service status=ok id={} removed={}",
            id, removed
        );
        Ok(removed)
    }

    /// Deletes every id in `ids` and returns how many records were removed.
    ///
    /// Nothing is removed when the store write fails.
    pub fn delete_entries(&mut self, ids: &[EntryId]) -> AuditResult<usize> {
        let removed = self.repo.remove_many(ids)?;
        info!(
            "event=entry_delete module=service status=ok requested={} removed={}",
            ids.len(),
            removed
        );
        Ok(removed)
    }

    /// Exports the full record set to `path`; returns the row count.
    pub fn export(&self, path: impl AsRef<Path>) -> AuditResult<usize> {
        Ok(export_csv(&self.repo.all(), path)?)
    }

    fn reset_registry(&mut self) {
        self.registry = DomainRegistry::new(self.seed_domains.iter().cloned());
        self.absorb_store_domains();
    }

    fn absorb_store_domains(&mut self) {
        for record in self.repo.all() {
            self.registry.register(record.entry.domain);
        }
    }
}

impl AuditService<JsonEntryRepository> {
    /// Re-points the session at an existing store file.
    ///
    /// This is a full state swap: the registry goes back to the configured
    /// seeds plus the new store's domains. On failure nothing changes.
    pub fn load_store(&mut self, path: impl AsRef<Path>) -> AuditResult<usize> {
        self.repo.switch_to(path)?;
        self.reset_registry();
        info!(
            "event=store_switch module=service status=ok mode=load records={}",
            self.repo.len()
        );
        Ok(self.repo.len())
    }

    /// Re-points the session at a new empty store file.
    pub fn new_store(&mut self, path: impl AsRef<Path>) -> AuditResult<()> {
        self.repo.create_at(path)?;
        self.reset_registry();
        info!("event=store_switch module=service status=ok mode=create records=0");
        Ok(())
    }

    pub fn store_path(&self) -> &Path {
        self.repo.path()
    }
}
