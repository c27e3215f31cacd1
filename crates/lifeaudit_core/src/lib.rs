//! Core logic for the weekly life-audit tracker.
//! Validation, storage and export live here; front ends only call in.

pub mod config;
pub mod export;
mod fs_util;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use config::{AuditConfig, AuditProfile, ConfigError, DEFAULT_DOMAINS};
pub use export::csv::{export_csv, render_csv, ExportError};
pub use logging::{default_log_level, init_logging, logging_status, resolve_log_dir, LoggingError};
pub use model::entry::{Entry, EntryDraft, EntryField, EntryId, EntryRecord};
pub use repo::entry_repo::{EntryRepository, MemoryEntryRepository, RepoError, RepoResult};
pub use repo::json_store::JsonEntryRepository;
pub use service::audit_service::{AuditError, AuditResult, AuditService};
pub use validate::entry_validator::{
    check_entry_invariants, validate_date, EntryValidationError, EntryValidator,
};
pub use validate::registry::DomainRegistry;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
