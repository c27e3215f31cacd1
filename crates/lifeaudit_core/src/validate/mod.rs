//! Entry validation and category registry.
//!
//! # Responsibility
//! - Turn an `EntryDraft` into a normalized `Entry` or a typed failure.
//! - Own the ordered list of known domains explicitly.
//!
//! # Invariants
//! - A rejected draft never mutates the domain registry.
//! - Non-empty date fields are strict zero-padded `YYYY-MM-DD` calendar dates.

pub mod entry_validator;
pub mod registry;
