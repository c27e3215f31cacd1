//! Life-audit domain model.
//!
//! # Responsibility
//! - Define the fixed-shape entry record and its nine named fields.
//! - Keep field keys and display names in one place for storage and export.
//!
//! # Invariants
//! - Field order is fixed; export columns follow `EntryField::ALL`.
//! - Stored entries are identified by a store-assigned `EntryId`.

pub mod entry;
