//! Tabular export of the record set.
//!
//! # Responsibility
//! - Render the full record set as comma-separated text with a fixed header.
//! - Write the export all-or-nothing.
//!
//! # Invariants
//! - Header and row column order both follow `EntryField::ALL`.
//! - A failed export never leaves a partial file at the target path.

pub mod csv;
