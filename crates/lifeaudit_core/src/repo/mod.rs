//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the entry store contract (`insert`, `all`, `remove`).
//! - Provide an in-memory store and a JSON document file store.
//!
//! # Invariants
//! - Ids are assigned by the store, unique, and never reused.
//! - `all()` returns records in insertion order.
//! - Removing an absent id is a no-op.

pub mod entry_repo;
pub mod json_store;
