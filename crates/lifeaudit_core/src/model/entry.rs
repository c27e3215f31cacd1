//! Entry domain model.
//!
//! # Responsibility
//! - Define the candidate (`EntryDraft`) and validated (`Entry`) record shapes.
//! - Provide the explicit field mapping used at serialization boundaries.
//!
//! # Invariants
//! - Stores accept an `Entry` only if its domain and responsibility are
//!   non-blank and every non-empty date is a real calendar date.
//! - `EntryId` is unique within one store and never reused after deletion.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned identifier for a persisted entry.
pub type EntryId = u64;

/// Date layout used for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the nine entry fields, in fixed column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Domain,
    Responsibility,
    Status,
    Priority,
    Actions,
    Notes,
    AssignedDate,
    DueDate,
    CompletedDate,
}

impl EntryField {
    /// All fields in export/display order.
    pub const ALL: [EntryField; 9] = [
        EntryField::Domain,
        EntryField::Responsibility,
        EntryField::Status,
        EntryField::Priority,
        EntryField::Actions,
        EntryField::Notes,
        EntryField::AssignedDate,
        EntryField::DueDate,
        EntryField::CompletedDate,
    ];

    /// Storage key, matching the serde name used in the store document.
    pub fn key(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Responsibility => "responsibility",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Actions => "actions",
            Self::Notes => "notes",
            Self::AssignedDate => "assigned_date",
            Self::DueDate => "due_date",
            Self::CompletedDate => "completed_date",
        }
    }

    /// Human-readable column name used in export headers and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Responsibility => "Responsibility",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::Actions => "Actions",
            Self::Notes => "Notes",
            Self::AssignedDate => "Assigned Date",
            Self::DueDate => "Due Date",
            Self::CompletedDate => "Completed Date",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(
            self,
            Self::AssignedDate | Self::DueDate | Self::CompletedDate
        )
    }
}

impl Display for EntryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Candidate entry as typed by the operator, before validation.
///
/// Every field is raw text; nothing here is trusted until
/// `EntryValidator::validate` turns it into an `Entry`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub domain: String,
    pub responsibility: String,
    pub status: String,
    pub priority: String,
    pub actions: String,
    pub notes: String,
    pub assigned_date: String,
    pub due_date: String,
    pub completed_date: String,
}

impl EntryDraft {
    /// Creates an empty draft whose assigned date is pre-filled with `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            assigned_date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Creates an empty draft dated with the local calendar day.
    pub fn dated_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn set(&mut self, field: EntryField, value: impl Into<String>) {
        let slot = match field {
            EntryField::Domain => &mut self.domain,
            EntryField::Responsibility => &mut self.responsibility,
            EntryField::Status => &mut self.status,
            EntryField::Priority => &mut self.priority,
            EntryField::Actions => &mut self.actions,
            EntryField::Notes => &mut self.notes,
            EntryField::AssignedDate => &mut self.assigned_date,
            EntryField::DueDate => &mut self.due_date,
            EntryField::CompletedDate => &mut self.completed_date,
        };
        *slot = value.into();
    }

    /// Builder-style variant of [`EntryDraft::set`].
    pub fn with(mut self, field: EntryField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

/// Validated life-audit entry.
///
/// Serialized with snake_case keys; empty optional fields stay as empty
/// strings so the store reproduces them exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub domain: String,
    pub responsibility: String,
    pub status: String,
    pub priority: String,
    pub actions: String,
    pub notes: String,
    pub assigned_date: String,
    pub due_date: String,
    pub completed_date: String,
}

impl Entry {
    pub fn value(&self, field: EntryField) -> &str {
        match field {
            EntryField::Domain => &self.domain,
            EntryField::Responsibility => &self.responsibility,
            EntryField::Status => &self.status,
            EntryField::Priority => &self.priority,
            EntryField::Actions => &self.actions,
            EntryField::Notes => &self.notes,
            EntryField::AssignedDate => &self.assigned_date,
            EntryField::DueDate => &self.due_date,
            EntryField::CompletedDate => &self.completed_date,
        }
    }

    /// Field values in `EntryField::ALL` order.
    pub fn values(&self) -> [&str; 9] {
        EntryField::ALL.map(|field| self.value(field))
    }
}

impl Entry {
    /// Trims every field of `draft`. Performs no validation.
    pub(crate) fn from_draft(draft: &EntryDraft) -> Self {
        Self {
            domain: draft.domain.trim().to_string(),
            responsibility: draft.responsibility.trim().to_string(),
            status: draft.status.trim().to_string(),
            priority: draft.priority.trim().to_string(),
            actions: draft.actions.trim().to_string(),
            notes: draft.notes.trim().to_string(),
            assigned_date: draft.assigned_date.trim().to_string(),
            due_date: draft.due_date.trim().to_string(),
            completed_date: draft.completed_date.trim().to_string(),
        }
    }
}

/// Stored entry together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: EntryId,
    #[serde(flatten)]
    pub entry: Entry,
}
