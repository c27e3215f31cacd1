//! Draft-to-entry validation.
//!
//! # Invariants
//! - Checks run in field order; the first failure is reported.
//! - Registry mutation happens only after the whole draft is accepted.

use crate::config::AuditProfile;
use crate::model::entry::{Entry, EntryDraft, EntryField, DATE_FORMAT};
use crate::validate::registry::DomainRegistry;
use chrono::{Datelike, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// ASCII digits only; `\d` would also admit other Unicode decimal digits.
static DATE_PATTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Validation failure for a candidate entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// A required field is empty after trimming.
    MissingField(EntryField),
    /// A date field does not match zero-padded `YYYY-MM-DD`.
    InvalidDateFormat { field: EntryField, value: String },
    /// A date field matches the pattern but is not a real calendar day.
    InvalidCalendarDate { field: EntryField, value: String },
    /// A choice field holds a value outside the profile's enumeration.
    InvalidChoice { field: EntryField, value: String },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "please enter a value for `{field}`"),
            Self::InvalidDateFormat { field, value } => write!(
                f,
                "`{field}` must be in YYYY-MM-DD (zero-padded) format, got `{value}`"
            ),
            Self::InvalidCalendarDate { field, value } => {
                write!(f, "`{field}` is not a valid calendar date: `{value}`")
            }
            Self::InvalidChoice { field, value } => {
                write!(f, "`{value}` is not an allowed value for `{field}`")
            }
        }
    }
}

impl EntryValidationError {
    /// Field that caused the rejection.
    pub fn field(&self) -> EntryField {
        match self {
            Self::MissingField(field)
            | Self::InvalidDateFormat { field, .. }
            | Self::InvalidCalendarDate { field, .. }
            | Self::InvalidChoice { field, .. } => *field,
        }
    }
}

impl Error for EntryValidationError {}

/// Validates drafts against one `AuditProfile`.
#[derive(Debug, Clone)]
pub struct EntryValidator {
    profile: AuditProfile,
}

impl EntryValidator {
    pub fn new(profile: AuditProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &AuditProfile {
        &self.profile
    }

    /// Validates `draft` and, on success, registers its domain.
    ///
    /// # Errors
    /// - `MissingField` for required fields that are blank.
    /// - `InvalidChoice` for status/priority values the profile does not list.
    /// - `InvalidDateFormat` / `InvalidCalendarDate` for bad non-empty dates.
    pub fn validate(
        &self,
        draft: &EntryDraft,
        registry: &mut DomainRegistry,
    ) -> Result<Entry, EntryValidationError> {
        let entry = self.check(draft)?;
        if registry.register(entry.domain.as_str()) {
            debug!(
                "event=domain_registered module=validate status=ok known={}",
                registry.len()
            );
        }
        Ok(entry)
    }

    /// Validates `draft` without touching any registry.
    pub fn check(&self, draft: &EntryDraft) -> Result<Entry, EntryValidationError> {
        let entry = Entry::from_draft(draft);

        for field in EntryField::ALL {
            let value = entry.value(field);
            if value.is_empty() {
                if self.profile.is_required(field) {
                    return Err(EntryValidationError::MissingField(field));
                }
                continue;
            }

            if let Some(choices) = self.profile.choices(field) {
                if !choices.iter().any(|choice| choice == value) {
                    return Err(EntryValidationError::InvalidChoice {
                        field,
                        value: value.to_string(),
                    });
                }
            }

            if field.is_date() {
                validate_date(field, value)?;
            }
        }

        Ok(entry)
    }
}

/// Checks the profile-independent rules every stored entry must satisfy:
/// non-blank domain and responsibility, and valid non-empty dates.
pub fn check_entry_invariants(entry: &Entry) -> Result<(), EntryValidationError> {
    for field in EntryField::ALL {
        let value = entry.value(field).trim();
        if value.is_empty() {
            if matches!(field, EntryField::Domain | EntryField::Responsibility) {
                return Err(EntryValidationError::MissingField(field));
            }
            continue;
        }
        if field.is_date() {
            validate_date(field, value)?;
        }
    }
    Ok(())
}

/// Parses one date field value under the strict zero-padded layout.
pub fn validate_date(field: EntryField, value: &str) -> Result<NaiveDate, EntryValidationError> {
    if !DATE_PATTERN_RE.is_match(value) {
        return Err(EntryValidationError::InvalidDateFormat {
            field,
            value: value.to_string(),
        });
    }

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        // Year 0 parses in the proleptic calendar but is not a date an
        // operator can mean.
        Ok(date) if date.year() >= 1 => Ok(date),
        _ => Err(EntryValidationError::InvalidCalendarDate {
            field,
            value: value.to_string(),
        }),
    }
}
