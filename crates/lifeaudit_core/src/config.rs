//! Validation profiles and seed configuration.
//!
//! # Responsibility
//! - Declare which fields are required and which status/priority values are
//!   accepted, as data rather than hard-coded rules.
//! - Load an `AuditConfig` from TOML.
//!
//! # Invariants
//! - A profile always has at least one status and one priority choice.
//! - `domain` and `responsibility` are required in every profile.

use crate::model::entry::EntryField;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Categories offered before the operator adds any of their own.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "Finances",
    "Health",
    "Home & Environment",
    "Career & Education",
    "Relationships & Community",
    "Personal Growth & Hobbies",
    // ASCII hyphens so the name can be typed in a shell.
    "Self-Care & Well-Being",
];

const DEFAULT_PRIORITIES: &[&str] = &["High", "Medium", "Low"];
const ALWAYS_REQUIRED: [EntryField; 2] = [EntryField::Domain, EntryField::Responsibility];

/// Field requirements and closed choice lists for one front-end variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditProfile {
    pub name: String,
    pub required_fields: Vec<EntryField>,
    pub statuses: Vec<String>,
    pub priorities: Vec<String>,
}

impl AuditProfile {
    /// Weekly table variant: every field must be filled in.
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            required_fields: EntryField::ALL.to_vec(),
            statuses: to_strings(&["On Track", "Needs Attention", "Overdue"]),
            priorities: to_strings(DEFAULT_PRIORITIES),
        }
    }

    /// File-backed variant: only domain and responsibility are mandatory.
    pub fn persisted() -> Self {
        Self {
            name: "persisted".to_string(),
            required_fields: ALWAYS_REQUIRED.to_vec(),
            statuses: to_strings(&["Not Started", "In Progress", "Done"]),
            priorities: to_strings(DEFAULT_PRIORITIES),
        }
    }

    /// Resolves a built-in profile by name.
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::strict()),
            "persisted" => Some(Self::persisted()),
            _ => None,
        }
    }

    pub fn is_required(&self, field: EntryField) -> bool {
        self.required_fields.contains(&field)
    }

    /// Allowed values for a choice field, `None` for free-text fields.
    pub fn choices(&self, field: EntryField) -> Option<&[String]> {
        match field {
            EntryField::Status => Some(&self.statuses),
            EntryField::Priority => Some(&self.priorities),
            _ => None,
        }
    }

    /// First value of a choice list; used as the form default.
    pub fn default_choice(&self, field: EntryField) -> Option<&str> {
        self.choices(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn check(&self) -> Result<(), String> {
        if self.statuses.iter().all(|value| value.trim().is_empty()) {
            return Err(format!("profile `{}` declares no statuses", self.name));
        }
        if self.priorities.iter().all(|value| value.trim().is_empty()) {
            return Err(format!("profile `{}` declares no priorities", self.name));
        }
        Ok(())
    }
}

/// Full runtime configuration: active profile plus seed domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub profile: AuditProfile,
    pub domains: Vec<String>,
}

impl AuditConfig {
    /// Built-in configuration for the given profile with default domains.
    pub fn with_profile(profile: AuditProfile) -> Self {
        Self {
            profile,
            domains: to_strings(DEFAULT_DOMAINS),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// - `ConfigError::Io` when the file cannot be read.
    /// - `ConfigError::Parse` when TOML does not match the expected shape.
    /// - `ConfigError::Invalid` for unknown base profiles or empty choice lists.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(ConfigError::Parse)?;
        raw.resolve()
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::with_profile(AuditProfile::persisted())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    profile: RawProfile,
    #[serde(default)]
    domains: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    #[serde(default = "default_base")]
    base: String,
    #[serde(default)]
    required_fields: Option<Vec<EntryField>>,
    #[serde(default)]
    statuses: Option<Vec<String>>,
    #[serde(default)]
    priorities: Option<Vec<String>>,
}

impl Default for RawProfile {
    fn default() -> Self {
        Self {
            base: default_base(),
            required_fields: None,
            statuses: None,
            priorities: None,
        }
    }
}

fn default_base() -> String {
    "persisted".to_string()
}

impl RawConfig {
    fn resolve(self) -> Result<AuditConfig, ConfigError> {
        let mut profile = AuditProfile::named(&self.profile.base).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "unknown base profile `{}`; expected strict|persisted",
                self.profile.base
            ))
        })?;

        if let Some(fields) = self.profile.required_fields {
            let mut required = ALWAYS_REQUIRED.to_vec();
            for field in fields {
                if !required.contains(&field) {
                    required.push(field);
                }
            }
            profile.required_fields = required;
        }
        if let Some(statuses) = self.profile.statuses {
            profile.statuses = trimmed(statuses);
        }
        if let Some(priorities) = self.profile.priorities {
            profile.priorities = trimmed(priorities);
        }
        profile.check().map_err(ConfigError::Invalid)?;

        let domains = match self.domains {
            Some(domains) => trimmed(domains),
            None => to_strings(DEFAULT_DOMAINS),
        };

        Ok(AuditConfig { profile, domains })
    }
}

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn trimmed(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
