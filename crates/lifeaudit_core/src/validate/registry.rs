//! Known-domain registry.

use crate::config::DEFAULT_DOMAINS;

/// Ordered, duplicate-free list of domain categories.
///
/// Grows append-only as new domains are accepted; insertion order is kept
/// because the first entry doubles as the form default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRegistry {
    domains: Vec<String>,
}

impl DomainRegistry {
    /// Creates a registry seeded with `seed`, dropping blanks and duplicates.
    pub fn new<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            domains: Vec::new(),
        };
        for domain in seed {
            registry.register(domain);
        }
        registry
    }

    /// Appends `domain` if it is not already known.
    ///
    /// Returns `true` when the registry grew.
    pub fn register(&mut self, domain: impl Into<String>) -> bool {
        let domain = domain.into();
        let domain = domain.trim();
        if domain.is_empty() || self.contains(domain) {
            return false;
        }
        self.domains.push(domain.to_string());
        true
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|known| known == domain)
    }

    pub fn known(&self) -> &[String] {
        &self.domains
    }

    pub fn first(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAINS.iter().copied())
    }
}
