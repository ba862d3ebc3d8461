//! Advertising system registry lookups.
//!
//! The parser asks a read-only [`AdSystemLookup`] whether the advertising system
//! named in a data record is a known canonical name. A name that fails the
//! lookup still yields a record, flagged with a low severity warning. Without a
//! registry the parser checks the host name shape only.

use std::collections::HashMap;

use crate::error_handling::CanonicalNameError;

/// An advertising system known to a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdSystem {
    /// Registry identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// The domain the system asks publishers to list in ads.txt
    pub canonical_domain: String,
}

/// Read-only registry of advertising systems, keyed by domain.
pub trait AdSystemLookup: Send + Sync {
    /// Returns the system registered under `domain` (the canonical domain or an alias).
    fn lookup(&self, domain: &str) -> Option<&AdSystem>;
}

/// Checks that `name` is the canonical domain of a registered advertising system.
///
/// Alias domains resolve to a system but are not canonical, so they fail too.
///
/// # Errors
///
/// Returns `CanonicalNameError::UnknownOrInvalidCName` when `name` is unknown or is
/// an alias of a system registered under a different canonical domain.
pub fn validate_canonical_name(
    lookup: &dyn AdSystemLookup,
    name: &str,
) -> Result<(), CanonicalNameError> {
    match lookup.lookup(name) {
        Some(system) if system.canonical_domain.eq_ignore_ascii_case(name) => Ok(()),
        _ => Err(CanonicalNameError::UnknownOrInvalidCName(name.to_string())),
    }
}

/// Immutable in-memory registry, case-insensitive on domains.
#[derive(Debug, Default, Clone)]
pub struct KnownAdSystems {
    systems: HashMap<u32, AdSystem>,
    // lower-cased domain -> system id
    domains: HashMap<String, u32>,
}

impl KnownAdSystems {
    /// Builds a registry from `(id, name, canonical domain)` entries.
    pub fn from_entries<I, N, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut registry = Self::default();
        for (id, name, domain) in entries {
            let canonical_domain: String = domain.into();
            registry
                .domains
                .insert(canonical_domain.to_ascii_lowercase(), id);
            registry.systems.insert(
                id,
                AdSystem {
                    id,
                    name: name.into(),
                    canonical_domain,
                },
            );
        }
        registry
    }

    /// Registers `domain` as an alias of the system `id`. Unknown ids are ignored.
    pub fn with_alias(mut self, domain: impl Into<String>, id: u32) -> Self {
        if self.systems.contains_key(&id) {
            self.domains.insert(domain.into().to_ascii_lowercase(), id);
        }
        self
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no system is registered.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl AdSystemLookup for KnownAdSystems {
    fn lookup(&self, domain: &str) -> Option<&AdSystem> {
        self.domains
            .get(&domain.to_ascii_lowercase())
            .and_then(|id| self.systems.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> KnownAdSystems {
        KnownAdSystems::from_entries([
            (1, "adtech", "adtech.com"),
            (2, "tremorhub", "tremorhub.com"),
            (10000, "greenadexchange", "greenadexchange.com"),
            (10001, "testexchange", "testexchange.net"),
        ])
        .with_alias("testexchange.com", 10001)
    }

    #[test]
    fn test_known_canonical_names_are_valid() {
        let registry = registry();
        for name in ["adtech.com", "Tremorhub.com", "greenadexchange.com"] {
            assert!(
                validate_canonical_name(&registry, name).is_ok(),
                "{name} should be canonical"
            );
        }
    }

    #[test]
    fn test_unknown_or_alias_names_are_invalid() {
        let registry = registry();
        for name in [
            "example.com",
            "test.net",
            "rtb.selectmedia.asia/path",
            "testexchange.com",
        ] {
            assert_eq!(
                validate_canonical_name(&registry, name),
                Err(CanonicalNameError::UnknownOrInvalidCName(name.to_string())),
            );
        }
    }

    #[test]
    fn test_alias_resolves_to_system() {
        let registry = registry();
        let system = registry.lookup("TESTEXCHANGE.com").unwrap();
        assert_eq!(system.id, 10001);
        assert_eq!(system.canonical_domain, "testexchange.net");
    }

    #[test]
    fn test_alias_for_unknown_id_is_ignored() {
        let registry = registry().with_alias("ghost.com", 42);
        assert!(registry.lookup("ghost.com").is_none());
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let registry = KnownAdSystems::default();
        assert!(registry.is_empty());
        assert!(validate_canonical_name(&registry, "adtech.com").is_err());
    }
}
