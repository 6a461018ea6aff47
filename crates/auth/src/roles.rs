use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Prefix that distinguishes role authorities from other granted authorities.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Granted authority label (e.g. `ROLE_ADMIN`).
///
/// Authorities are opaque, case-sensitive strings at this layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(Cow<'static, str>);

impl Authority {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Build a role authority, adding the `ROLE_` prefix when it is missing.
    ///
    /// `Authority::role("ADMIN") == Authority::role("ROLE_ADMIN")`.
    pub fn role(name: &str) -> Self {
        let name = name.trim();
        if name.starts_with(ROLE_PREFIX) {
            Self(Cow::Owned(name.to_string()))
        } else {
            Self(Cow::Owned(format!("{ROLE_PREFIX}{name}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Authority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unordered set of authorities held by a principal.
///
/// Parsed from the comma-separated `authority` column of a user row; entries
/// are trimmed and empty entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoritySet(BTreeSet<Authority>);

impl AuthoritySet {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Authority::new(s.to_string()))
                .collect(),
        )
    }

    pub fn contains(&self, authority: &Authority) -> bool {
        self.0.contains(authority)
    }

    pub fn contains_any<'a>(&self, wanted: impl IntoIterator<Item = &'a Authority>) -> bool {
        wanted.into_iter().any(|a| self.contains(a))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Authority> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = Authority>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_empty_entries() {
        let set = AuthoritySet::parse(" ROLE_USER, ,ROLE_ADMIN,");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Authority::new("ROLE_USER")));
        assert!(set.contains(&Authority::new("ROLE_ADMIN")));
    }

    #[test]
    fn parse_of_empty_string_is_empty() {
        assert!(AuthoritySet::parse("").is_empty());
    }

    #[test]
    fn duplicate_entries_collapse() {
        let set = AuthoritySet::parse("ROLE_USER,ROLE_USER");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn authorities_are_case_sensitive() {
        let set = AuthoritySet::parse("role_admin");
        assert!(!set.contains(&Authority::new("ROLE_ADMIN")));
    }

    #[test]
    fn role_adds_prefix_once() {
        assert_eq!(Authority::role("ADMIN").as_str(), "ROLE_ADMIN");
        assert_eq!(Authority::role("ROLE_ADMIN").as_str(), "ROLE_ADMIN");
    }
}
