//! Finite reference sets for membership checks.

use std::collections::HashSet;
use std::fmt;

/// An immutable set of accepted codes.
///
/// Built once (typically in a `LazyLock` static) and shared read-only by
/// every invocation. Lookups are exact and case-sensitive.
#[derive(Clone)]
pub struct CodeSet {
    name: &'static str,
    codes: HashSet<&'static str>,
}

impl CodeSet {
    /// Build a named set from a list of codes.
    #[must_use]
    pub fn new(name: &'static str, codes: &[&'static str]) -> Self {
        Self {
            name,
            codes: codes.iter().copied().collect(),
        }
    }

    /// Whether `candidate` is a member.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        self.codes.contains(candidate)
    }

    /// Like [`contains`](Self::contains), treating `None` as not a member.
    #[must_use]
    pub fn contains_opt(&self, candidate: Option<&str>) -> bool {
        candidate.is_some_and(|c| self.contains(c))
    }

    /// Human-readable name of the set, for error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of codes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl fmt::Debug for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeSet")
            .field("name", &self.name)
            .field("len", &self.codes.len())
            .finish()
    }
}
