//! The two name sets a classifier is built from

use std::collections::HashSet;

/// Known and ambiguous type names for one documented library
///
/// Immutable once handed to a [`Classifier`](super::Classifier); build a new
/// value (or [`merge`](TypeNames::merge) before construction) to change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNames {
    known: HashSet<String>,
    ambiguous: HashSet<String>,
}

impl TypeNames {
    /// Build from iterators of known and ambiguous names
    pub fn new<K, A>(known: K, ambiguous: A) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
            ambiguous: ambiguous.into_iter().map(Into::into).collect(),
        }
    }

    /// Name always denotes a type
    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Name denotes a type unless it is invoked like a macro
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous.contains(name)
    }

    pub fn known(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn ambiguous(&self) -> impl Iterator<Item = &str> {
        self.ambiguous.iter().map(String::as_str)
    }

    /// Total number of distinct entries across both sets
    pub fn len(&self) -> usize {
        self.known.len() + self.ambiguous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.ambiguous.is_empty()
    }

    /// Union another pair of sets into this one
    ///
    /// Used when several profiles are active for one documentation tree.
    pub fn merge(&mut self, other: &TypeNames) {
        self.known.extend(other.known.iter().cloned());
        self.ambiguous.extend(other.ambiguous.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_exact() {
        let names = TypeNames::new(["PMEMoid"], ["TOID"]);
        assert!(names.is_known("PMEMoid"));
        assert!(!names.is_known("pmemoid"));
        assert!(!names.is_known("PMEMoid "));
        assert!(names.is_ambiguous("TOID"));
        assert!(!names.is_ambiguous("PMEMoid"));
    }

    #[test]
    fn test_merge_unions_both_sets() {
        let mut c = TypeNames::new(["PMEMobjpool"], ["TOID"]);
        let cpp = TypeNames::new(["persistent_ptr", "PMEMobjpool"], Vec::<String>::new());
        c.merge(&cpp);

        assert!(c.is_known("persistent_ptr"));
        assert!(c.is_known("PMEMobjpool"));
        assert!(c.is_ambiguous("TOID"));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_default_is_empty() {
        let names = TypeNames::default();
        assert!(names.is_empty());
        assert_eq!(names.len(), 0);
    }
}
