//! Type-versus-identifier decision for a single rendered token

use super::type_names::TypeNames;

/// Text of a successor that turns an ambiguous name into a macro call
pub const CALL_PAREN: &str = "(";

/// Outcome of classifying one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Leave the token as a plain identifier
    Unmarked,
    /// Highlight the token as a type name
    MarkAsType,
}

impl Classification {
    pub fn is_type(self) -> bool {
        self == Classification::MarkAsType
    }
}

/// Classifies tokens against an injected pair of name sets
///
/// Holds no per-token state: every call is independent of the previous ones,
/// so one classifier can be shared by reference across pages.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    names: TypeNames,
}

impl Classifier {
    pub fn new(names: TypeNames) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &TypeNames {
        &self.names
    }

    /// Classify `token` given the text of its next sibling, if any
    ///
    /// Known names are always types. Ambiguous names are types unless the
    /// successor is exactly `"("`, in which case they read as a macro or
    /// function invocation (`TOID(struct foo)`). Everything else is unmarked.
    pub fn classify(&self, token: &str, successor: Option<&str>) -> Classification {
        if self.names.is_known(token) {
            return Classification::MarkAsType;
        }

        if self.names.is_ambiguous(token) {
            return match successor {
                Some(CALL_PAREN) => Classification::Unmarked,
                _ => Classification::MarkAsType,
            };
        }

        Classification::Unmarked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pmemobj() -> Classifier {
        Classifier::new(TypeNames::new(
            ["PMEMobjpool", "PMEMoid", "PMEMmutex"],
            ["TOID", "POBJ_LIST_HEAD"],
        ))
    }

    #[test]
    fn test_known_type_without_successor() {
        assert_eq!(
            pmemobj().classify("PMEMobjpool", None),
            Classification::MarkAsType
        );
    }

    #[test]
    fn test_known_type_ignores_successor() {
        let c = pmemobj();
        for next in [None, Some("("), Some("*"), Some(""), Some("pop")] {
            assert_eq!(c.classify("PMEMoid", next), Classification::MarkAsType);
        }
    }

    #[test]
    fn test_ambiguous_followed_by_paren_is_macro_call() {
        assert_eq!(
            pmemobj().classify("TOID", Some("(")),
            Classification::Unmarked
        );
    }

    #[test]
    fn test_ambiguous_followed_by_other_text_is_type() {
        assert_eq!(
            pmemobj().classify("TOID", Some("foo")),
            Classification::MarkAsType
        );
    }

    #[test]
    fn test_ambiguous_without_successor_is_type() {
        assert_eq!(
            pmemobj().classify("POBJ_LIST_HEAD", None),
            Classification::MarkAsType
        );
    }

    #[test]
    fn test_paren_match_is_exact() {
        let c = pmemobj();
        // Only a lone "(" counts as an invocation
        assert_eq!(c.classify("TOID", Some(" (")), Classification::MarkAsType);
        assert_eq!(c.classify("TOID", Some("(struct")), Classification::MarkAsType);
        assert_eq!(c.classify("TOID", Some("((")), Classification::MarkAsType);
    }

    #[test]
    fn test_unknown_token_is_unmarked() {
        let c = pmemobj();
        assert_eq!(c.classify("int", None), Classification::Unmarked);
        assert_eq!(c.classify("int", Some("(")), Classification::Unmarked);
        assert_eq!(c.classify("", None), Classification::Unmarked);
        assert_eq!(c.classify("toid", None), Classification::Unmarked);
    }

    #[test]
    fn test_known_wins_over_ambiguous() {
        let c = Classifier::new(TypeNames::new(["TOID"], ["TOID"]));
        assert_eq!(c.classify("TOID", Some("(")), Classification::MarkAsType);
    }

    #[test]
    fn test_empty_classifier_marks_nothing() {
        let c = Classifier::default();
        assert_eq!(c.classify("PMEMobjpool", None), Classification::Unmarked);
    }

    #[test]
    fn test_is_type() {
        assert!(Classification::MarkAsType.is_type());
        assert!(!Classification::Unmarked.is_type());
    }
}
