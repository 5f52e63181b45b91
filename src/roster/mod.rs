pub(crate) mod binding;
pub(crate) mod discord;
pub(crate) mod render;
pub(crate) mod sync;
#[cfg(test)]
pub(crate) mod testing;

use itertools::Itertools;

/// Longest company name accepted, in characters.
pub(crate) const MAX_NAME_CHARS: usize = 100;

/// Canonical form of a company name: surrounding whitespace removed, lower-cased.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    Added(String),
    Duplicate(String),
    Blank,
    TooLong,
}

/// Insertion-ordered list of normalized company names, never containing the
/// same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Roster {
    companies: Vec<String>,
}

impl Roster {
    /// Builds a roster from stored entries, normalizing them and dropping
    /// blanks and repeats while keeping first-seen order.
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let companies = entries
            .into_iter()
            .map(|entry| normalize(entry.as_ref()))
            .filter(|entry| !entry.is_empty())
            .unique()
            .collect_vec();
        Self { companies }
    }

    pub(crate) fn add(&mut self, name: &str) -> AddOutcome {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return AddOutcome::Blank;
        }
        if normalized.chars().count() > MAX_NAME_CHARS {
            return AddOutcome::TooLong;
        }
        if self.companies.contains(&normalized) {
            return AddOutcome::Duplicate(normalized);
        }

        self.companies.push(normalized.clone());
        AddOutcome::Added(normalized)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        let normalized = normalize(name);
        self.companies.iter().any(|c| *c == normalized)
    }

    pub(crate) fn entries(&self) -> &[String] {
        &self.companies
    }

    pub(crate) fn len(&self) -> usize {
        self.companies.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_whitespace_and_case() {
        assert_eq!(normalize("  Acme Corp \n"), "acme corp");
        assert_eq!(normalize("ÉCOLE"), "école");
    }

    #[test]
    fn second_add_with_different_case_is_duplicate() {
        let mut roster = Roster::default();

        assert_eq!(roster.add("Acme"), AddOutcome::Added(String::from("acme")));
        assert_eq!(
            roster.add("acme"),
            AddOutcome::Duplicate(String::from("acme"))
        );
        assert_eq!(roster.entries(), &[String::from("acme")]);
    }

    #[test]
    fn no_case_insensitive_duplicates_after_many_adds() {
        let mut roster = Roster::default();
        for name in ["Foo", "BAR", " foo", "bar ", "Baz", "fOO", "baz", "qux"] {
            roster.add(name);
        }

        assert_eq!(roster.entries(), &["foo", "bar", "baz", "qux"]);
        let lowered = roster.entries().iter().map(|e| e.to_lowercase());
        assert_eq!(lowered.clone().unique().count(), lowered.count());
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut roster = Roster::default();

        assert_eq!(roster.add("   "), AddOutcome::Blank);
        assert!(roster.is_empty());
    }

    #[test]
    fn overlong_names_are_rejected() {
        let mut roster = Roster::default();

        assert_eq!(roster.add(&"x".repeat(5000)), AddOutcome::TooLong);
        assert_eq!(
            roster.add(&format!("  {}  ", "é".repeat(MAX_NAME_CHARS))),
            AddOutcome::Added("é".repeat(MAX_NAME_CHARS))
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn contains_ignores_case_and_padding() {
        let mut roster = Roster::default();
        roster.add("Foo");

        assert!(roster.contains("foo"));
        assert!(roster.contains(" FOO "));
        assert!(!roster.contains("food"));
    }

    #[test]
    fn contains_does_not_mutate() {
        let mut roster = Roster::default();
        roster.add("Foo");
        let before = roster.clone();

        for name in ["foo", "bar", "", "  "] {
            roster.contains(name);
        }
        assert_eq!(roster, before);
    }

    #[test]
    fn from_entries_repairs_hand_edited_lists() {
        let roster = Roster::from_entries(["Acme", "acme", "", "Globex "]);

        assert_eq!(roster.entries(), &["acme", "globex"]);
        assert_eq!(roster.len(), 2);
    }
}
