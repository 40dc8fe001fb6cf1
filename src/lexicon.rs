//! Reference data: gendered first-name lists and honorifics.

use crate::error::Result;
use dramatis_core::Gender;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A pair of female/male string sets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenderedSets {
    /// Entries associated with women
    pub female: HashSet<String>,
    /// Entries associated with men
    pub male: HashSet<String>,
}

impl GenderedSets {
    /// Build from any two word lists.
    pub fn new<F, M, S>(female: F, male: M) -> Self
    where
        F: IntoIterator<Item = S>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            female: female.into_iter().map(Into::into).collect(),
            male: male.into_iter().map(Into::into).collect(),
        }
    }

    /// Entries present in both sets.
    #[must_use]
    pub fn overlap(&self) -> Vec<&str> {
        let mut both: Vec<&str> = self
            .female
            .intersection(&self.male)
            .map(String::as_str)
            .collect();
        both.sort_unstable();
        both
    }
}

/// Source of reference lists.
///
/// Loading is left to implementors; failures propagate to the caller unchanged.
pub trait ReferenceData {
    /// Female and male first names, matched exactly.
    fn first_names(&self) -> Result<GenderedSets>;

    /// Female and male honorifics, matched case-insensitively with or without
    /// a trailing period.
    fn honorifics(&self) -> Result<GenderedSets>;
}

/// Normalize an honorific for lookup: trailing periods removed, lower-cased.
#[must_use]
pub fn normalize_title(token: &str) -> String {
    token.trim_end_matches('.').to_lowercase()
}

/// Resolved reference data used by every phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    first_names: GenderedSets,
    // Stored normalized.
    titles: GenderedSets,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            GenderedSets::default(),
            GenderedSets::new(["mrs", "miss", "mis"], ["mr"]),
        )
    }
}

impl Lexicon {
    /// Build a lexicon from first names and honorifics.
    #[must_use]
    pub fn new(first_names: GenderedSets, honorifics: GenderedSets) -> Self {
        let titles = GenderedSets::new(
            honorifics.female.iter().map(|t| normalize_title(t)),
            honorifics.male.iter().map(|t| normalize_title(t)),
        );
        for (kind, sets) in [("first name", &first_names), ("honorific", &titles)] {
            let both = sets.overlap();
            if !both.is_empty() {
                log::warn!("{kind} entries listed as both female and male: {both:?}");
            }
        }
        Self {
            first_names,
            titles,
        }
    }

    /// Resolve a lexicon from any reference-data source.
    pub fn from_reference(source: &dyn ReferenceData) -> Result<Self> {
        Ok(Self::new(source.first_names()?, source.honorifics()?))
    }

    /// Replace the first-name lists, keeping the honorifics.
    #[must_use]
    pub fn with_first_names(self, first_names: GenderedSets) -> Self {
        let honorifics = self.titles.clone();
        Self::new(first_names, honorifics)
    }

    /// Gender implied by an honorific token, if it is one.
    #[must_use]
    pub fn title_gender(&self, token: &str) -> Option<Gender> {
        let t = normalize_title(token);
        let female = self.titles.female.contains(&t);
        let male = self.titles.male.contains(&t);
        match (female, male) {
            (true, false) => Some(Gender::Female),
            (false, true) => Some(Gender::Male),
            (true, true) => Some(Gender::Unknown),
            (false, false) => None,
        }
    }

    /// Whether `token` is a known honorific.
    #[must_use]
    pub fn is_title(&self, token: &str) -> bool {
        self.title_gender(token).is_some()
    }

    /// Gender implied by an exact first-name match.
    ///
    /// Names in neither list, or in both, are `Unknown`.
    #[must_use]
    pub fn first_name_gender(&self, first: &str) -> Gender {
        let female = self.first_names.female.contains(first);
        let male = self.first_names.male.contains(first);
        match (female, male) {
            (true, false) => Gender::Female,
            (false, true) => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

impl ReferenceData for Lexicon {
    fn first_names(&self) -> Result<GenderedSets> {
        Ok(self.first_names.clone())
    }

    fn honorifics(&self) -> Result<GenderedSets> {
        Ok(self.titles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_titles_ignore_case_and_period() {
        let lex = Lexicon::default();
        assert_eq!(lex.title_gender("Mrs."), Some(Gender::Female));
        assert_eq!(lex.title_gender("MISS"), Some(Gender::Female));
        assert_eq!(lex.title_gender("mr"), Some(Gender::Male));
        assert_eq!(lex.title_gender("Dr."), None);
        assert!(!lex.is_title("Holmes"));
    }

    #[test]
    fn first_names_match_exactly() {
        let lex = Lexicon::default().with_first_names(GenderedSets::new(["Irene"], ["John"]));
        assert_eq!(lex.first_name_gender("Irene"), Gender::Female);
        assert_eq!(lex.first_name_gender("John"), Gender::Male);
        assert_eq!(lex.first_name_gender("john"), Gender::Unknown);
        assert_eq!(lex.first_name_gender("Sherlock"), Gender::Unknown);
    }

    #[test]
    fn name_in_both_lists_is_unknown() {
        let lex = Lexicon::default().with_first_names(GenderedSets::new(["Jordan"], ["Jordan"]));
        assert_eq!(lex.first_name_gender("Jordan"), Gender::Unknown);
    }

    struct Failing;

    #[derive(Debug)]
    struct Unavailable;

    impl std::fmt::Display for Unavailable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("name lists unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    impl ReferenceData for Failing {
        fn first_names(&self) -> Result<GenderedSets> {
            Err(crate::Error::external(Unavailable))
        }

        fn honorifics(&self) -> Result<GenderedSets> {
            Ok(GenderedSets::default())
        }
    }

    #[test]
    fn reference_failures_pass_through() {
        let err = Lexicon::from_reference(&Failing).unwrap_err();
        assert!(matches!(err, crate::Error::External(_)));
        assert_eq!(err.to_string(), "name lists unavailable");
    }
}
