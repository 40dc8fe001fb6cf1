//! Candidate referents: which other names might denote the same character.

use crate::error::Result;
use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static INITIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Lu}\.?$").expect("INITIAL regex is invalid"));

/// Candidate aliases per name-string.
pub type ReferentMap = HashMap<String, Vec<String>>;

/// Proposes, for each canonical name, other names that may be aliases.
///
/// Output may name strings outside `names`; unification ignores them.
pub trait ReferentGenerator {
    /// Candidate aliases for each of `names`.
    fn referents(&self, names: &[&str]) -> Result<ReferentMap>;
}

impl<F> ReferentGenerator for F
where
    F: Fn(&[&str]) -> Result<ReferentMap>,
{
    fn referents(&self, names: &[&str]) -> Result<ReferentMap> {
        self(names)
    }
}

/// Shape-based alias heuristics over honorific-stripped tokens.
///
/// `b` is a candidate for `a` when, after dropping a leading honorific,
/// - the token sequences are equal ("Mr. Holmes" ~ "Holmes"),
/// - one is a contiguous run of the other ("Holmes" ~ "Sherlock Holmes"), or
/// - they align token by token with initials standing in for full tokens
///   ("S. Holmes" ~ "Sherlock Holmes").
///
/// The relation is symmetric.
#[derive(Debug, Clone, Copy)]
pub struct ShapeReferentGenerator<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ShapeReferentGenerator<'a> {
    /// Create a generator that recognizes the honorifics of `lexicon`.
    #[must_use]
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    fn core_tokens<'n>(&self, name: &'n str) -> Vec<&'n str> {
        let mut tokens: Vec<&str> = name.split_whitespace().collect();
        if tokens.len() > 1 && self.lexicon.is_title(tokens[0]) {
            tokens.remove(0);
        }
        tokens
    }
}

fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

fn initial_of(token: &str) -> Option<char> {
    if INITIAL.is_match(token) {
        token.chars().next()
    } else {
        None
    }
}

fn initials_align(a: &[&str], b: &[&str]) -> bool {
    if a.len() != b.len() || a.len() < 2 {
        return false;
    }
    let mut full_matches = 0;
    for (x, y) in a.iter().zip(b) {
        if x == y {
            full_matches += 1;
            continue;
        }
        let abbreviates = |short: &str, long: &str| {
            initial_of(short).is_some_and(|c| long.len() > 1 && long.starts_with(c))
        };
        if !(abbreviates(x, y) || abbreviates(y, x)) {
            return false;
        }
    }
    full_matches > 0
}

/// Whether two honorific-stripped token sequences look like the same name.
#[must_use]
pub fn shapes_match(a: &[&str], b: &[&str]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || contains_run(a, b) || contains_run(b, a) || initials_align(a, b)
}

impl ReferentGenerator for ShapeReferentGenerator<'_> {
    fn referents(&self, names: &[&str]) -> Result<ReferentMap> {
        let cores: Vec<Vec<&str>> = names.iter().map(|n| self.core_tokens(n)).collect();
        let mut map = ReferentMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let candidates: Vec<String> = names
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && other != name && shapes_match(&cores[i], &cores[j]))
                .map(|(_, other)| (*other).to_string())
                .collect();
            map.insert((*name).to_string(), candidates);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(names: &[&str]) -> ReferentMap {
        let lex = Lexicon::default();
        ShapeReferentGenerator::new(&lex).referents(names).unwrap()
    }

    #[test]
    fn surname_matches_full_names() {
        let map = run(&["Holmes", "Sherlock Holmes", "Mycroft Holmes", "Watson"]);
        assert_eq!(map["Holmes"], vec!["Sherlock Holmes", "Mycroft Holmes"]);
        assert_eq!(map["Sherlock Holmes"], vec!["Holmes"]);
        assert!(map["Watson"].is_empty());
    }

    #[test]
    fn honorific_is_ignored_for_shape() {
        let map = run(&["Mr. Holmes", "Holmes", "Mrs. Hudson"]);
        assert_eq!(map["Mr. Holmes"], vec!["Holmes"]);
        assert!(map["Mrs. Hudson"].is_empty());
    }

    #[test]
    fn initials_stand_in_for_tokens() {
        let map = run(&["S. Holmes", "Sherlock Holmes", "M. Holmes"]);
        assert_eq!(map["S. Holmes"], vec!["Sherlock Holmes"]);
        assert!(!map["M. Holmes"].contains(&"Sherlock Holmes".to_string()));
    }

    #[test]
    fn partial_token_is_not_a_run() {
        assert!(!shapes_match(&["Holm"], &["Sherlock", "Holmes"]));
        assert!(shapes_match(&["Sherlock"], &["Sherlock", "Holmes"]));
    }

    #[test]
    fn closures_are_generators() {
        let fixed = |_: &[&str]| -> Result<ReferentMap> {
            Ok(ReferentMap::from([("a".to_string(), vec!["b".to_string()])]))
        };
        let map = fixed.referents(&["a", "b"]).unwrap();
        assert_eq!(map["a"], vec!["b"]);
    }
}
