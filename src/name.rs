//! Splitting a name-string into honorific, first and last components.

use crate::lexicon::{normalize_title, Lexicon};
use dramatis_core::NameParts;

/// Parse a name using the honorifics known to `lexicon`.
///
/// A leading honorific (any case, with or without a trailing period) becomes
/// the normalized `title`. Of the remaining whitespace-separated tokens the
/// first is `first` and, if there are at least two, the last is `last`.
/// Never fails; absent components are empty.
#[must_use]
pub fn parse_name(name: &str, lexicon: &Lexicon) -> NameParts {
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    let title = match tokens.first() {
        Some(t) if lexicon.is_title(t) => {
            let title = normalize_title(t);
            tokens.remove(0);
            title
        }
        _ => String::new(),
    };
    let first = tokens.first().copied().unwrap_or_default();
    let last = if tokens.len() >= 2 {
        tokens.last().copied().unwrap_or_default()
    } else {
        ""
    };
    NameParts::new(title, first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> NameParts {
        parse_name(name, &Lexicon::default())
    }

    #[test]
    fn title_first_last() {
        assert_eq!(parse("Mrs. Hudson"), NameParts::new("mrs", "Hudson", ""));
        assert_eq!(parse("Sherlock Holmes"), NameParts::new("", "Sherlock", "Holmes"));
        assert_eq!(
            parse("Mr Arthur Conan Doyle"),
            NameParts::new("mr", "Arthur", "Doyle")
        );
    }

    #[test]
    fn title_is_case_insensitive() {
        assert_eq!(parse("MISS Morstan").title, "miss");
        assert_eq!(parse("mr. Watson").title, "mr");
    }

    #[test]
    fn single_token_has_no_last() {
        assert_eq!(parse("Lestrade"), NameParts::new("", "Lestrade", ""));
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(parse(""), NameParts::default());
        assert_eq!(parse("Mr."), NameParts::new("mr", "", ""));
        // Honorifics only count in leading position.
        assert_eq!(parse("Holmes Mr"), NameParts::new("", "Holmes", "Mr"));
    }
}
