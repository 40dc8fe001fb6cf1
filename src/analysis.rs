//! The per-document analysis context.
//!
//! Tokenization, sentence segmentation, tagging and NER happen outside this
//! crate. Their output reaches the engine through [`LinguisticAnalysis`],
//! an explicit value handed to every phase. [`AnalyzedDocument`] is the
//! plain-data implementation.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    /// Proper noun (PROPN)
    ProperNoun,
    /// Common noun (NOUN)
    Noun,
    /// Pronoun (PRON)
    Pronoun,
    /// Verb (VERB, AUX)
    Verb,
    /// Punctuation (PUNCT)
    Punct,
    /// Anything else
    #[default]
    Other,
}

impl PartOfSpeech {
    /// Parse from a Universal Dependencies tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "PROPN" | "NNP" | "NNPS" => PartOfSpeech::ProperNoun,
            "NOUN" | "NN" | "NNS" => PartOfSpeech::Noun,
            "PRON" | "PRP" | "PRP$" => PartOfSpeech::Pronoun,
            "VERB" | "AUX" => PartOfSpeech::Verb,
            "PUNCT" => PartOfSpeech::Punct,
            _ => PartOfSpeech::Other,
        }
    }
}

/// A token and its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,
    /// Part of speech
    #[serde(default)]
    pub pos: PartOfSpeech,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(text: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// A labelled named-entity span over token indices (end exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Entity label, e.g. `"PERSON"`
    pub label: String,
    /// First token index
    pub start: usize,
    /// One past the last token index
    pub end: usize,
}

impl EntitySpan {
    /// Create an entity span.
    #[must_use]
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// A predicate over a single token.
#[derive(Debug, Clone)]
pub enum TokenPredicate {
    /// Token text matches the regex.
    TextRegex(Regex),
    /// Lower-cased token text is one of the given (lower-case) words.
    LowerIn(HashSet<String>),
    /// Token has the given part of speech.
    Pos(PartOfSpeech),
}

impl TokenPredicate {
    /// Build a [`TokenPredicate::LowerIn`] from any words.
    pub fn lower_in<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TokenPredicate::LowerIn(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect())
    }

    /// Whether `token` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenPredicate::TextRegex(re) => re.is_match(&token.text),
            TokenPredicate::LowerIn(words) => words.contains(&token.text.to_lowercase()),
            TokenPredicate::Pos(pos) => token.pos == *pos,
        }
    }
}

/// How many consecutive tokens a step consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Exactly one token.
    One,
    /// One or more tokens; every run length is reported as its own match.
    OneOrMore,
}

/// One element of a [`TokenPattern`].
#[derive(Debug, Clone)]
pub struct PatternStep {
    /// Predicate each consumed token must satisfy
    pub predicate: TokenPredicate,
    /// Repetition
    pub repeat: Repeat,
}

/// An ordered sequence of token predicates.
#[derive(Debug, Clone, Default)]
pub struct TokenPattern {
    steps: Vec<PatternStep>,
}

impl TokenPattern {
    /// An empty pattern (matches nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step consuming exactly one token.
    #[must_use]
    pub fn one(mut self, predicate: TokenPredicate) -> Self {
        self.steps.push(PatternStep {
            predicate,
            repeat: Repeat::One,
        });
        self
    }

    /// Append a step consuming one or more tokens.
    #[must_use]
    pub fn one_or_more(mut self, predicate: TokenPredicate) -> Self {
        self.steps.push(PatternStep {
            predicate,
            repeat: Repeat::OneOrMore,
        });
        self
    }

    /// Find every span of `tokens` within `scope` that matches the pattern.
    ///
    /// Spans are returned sorted by `(start, end)`.
    #[must_use]
    pub fn find_all(&self, tokens: &[Token], scope: Range<usize>) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        if self.steps.is_empty() {
            return out;
        }
        for start in scope.clone() {
            let mut ends = Vec::new();
            self.extend(tokens, scope.end, 0, start, &mut ends);
            ends.sort_unstable();
            ends.dedup();
            out.extend(ends.into_iter().map(|end| start..end));
        }
        out
    }

    fn extend(&self, tokens: &[Token], limit: usize, step: usize, pos: usize, ends: &mut Vec<usize>) {
        let Some(current) = self.steps.get(step) else {
            ends.push(pos);
            return;
        };
        let mut cur = pos;
        while cur < limit && current.predicate.matches(&tokens[cur]) {
            cur += 1;
            self.extend(tokens, limit, step + 1, cur, ends);
            if current.repeat == Repeat::One {
                break;
            }
        }
    }
}

/// The output of an external linguistic analysis of one document.
pub trait LinguisticAnalysis {
    /// Tokens in document order.
    fn tokens(&self) -> &[Token];

    /// Sentence boundaries as token ranges, in order.
    fn sentences(&self) -> &[Range<usize>];

    /// Named-entity spans, in order.
    fn entities(&self) -> &[EntitySpan];

    /// Match a token pattern over the whole document or within `scope`.
    ///
    /// The provided implementation runs [`TokenPattern::find_all`] over
    /// [`tokens`](Self::tokens). Implementations backed by an external matcher
    /// may override it; their errors reach the caller unchanged.
    fn match_pattern(
        &self,
        pattern: &TokenPattern,
        scope: Option<Range<usize>>,
    ) -> Result<Vec<Range<usize>>> {
        let tokens = self.tokens();
        let scope = scope.unwrap_or(0..tokens.len());
        if scope.start > scope.end || scope.end > tokens.len() {
            return Err(Error::invalid_input(format!(
                "pattern scope {}..{} outside document of {} tokens",
                scope.start,
                scope.end,
                tokens.len()
            )));
        }
        Ok(pattern.find_all(tokens, scope))
    }

    /// Text of a token range, tokens joined by single spaces.
    ///
    /// A range outside the document is an invalid-input error.
    fn span_text(&self, range: Range<usize>) -> Result<String> {
        let tokens = self.tokens();
        let Some(slice) = tokens.get(range.clone()) else {
            return Err(Error::invalid_input(format!(
                "span {}..{} outside document of {} tokens",
                range.start,
                range.end,
                tokens.len()
            )));
        };
        Ok(slice
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Index of the sentence containing `token`, if any.
    fn sentence_of(&self, token: usize) -> Option<usize> {
        let sentences = self.sentences();
        let idx = sentences.partition_point(|s| s.end <= token);
        sentences
            .get(idx)
            .filter(|s| s.contains(&token))
            .map(|_| idx)
    }
}

/// Reject a pattern match that is empty or runs past the document.
pub(crate) fn check_match(span: &Range<usize>, tokens: usize) -> Result<()> {
    if span.start < span.end && span.end <= tokens {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "pattern match {}..{} is empty or outside document of {} tokens",
            span.start, span.end, tokens
        )))
    }
}

/// Plain-data analysis context for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    entities: Vec<EntitySpan>,
}

impl AnalyzedDocument {
    /// Build a validated document.
    ///
    /// Sentences must be ordered, non-overlapping and inside the token range;
    /// entity spans must be non-empty and inside the token range.
    pub fn new(
        tokens: Vec<Token>,
        sentences: Vec<Range<usize>>,
        entities: Vec<EntitySpan>,
    ) -> Result<Self> {
        let doc = Self {
            tokens,
            sentences,
            entities,
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Parse a document from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<()> {
        let n = self.tokens.len();
        let mut prev_end = 0;
        for (i, s) in self.sentences.iter().enumerate() {
            if s.start > s.end || s.end > n || s.start < prev_end {
                return Err(Error::invalid_input(format!(
                    "sentence {i} ({}..{}) is out of order or outside {n} tokens",
                    s.start, s.end
                )));
            }
            prev_end = s.end;
        }
        for e in &self.entities {
            if e.start >= e.end || e.end > n {
                return Err(Error::invalid_input(format!(
                    "entity '{}' span {}..{} is empty or outside {n} tokens",
                    e.label, e.start, e.end
                )));
            }
        }
        Ok(())
    }
}

impl LinguisticAnalysis for AnalyzedDocument {
    fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn sentences(&self) -> &[Range<usize>] {
        &self.sentences
    }

    fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, pos: PartOfSpeech) -> Token {
        Token::new(text, pos)
    }

    fn sample() -> AnalyzedDocument {
        use PartOfSpeech::*;
        AnalyzedDocument::new(
            vec![
                tok("Mr.", ProperNoun),
                tok("Sherlock", ProperNoun),
                tok("Holmes", ProperNoun),
                tok("smiled", Verb),
                tok(".", Punct),
                tok("He", Pronoun),
                tok("left", Verb),
                tok(".", Punct),
            ],
            vec![0..5, 5..8],
            vec![EntitySpan::new("PERSON", 1, 3)],
        )
        .unwrap()
    }

    #[test]
    fn one_or_more_reports_every_run_length() {
        let doc = sample();
        let pattern = TokenPattern::new()
            .one(TokenPredicate::TextRegex(Regex::new(r"^Mr\.$").unwrap()))
            .one_or_more(TokenPredicate::Pos(PartOfSpeech::ProperNoun));
        let spans = doc.match_pattern(&pattern, None).unwrap();
        assert_eq!(spans, vec![0..2, 0..3]);
    }

    #[test]
    fn scoped_matching_stays_inside_scope() {
        let doc = sample();
        let pattern = TokenPattern::new().one(TokenPredicate::lower_in(["he", "she"]));
        assert!(doc.match_pattern(&pattern, Some(0..5)).unwrap().is_empty());
        assert_eq!(doc.match_pattern(&pattern, Some(5..8)).unwrap(), vec![5..6]);
    }

    #[test]
    fn out_of_range_scope_is_rejected() {
        let doc = sample();
        let pattern = TokenPattern::new().one(TokenPredicate::Pos(PartOfSpeech::Verb));
        assert!(matches!(
            doc.match_pattern(&pattern, Some(3..20)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn sentence_lookup() {
        let doc = sample();
        assert_eq!(doc.sentence_of(2), Some(0));
        assert_eq!(doc.sentence_of(5), Some(1));
        assert_eq!(doc.sentence_of(8), None);
    }

    #[test]
    fn span_text_joins_tokens() {
        assert_eq!(sample().span_text(0..3).unwrap(), "Mr. Sherlock Holmes");
        assert!(matches!(sample().span_text(6..9), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn invalid_entity_span_is_rejected() {
        let result = AnalyzedDocument::new(
            vec![tok("Watson", PartOfSpeech::ProperNoun)],
            vec![0..1],
            vec![EntitySpan::new("PERSON", 0, 2)],
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let doc = sample();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(AnalyzedDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn pos_tags_parse_from_ud_labels() {
        assert_eq!(PartOfSpeech::from_tag("PROPN"), PartOfSpeech::ProperNoun);
        assert_eq!(PartOfSpeech::from_tag("pron"), PartOfSpeech::Pronoun);
        assert_eq!(PartOfSpeech::from_tag("X"), PartOfSpeech::Other);
    }
}
