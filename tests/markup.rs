//! Shared document builder for integration tests.
//!
//! Text is whitespace-tokenized. `[` and `]` around words mark a PERSON span,
//! a lone `.` ends a sentence. Capitalized words are tagged as proper nouns,
//! known pronouns as pronouns.

#![allow(dead_code)]

use dramatis::{AnalyzedDocument, EntitySpan, PartOfSpeech, Token};

const PRONOUNS: &[&str] = &[
    "he", "his", "him", "himself", "she", "her", "hers", "herself", "they", "it",
];

fn tag(word: &str) -> PartOfSpeech {
    if PRONOUNS.contains(&word.to_lowercase().as_str()) {
        PartOfSpeech::Pronoun
    } else if word == "." || word == "," {
        PartOfSpeech::Punct
    } else if word.chars().next().is_some_and(char::is_uppercase) {
        PartOfSpeech::ProperNoun
    } else {
        PartOfSpeech::Other
    }
}

/// Build an analyzed document from bracket markup.
pub fn document(markup: &str) -> AnalyzedDocument {
    let mut tokens = Vec::new();
    let mut sentences = Vec::new();
    let mut entities = Vec::new();
    let mut sentence_start = 0;
    let mut open: Option<usize> = None;

    for raw in markup.split_whitespace() {
        let mut word = raw;
        if let Some(rest) = word.strip_prefix('[') {
            open = Some(tokens.len());
            word = rest;
        }
        let closes = word.ends_with(']');
        let word = word.trim_end_matches(']');
        tokens.push(Token::new(word, tag(word)));
        if closes {
            let start = open.take().expect("unbalanced ] in markup");
            entities.push(EntitySpan::new("PERSON", start, tokens.len()));
        }
        if word == "." {
            sentences.push(sentence_start..tokens.len());
            sentence_start = tokens.len();
        }
    }
    if sentence_start < tokens.len() {
        sentences.push(sentence_start..tokens.len());
    }
    AnalyzedDocument::new(tokens, sentences, entities).expect("markup builds a valid document")
}
