//! Pronoun evidence from the sentences a character appears in.

use crate::analysis::{check_match, LinguisticAnalysis, TokenPattern, TokenPredicate};
use crate::config::IdentificationConfig;
use crate::error::Result;
use dramatis_core::{CharacterStore, Gender};
use std::collections::HashSet;

/// Gendered pronoun counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PronounTally {
    /// Masculine pronouns seen
    pub male: usize,
    /// Feminine pronouns seen
    pub female: usize,
}

impl PronounTally {
    /// Add another tally into this one.
    pub fn add(&mut self, other: PronounTally) {
        self.male += other.male;
        self.female += other.female;
    }

    /// Strict majority; a tie (including zero-zero) is `Unknown`.
    #[must_use]
    pub fn verdict(&self) -> Gender {
        match self.male.cmp(&self.female) {
            std::cmp::Ordering::Greater => Gender::Male,
            std::cmp::Ordering::Less => Gender::Female,
            std::cmp::Ordering::Equal => Gender::Unknown,
        }
    }
}

/// Pronoun tallies per character, indexed by id.
///
/// Every occurrence adds the tally of its sentence, so a sentence naming the
/// same character twice counts twice. Sentence tallies are computed once.
pub fn pronoun_tallies(
    store: &CharacterStore,
    doc: &dyn LinguisticAnalysis,
    config: &IdentificationConfig,
) -> Result<Vec<PronounTally>> {
    let male: HashSet<String> = config.male_pronouns.iter().map(|p| p.to_lowercase()).collect();
    let female: HashSet<String> = config
        .female_pronouns
        .iter()
        .map(|p| p.to_lowercase())
        .collect();
    let pattern =
        TokenPattern::new().one(TokenPredicate::lower_in(male.iter().chain(female.iter())));

    let mut per_sentence: Vec<Option<PronounTally>> = vec![None; doc.sentences().len()];
    let mut tallies = vec![PronounTally::default(); store.len()];

    for (id, entity) in store.iter() {
        for &position in entity.occurrences() {
            let Some(s) = doc.sentence_of(position) else {
                continue;
            };
            let cached = per_sentence[s];
            let tally = match cached {
                Some(t) => t,
                None => {
                    let t = sentence_tally(doc, s, &pattern, &male, &female)?;
                    per_sentence[s] = Some(t);
                    t
                }
            };
            tallies[id.index()].add(tally);
        }
    }
    Ok(tallies)
}

fn sentence_tally(
    doc: &dyn LinguisticAnalysis,
    sentence: usize,
    pattern: &TokenPattern,
    male: &HashSet<String>,
    female: &HashSet<String>,
) -> Result<PronounTally> {
    let range = doc.sentences()[sentence].clone();
    let mut tally = PronounTally::default();
    let tokens = doc.tokens();
    for span in doc.match_pattern(pattern, Some(range))? {
        check_match(&span, tokens.len())?;
        let word = tokens[span.start].text.to_lowercase();
        if male.contains(&word) {
            tally.male += 1;
        } else if female.contains(&word) {
            tally.female += 1;
        }
    }
    Ok(tally)
}
