//! Title evidence: honorifics directly before a proper-noun run.

use crate::analysis::{
    check_match, LinguisticAnalysis, PartOfSpeech, TokenPattern, TokenPredicate,
};
use crate::config::IdentificationConfig;
use crate::error::Result;
use crate::lexicon::Lexicon;
use dramatis_core::{CharacterStore, Gender};

/// Honorific votes collected for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TitleVotes {
    /// Votes from female honorifics
    pub female: usize,
    /// Votes from male honorifics
    pub male: usize,
}

impl TitleVotes {
    /// Total votes cast.
    #[must_use]
    pub fn total(&self) -> usize {
        self.female + self.male
    }

    /// Record one vote.
    pub fn cast(&mut self, gender: Gender) {
        match gender {
            Gender::Female => self.female += 1,
            Gender::Male => self.male += 1,
            Gender::Unknown => {}
        }
    }

    /// Gender carrying at least half the votes.
    ///
    /// Female is checked first, so an exact tie resolves to `Female`.
    #[must_use]
    pub fn verdict(&self) -> Gender {
        let total = self.total();
        if total == 0 {
            Gender::Unknown
        } else if 2 * self.female >= total {
            Gender::Female
        } else if 2 * self.male >= total {
            Gender::Male
        } else {
            Gender::Unknown
        }
    }
}

/// Tally honorific votes for every character in `store`, indexed by id.
///
/// Each honorific followed by a run of proper nouns votes for the store key
/// equal to the run ("Holmes") and for the key with the honorific attached
/// ("Mr. Holmes"). Every run length counts, so "Mr. Sherlock Holmes" votes
/// for both "Sherlock" and "Sherlock Holmes" when those are characters.
pub fn title_votes(
    store: &CharacterStore,
    doc: &dyn LinguisticAnalysis,
    lexicon: &Lexicon,
    config: &IdentificationConfig,
) -> Result<Vec<TitleVotes>> {
    let pattern = TokenPattern::new()
        .one(TokenPredicate::TextRegex(config.honorific_regex()?))
        .one_or_more(TokenPredicate::Pos(PartOfSpeech::ProperNoun));
    let mut votes = vec![TitleVotes::default(); store.len()];
    let tokens = doc.tokens();

    for span in doc.match_pattern(&pattern, None)? {
        check_match(&span, tokens.len())?;
        let honorific = &tokens[span.start].text;
        let Some(gender) = lexicon.title_gender(honorific) else {
            continue;
        };
        let run = doc.span_text(span.start + 1..span.end)?;
        let titled = format!("{honorific} {run}");
        for key in [run.as_str(), titled.as_str()] {
            if let Some(id) = store.id_of(key) {
                votes[id.index()].cast(gender);
            }
        }
    }
    Ok(votes)
}
