//! Gender annotation from three weak signals.
//!
//! | Estimator | Signal | Strength |
//! |-----------|--------|----------|
//! | [`title`] | "Mrs." / "Mr." before the name | strong |
//! | [`names`] | first name in a reference list | strong |
//! | [`pronoun`] | he/she in the same sentence | weak |
//!
//! Pronouns are consulted only when the two strong signals fail to agree on
//! a known gender; they never override agreement.

pub mod names;
pub mod pronoun;
pub mod title;

use crate::analysis::LinguisticAnalysis;
use crate::config::IdentificationConfig;
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use dramatis_core::{CharacterId, CharacterStore, Gender};
use serde::Serialize;

pub use names::name_list_gender;
pub use pronoun::{pronoun_tallies, PronounTally};
pub use title::{title_votes, TitleVotes};

/// Per-character result of every estimator and their fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenderEvidence {
    /// Character the evidence belongs to
    pub id: CharacterId,
    /// Honorific estimate
    pub title: Gender,
    /// Name-list estimate
    pub name_list: Gender,
    /// Pronoun estimate
    pub pronoun: Gender,
    /// Fused gender
    pub fused: Gender,
}

/// Combine the three estimates.
///
/// Title and name-list agreeing on a known gender decide; any other
/// combination (both unknown, one unknown, or male against female) falls
/// back to the pronoun estimate.
#[must_use]
pub fn fuse(title: Gender, name_list: Gender, pronoun: Gender) -> Gender {
    if title.is_known() && title == name_list {
        title
    } else {
        pronoun
    }
}

/// Run every estimator over `store` without writing anything.
pub fn estimate_genders(
    store: &CharacterStore,
    doc: &dyn LinguisticAnalysis,
    lexicon: &Lexicon,
    config: &IdentificationConfig,
) -> Result<Vec<GenderEvidence>> {
    let votes = title_votes(store, doc, lexicon, config)?;
    let tallies = pronoun_tallies(store, doc, config)?;

    let evidence: Vec<GenderEvidence> = store
        .iter()
        .map(|(id, entity)| {
            let title = votes[id.index()].verdict();
            let name_list = name_list_gender(entity, lexicon);
            let pronoun = tallies[id.index()].verdict();
            GenderEvidence {
                id,
                title,
                name_list,
                pronoun,
                fused: fuse(title, name_list, pronoun),
            }
        })
        .collect();

    for e in &evidence {
        log::debug!(
            "gender {}: title={} names={} pronouns={} -> {}",
            e.id,
            e.title,
            e.name_list,
            e.pronoun,
            e.fused
        );
    }
    Ok(evidence)
}

/// Write the fused gender of every character.
///
/// Consumes the detected store and returns it annotated. Annotating a store
/// twice is a state error.
pub fn annotate_gender(
    mut store: CharacterStore,
    doc: &dyn LinguisticAnalysis,
    lexicon: &Lexicon,
    config: &IdentificationConfig,
) -> Result<CharacterStore> {
    if store.is_annotated() || store.iter().any(|(_, e)| e.is_annotated()) {
        return Err(Error::state("gender annotation has already run on this store"));
    }
    for e in estimate_genders(&store, doc, lexicon, config)? {
        store.entity_mut(e.id)?.assign_gender(e.fused)?;
    }
    store.mark_annotated();
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Gender::*;

    #[test]
    fn agreement_wins_over_pronouns() {
        assert_eq!(fuse(Female, Female, Male), Female);
        assert_eq!(fuse(Male, Male, Female), Male);
    }

    #[test]
    fn omission_falls_back_to_pronouns() {
        assert_eq!(fuse(Female, Unknown, Male), Male);
        assert_eq!(fuse(Unknown, Male, Female), Female);
        assert_eq!(fuse(Female, Unknown, Unknown), Unknown);
    }

    #[test]
    fn disagreement_falls_back_to_pronouns() {
        assert_eq!(fuse(Female, Male, Unknown), Unknown);
        assert_eq!(fuse(Male, Female, Female), Female);
    }

    #[test]
    fn no_evidence_is_unknown() {
        assert_eq!(fuse(Unknown, Unknown, Unknown), Unknown);
    }
}
