//! Phase-tracking front end over detection, annotation and unification.

use crate::analysis::LinguisticAnalysis;
use crate::config::IdentificationConfig;
use crate::detect::detect_characters;
use crate::error::{Error, Result};
use crate::gender::annotate_gender;
use crate::lexicon::Lexicon;
use crate::referents::{ReferentGenerator, ShapeReferentGenerator};
use crate::unify::{unify, CharacterGrouping};
use dramatis_core::{CharacterStore, Gender};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Detected,
    Annotated,
    Unified,
}

/// One character in the final roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterGroup {
    /// Most frequent member name (earliest on ties)
    pub canonical: String,
    /// Member names in first-seen order
    pub names: Vec<String>,
    /// Every occurrence of every member, sorted
    pub occurrences: Vec<usize>,
    /// Gender of the canonical member
    pub gender: Gender,
}

/// Character identification for one analyzed document.
///
/// Phases must run in order: [`detect_characters`](Self::detect_characters),
/// [`annotate_gender`](Self::annotate_gender), then
/// [`unify_occurrences`](Self::unify_occurrences). Calling a phase early is
/// a state error. Re-running detection starts over.
///
/// # Example
///
/// ```rust
/// use dramatis::{AnalyzedDocument, CharacterIdentification, EntitySpan, IdentificationConfig,
///     Lexicon, PartOfSpeech, Token};
///
/// let words = ["Mr.", "Holmes", "met", "Sherlock", "Holmes", "."];
/// let tokens = words.iter().map(|w| Token::new(*w, PartOfSpeech::ProperNoun)).collect();
/// let doc = AnalyzedDocument::new(
///     tokens,
///     vec![0..6],
///     vec![EntitySpan::new("PERSON", 1, 2), EntitySpan::new("PERSON", 3, 5)],
/// )?;
///
/// let lexicon = Lexicon::default();
/// let mut ci = CharacterIdentification::new(&doc, lexicon, IdentificationConfig::default())?;
/// ci.detect_characters()?;
/// ci.annotate_gender()?;
/// let groups = ci.unify_occurrences()?;
/// assert_eq!(groups.len(), 1);
/// # Ok::<(), dramatis::Error>(())
/// ```
pub struct CharacterIdentification<'d> {
    doc: &'d dyn LinguisticAnalysis,
    lexicon: Lexicon,
    config: IdentificationConfig,
    phase: Phase,
    store: CharacterStore,
    grouping: Option<CharacterGrouping>,
}

impl std::fmt::Debug for CharacterIdentification<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterIdentification")
            .field("phase", &self.phase)
            .field("characters", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl<'d> CharacterIdentification<'d> {
    /// Prepare identification over `doc`. The configuration is validated here.
    pub fn new(
        doc: &'d dyn LinguisticAnalysis,
        lexicon: Lexicon,
        config: IdentificationConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            doc,
            lexicon,
            config,
            phase: Phase::Pending,
            store: CharacterStore::new(),
            grouping: None,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &IdentificationConfig {
        &self.config
    }

    /// The character store as of the last completed phase.
    #[must_use]
    pub fn characters(&self) -> &CharacterStore {
        &self.store
    }

    /// Detect person names and build the store.
    pub fn detect_characters(&mut self) -> Result<&CharacterStore> {
        let store = detect_characters(self.doc, &self.lexicon, &self.config)?;
        self.store = store;
        self.grouping = None;
        self.phase = Phase::Detected;
        Ok(&self.store)
    }

    /// Assign a gender to every detected character.
    pub fn annotate_gender(&mut self) -> Result<&CharacterStore> {
        match self.phase {
            Phase::Pending => {
                return Err(Error::state(
                    "characters have not been detected; run detect_characters first",
                ))
            }
            Phase::Annotated | Phase::Unified => {
                return Err(Error::state("gender annotation has already run"))
            }
            Phase::Detected => {}
        }
        let annotated = annotate_gender(self.store.clone(), self.doc, &self.lexicon, &self.config)?;
        self.store = annotated;
        self.phase = Phase::Annotated;
        Ok(&self.store)
    }

    /// Group names with the default shape-based referent generator.
    pub fn unify_occurrences(&mut self) -> Result<Vec<BTreeSet<String>>> {
        let lexicon = self.lexicon.clone();
        self.unify_occurrences_with(&ShapeReferentGenerator::new(&lexicon))
    }

    /// Group names using `generator` for referent candidates.
    pub fn unify_occurrences_with(
        &mut self,
        generator: &dyn ReferentGenerator,
    ) -> Result<Vec<BTreeSet<String>>> {
        if matches!(self.phase, Phase::Pending | Phase::Detected) {
            return Err(Error::state(
                "gender has not been annotated; run annotate_gender first",
            ));
        }
        let grouping = unify(&self.store, generator, &self.config)?;
        let groups = grouping.groups();
        self.grouping = Some(grouping);
        self.phase = Phase::Unified;
        Ok(groups)
    }

    /// Summarize the unified groups.
    pub fn roster(&self) -> Result<Vec<CharacterGroup>> {
        let grouping = self
            .grouping
            .as_ref()
            .ok_or_else(|| Error::state("roster requires unify_occurrences to have run"))?;
        build_roster(&self.store, grouping)
    }
}

fn build_roster(store: &CharacterStore, grouping: &CharacterGrouping) -> Result<Vec<CharacterGroup>> {
    let mut roster = Vec::new();
    for members in grouping.index_groups() {
        let mut canonical: Option<(usize, usize)> = None;
        let mut names = Vec::with_capacity(members.len());
        let mut occurrences = Vec::new();
        for &i in &members {
            let entity = store.entity(dramatis_core::CharacterId(i))?;
            names.push(entity.name().to_string());
            occurrences.extend_from_slice(entity.occurrences());
            match canonical {
                Some((_, top)) if entity.occurrence_count() <= top => {}
                _ => canonical = Some((i, entity.occurrence_count())),
            }
        }
        let Some((canonical, _)) = canonical else {
            continue;
        };
        let head = store.entity(dramatis_core::CharacterId(canonical))?;
        occurrences.sort_unstable();
        roster.push(CharacterGroup {
            canonical: head.name().to_string(),
            names,
            occurrences,
            gender: head.gender(),
        });
    }
    Ok(roster)
}

/// Run every phase over `doc` and return the roster.
pub fn identify_characters(
    doc: &dyn LinguisticAnalysis,
    lexicon: Lexicon,
    config: IdentificationConfig,
) -> Result<Vec<CharacterGroup>> {
    let mut ci = CharacterIdentification::new(doc, lexicon, config)?;
    ci.detect_characters()?;
    ci.annotate_gender()?;
    ci.unify_occurrences()?;
    ci.roster()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalyzedDocument, EntitySpan, PartOfSpeech, Token};

    fn doc() -> AnalyzedDocument {
        let words = ["Watson", "wrote", ".", "Watson", "slept", "."];
        AnalyzedDocument::new(
            words
                .iter()
                .map(|w| Token::new(*w, PartOfSpeech::ProperNoun))
                .collect(),
            vec![0..3, 3..6],
            vec![EntitySpan::new("PERSON", 0, 1), EntitySpan::new("PERSON", 3, 4)],
        )
        .unwrap()
    }

    #[test]
    fn phases_out_of_order_are_state_errors() {
        let d = doc();
        let mut ci =
            CharacterIdentification::new(&d, Lexicon::default(), IdentificationConfig::default())
                .unwrap();
        assert!(matches!(ci.annotate_gender(), Err(Error::State(_))));
        assert!(matches!(ci.unify_occurrences(), Err(Error::State(_))));
        ci.detect_characters().unwrap();
        assert!(matches!(ci.unify_occurrences(), Err(Error::State(_))));
        assert!(matches!(ci.roster(), Err(Error::State(_))));
        ci.annotate_gender().unwrap();
        assert!(matches!(ci.annotate_gender(), Err(Error::State(_))));
        assert_eq!(ci.unify_occurrences().unwrap().len(), 1);
    }

    #[test]
    fn roster_merges_occurrences() {
        let d = doc();
        let roster =
            identify_characters(&d, Lexicon::default(), IdentificationConfig::default()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].canonical, "Watson");
        assert_eq!(roster[0].occurrences, vec![0, 3]);
        assert_eq!(roster[0].gender, Gender::Unknown);
    }

    #[test]
    fn redetecting_resets_progress() {
        let d = doc();
        let mut ci =
            CharacterIdentification::new(&d, Lexicon::default(), IdentificationConfig::default())
                .unwrap();
        ci.detect_characters().unwrap();
        ci.annotate_gender().unwrap();
        ci.detect_characters().unwrap();
        assert!(!ci.characters().is_annotated());
        assert!(matches!(ci.unify_occurrences(), Err(Error::State(_))));
    }
}
