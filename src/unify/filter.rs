//! Candidate links between characters and the gender/title exclusions.

use crate::config::ReferentSymmetry;
use crate::error::Result;
use crate::referents::ReferentMap;
use dramatis_core::{CharacterEntity, CharacterId, CharacterStore};
use std::collections::BTreeSet;

/// Candidate referents per character, indexed by claimant id.
pub type Candidates = Vec<BTreeSet<CharacterId>>;

/// Whether two characters cannot be the same individual.
///
/// True when both genders are known and differ, or both carry an honorific
/// and the honorifics differ. The test is symmetric.
#[must_use]
pub fn violates_constraints(a: &CharacterEntity, b: &CharacterEntity) -> bool {
    a.gender().conflicts_with(b.gender()) || a.name_parsed().title_conflicts_with(b.name_parsed())
}

/// Resolve generated referents to ids.
///
/// Referents outside the store and self-references are dropped. Under
/// [`ReferentSymmetry::Symmetric`] every link is also recorded in reverse.
pub fn candidate_links(
    store: &CharacterStore,
    referents: &ReferentMap,
    symmetry: ReferentSymmetry,
) -> Result<Candidates> {
    let mut candidates: Candidates = vec![BTreeSet::new(); store.len()];
    let mut unknown = 0usize;

    for (id, entity) in store.iter() {
        let Some(refs) = referents.get(entity.name()) else {
            continue;
        };
        for r in refs {
            let Some(rid) = store.id_of(r) else {
                unknown += 1;
                continue;
            };
            if rid == id {
                continue;
            }
            candidates[id.index()].insert(rid);
            if symmetry == ReferentSymmetry::Symmetric {
                candidates[rid.index()].insert(id);
            }
        }
    }
    if unknown > 0 {
        log::warn!("dropped {unknown} referent candidates naming unknown characters");
    }
    Ok(candidates)
}

/// Remove every candidate pair that [`violates_constraints`].
///
/// Returns the number of pairs removed.
pub fn filter_candidates(store: &CharacterStore, candidates: &mut Candidates) -> Result<usize> {
    let mut removed = 0usize;
    for (i, refs) in candidates.iter_mut().enumerate() {
        let claimant = store.entity(CharacterId(i))?;
        let before = refs.len();
        let mut keep = BTreeSet::new();
        for &r in refs.iter() {
            if !violates_constraints(claimant, store.entity(r)?) {
                keep.insert(r);
            }
        }
        removed += before - keep.len();
        *refs = keep;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::name::parse_name;
    use dramatis_core::Gender;

    fn store(entries: &[(&str, Gender)]) -> CharacterStore {
        let lex = Lexicon::default();
        let mut store = CharacterStore::new();
        for (i, (name, gender)) in entries.iter().enumerate() {
            let id = store.record_sighting(name, i, |n| parse_name(n, &lex));
            store.entity_mut(id).unwrap().assign_gender(*gender).unwrap();
        }
        store
    }

    fn map(pairs: &[(&str, &[&str])]) -> ReferentMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn gender_conflict_drops_pair_even_with_matching_titles() {
        let s = store(&[("Miss Adler", Gender::Female), ("Miss Holmes", Gender::Male)]);
        let a = s.get(CharacterId(0)).unwrap();
        let b = s.get(CharacterId(1)).unwrap();
        assert!(violates_constraints(a, b));
        assert!(violates_constraints(b, a));
    }

    #[test]
    fn title_conflict_drops_pair() {
        let s = store(&[("Mrs. Hudson", Gender::Unknown), ("Miss Hudson", Gender::Unknown)]);
        assert!(violates_constraints(
            s.get(CharacterId(0)).unwrap(),
            s.get(CharacterId(1)).unwrap()
        ));
    }

    #[test]
    fn unknown_gender_and_missing_title_are_compatible() {
        let s = store(&[("Mr. Holmes", Gender::Male), ("Sherlock Holmes", Gender::Unknown)]);
        assert!(!violates_constraints(
            s.get(CharacterId(0)).unwrap(),
            s.get(CharacterId(1)).unwrap()
        ));
    }

    #[test]
    fn symmetric_links_are_mirrored() {
        let s = store(&[("Holmes", Gender::Male), ("Sherlock Holmes", Gender::Male)]);
        let refs = map(&[("Holmes", &["Sherlock Holmes", "Nobody", "Holmes"])]);
        let sym = candidate_links(&s, &refs, ReferentSymmetry::Symmetric).unwrap();
        assert!(sym[0].contains(&CharacterId(1)));
        assert!(sym[1].contains(&CharacterId(0)));
        assert_eq!(sym[0].len(), 1);

        let directed = candidate_links(&s, &refs, ReferentSymmetry::Directed).unwrap();
        assert!(directed[0].contains(&CharacterId(1)));
        assert!(directed[1].is_empty());
    }

    #[test]
    fn filter_removes_conflicting_pairs() {
        let s = store(&[
            ("Holmes", Gender::Unknown),
            ("Sherlock Holmes", Gender::Male),
            ("Miss Holmes", Gender::Female),
        ]);
        let refs = map(&[("Holmes", &["Sherlock Holmes", "Miss Holmes"])]);
        let mut c = candidate_links(&s, &refs, ReferentSymmetry::Symmetric).unwrap();
        let removed = filter_candidates(&s, &mut c).unwrap();
        assert_eq!(removed, 0);

        let refs = map(&[("Sherlock Holmes", &["Miss Holmes", "Holmes"])]);
        let mut c = candidate_links(&s, &refs, ReferentSymmetry::Symmetric).unwrap();
        let removed = filter_candidates(&s, &mut c).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(c[1], BTreeSet::from([CharacterId(0)]));
    }
}
