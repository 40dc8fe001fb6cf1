//! Referents claimed by several names go to the most frequent claimant.

use super::filter::Candidates;
use crate::config::ReferentSymmetry;
use crate::error::Result;
use dramatis_core::{CharacterId, CharacterStore};
use std::collections::BTreeSet;

/// The claimant with strictly the most occurrences; the earliest wins ties.
pub fn most_frequent(store: &CharacterStore, claimants: &[CharacterId]) -> Result<Option<CharacterId>> {
    let mut best: Option<(CharacterId, usize)> = None;
    for &c in claimants {
        let count = store.entity(c)?.occurrence_count();
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((c, count)),
        }
    }
    Ok(best.map(|(c, _)| c))
}

/// Invert candidates into referent → claimants, claimants in id order.
#[must_use]
pub fn claimants_by_referent(candidates: &Candidates) -> Vec<Vec<CharacterId>> {
    let mut claimants = vec![Vec::new(); candidates.len()];
    for (i, refs) in candidates.iter().enumerate() {
        for r in refs {
            claimants[r.index()].push(CharacterId(i));
        }
    }
    claimants
}

/// Decide which filtered candidate links become unions.
///
/// A contested referent is always united with [`most_frequent`] of its
/// claimants. Under [`ReferentSymmetry::Directed`] a referent with a single
/// claimant is united with it unconditionally. Under
/// [`ReferentSymmetry::Symmetric`] a sole claim survives only if the claimant,
/// taken as a referent, keeps the claim's referent in return, so an ambiguous
/// short name is attached to exactly one of its full forms.
pub fn resolve_referents(
    store: &CharacterStore,
    candidates: &Candidates,
    symmetry: ReferentSymmetry,
) -> Result<Vec<(CharacterId, CharacterId)>> {
    let claimants = claimants_by_referent(candidates);
    let mut accepted: Vec<Vec<CharacterId>> = Vec::with_capacity(claimants.len());
    let mut contested = 0usize;
    for list in &claimants {
        if list.len() > 1 {
            contested += 1;
            accepted.push(most_frequent(store, list)?.into_iter().collect());
        } else {
            accepted.push(list.clone());
        }
    }
    log::debug!("resolve_referents: {contested} contested referents");

    let mut links = Vec::new();
    match symmetry {
        ReferentSymmetry::Directed => {
            for (r, kept) in accepted.iter().enumerate() {
                links.extend(kept.iter().map(|&c| (c, CharacterId(r))));
            }
        }
        ReferentSymmetry::Symmetric => {
            let mut unique = BTreeSet::new();
            for (r, list) in claimants.iter().enumerate() {
                let r = CharacterId(r);
                let Some(&c) = accepted[r.index()].first() else {
                    continue;
                };
                if list.len() > 1 || accepted[c.index()].contains(&r) {
                    unique.insert((c.min(r), c.max(r)));
                }
            }
            links.extend(unique);
        }
    }
    Ok(links)
}
