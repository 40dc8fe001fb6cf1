//! Linking distinct names that share a first or last name.

use super::contested::most_frequent;
use crate::error::Result;
use dramatis_core::{CharacterEntity, CharacterId, CharacterStore, NameParts};

fn same_nonempty(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

/// Whether two parsed names share a first or last name.
///
/// With `surname_exclusion`, a shared last name does not count when both
/// first names are present and differ ("Sherlock Holmes" / "Mycroft Holmes").
#[must_use]
pub fn names_correspond(a: &NameParts, b: &NameParts, surname_exclusion: bool) -> bool {
    if same_nonempty(&a.first, &b.first) {
        return true;
    }
    if !same_nonempty(&a.last, &b.last) {
        return false;
    }
    let different_firsts = !a.first.is_empty() && !b.first.is_empty() && a.first != b.first;
    !(surname_exclusion && different_firsts)
}

fn comparable(a: &CharacterEntity, b: &CharacterEntity) -> bool {
    a.gender() == b.gender() && !a.name_parsed().title_conflicts_with(b.name_parsed())
}

/// Mutual correspondences per character, partners in discovery order.
///
/// Names with two or more empty components are never compared. Genders must
/// be equal as values, so `Unknown` pairs only with `Unknown`.
pub fn correspondences(
    store: &CharacterStore,
    surname_exclusion: bool,
) -> Vec<Vec<CharacterId>> {
    let entities: Vec<(CharacterId, &CharacterEntity)> = store
        .iter()
        .filter(|(_, e)| e.name_parsed().empty_fields() < 2)
        .collect();
    let mut partners = vec![Vec::new(); store.len()];
    for (i, &(a, ea)) in entities.iter().enumerate() {
        for &(b, eb) in &entities[i + 1..] {
            if comparable(ea, eb)
                && names_correspond(ea.name_parsed(), eb.name_parsed(), surname_exclusion)
            {
                partners[a.index()].push(b);
                partners[b.index()].push(a);
            }
        }
    }
    partners
}

/// One union per character with correspondences: to its most frequent partner.
pub fn correspondence_links(
    store: &CharacterStore,
    surname_exclusion: bool,
) -> Result<Vec<(CharacterId, CharacterId)>> {
    let partners = correspondences(store, surname_exclusion);
    let mut links = Vec::new();
    for (i, list) in partners.iter().enumerate() {
        if let Some(best) = most_frequent(store, list)? {
            links.push((CharacterId(i), best));
        }
    }
    Ok(links)
}
