//! The character store: canonical name-string to [`CharacterEntity`].

use crate::character::{CharacterEntity, CharacterId, NameParts};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Dense store of characters in first-seen order.
///
/// Entities live in a `Vec` indexed by [`CharacterId`]; the name map only
/// resolves name-strings to ids. Keys are unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterStore {
    entities: Vec<CharacterEntity>,
    #[serde(skip)]
    by_name: HashMap<String, CharacterId>,
    #[serde(skip)]
    annotated: bool,
}

impl CharacterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sighting of `name` at token `position`.
    ///
    /// The first sighting creates the entity, parsing the name with `parse`;
    /// later sightings only append the position.
    pub fn record_sighting<F>(&mut self, name: &str, position: usize, parse: F) -> CharacterId
    where
        F: FnOnce(&str) -> NameParts,
    {
        self.annotated = false;
        if let Some(&id) = self.by_name.get(name) {
            self.entities[id.0].push_occurrence(position);
            return id;
        }
        let id = CharacterId(self.entities.len());
        self.entities
            .push(CharacterEntity::new(name, parse(name), position));
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if no character has been detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an id by name-string.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<CharacterId> {
        self.by_name.get(name).copied()
    }

    /// Look up an entity by name-string.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CharacterEntity> {
        self.id_of(name).map(|id| &self.entities[id.0])
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<&CharacterEntity> {
        self.entities.get(id.0)
    }

    /// Like [`id_of`](Self::id_of), but an absent name is an invariant violation.
    pub fn require(&self, name: &str) -> Result<CharacterId> {
        self.id_of(name)
            .ok_or_else(|| Error::invariant(format!("character '{name}' is not in the store")))
    }

    /// Like [`get`](Self::get), but an absent id is an invariant violation.
    pub fn entity(&self, id: CharacterId) -> Result<&CharacterEntity> {
        self.entities
            .get(id.0)
            .ok_or_else(|| Error::invariant(format!("character {id} is not in the store")))
    }

    /// Mutable access by id, for the single gender write.
    pub fn entity_mut(&mut self, id: CharacterId) -> Result<&mut CharacterEntity> {
        self.entities
            .get_mut(id.0)
            .ok_or_else(|| Error::invariant(format!("character {id} is not in the store")))
    }

    /// Iterate `(id, entity)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (CharacterId, &CharacterEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (CharacterId(i), e))
    }

    /// Name-strings in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(CharacterEntity::name)
    }

    /// Record that gender annotation ran over the whole store.
    ///
    /// Any later sighting clears the mark.
    pub fn mark_annotated(&mut self) {
        self.annotated = true;
    }

    /// True once annotation has been marked, or every entity of a non-empty
    /// store has had its gender written. An empty, unmarked store is not
    /// annotated.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.annotated
            || (!self.entities.is_empty()
                && self.entities.iter().all(CharacterEntity::is_annotated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(name: &str) -> NameParts {
        NameParts::new("", name, "")
    }

    #[test]
    fn repeat_sightings_append_occurrences() {
        let mut store = CharacterStore::new();
        let a = store.record_sighting("Holmes", 4, parts);
        let b = store.record_sighting("Watson", 9, parts);
        let c = store.record_sighting("Holmes", 20, parts);
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).unwrap().occurrences(), &[4, 20]);
    }

    #[test]
    fn ids_follow_first_seen_order() {
        let mut store = CharacterStore::new();
        for (i, name) in ["Irene Adler", "Lestrade", "Irene Adler", "Moriarty"]
            .iter()
            .enumerate()
        {
            store.record_sighting(name, i, parts);
        }
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["Irene Adler", "Lestrade", "Moriarty"]);
        assert_eq!(store.id_of("Moriarty"), Some(CharacterId(2)));
    }

    #[test]
    fn missing_lookups_are_invariant_violations() {
        let store = CharacterStore::new();
        assert!(matches!(store.require("Nobody"), Err(Error::Invariant(_))));
        assert!(matches!(
            store.entity(CharacterId(0)),
            Err(Error::Invariant(_))
        ));
    }

    #[test]
    fn annotation_tracks_every_entity() {
        let mut store = CharacterStore::new();
        let a = store.record_sighting("Holmes", 0, parts);
        let b = store.record_sighting("Hudson", 1, parts);
        store.entity_mut(a).unwrap().assign_gender(crate::Gender::Male).unwrap();
        assert!(!store.is_annotated());
        store.entity_mut(b).unwrap().assign_gender(crate::Gender::Female).unwrap();
        assert!(store.is_annotated());
    }

    #[test]
    fn empty_store_is_annotated_only_when_marked() {
        let mut store = CharacterStore::new();
        assert!(!store.is_annotated());
        store.mark_annotated();
        assert!(store.is_annotated());
        store.record_sighting("Holmes", 0, parts);
        assert!(!store.is_annotated());
    }
}
