//! Name-list evidence.

use crate::lexicon::Lexicon;
use dramatis_core::{CharacterEntity, Gender};

/// Gender of the character's first name according to the reference lists.
#[must_use]
pub fn name_list_gender(entity: &CharacterEntity, lexicon: &Lexicon) -> Gender {
    let first = &entity.name_parsed().first;
    if first.is_empty() {
        return Gender::Unknown;
    }
    lexicon.first_name_gender(first)
}
