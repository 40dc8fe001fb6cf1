//! Detection: person spans to a [`CharacterStore`].

use crate::analysis::LinguisticAnalysis;
use crate::config::IdentificationConfig;
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::name::parse_name;
use dramatis_core::CharacterStore;

/// Build the character store from the person spans of `doc`.
///
/// A span directly preceded by a known honorific is keyed with that
/// honorific attached ("Mrs. Hudson"). Each span records its start token as
/// an occurrence; the store keeps first-seen order.
pub fn detect_characters(
    doc: &dyn LinguisticAnalysis,
    lexicon: &Lexicon,
    config: &IdentificationConfig,
) -> Result<CharacterStore> {
    config.validate()?;
    let tokens = doc.tokens();
    let mut store = CharacterStore::new();
    let mut spans = 0usize;

    for ent in doc.entities() {
        if !config.is_person_label(&ent.label) {
            continue;
        }
        if ent.start >= ent.end || ent.end > tokens.len() {
            return Err(Error::invalid_input(format!(
                "person span {}..{} outside document of {} tokens",
                ent.start,
                ent.end,
                tokens.len()
            )));
        }
        let text = doc.span_text(ent.start..ent.end)?;
        if text.is_empty() {
            continue;
        }
        let name = match ent.start.checked_sub(1).map(|i| &tokens[i].text) {
            Some(prev) if lexicon.is_title(prev) && !lexicon.is_title(&tokens[ent.start].text) => {
                format!("{prev} {text}")
            }
            _ => text,
        };
        store.record_sighting(&name, ent.start, |n| parse_name(n, lexicon));
        spans += 1;
    }

    log::debug!(
        "detect_characters: {} person spans, {} distinct names",
        spans,
        store.len()
    );
    Ok(store)
}
