//! Character entities: one detected name-string and everything known about it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Probable gender of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    /// Masculine evidence dominates.
    Male,
    /// Feminine evidence dominates.
    Female,
    /// No usable evidence, or evidence that cancels out.
    #[default]
    Unknown,
}

impl Gender {
    /// Returns true unless this is [`Gender::Unknown`].
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Gender::Unknown)
    }

    /// True when both genders are known and differ.
    ///
    /// `Unknown` never conflicts with anything.
    #[must_use]
    pub fn conflicts_with(self, other: Gender) -> bool {
        self.is_known() && other.is_known() && self != other
    }

    /// Standard upper-case label.
    #[must_use]
    pub fn as_label(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A name split into honorific, first and last components.
///
/// Empty strings mark absent components. `title` is stored normalized
/// (lower-case, trailing period removed) so that "Mr." and "mr" compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameParts {
    /// Normalized honorific, e.g. `"mrs"`.
    pub title: String,
    /// First remaining token after the honorific.
    pub first: String,
    /// Last remaining token, empty when only one token remains.
    pub last: String,
}

impl NameParts {
    /// Create name parts from already-separated components.
    #[must_use]
    pub fn new(title: impl Into<String>, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            first: first.into(),
            last: last.into(),
        }
    }

    /// Number of empty components among title, first and last.
    #[must_use]
    pub fn empty_fields(&self) -> usize {
        [&self.title, &self.first, &self.last]
            .iter()
            .filter(|s| s.is_empty())
            .count()
    }

    /// True when both names carry an honorific and the honorifics differ.
    #[must_use]
    pub fn title_conflicts_with(&self, other: &NameParts) -> bool {
        !self.title.is_empty() && !other.title.is_empty() && self.title != other.title
    }
}

/// Dense identity of a character: its index in the [`CharacterStore`](crate::CharacterStore).
///
/// Ids follow first-seen order in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

impl CharacterId {
    /// The underlying dense index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One detected name-string as it appears verbatim in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterEntity {
    name: String,
    occurrences: Vec<usize>,
    name_parsed: NameParts,
    gender: Option<Gender>,
}

impl CharacterEntity {
    /// Create an entity at its first sighting.
    #[must_use]
    pub fn new(name: impl Into<String>, name_parsed: NameParts, first_occurrence: usize) -> Self {
        Self {
            name: name.into(),
            occurrences: vec![first_occurrence],
            name_parsed,
            gender: None,
        }
    }

    /// Canonical name-string (may include a leading honorific).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token positions of every sighting, in detection order. Never empty.
    #[must_use]
    pub fn occurrences(&self) -> &[usize] {
        &self.occurrences
    }

    /// Number of sightings.
    #[must_use]
    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Parsed name components.
    #[must_use]
    pub fn name_parsed(&self) -> &NameParts {
        &self.name_parsed
    }

    /// Assigned gender, `Unknown` until annotation has run.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender.unwrap_or_default()
    }

    /// Whether gender annotation has written this entity.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.gender.is_some()
    }

    /// Record another sighting.
    pub fn push_occurrence(&mut self, position: usize) {
        self.occurrences.push(position);
    }

    /// Write the gender. Fails if it was already written.
    pub fn assign_gender(&mut self, gender: Gender) -> Result<()> {
        if let Some(previous) = self.gender {
            return Err(Error::state(format!(
                "gender of '{}' already assigned ({previous})",
                self.name
            )));
        }
        self.gender = Some(gender);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_never_conflicts() {
        assert!(!Gender::Unknown.conflicts_with(Gender::Male));
        assert!(!Gender::Female.conflicts_with(Gender::Unknown));
        assert!(!Gender::Male.conflicts_with(Gender::Male));
        assert!(Gender::Male.conflicts_with(Gender::Female));
    }

    #[test]
    fn empty_fields_counts_components() {
        assert_eq!(NameParts::new("", "", "").empty_fields(), 3);
        assert_eq!(NameParts::new("mr", "Holmes", "").empty_fields(), 1);
        assert_eq!(NameParts::new("", "Sherlock", "Holmes").empty_fields(), 1);
        assert_eq!(NameParts::new("", "Holmes", "").empty_fields(), 2);
    }

    #[test]
    fn title_conflict_requires_both_titles() {
        let mrs = NameParts::new("mrs", "Hudson", "");
        let miss = NameParts::new("miss", "Hudson", "");
        let bare = NameParts::new("", "Hudson", "");
        assert!(mrs.title_conflicts_with(&miss));
        assert!(!mrs.title_conflicts_with(&bare));
        assert!(!mrs.title_conflicts_with(&mrs.clone()));
    }

    #[test]
    fn gender_is_write_once() {
        let mut e = CharacterEntity::new("Watson", NameParts::new("", "Watson", ""), 3);
        assert!(!e.is_annotated());
        assert_eq!(e.gender(), Gender::Unknown);
        e.assign_gender(Gender::Male).unwrap();
        assert!(matches!(e.assign_gender(Gender::Female), Err(Error::State(_))));
        assert_eq!(e.gender(), Gender::Male);
    }

    #[test]
    fn gender_serializes_upper_case() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"FEMALE\"");
    }
}
