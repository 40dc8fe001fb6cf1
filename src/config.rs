//! Configuration for character identification.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Full-token honorific pattern: "M", then "r" or "i", up to two "s", optional period.
pub const DEFAULT_HONORIFIC_PATTERN: &str = r"^M[ri]s{0,2}\.?$";

/// How the referent candidate relation is treated during unification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentSymmetry {
    /// Close candidates under reversal; contested links must be accepted
    /// from both ends.
    #[default]
    Symmetric,
    /// Use candidate pairs exactly as generated (name → referent).
    Directed,
}

/// Configuration for [`CharacterIdentification`](crate::CharacterIdentification).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentificationConfig {
    /// Entity labels treated as person spans.
    pub person_labels: Vec<String>,
    /// Regex a token must fully match to count as an honorific for title votes.
    pub honorific_pattern: String,
    /// Pronouns counted as masculine evidence (matched case-insensitively).
    pub male_pronouns: Vec<String>,
    /// Pronouns counted as feminine evidence (matched case-insensitively).
    pub female_pronouns: Vec<String>,
    /// Treatment of the candidate relation.
    pub referent_symmetry: ReferentSymmetry,
    /// Keep names sharing a surname apart when their first names differ.
    pub shared_surname_exclusion: bool,
    /// Run the first/last name correspondence pass after referent unification.
    pub cross_name_pass: bool,
}

impl Default for IdentificationConfig {
    fn default() -> Self {
        Self {
            person_labels: vec!["PERSON".to_string(), "PER".to_string()],
            honorific_pattern: DEFAULT_HONORIFIC_PATTERN.to_string(),
            male_pronouns: ["he", "his", "him", "himself"].map(String::from).to_vec(),
            female_pronouns: ["she", "her", "hers", "herself"].map(String::from).to_vec(),
            referent_symmetry: ReferentSymmetry::default(),
            shared_surname_exclusion: true,
            cross_name_pass: true,
        }
    }
}

impl IdentificationConfig {
    /// Parse a configuration from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the referent symmetry mode.
    #[must_use]
    pub fn with_referent_symmetry(mut self, symmetry: ReferentSymmetry) -> Self {
        self.referent_symmetry = symmetry;
        self
    }

    /// Enable or disable the shared-surname exclusion.
    #[must_use]
    pub fn with_shared_surname_exclusion(mut self, enabled: bool) -> Self {
        self.shared_surname_exclusion = enabled;
        self
    }

    /// Enable or disable the cross-name correspondence pass.
    #[must_use]
    pub fn with_cross_name_pass(mut self, enabled: bool) -> Self {
        self.cross_name_pass = enabled;
        self
    }

    /// Replace the honorific pattern.
    #[must_use]
    pub fn with_honorific_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.honorific_pattern = pattern.into();
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.person_labels.is_empty() {
            return Err(Error::config("person_labels must not be empty"));
        }
        self.honorific_regex().map(|_| ())
    }

    /// Compile the honorific pattern.
    pub fn honorific_regex(&self) -> Result<Regex> {
        Regex::new(&self.honorific_pattern).map_err(|e| {
            Error::config(format!(
                "invalid honorific pattern '{}': {e}",
                self.honorific_pattern
            ))
        })
    }

    /// Whether `label` names a person span.
    #[must_use]
    pub fn is_person_label(&self, label: &str) -> bool {
        self.person_labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}
