//! # dramatis
//!
//! Character identification for narrative text.
//!
//! - **Detection**: person spans from an external NER pass, honorifics attached
//! - **Gender**: honorific, first-name list and pronoun evidence, fused
//! - **Unification**: alias candidates filtered by gender/honorific conflicts,
//!   contested aliases resolved by frequency, names grouped by union-find
//!
//! ## Quick Start
//!
//! ```rust
//! use dramatis::{identify_characters, AnalyzedDocument, EntitySpan, IdentificationConfig,
//!     Lexicon, PartOfSpeech, Token};
//!
//! let words = ["Mrs.", "Hudson", "said", "she", "was", "tired", "."];
//! let tokens = words.iter().map(|w| Token::new(*w, PartOfSpeech::Other)).collect();
//! let doc = AnalyzedDocument::new(tokens, vec![0..7], vec![EntitySpan::new("PERSON", 1, 2)])?;
//!
//! let roster = identify_characters(&doc, Lexicon::default(), IdentificationConfig::default())?;
//! assert_eq!(roster[0].canonical, "Mrs. Hudson");
//! # Ok::<(), dramatis::Error>(())
//! ```
//!
//! ## Phases
//!
//! | Phase | Function | Input | Output |
//! |-------|----------|-------|--------|
//! | detect | [`detect_characters`] | analysis context | `CharacterStore` |
//! | annotate | [`annotate_gender`] | detected store | annotated store |
//! | unify | [`unify_occurrences`] | annotated store | character groups |
//!
//! Each phase consumes the previous phase's output. The linguistic analysis
//! itself (tokens, sentences, tags, entity spans) is supplied by the caller
//! through [`LinguisticAnalysis`].

#![warn(missing_docs)]

pub mod analysis;
pub mod config;
mod detect;
mod error;
pub mod gender;
mod identification;
pub mod lexicon;
mod name;
pub mod referents;
pub mod unify;

pub use analysis::{
    AnalyzedDocument, EntitySpan, LinguisticAnalysis, PartOfSpeech, Token, TokenPattern,
    TokenPredicate,
};
pub use config::{IdentificationConfig, ReferentSymmetry};
pub use detect::detect_characters;
pub use error::{Error, Result};
pub use gender::{annotate_gender, estimate_genders, fuse, GenderEvidence};
pub use identification::{identify_characters, CharacterGroup, CharacterIdentification};
pub use lexicon::{GenderedSets, Lexicon, ReferenceData};
pub use name::parse_name;
pub use referents::{ReferentGenerator, ReferentMap, ShapeReferentGenerator};
pub use unify::{unify_occurrences, CharacterGrouping};

pub use dramatis_core::{CharacterEntity, CharacterId, CharacterStore, Gender, NameParts};
