//! # dramatis-core
//!
//! Core types for the dramatis toolbox: the data model shared by detection,
//! gender annotation and unification.
//!
//! This crate provides:
//! - **Characters**: `CharacterEntity`, `CharacterId`, `Gender`, `NameParts`
//! - **Store**: `CharacterStore`, the first-seen ordered name to entity map
//! - **Partition**: `Partition`, a dense union-find used for final grouping

#![warn(missing_docs)]

pub mod character;
pub mod error;
pub mod partition;
pub mod store;

pub use character::{CharacterEntity, CharacterId, Gender, NameParts};
pub use error::{Error, Result};
pub use partition::Partition;
pub use store::CharacterStore;
