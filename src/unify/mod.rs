//! Unification: merging the name-strings of one character into a group.
//!
//! # Passes
//!
//! 1. Referent candidates from a [`ReferentGenerator`], resolved to ids
//! 2. [`filter`]: drop pairs with conflicting genders or honorifics
//! 3. [`contested`]: a referent claimed by several names joins only the most
//!    frequent claimant
//! 4. [`correspondence`]: names sharing a first or last name join their most
//!    frequent partner
//!
//! All unions land in one [`CharacterGrouping`], so the final partition does
//! not depend on the order unions are applied in.

pub mod contested;
pub mod correspondence;
pub mod filter;

use crate::config::IdentificationConfig;
use crate::error::{Error, Result};
use crate::referents::ReferentGenerator;
use dramatis_core::{CharacterId, CharacterStore, Partition};
use std::collections::{BTreeSet, HashMap};

pub use contested::{most_frequent, resolve_referents};
pub use correspondence::{correspondence_links, names_correspond};
pub use filter::{candidate_links, filter_candidates, violates_constraints, Candidates};

/// Union-find over name-strings, backed by dense indices.
#[derive(Debug, Clone)]
pub struct CharacterGrouping {
    names: Vec<String>,
    index: HashMap<String, usize>,
    partition: Partition,
}

impl CharacterGrouping {
    /// One singleton group per name. Duplicate names are rejected.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::invalid_input(format!("duplicate name '{name}'")));
            }
        }
        let partition = Partition::new(names.len());
        Ok(Self {
            names,
            index,
            partition,
        })
    }

    /// Grouping over every name in `store`; indices equal character ids.
    pub fn from_store(store: &CharacterStore) -> Result<Self> {
        Self::new(store.names())
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::invariant(format!("'{name}' is not part of the grouping")))
    }

    /// Merge the groups of `a` and `b`.
    pub fn unite(&mut self, a: &str, b: &str) -> Result<()> {
        let (a, b) = (self.require(a)?, self.require(b)?);
        self.partition.unite(a, b)?;
        Ok(())
    }

    /// Merge the groups of two characters by id.
    pub fn unite_ids(&mut self, a: CharacterId, b: CharacterId) -> Result<()> {
        self.partition.unite(a.index(), b.index())?;
        Ok(())
    }

    /// Whether `a` and `b` are in one group.
    pub fn same_group(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.partition.same_group(self.require(a)?, self.require(b)?)?)
    }

    /// Groups of member indices, ordered by earliest member.
    #[must_use]
    pub fn index_groups(&self) -> Vec<Vec<usize>> {
        self.partition.groups()
    }

    /// The partition as sets of names, ordered by earliest member.
    ///
    /// Sets are disjoint and together contain every name exactly once.
    #[must_use]
    pub fn groups(&self) -> Vec<BTreeSet<String>> {
        self.partition
            .groups()
            .into_iter()
            .map(|g| g.into_iter().map(|i| self.names[i].clone()).collect())
            .collect()
    }
}

/// Group the characters of an annotated store.
///
/// Fails with a state error if gender annotation has not run.
pub fn unify_occurrences(
    store: &CharacterStore,
    generator: &dyn ReferentGenerator,
    config: &IdentificationConfig,
) -> Result<Vec<BTreeSet<String>>> {
    Ok(unify(store, generator, config)?.groups())
}

/// Like [`unify_occurrences`], returning the grouping itself.
pub fn unify(
    store: &CharacterStore,
    generator: &dyn ReferentGenerator,
    config: &IdentificationConfig,
) -> Result<CharacterGrouping> {
    if !store.is_annotated() {
        return Err(Error::state(
            "unification requires gender annotation; run annotate_gender first",
        ));
    }
    let names: Vec<&str> = store.names().collect();
    let referents = generator.referents(&names)?;

    let mut candidates = candidate_links(store, &referents, config.referent_symmetry)?;
    let removed = filter_candidates(store, &mut candidates)?;
    log::debug!("unify: {removed} candidate pairs excluded by gender/title");

    let mut grouping = CharacterGrouping::from_store(store)?;
    for (a, b) in resolve_referents(store, &candidates, config.referent_symmetry)? {
        grouping.unite_ids(a, b)?;
    }
    if config.cross_name_pass {
        for (a, b) in correspondence_links(store, config.shared_surname_exclusion)? {
            grouping.unite_ids(a, b)?;
        }
    }

    log::info!(
        "unify: {} names in {} character groups",
        store.len(),
        grouping.partition.group_count()
    );
    Ok(grouping)
}
