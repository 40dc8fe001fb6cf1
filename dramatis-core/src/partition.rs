//! Disjoint-set partition over dense indices.

use crate::error::{Error, Result};

/// Union-find over `0..len` with path compression and union by size.
///
/// Every element belongs to exactly one group. Merges are monotonic and the
/// final partition depends only on the set of unions performed.
#[derive(Debug, Clone)]
pub struct Partition {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl Partition {
    /// One singleton group per element.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True for a partition of the empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn check(&self, i: usize) -> Result<()> {
        if i < self.parent.len() {
            Ok(())
        } else {
            Err(Error::invariant(format!(
                "index {i} outside partition of {}",
                self.parent.len()
            )))
        }
    }

    /// Representative of the group containing `i`, compressing the path.
    pub fn find(&mut self, i: usize) -> Result<usize> {
        self.check(i)?;
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        Ok(root)
    }

    fn root(&self, mut i: usize) -> usize {
        while self.parent[i] != i {
            i = self.parent[i];
        }
        i
    }

    /// Merge the groups containing `a` and `b`.
    ///
    /// Returns whether two distinct groups were merged.
    pub fn unite(&mut self, a: usize, b: usize) -> Result<bool> {
        let ra = self.find(a)?;
        let rb = self.find(b)?;
        if ra == rb {
            return Ok(false);
        }
        // Larger group absorbs; equal sizes keep the lower index as root.
        let (keep, absorb) = match self.size[ra].cmp(&self.size[rb]) {
            std::cmp::Ordering::Greater => (ra, rb),
            std::cmp::Ordering::Less => (rb, ra),
            std::cmp::Ordering::Equal => (ra.min(rb), ra.max(rb)),
        };
        self.parent[absorb] = keep;
        self.size[keep] += self.size[absorb];
        Ok(true)
    }

    /// Whether `a` and `b` are in the same group.
    pub fn same_group(&self, a: usize, b: usize) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.root(a) == self.root(b))
    }

    /// The partition as groups of indices.
    ///
    /// Groups are ordered by their smallest member; members ascend.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut slot_of_root = vec![usize::MAX; self.parent.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..self.parent.len() {
            let r = self.root(i);
            if slot_of_root[r] == usize::MAX {
                slot_of_root[r] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot_of_root[r]].push(i);
        }
        groups
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        (0..self.parent.len()).filter(|&i| self.parent[i] == i).count()
    }
}
