//! Parent lookups for a single discovery batch.
//!
//! The runner reports its collection tree flattened: every node names its parent by id. `ParentMap` indexes one
//! batch's parents by id and walks a test's ancestor chain upward. The map borrows from its batch, so lookups can
//! never see ids from another batch.

use std::collections::HashMap;

use pytest_discovery_core::paths::file_stem;
use tracing::debug;

use super::model::{DiscoveryBatch, RawParent, RawTest};

/// Id-keyed index of the parents in one batch.
#[derive(Debug, Clone, Default)]
pub struct ParentMap<'a> {
    parents: HashMap<&'a str, &'a RawParent>,
}

impl<'a> ParentMap<'a> {
    /// Index every parent of `batch`. On duplicate ids the later entry wins.
    pub fn build(batch: &'a DiscoveryBatch) -> Self {
        let mut parents = HashMap::with_capacity(batch.parents.len());
        for parent in &batch.parents {
            if parents.insert(parent.id.as_str(), parent).is_some() {
                debug!(id = %parent.id, "duplicate parent id in batch; keeping the later entry");
            }
        }
        Self { parents }
    }

    pub fn get(&self, id: &str) -> Option<&'a RawParent> {
        self.parents.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Walk the ancestors of `test`, innermost first.
    ///
    /// The walk ends at the first id that has no entry, whether that is the root marker or a dangling reference.
    pub fn ancestors(&self, test: &RawTest) -> Ancestors<'_, 'a> {
        Ancestors {
            parents: self,
            next: self.get(&test.parent_id),
            remaining: self.len(),
        }
    }

    /// Build the class name the JUnit report uses for `test`.
    ///
    /// Container names are reduced to their file stem and joined outermost first with `.`, so a test in
    /// `tests/test_a.py::TestC` becomes `tests.test_a.TestC`. Function-kind ancestors (the grouping node of a
    /// parametrized test) are skipped. A test without recorded containers yields `""`.
    pub fn xml_class_name(&self, test: &RawTest) -> String {
        let mut names: Vec<&str> = self
            .ancestors(test)
            .filter(|parent| !parent.is_function())
            .map(|parent| file_stem(&parent.name))
            .collect();
        names.reverse();
        names.join(".")
    }
}

/// Iterator over a test's ancestor chain. See [`ParentMap::ancestors`].
pub struct Ancestors<'m, 'a> {
    parents: &'m ParentMap<'a>,
    next: Option<&'a RawParent>,
    // A well-formed chain visits each parent at most once; this keeps a cyclic batch from looping forever.
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'_, 'a> {
    type Item = &'a RawParent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = current.parent_id.as_deref().and_then(|id| self.parents.get(id));
        Some(current)
    }
}
