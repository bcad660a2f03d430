//! Per-vertex adjacency state.
//!
//! Each side of a vertex is an [`AdjacencySet`], a hash set behind its own reader/writer
//! lock. Every set operation is atomic on its own; there is no lock spanning two sets
//! or two vertices.

use std::{
    collections::HashSet,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::graph::{Direction, VertexKey};

/// Thread-safe set of neighbor keys.
///
/// Guards are never handed out: every method takes the lock, does one operation and
/// releases it. A poisoned lock is recovered, since no operation can leave the inner set
/// half-updated.
#[derive(Debug)]
pub(crate) struct AdjacencySet<K> {
    keys: RwLock<HashSet<K>>,
}

impl<K: VertexKey> AdjacencySet<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: RwLock::new(HashSet::with_capacity(capacity)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashSet<K>> {
        self.keys.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<K>> {
        self.keys.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if the key was not present.
    pub(crate) fn insert(&self, key: K) -> bool {
        self.write().insert(key)
    }

    /// Returns `true` if the key was present.
    pub(crate) fn remove(&self, key: &K) -> bool {
        self.write().remove(key)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.read().contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.read().len()
    }

    pub(crate) fn snapshot(&self) -> HashSet<K> {
        self.read().clone()
    }

    pub(crate) fn to_vec(&self) -> Vec<K> {
        self.read().iter().cloned().collect()
    }
}

/// Adjacency state of a single vertex.
///
/// The key itself lives in the vertex map, the vertex only holds the two sets. Keeping
/// the two sides of an edge in agreement is the job of [`crate::DirectedGraph`].
#[derive(Debug)]
pub(crate) struct Vertex<K> {
    /// Keys this vertex has an edge to
    pub(crate) sinks: AdjacencySet<K>,
    /// Keys that have an edge to this vertex
    pub(crate) sources: AdjacencySet<K>,
}

impl<K: VertexKey> Vertex<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            sinks: AdjacencySet::with_capacity(capacity),
            sources: AdjacencySet::with_capacity(capacity),
        }
    }

    /// The set followed when traversing in `direction`.
    pub(crate) fn edges(&self, direction: Direction) -> &AdjacencySet<K> {
        match direction {
            Direction::Forward => &self.sinks,
            Direction::Backward => &self.sources,
        }
    }

    pub(crate) fn snapshot(&self, direction: Direction) -> HashSet<K> {
        self.edges(direction).snapshot()
    }

    pub(crate) fn neighbors(&self, direction: Direction) -> Vec<K> {
        self.edges(direction).to_vec()
    }
}
