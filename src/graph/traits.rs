//! Trait definitions for graph abstractions.
//!
//! The algorithms in [`crate::graph::algorithms`] are written against [`Neighbors`]
//! rather than against [`crate::DirectedGraph`] directly, the same way traversal code
//! elsewhere is written against a successor/predecessor abstraction.
//!
//! - [`VertexKey`] - The bound every vertex key satisfies
//! - [`Direction`] - Which adjacency set a traversal follows
//! - [`Neighbors`] - Adjacency lookup by key and direction

use std::hash::Hash;

/// Bound required of vertex keys.
///
/// Keys are compared with [`Eq`], located with [`Hash`], and cloned into adjacency sets
/// and query results. The trait is implemented for every type meeting those bounds, so
/// it never needs to be implemented by hand.
///
/// For use across threads the key additionally has to be [`Send`] and [`Sync`], which
/// makes the graph itself `Send + Sync`.
pub trait VertexKey: Eq + Hash + Clone {}

impl<T: Eq + Hash + Clone> VertexKey for T {}

/// Direction in which a traversal follows edges.
///
/// # Examples
///
/// ```rust
/// use graphscope::Direction;
///
/// assert_eq!(Direction::Forward.reversed(), Direction::Backward);
/// assert_eq!(Direction::Backward.reversed(), Direction::Forward);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow sink edges, from a vertex to the vertices it points to.
    Forward,
    /// Follow source edges, from a vertex to the vertices that point to it.
    Backward,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Adjacency lookup used by the closure, SCC and cycle algorithms.
///
/// Implementations hand out owned snapshots of a vertex's neighbors so that algorithms
/// never hold a lock on the underlying storage while they work. A snapshot may already
/// be stale when it is returned if the graph is mutated concurrently.
pub trait Neighbors<K: VertexKey> {
    /// Returns `true` if a vertex with this key exists.
    fn contains_vertex(&self, key: &K) -> bool;

    /// Returns the neighbors of `key` in the given direction.
    ///
    /// # Returns
    ///
    /// `None` if there is no vertex for `key`, otherwise the sink keys
    /// ([`Direction::Forward`]) or source keys ([`Direction::Backward`]) of the vertex,
    /// in unspecified order.
    fn neighbors(&self, key: &K, direction: Direction) -> Option<Vec<K>>;

    /// Returns `true` if `key` exists and has an edge to itself.
    fn has_self_loop(&self, key: &K) -> bool;
}
