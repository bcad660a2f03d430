//! Directed edge value type.
//!
//! Edges are not stored by the graph; an edge exists purely as a pair of adjacency-set
//! memberships. [`Edge`] is the value handed back by [`crate::DirectedGraph::all_edges`].

use std::fmt;

/// A directed edge from `source` to `sink`.
///
/// Two edges are equal when both endpoints are equal, so `Edge` values can be collected
/// into a set to eliminate duplicates.
///
/// # Examples
///
/// ```rust
/// use graphscope::Edge;
///
/// let edge = Edge::new("A", "B");
/// assert_eq!(edge.reversed(), Edge::new("B", "A"));
/// assert!(!edge.is_self_loop());
/// assert_eq!(edge.to_string(), "A -> B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<K> {
    /// The vertex the edge starts at
    pub source: K,
    /// The vertex the edge points to
    pub sink: K,
}

impl<K> Edge<K> {
    /// Creates a new edge from `source` to `sink`.
    pub fn new(source: K, sink: K) -> Self {
        Self { source, sink }
    }

    /// Returns the edge pointing the other way.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            source: self.sink,
            sink: self.source,
        }
    }
}

impl<K: PartialEq> Edge<K> {
    /// Returns `true` if the edge starts and ends at the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.sink
    }
}

impl<K> From<(K, K)> for Edge<K> {
    fn from((source, sink): (K, K)) -> Self {
        Self::new(source, sink)
    }
}

impl<K: fmt::Display> fmt::Display for Edge<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.sink)
    }
}
