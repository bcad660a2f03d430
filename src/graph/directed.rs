//! Concurrent directed graph keyed by arbitrary hashable values.
//!
//! [`DirectedGraph`] owns the vertex store and the mutation API, and exposes the
//! closure, SCC and cycle queries implemented in [`crate::graph::algorithms`].

use std::{collections::HashSet, fmt, sync::Arc};

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::{debug, trace, warn};

use crate::{
    config::GraphConfig,
    graph::{
        algorithms::{self, remove_non_cycles, tarjan_components},
        vertex::Vertex,
        Direction, Edge, Neighbors, VertexKey,
    },
    Error, Result,
};

/// Thread-safe directed graph supporting concurrent mutation and reachability queries.
///
/// Every vertex is identified by its key and carries two adjacency sets: the *sink set*
/// (keys it has an edge to) and the *source set* (keys that have an edge to it). An edge
/// `u -> v` exists iff `v` is in the sink set of `u` and `u` is in the source set of `v`;
/// all mutating operations keep both memberships in step.
///
/// # Architecture
///
/// - **Vertex map**: a [`DashMap`] from key to a shared vertex handle. Lookups clone
///   the handle and release the shard lock before touching adjacency sets, so no map
///   lock is ever held while another vertex is accessed.
/// - **Adjacency sets**: one independently locked hash set per side per vertex.
///
/// All operations take `&self`; a graph can be shared across threads behind an
/// [`Arc`] without an outer lock.
///
/// # Consistency
///
/// Each individual set operation is atomic, no multi-vertex operation is:
///
/// - [`add_edge`](Self::add_edge) writes the sink side, then the source side. A concurrent
///   reader may observe only the first half.
/// - [`remove_node`](Self::remove_node) removes the vertex, then scrubs its key from each
///   neighbor one by one. A concurrent reader may see a neighbor still naming the removed
///   key.
/// - Closures and SCC queries take no snapshot. Under concurrent mutation their results
///   are best-effort, but they always terminate and never panic.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use graphscope::DirectedGraph;
///
/// let graph = DirectedGraph::new();
/// graph.add_edge("app", "lib");
/// graph.add_edge("lib", "core");
///
/// assert_eq!(graph.sink_edges(&"app"), Some(HashSet::from(["lib"])));
/// assert_eq!(graph.source_edges(&"app"), Some(HashSet::new()));
/// assert_eq!(graph.sink_edges(&"missing"), None);
///
/// assert_eq!(graph.sinks_closure(&"app"), HashSet::from(["app", "lib", "core"]));
/// assert!(graph.all_cycles().is_empty());
/// ```
pub struct DirectedGraph<K: VertexKey> {
    /// Vertex key -> adjacency state
    vertices: DashMap<K, Arc<Vertex<K>>>,
    /// Settings the graph was built with
    config: GraphConfig,
}

impl<K: VertexKey> DirectedGraph<K> {
    /// Creates an empty graph with the default [`GraphConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(GraphConfig::default())
    }

    /// Creates an empty graph with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration does not pass
    /// [`GraphConfig::validate`].
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GraphConfig) -> Self {
        let vertices = match config.shard_amount {
            Some(shards) => {
                DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards)
            }
            None => DashMap::with_capacity(config.initial_capacity),
        };

        Self { vertices, config }
    }

    /// Returns the configuration the graph was built with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ============================================================================================
    // Vertex store
    // ============================================================================================

    /// Clones the vertex handle out of the map, releasing the shard lock immediately.
    fn vertex(&self, key: &K) -> Option<Arc<Vertex<K>>> {
        self.vertices.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn vertex_or_insert(&self, key: K) -> Arc<Vertex<K>> {
        if let Some(vertex) = self.vertex(&key) {
            return vertex;
        }

        let capacity = self.config.adjacency_capacity;
        let entry = self.vertices.entry(key).or_insert_with(|| {
            trace!("created vertex for edge endpoint");
            Arc::new(Vertex::with_capacity(capacity))
        });
        Arc::clone(entry.value())
    }

    /// Copies out every (key, vertex) pair so callers can look up other vertices without
    /// holding iteration guards on the map.
    fn entries(&self) -> Vec<(K, Arc<Vertex<K>>)> {
        self.vertices
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect()
    }

    // ============================================================================================
    // Mutation API
    // ============================================================================================

    /// Adds a vertex with empty adjacency sets.
    ///
    /// # Returns
    ///
    /// `true` if the vertex was newly created, `false` if it already existed (in which
    /// case the graph is left unchanged).
    pub fn add_node(&self, key: K) -> bool {
        match self.vertices.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Vertex::with_capacity(self.config.adjacency_capacity)));
                trace!("added vertex");
                true
            }
        }
    }

    /// Adds the directed edge `source -> sink`, creating either endpoint if missing.
    ///
    /// Adding an edge that already exists is a no-op. `source` and `sink` may be equal,
    /// which records a self-loop.
    pub fn add_edge(&self, source: K, sink: K) {
        let source_vertex = self.vertex_or_insert(source.clone());
        let inserted = source_vertex.sinks.insert(sink.clone());

        let sink_vertex = self.vertex_or_insert(sink);
        sink_vertex.sources.insert(source);

        trace!(inserted, "added edge");
    }

    /// Removes the directed edge `source -> sink`.
    ///
    /// Missing vertices and missing edges are silently ignored.
    pub fn remove_edge(&self, source: &K, sink: &K) {
        if let Some(vertex) = self.vertex(source) {
            vertex.sinks.remove(sink);
        }

        if let Some(vertex) = self.vertex(sink) {
            vertex.sources.remove(source);
        }

        trace!("removed edge");
    }

    /// Removes a vertex together with every edge that touches it.
    ///
    /// The key is removed from the source set of each of its sinks and from the sink set
    /// of each of its sources, so no other vertex refers to it afterwards.
    ///
    /// # Returns
    ///
    /// `true` if the vertex existed, `false` otherwise.
    pub fn remove_node(&self, key: &K) -> bool {
        let Some((_, vertex)) = self.vertices.remove(key) else {
            return false;
        };

        let mut scrubbed = 0usize;
        for sink in vertex.sinks.to_vec() {
            if let Some(neighbor) = self.vertex(&sink) {
                neighbor.sources.remove(key);
                scrubbed += 1;
            }
        }

        for source in vertex.sources.to_vec() {
            if let Some(neighbor) = self.vertex(&source) {
                neighbor.sinks.remove(key);
                scrubbed += 1;
            }
        }

        debug!(scrubbed, "removed vertex");
        true
    }

    // ============================================================================================
    // Queries
    // ============================================================================================

    /// Returns the keys of all vertices.
    pub fn vertex_nodes(&self) -> HashSet<K> {
        self.vertices.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Returns the keys that have an edge to `key`.
    ///
    /// # Returns
    ///
    /// `None` if there is no such vertex, `Some` with a possibly empty set otherwise.
    pub fn source_edges(&self, key: &K) -> Option<HashSet<K>> {
        self.vertex(key).map(|vertex| vertex.snapshot(Direction::Backward))
    }

    /// Returns the keys `key` has an edge to.
    ///
    /// # Returns
    ///
    /// `None` if there is no such vertex, `Some` with a possibly empty set otherwise.
    pub fn sink_edges(&self, key: &K) -> Option<HashSet<K>> {
        self.vertex(key).map(|vertex| vertex.snapshot(Direction::Forward))
    }

    /// Returns every edge incident to any of `keys`.
    ///
    /// For each key with a vertex, one [`Edge`] is emitted per sink neighbor and one per
    /// source neighbor. Edges between two of the given keys are reported once. Keys
    /// without a vertex contribute nothing.
    pub fn all_edges<'a, I>(&self, keys: I) -> HashSet<Edge<K>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut edges = HashSet::new();
        for key in keys {
            let Some(vertex) = self.vertex(key) else {
                continue;
            };

            for sink in vertex.sinks.to_vec() {
                edges.insert(Edge::new(key.clone(), sink));
            }

            for source in vertex.sources.to_vec() {
                edges.insert(Edge::new(source, key.clone()));
            }
        }

        edges
    }

    /// Returns `true` if a vertex with this key exists.
    pub fn contains_node(&self, key: &K) -> bool {
        self.vertices.contains_key(key)
    }

    /// Returns `true` if `sink` is in the sink set of `source`.
    ///
    /// This checks only the forward half of the edge; see
    /// [`has_reverse_edge`](Self::has_reverse_edge) for the other half.
    pub fn has_edge(&self, source: &K, sink: &K) -> bool {
        self.vertex(source).is_some_and(|vertex| vertex.sinks.contains(sink))
    }

    /// Returns `true` if `source` is in the source set of `sink`.
    pub fn has_reverse_edge(&self, source: &K, sink: &K) -> bool {
        self.vertex(sink).is_some_and(|vertex| vertex.sources.contains(source))
    }

    /// Returns the number of vertices.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges, counted on the sink side.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|entry| entry.value().sinks.len()).sum()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ============================================================================================
    // Closures
    // ============================================================================================

    /// Returns every vertex reachable from `key` by following sink edges, including
    /// `key` itself. Empty if `key` has no vertex.
    pub fn sinks_closure(&self, key: &K) -> HashSet<K> {
        algorithms::sinks_closure(self, key)
    }

    /// Returns every vertex reachable from `key` by following source edges, including
    /// `key` itself. Empty if `key` has no vertex.
    pub fn sources_closure(&self, key: &K) -> HashSet<K> {
        algorithms::sources_closure(self, key)
    }

    /// Returns every vertex reachable from `key` by following sink and source edges in
    /// any combination, i.e. the weakly connected component of `key`.
    pub fn transitive_closure(&self, key: &K) -> HashSet<K> {
        algorithms::transitive_closure(self, key)
    }

    // ============================================================================================
    // Strongly connected components and cycles
    // ============================================================================================

    /// Returns the cycles among the vertices forward-reachable from `key`.
    pub fn sinks_cycles(&self, key: &K) -> Vec<HashSet<K>> {
        let domain = self.sinks_closure(key);
        remove_non_cycles(self, tarjan_components(self, domain, Direction::Forward))
    }

    /// Returns the cycles among the vertices backward-reachable from `key`.
    pub fn sources_cycles(&self, key: &K) -> Vec<HashSet<K>> {
        let domain = self.sources_closure(key);
        remove_non_cycles(self, tarjan_components(self, domain, Direction::Backward))
    }

    /// Returns every cycle in the graph.
    ///
    /// A cycle is a strongly connected component with at least two vertices, or a single
    /// vertex with a self-loop.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graphscope::DirectedGraph;
    ///
    /// let graph = DirectedGraph::new();
    /// graph.add_edge('x', 'x');
    /// graph.add_edge('x', 'y');
    ///
    /// let cycles = graph.all_cycles();
    /// assert_eq!(cycles.len(), 1);
    /// assert!(cycles[0].contains(&'x'));
    /// ```
    pub fn all_cycles(&self) -> Vec<HashSet<K>> {
        remove_non_cycles(self, self.strongly_connected_components())
    }

    /// Partitions all vertices into strongly connected components, following sink edges.
    ///
    /// Every vertex appears in exactly one component; vertices without edges form
    /// singleton components. The order of the returned components is unspecified.
    pub fn strongly_connected_components(&self) -> Vec<HashSet<K>> {
        tarjan_components(self, self.vertex_nodes(), Direction::Forward)
    }

    // ============================================================================================
    // Validation
    // ============================================================================================

    /// Checks the sink/source invariant across the whole graph.
    ///
    /// Verifies that every edge is recorded on both sides and that no adjacency set names
    /// a key without a vertex. The check is only meaningful when no mutation is running
    /// concurrently; otherwise it may report the transient states described in the
    /// type-level documentation.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found, as [`Error::DanglingReference`] or
    /// [`Error::AsymmetricEdge`].
    pub fn validate(&self) -> Result<()>
    where
        K: fmt::Debug,
    {
        for (key, vertex) in self.entries() {
            for sink in vertex.neighbors(Direction::Forward) {
                match self.vertex(&sink) {
                    None => return Err(dangling(&key, &sink)),
                    Some(neighbor) if !neighbor.sources.contains(&key) => {
                        return Err(asymmetric(&key, &sink));
                    }
                    Some(_) => {}
                }
            }

            for source in vertex.neighbors(Direction::Backward) {
                match self.vertex(&source) {
                    None => return Err(dangling(&key, &source)),
                    Some(neighbor) if !neighbor.sinks.contains(&key) => {
                        return Err(asymmetric(&source, &key));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}

fn dangling<K: fmt::Debug>(vertex: &K, missing: &K) -> Error {
    let error = Error::DanglingReference {
        vertex: format!("{vertex:?}"),
        missing: format!("{missing:?}"),
    };
    warn!(%error, "graph invariant violated");
    error
}

fn asymmetric<K: fmt::Debug>(from: &K, to: &K) -> Error {
    let error = Error::AsymmetricEdge {
        from: format!("{from:?}"),
        to: format!("{to:?}"),
    };
    warn!(%error, "graph invariant violated");
    error
}

impl<K: VertexKey> Neighbors<K> for DirectedGraph<K> {
    fn contains_vertex(&self, key: &K) -> bool {
        self.contains_node(key)
    }

    fn neighbors(&self, key: &K, direction: Direction) -> Option<Vec<K>> {
        self.vertex(key).map(|vertex| vertex.neighbors(direction))
    }

    fn has_self_loop(&self, key: &K) -> bool {
        self.has_edge(key, key)
    }
}

impl<K: VertexKey> Default for DirectedGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: VertexKey> fmt::Debug for DirectedGraph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectedGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

impl<K: VertexKey> FromIterator<(K, K)> for DirectedGraph<K> {
    fn from_iter<I: IntoIterator<Item = (K, K)>>(iter: I) -> Self {
        let graph = Self::new();
        for (source, sink) in iter {
            graph.add_edge(source, sink);
        }
        graph
    }
}

impl<K: VertexKey> Extend<(K, K)> for DirectedGraph<K> {
    fn extend<I: IntoIterator<Item = (K, K)>>(&mut self, iter: I) {
        for (source, sink) in iter {
            self.add_edge(source, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<const N: usize>(keys: [char; N]) -> HashSet<char> {
        HashSet::from(keys)
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let graph = DirectedGraph::new();
        assert!(graph.add_node('A'));
        assert!(!graph.add_node('A'));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.sink_edges(&'A'), Some(HashSet::new()));
        assert_eq!(graph.source_edges(&'A'), Some(HashSet::new()));
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');

        assert_eq!(graph.vertex_nodes(), set(['A', 'B']));
        assert_eq!(graph.sink_edges(&'A'), Some(set(['B'])));
        assert_eq!(graph.source_edges(&'B'), Some(set(['A'])));
        assert_eq!(graph.source_edges(&'A'), Some(HashSet::new()));
        assert_eq!(graph.sink_edges(&'B'), Some(HashSet::new()));
    }

    #[test]
    fn test_add_edge_is_idempotent() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('A', 'B');

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.sink_edges(&'A'), Some(set(['B'])));
        assert_eq!(graph.source_edges(&'B'), Some(set(['A'])));
    }

    #[test]
    fn test_add_edge_keeps_existing_adjacency() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        assert!(!graph.add_node('A'));
        graph.add_edge('C', 'A');

        assert_eq!(graph.sink_edges(&'A'), Some(set(['B'])));
        assert_eq!(graph.source_edges(&'A'), Some(set(['C'])));
    }

    #[test]
    fn test_self_loop_recorded_on_both_sides() {
        let graph = DirectedGraph::new();
        graph.add_edge('X', 'X');

        assert!(graph.has_edge(&'X', &'X'));
        assert!(graph.has_reverse_edge(&'X', &'X'));
        assert!(graph.has_self_loop(&'X'));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_missing_vertex_is_none_not_empty() {
        let graph: DirectedGraph<char> = DirectedGraph::new();
        assert_eq!(graph.sink_edges(&'Z'), None);
        assert_eq!(graph.source_edges(&'Z'), None);
        assert!(!graph.contains_node(&'Z'));
    }

    #[test]
    fn test_remove_edge() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('A', 'C');
        graph.remove_edge(&'A', &'B');

        assert!(!graph.has_edge(&'A', &'B'));
        assert!(!graph.has_reverse_edge(&'A', &'B'));
        assert!(graph.has_edge(&'A', &'C'));
        assert!(graph.contains_node(&'B'));
    }

    #[test]
    fn test_remove_edge_ignores_missing() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');

        graph.remove_edge(&'A', &'Z');
        graph.remove_edge(&'Z', &'B');
        graph.remove_edge(&'B', &'A');

        assert!(graph.has_edge(&'A', &'B'));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_remove_node_cascades() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'C');
        graph.add_edge('C', 'B');
        graph.add_edge('B', 'B');

        assert!(graph.remove_node(&'B'));
        assert!(!graph.remove_node(&'B'));

        assert_eq!(graph.vertex_nodes(), set(['A', 'C']));
        assert_eq!(graph.sink_edges(&'A'), Some(HashSet::new()));
        assert_eq!(graph.sink_edges(&'C'), Some(HashSet::new()));
        assert_eq!(graph.source_edges(&'C'), Some(HashSet::new()));
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_remove_missing_node() {
        let graph: DirectedGraph<char> = DirectedGraph::new();
        assert!(!graph.remove_node(&'A'));
    }

    #[test]
    fn test_all_edges_deduplicates() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'C');
        graph.add_edge('D', 'A');

        let edges = graph.all_edges(&set(['A', 'B', 'Z']));
        let expected = HashSet::from([
            Edge::new('A', 'B'),
            Edge::new('B', 'C'),
            Edge::new('D', 'A'),
        ]);
        assert_eq!(edges, expected);
    }

    #[test]
    fn test_all_edges_of_isolated_vertex() {
        let graph = DirectedGraph::new();
        graph.add_node('A');
        assert!(graph.all_edges(&set(['A'])).is_empty());
    }

    #[test]
    fn test_counts() {
        let graph = DirectedGraph::new();
        assert!(graph.is_empty());

        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 3);
        graph.add_node(4);

        assert!(!graph.is_empty());
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_with_config() {
        let config = GraphConfig::default()
            .with_initial_capacity(16)
            .with_shard_amount(4)
            .with_adjacency_capacity(2);
        let graph: DirectedGraph<u32> = DirectedGraph::with_config(config.clone()).unwrap();

        assert_eq!(graph.config(), &config);
        graph.add_edge(1, 2);
        assert!(graph.has_edge(&1, &2));
    }

    #[test]
    fn test_with_invalid_config() {
        let result = DirectedGraph::<u32>::with_config(GraphConfig::default().with_shard_amount(6));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut graph: DirectedGraph<u8> = [(1, 2), (2, 3)].into_iter().collect();
        graph.extend([(3, 1)]);

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.all_cycles().len(), 1);
    }

    #[test]
    fn test_validate_detects_asymmetric_edge() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.vertex(&'B').unwrap().sources.remove(&'A');

        assert_eq!(
            graph.validate(),
            Err(Error::AsymmetricEdge {
                from: "'A'".to_string(),
                to: "'B'".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_detects_missing_sink_side() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.vertex(&'A').unwrap().sinks.remove(&'B');

        assert!(matches!(graph.validate(), Err(Error::AsymmetricEdge { .. })));
    }

    #[test]
    fn test_validate_detects_dangling_reference() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.vertices.remove(&'B');

        assert_eq!(
            graph.validate(),
            Err(Error::DanglingReference {
                vertex: "'A'".to_string(),
                missing: "'B'".to_string(),
            })
        );
    }

    #[test]
    fn test_debug_shows_counts() {
        let graph = DirectedGraph::new();
        graph.add_edge(1, 2);
        assert_eq!(format!("{graph:?}"), "DirectedGraph { nodes: 2, edges: 1 }");
    }
}
