//! Cycle filtering for strongly connected components.
//!
//! Every component with two or more vertices contains a cycle by construction. A
//! singleton component is a cycle only if its vertex has an edge to itself; otherwise it
//! is just a vertex that is not part of any cycle.

use std::collections::HashSet;

use crate::graph::{Neighbors, VertexKey};

/// Returns `true` if `component` is a cycle in `graph`.
///
/// A component is a cycle if it has at least two vertices, or if it has exactly one
/// vertex and that vertex has a self-loop. An empty component, or a singleton whose
/// vertex no longer exists, is not a cycle.
pub fn is_cycle<G, K>(graph: &G, component: &HashSet<K>) -> bool
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
{
    match component.len() {
        0 => false,
        1 => component.iter().next().is_some_and(|key| graph.has_self_loop(key)),
        _ => true,
    }
}

/// Keeps only the components that are cycles.
///
/// # Arguments
///
/// * `graph` - The graph the components were computed from, consulted for self-loops
/// * `components` - Output of [`super::tarjan_components`]
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use graphscope::{
///     DirectedGraph, Direction,
///     graph::algorithms::{remove_non_cycles, tarjan_components},
/// };
///
/// // A <-> B, C -> C, D alone
/// let graph = DirectedGraph::new();
/// graph.add_edge('A', 'B');
/// graph.add_edge('B', 'A');
/// graph.add_edge('C', 'C');
/// graph.add_node('D');
///
/// let sccs = tarjan_components(&graph, graph.vertex_nodes(), Direction::Forward);
/// assert_eq!(sccs.len(), 3);
///
/// let cycles = remove_non_cycles(&graph, sccs);
/// assert_eq!(cycles.len(), 2);
/// assert!(cycles.contains(&HashSet::from(['A', 'B'])));
/// assert!(cycles.contains(&HashSet::from(['C'])));
/// ```
pub fn remove_non_cycles<G, K>(graph: &G, mut components: Vec<HashSet<K>>) -> Vec<HashSet<K>>
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
{
    components.retain(|component| is_cycle(graph, component));
    components
}
