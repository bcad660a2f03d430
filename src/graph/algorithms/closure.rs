//! Reachability closures.
//!
//! A closure is the set of vertices reachable from a root, root included, when following
//! edges in one or both directions. All three variants share one worklist traversal that
//! only accumulates a set, so the order in which the worklist is drained does not affect
//! the result.

use std::collections::HashSet;

use crate::graph::{Direction, Neighbors, VertexKey};

/// Returns every vertex forward-reachable from `root` via sink edges, including `root`.
///
/// # Arguments
///
/// * `graph` - The graph to traverse
/// * `root` - The starting vertex
///
/// # Returns
///
/// The reachable keys, or an empty set if `root` has no vertex.
///
/// # Complexity
///
/// - Time: O(V + E) over the reachable subgraph
/// - Space: O(V) for the visited set and worklist
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use graphscope::{DirectedGraph, graph::algorithms::sinks_closure};
///
/// let graph = DirectedGraph::new();
/// graph.add_edge('A', 'B');
/// graph.add_edge('B', 'C');
/// graph.add_edge('D', 'A');
///
/// assert_eq!(sinks_closure(&graph, &'A'), HashSet::from(['A', 'B', 'C']));
/// assert!(sinks_closure(&graph, &'Z').is_empty());
/// ```
pub fn sinks_closure<G, K>(graph: &G, root: &K) -> HashSet<K>
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
{
    closure(graph, root, &[Direction::Forward])
}

/// Returns every vertex backward-reachable from `root` via source edges, including
/// `root`.
///
/// Mirror image of [`sinks_closure`]: the result is everything that can reach `root`.
pub fn sources_closure<G, K>(graph: &G, root: &K) -> HashSet<K>
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
{
    closure(graph, root, &[Direction::Backward])
}

/// Returns every vertex reachable from `root` following sink and source edges.
///
/// Both directions are explored within a single traversal sharing one visited set, so a
/// vertex reached "down then up" (a sibling sharing a dependency) is included. This is
/// the weakly connected component containing `root`, not just the union of
/// [`sinks_closure`] and [`sources_closure`].
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use graphscope::{DirectedGraph, graph::algorithms::transitive_closure};
///
/// let graph = DirectedGraph::new();
/// graph.add_edge("app", "log");
/// graph.add_edge("cli", "log");
/// graph.add_node("other");
///
/// assert_eq!(
///     transitive_closure(&graph, &"app"),
///     HashSet::from(["app", "log", "cli"])
/// );
/// ```
pub fn transitive_closure<G, K>(graph: &G, root: &K) -> HashSet<K>
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
{
    closure(graph, root, &[Direction::Forward, Direction::Backward])
}

fn closure<G, K>(graph: &G, root: &K, directions: &[Direction]) -> HashSet<K>
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
{
    let mut visited = HashSet::new();
    if !graph.contains_vertex(root) {
        return visited;
    }

    visited.insert(root.clone());
    let mut worklist = vec![root.clone()];

    while let Some(key) = worklist.pop() {
        for &direction in directions {
            // Removed since it was queued
            let Some(neighbors) = graph.neighbors(&key, direction) else {
                break;
            };

            for next in neighbors {
                if visited.contains(&next) || !graph.contains_vertex(&next) {
                    continue;
                }
                visited.insert(next.clone());
                worklist.push(next);
            }
        }
    }

    visited
}
