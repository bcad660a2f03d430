//! Strongly Connected Components (SCC) using Tarjan's algorithm.
//!
//! A strongly connected component is a maximal set of vertices such that there is a path
//! from every vertex to every other vertex in the set. Every multi-vertex component
//! contains a cycle, which is what [`super::remove_non_cycles`] builds on.
//!
//! The classical formulation recurses once per tree edge, which exhausts the native stack
//! on long dependency chains. This implementation keeps the same index/lowlink
//! bookkeeping but drives the depth-first search with an explicit stack of frames, each
//! holding the vertex being expanded, a copy of its neighbors, and a cursor into that
//! copy.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::graph::{Direction, Neighbors, VertexKey};

/// Computes the strongly connected components reachable from `roots`.
///
/// Runs Tarjan's algorithm from every root that has not been discovered yet, following
/// sink edges for [`Direction::Forward`] and source edges for [`Direction::Backward`].
/// Neighbors without a vertex are ignored, and so are roots without a vertex.
///
/// # Arguments
///
/// * `graph` - The graph to analyze
/// * `roots` - Keys to start from, typically every vertex or a prior closure
/// * `direction` - Which adjacency set to follow
///
/// # Returns
///
/// Disjoint components covering every vertex reachable from `roots`. Vertices without
/// edges form singleton components. Component membership depends only on the graph and
/// the direction; the order of the returned components and the iteration order within
/// each are unspecified.
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V + E) for the index tables and the neighbor copies held by open frames
///
/// # Algorithm
///
/// 1. Assign each vertex a discovery index on first visit; its lowlink starts equal
/// 2. For each neighbor: descend if undiscovered, afterwards fold the neighbor's lowlink
///    into ours; if the neighbor is still on the stack fold its index instead
/// 3. When lowlink equals index after all neighbors are processed, the vertex is the root
///    of a component: pop the stack down to it
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use graphscope::{DirectedGraph, Direction, graph::algorithms::tarjan_components};
///
/// // A -> B -> C -> A, C -> D
/// let graph = DirectedGraph::new();
/// graph.add_edge('A', 'B');
/// graph.add_edge('B', 'C');
/// graph.add_edge('C', 'A');
/// graph.add_edge('C', 'D');
///
/// let sccs = tarjan_components(&graph, graph.vertex_nodes(), Direction::Forward);
/// assert_eq!(sccs.len(), 2);
/// assert!(sccs.contains(&HashSet::from(['A', 'B', 'C'])));
/// assert!(sccs.contains(&HashSet::from(['D'])));
/// ```
pub fn tarjan_components<G, K, I>(graph: &G, roots: I, direction: Direction) -> Vec<HashSet<K>>
where
    G: Neighbors<K> + ?Sized,
    K: VertexKey,
    I: IntoIterator<Item = K>,
{
    let mut state = TarjanState::new(direction);

    for root in roots {
        if !state.indices.contains_key(&root) {
            state.strong_connect(graph, root);
        }
    }

    debug!(
        ?direction,
        vertices = state.keys.len(),
        components = state.components.len(),
        "computed strongly connected components"
    );

    state.components
}

/// A vertex whose neighbors are being walked.
struct Frame<K> {
    /// Discovery index of the vertex
    index: usize,
    /// Neighbors copied out when the vertex was discovered
    neighbors: Vec<K>,
    /// Position of the next neighbor to look at
    cursor: usize,
}

/// Internal state for Tarjan's algorithm.
///
/// Discovery indices are dense, so per-vertex data lives in vectors indexed by discovery
/// index and only the key -> index lookup needs hashing.
struct TarjanState<K> {
    direction: Direction,
    /// Discovery index of each visited key
    indices: HashMap<K, usize>,
    /// Key of each discovery index
    keys: Vec<K>,
    /// Lowlink of each discovery index
    lowlinks: Vec<usize>,
    /// Stack membership of each discovery index
    on_stack: Vec<bool>,
    /// Vertices on the current path or awaiting their component, as discovery indices
    stack: Vec<usize>,
    /// Collected SCCs
    components: Vec<HashSet<K>>,
}

impl<K: VertexKey> TarjanState<K> {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            indices: HashMap::new(),
            keys: Vec::new(),
            lowlinks: Vec::new(),
            on_stack: Vec::new(),
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn discover(&mut self, key: K, neighbors: Vec<K>) -> Frame<K> {
        let index = self.keys.len();
        self.indices.insert(key.clone(), index);
        self.keys.push(key);
        self.lowlinks.push(index);
        self.on_stack.push(true);
        self.stack.push(index);

        Frame {
            index,
            neighbors,
            cursor: 0,
        }
    }

    fn strong_connect<G>(&mut self, graph: &G, root: K)
    where
        G: Neighbors<K> + ?Sized,
    {
        let Some(neighbors) = graph.neighbors(&root, self.direction) else {
            return;
        };
        let mut frames = vec![self.discover(root, neighbors)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.index;

            if let Some(next) = frame.neighbors.get(frame.cursor).cloned() {
                frame.cursor += 1;

                if let Some(&w) = self.indices.get(&next) {
                    // Finished neighbors belong to an already closed component
                    if self.on_stack[w] {
                        self.lowlinks[v] = self.lowlinks[v].min(w);
                    }
                } else if let Some(neighbors) = graph.neighbors(&next, self.direction) {
                    let child = self.discover(next, neighbors);
                    frames.push(child);
                }
                continue;
            }

            frames.pop();

            if self.lowlinks[v] == v {
                self.close_component(v);
            }

            if let Some(parent) = frames.last() {
                let p = parent.index;
                self.lowlinks[p] = self.lowlinks[p].min(self.lowlinks[v]);
            }
        }
    }

    /// Pops the stack down to and including `root`, emitting one component.
    fn close_component(&mut self, root: usize) {
        let mut component = HashSet::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.insert(self.keys[w].clone());
            if w == root {
                break;
            }
        }
        self.components.push(component);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::graph::{algorithms::tarjan_components, DirectedGraph, Direction};

    fn sorted(components: Vec<HashSet<char>>) -> Vec<Vec<char>> {
        let mut out: Vec<Vec<char>> = components
            .into_iter()
            .map(|component| {
                let mut keys: Vec<char> = component.into_iter().collect();
                keys.sort_unstable();
                keys
            })
            .collect();
        out.sort();
        out
    }

    fn forward(graph: &DirectedGraph<char>) -> Vec<Vec<char>> {
        sorted(tarjan_components(
            graph,
            graph.vertex_nodes(),
            Direction::Forward,
        ))
    }

    #[test]
    fn test_scc_empty_graph() {
        let graph: DirectedGraph<char> = DirectedGraph::new();
        assert!(forward(&graph).is_empty());
    }

    #[test]
    fn test_scc_single_node() {
        let graph = DirectedGraph::new();
        graph.add_node('A');
        assert_eq!(forward(&graph), vec![vec!['A']]);
    }

    #[test]
    fn test_scc_single_node_self_loop() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'A');
        assert_eq!(forward(&graph), vec![vec!['A']]);
    }

    #[test]
    fn test_scc_linear_chain() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'C');
        assert_eq!(forward(&graph), vec![vec!['A'], vec!['B'], vec!['C']]);
    }

    #[test]
    fn test_scc_simple_cycle() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'C');
        graph.add_edge('C', 'A');
        assert_eq!(forward(&graph), vec![vec!['A', 'B', 'C']]);
    }

    #[test]
    fn test_scc_connected_cycles() {
        // A <-> B -> C <-> D
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'A');
        graph.add_edge('B', 'C');
        graph.add_edge('C', 'D');
        graph.add_edge('D', 'C');
        assert_eq!(forward(&graph), vec![vec!['A', 'B'], vec!['C', 'D']]);
    }

    #[test]
    fn test_scc_complex_structure() {
        //     +---+
        //     v   |
        // A-->B-->C
        // |   |
        // v   v
        // D<->E-->F-->G
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'C');
        graph.add_edge('C', 'B');
        graph.add_edge('A', 'D');
        graph.add_edge('B', 'E');
        graph.add_edge('D', 'E');
        graph.add_edge('E', 'D');
        graph.add_edge('E', 'F');
        graph.add_edge('F', 'G');

        assert_eq!(
            forward(&graph),
            vec![
                vec!['A'],
                vec!['B', 'C'],
                vec!['D', 'E'],
                vec!['F'],
                vec!['G']
            ]
        );
    }

    #[test]
    fn test_scc_nested_back_edges() {
        // A -> B -> C -> D -> B, C -> A: a single component reached through two back edges
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'C');
        graph.add_edge('C', 'D');
        graph.add_edge('D', 'B');
        graph.add_edge('C', 'A');
        graph.add_edge('D', 'E');
        assert_eq!(forward(&graph), vec![vec!['A', 'B', 'C', 'D'], vec!['E']]);
    }

    #[test]
    fn test_scc_backward_direction_matches_forward() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'A');
        graph.add_edge('B', 'C');
        graph.add_edge('C', 'D');

        let backward = sorted(tarjan_components(
            &graph,
            graph.vertex_nodes(),
            Direction::Backward,
        ));
        assert_eq!(backward, forward(&graph));
    }

    #[test]
    fn test_scc_restricted_roots() {
        let graph = DirectedGraph::new();
        graph.add_edge('A', 'B');
        graph.add_edge('B', 'A');
        graph.add_edge('C', 'D');

        let sccs = sorted(tarjan_components(&graph, ['B'], Direction::Forward));
        assert_eq!(sccs, vec![vec!['A', 'B']]);
    }

    #[test]
    fn test_scc_skips_missing_roots() {
        let graph = DirectedGraph::new();
        graph.add_node('A');

        let sccs = sorted(tarjan_components(&graph, ['Z', 'A', 'A'], Direction::Forward));
        assert_eq!(sccs, vec![vec!['A']]);
    }

    #[test]
    fn test_scc_deep_chain_does_not_overflow() {
        let graph = DirectedGraph::new();
        let depth = 200_000u32;
        for i in 0..depth {
            graph.add_edge(i, i + 1);
        }
        graph.add_edge(depth, 0);

        let sccs = tarjan_components(&graph, [0], Direction::Forward);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), depth as usize + 1);
    }
}
