//! Graph algorithms for reachability and cycle analysis.
//!
//! Every algorithm is generic over [`Neighbors`](crate::graph::Neighbors) and only reads
//! the graph. None of them take a snapshot up front: each vertex's neighbors are copied
//! out when the vertex is expanded, so a traversal racing with mutation sees a mix of
//! old and new state but never blocks writers for longer than one set copy.
//!
//! # Available Algorithms
//!
//! ## Closures
//!
//! - [`sinks_closure`] - Vertices reachable by following sink edges
//! - [`sources_closure`] - Vertices reachable by following source edges
//! - [`transitive_closure`] - Vertices reachable by following either
//!
//! ## Strongly Connected Components
//!
//! - [`tarjan_components`] - Tarjan's SCC algorithm over a subset of roots
//!
//! ## Cycle Detection
//!
//! - [`remove_non_cycles`] - Drops components that are not cycles
//! - [`is_cycle`] - Tests a single component
//!
//! # Algorithm Selection
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | Closures | O(V + E) | Impact analysis, "what depends on X" |
//! | Tarjan | O(V + E) | Cycle enumeration, mutual dependencies |
//! | Cycle filter | O(C) | Separating real cycles from trivial SCCs |

mod closure;
mod cycles;
mod scc;

pub use closure::{sinks_closure, sources_closure, transitive_closure};
pub use cycles::{is_cycle, remove_non_cycles};
pub use scc::tarjan_components;
