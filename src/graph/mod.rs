//! Concurrent directed graph and the algorithms that run over it.
//!
//! # Architecture
//!
//! The module is organized leaves first:
//!
//! - **Vertex store** - [`DirectedGraph`] maps each key to a vertex holding a sink set
//!   and a source set
//! - **Mutation API** - adding and removing vertices and edges while keeping both sides
//!   of every edge in step
//! - **Closure engine** - [`algorithms::sinks_closure`], [`algorithms::sources_closure`]
//!   and [`algorithms::transitive_closure`]
//! - **SCC engine** - [`algorithms::tarjan_components`], an iterative Tarjan
//!   parameterized by [`Direction`]
//! - **Cycle filter** - [`algorithms::remove_non_cycles`]
//!
//! The algorithms only read the graph, through the [`Neighbors`] trait.
//!
//! # Thread Safety
//!
//! [`DirectedGraph`] is [`Send`] and [`Sync`] when its key type is. Mutation and queries
//! can run concurrently from any number of threads; see the type documentation for the
//! consistency guarantees that apply.
//!
//! # Usage Examples
//!
//! ```rust
//! use std::collections::HashSet;
//! use graphscope::graph::{DirectedGraph, Direction, algorithms};
//!
//! let graph = DirectedGraph::new();
//! graph.add_edge(1, 2);
//! graph.add_edge(2, 1);
//! graph.add_edge(2, 3);
//!
//! // Components of everything that can reach 3, following source edges
//! let domain = graph.sources_closure(&3);
//! let components = algorithms::tarjan_components(&graph, domain, Direction::Backward);
//! assert_eq!(components.len(), 2);
//! assert!(components.contains(&HashSet::from([1, 2])));
//! ```

mod directed;
mod edge;
mod traits;
mod vertex;

pub mod algorithms;

pub use directed::DirectedGraph;
pub use edge::Edge;
pub use traits::{Direction, Neighbors, VertexKey};
