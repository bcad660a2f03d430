// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # graphscope
//!
//! An in-memory directed graph that can be mutated concurrently from many threads
//! and answers reachability and cycle queries. It is intended as a building block for
//! anything that tracks "what depends on what": build-order graphs, call graphs,
//! resource-dependency graphs.
//!
//! ## Features
//!
//! - **Concurrent mutation** - vertices live in a sharded hash map and every adjacency
//!   set has its own lock, there is no graph-wide lock
//! - **Closures** - forward, backward and bidirectional reachability from a root
//! - **Strongly connected components** - iterative Tarjan, safe on deep graphs
//! - **Cycle detection** - SCCs filtered down to genuine cycles, including self-loops
//!
//! ## Quick Start
//!
//! ```rust
//! use graphscope::prelude::*;
//!
//! let graph: DirectedGraph<&str> = DirectedGraph::new();
//! graph.add_edge("A", "B");
//! graph.add_edge("B", "C");
//! graph.add_edge("C", "A");
//! graph.add_edge("C", "D");
//!
//! let cycles = graph.all_cycles();
//! assert_eq!(cycles.len(), 1);
//! assert_eq!(cycles[0].len(), 3);
//!
//! assert_eq!(graph.sources_closure(&"D").len(), 4);
//! assert_eq!(graph.sinks_closure(&"D").len(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`graph`] - The vertex store, mutation API and graph algorithms
//! - [`config`] - Construction-time tuning of the underlying concurrent maps
//! - [`Error`] and [`Result`] - Error handling
//! - [`prelude`] - Convenient re-exports
//!
//! ## Consistency Model
//!
//! Individual set operations are atomic, but no operation that touches more than one
//! vertex is. A reader racing with [`DirectedGraph::add_edge`] may observe only one
//! half of the edge, and a traversal racing with any mutation produces a best-effort
//! result. Callers that need a consistent view synchronize externally around the
//! traversal; [`DirectedGraph::validate`] checks the structural invariants at a
//! quiescent point.

#[macro_use]
pub(crate) mod error;

pub mod config;
pub mod graph;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use graphscope::prelude::*;
///
/// let graph: DirectedGraph<u32> = DirectedGraph::new();
/// assert!(graph.add_node(1));
/// assert!(!graph.add_node(1));
/// ```
pub mod prelude;

/// `graphscope` Result type
///
/// A type alias for `std::result::Result<T, Error>` used by the fallible
/// operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `graphscope` Error type
///
/// Covers rejected configuration and structural inconsistencies reported by
/// [`DirectedGraph::validate`].
pub use error::Error;

pub use config::GraphConfig;
pub use graph::{Direction, DirectedGraph, Edge, Neighbors, VertexKey};
