//! # graphscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! of the graphscope library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all graphscope operations
pub use crate::Error;

/// The result type used throughout graphscope
pub use crate::Result;

/// Construction-time tuning of the graph's concurrent maps
pub use crate::GraphConfig;

// ================================================================================================
// Graph
// ================================================================================================

/// The concurrent directed graph and its value types
pub use crate::graph::{DirectedGraph, Edge};

/// Key bound and traversal direction
pub use crate::graph::{Direction, VertexKey};

/// Adjacency abstraction the algorithms are written against
pub use crate::graph::Neighbors;

// ================================================================================================
// Algorithms
// ================================================================================================

/// Closure, SCC and cycle-filter building blocks
pub use crate::graph::algorithms::{
    is_cycle, remove_non_cycles, sinks_closure, sources_closure, tarjan_components,
    transitive_closure,
};
