//! Configuration for graph construction.
//!
//! [`GraphConfig`] tunes the concurrent hash structures backing a
//! [`crate::DirectedGraph`]. None of the settings change graph semantics, they only
//! affect allocation and lock striping.

use crate::Result;

/// Construction-time settings for a [`crate::DirectedGraph`].
///
/// # Examples
///
/// ```rust
/// use graphscope::{DirectedGraph, GraphConfig};
///
/// let config = GraphConfig::default()
///     .with_initial_capacity(1024)
///     .with_shard_amount(16)
///     .with_adjacency_capacity(4);
///
/// let graph: DirectedGraph<u64> = DirectedGraph::with_config(config)?;
/// assert!(graph.is_empty());
/// # Ok::<(), graphscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphConfig {
    /// Capacity hint for the vertex map (default: 0).
    pub initial_capacity: usize,

    /// Number of shards of the vertex map (default: `None`, dashmap picks one from the
    /// number of available CPUs). Must be a power of two greater than one.
    pub shard_amount: Option<usize>,

    /// Capacity hint for the sink and source sets of every newly created vertex
    /// (default: 0).
    pub adjacency_capacity: usize,
}

impl GraphConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity hint for the vertex map.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the number of shards of the vertex map.
    #[must_use]
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = Some(shards);
        self
    }

    /// Sets the capacity hint for per-vertex adjacency sets.
    #[must_use]
    pub fn with_adjacency_capacity(mut self, capacity: usize) -> Self {
        self.adjacency_capacity = capacity;
        self
    }

    /// Checks that the configuration can be used to build a graph.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if `shard_amount` is set and is not a
    /// power of two greater than one. dashmap would panic on such a value.
    pub fn validate(&self) -> Result<()> {
        if let Some(shards) = self.shard_amount {
            if shards < 2 || !shards.is_power_of_two() {
                return Err(config_error!(
                    "shard amount must be a power of two greater than one, got {}",
                    shards
                ));
            }
        }

        Ok(())
    }
}
