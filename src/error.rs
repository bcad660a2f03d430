use thiserror::Error;

macro_rules! config_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidConfig($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidConfig(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The structural graph operations (adding and removing vertices and edges, closures, SCCs)
/// never fail: "already present" and "not found" are reported through `bool` and `Option`
/// results. Errors only arise when constructing a graph from an invalid
/// [`crate::GraphConfig`], or when [`crate::DirectedGraph::validate`] detects that the
/// sink/source invariant does not hold.
///
/// # Error Categories
///
/// ## Configuration Errors
/// - [`Error::InvalidConfig`] - A [`crate::GraphConfig`] value was rejected
///
/// ## Consistency Errors
/// - [`Error::AsymmetricEdge`] - An edge is recorded on one side only
/// - [`Error::DanglingReference`] - An adjacency set refers to a removed vertex
///
/// # Examples
///
/// ```rust
/// use graphscope::{DirectedGraph, Error, GraphConfig};
///
/// match DirectedGraph::<u32>::with_config(GraphConfig::default().with_shard_amount(3)) {
///     Ok(_) => unreachable!(),
///     Err(Error::InvalidConfig(message)) => println!("rejected: {message}"),
///     Err(e) => println!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The supplied graph configuration is invalid.
    ///
    /// Raised by [`crate::GraphConfig::validate`], for instance when the shard amount is
    /// not a power of two greater than one.
    #[error("Invalid graph configuration - {0}")]
    InvalidConfig(String),

    /// An edge is present in only one of the two adjacency sets that record it.
    ///
    /// Every edge `from -> to` must appear both as `to` in the sink set of `from` and as
    /// `from` in the source set of `to`. Outside of a concurrent mutation this indicates
    /// a broken invariant.
    ///
    /// # Fields
    ///
    /// * `from` - Debug rendering of the edge source
    /// * `to` - Debug rendering of the edge sink
    #[error("Edge {from} -> {to} is recorded on one side only")]
    AsymmetricEdge {
        /// The source vertex of the half-recorded edge
        from: String,
        /// The sink vertex of the half-recorded edge
        to: String,
    },

    /// An adjacency set names a key that has no vertex in the graph.
    ///
    /// # Fields
    ///
    /// * `vertex` - Debug rendering of the vertex holding the stale reference
    /// * `missing` - Debug rendering of the key that no longer exists
    #[error("Vertex {vertex} refers to missing vertex {missing}")]
    DanglingReference {
        /// The vertex whose adjacency set holds the stale key
        vertex: String,
        /// The key without a vertex
        missing: String,
    },
}
