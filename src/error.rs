//! Error types shared across the crate.
//!
//! Mirrors the manual `Display` + `std::error::Error` style used elsewhere in
//! this codebase rather than reaching for a derive macro.

use std::fmt;

/// Errors raised while building or inspecting a [`crate::graph::Graph`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A line of the input file could not be parsed.
    ParseError(String),
    /// `u == v` in an edge.
    SelfLoop(usize),
    /// An edge endpoint exceeds `num_vertices`.
    VertexOutOfRange(usize),
    /// The unordered pair `(u, v)` was already present.
    DuplicateEdge(usize, usize),
    /// An edge weight was `NaN` or infinite.
    NonFiniteWeight(f64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::ParseError(line) => write!(f, "could not parse graph line: {line}"),
            GraphError::SelfLoop(v) => write!(f, "self-loop at vertex {v} is not allowed"),
            GraphError::VertexOutOfRange(v) => write!(f, "vertex {v} is out of range"),
            GraphError::DuplicateEdge(u, v) => write!(f, "duplicate edge ({u}, {v})"),
            GraphError::NonFiniteWeight(w) => write!(f, "edge weight {w} is not finite"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors raised while computing or verifying an MST.
#[derive(Debug, Clone, PartialEq)]
pub enum MstError {
    /// The graph is not connected, so no spanning tree exists.
    Disconnected,
    /// A KKT-style algorithm was invoked on a graph with repeated weights.
    NonUniqueWeights,
    /// An internal invariant was violated; this indicates a bug, not bad input.
    AlgorithmFailure(String),
}

impl fmt::Display for MstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MstError::Disconnected => write!(f, "graph is not connected"),
            MstError::NonUniqueWeights => {
                write!(f, "algorithm requires pairwise-distinct edge weights")
            }
            MstError::AlgorithmFailure(msg) => write!(f, "internal invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for MstError {}
