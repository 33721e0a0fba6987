//! Graph-file parsing and JSON result formatting for the CLI.
//!
//! The text format is the whitespace-delimited one used throughout this
//! codebase's graph tooling: a header line `N M`, then `M` (or fewer, since
//! duplicates are dropped) lines of `u v w`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::GraphError;
use crate::graph::Graph;

/// Parses a graph file at `path`. The header's edge count is advisory only;
/// the true edge count is however many non-duplicate `u v w` lines follow.
pub fn parse_graph_file(path: &Path) -> Result<Graph, GraphError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| GraphError::ParseError(format!("{}: {e}", path.display())))?;
    parse_graph_str(&contents)
}

fn parse_graph_str(contents: &str) -> Result<Graph, GraphError> {
    let mut lines = contents.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| GraphError::ParseError("missing header line".to_string()))?;
    let mut header_fields = header.split_whitespace();
    let num_vertices: usize = header_fields
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| GraphError::ParseError(header.to_string()))?;

    let mut graph = Graph::new(num_vertices);
    for line in lines {
        let mut fields = line.split_whitespace();
        let u: usize = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| GraphError::ParseError(line.to_string()))?;
        let v: usize = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| GraphError::ParseError(line.to_string()))?;
        let w: f64 = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| GraphError::ParseError(line.to_string()))?;

        match graph.add_edge(u, v, w) {
            Ok(_) | Err(GraphError::DuplicateEdge(_, _)) => {}
            Err(other) => return Err(other),
        }
    }

    Ok(graph)
}

#[derive(Serialize)]
pub struct InfoReport {
    pub connected: bool,
    pub unique_weights: bool,
    pub vertices: usize,
    pub edges: usize,
}

pub fn info_report(graph: &Graph) -> InfoReport {
    InfoReport {
        connected: graph.is_connected(),
        unique_weights: graph.has_unique_weights(),
        vertices: graph.num_vertices(),
        edges: graph.num_edges(),
    }
}

/// `test` prints `{alg_name: true|false, ...}`; `bench` prints
/// `{alg_name: mean_microseconds, ...}`. A `BTreeMap` keeps key order stable
/// across runs, which plain JSON serialization of a `HashMap` would not.
pub fn print_json<T: Serialize>(results: &BTreeMap<String, T>) {
    match serde_json::to_string(results) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize results: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_edges() {
        let graph = parse_graph_str("3 3\n0 1 1.0\n1 2 2.0\n0 2 3.0\n").unwrap();
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 3);
    }

    #[test]
    fn first_occurrence_of_duplicate_pair_wins() {
        let graph = parse_graph_str("2 2\n0 1 1.0\n1 0 9.0\n").unwrap();
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.edge_weight(0), 1.0);
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(parse_graph_str("not a header\n").is_err());
    }

    #[test]
    fn rejects_non_finite_edge_weight() {
        assert!(parse_graph_str("2 1\n0 1 nan\n").is_err());
        assert!(parse_graph_str("2 1\n0 1 inf\n").is_err());
    }

    #[test]
    fn scenario_s6_disconnected_input() {
        let graph = parse_graph_str("3 1\n0 1 5.0\n").unwrap();
        assert!(!graph.is_connected());
    }
}
