//! `AlgorithmRegistry` / `Runner`: uniform invocation across the fixed set
//! of algorithm names, and total-weight comparison against the Kruskal
//! reference, in the style of this codebase's experiment runner.

use std::time::Instant;

use float_cmp::approx_eq;

use crate::error::MstError;
use crate::graph::Graph;
use crate::mst::{boruvka, kkt, kruskal, prim, MstAlgorithm, MstResult};

const TOLERANCE: f64 = 0.001;

struct FnAlgorithm {
    name: &'static str,
    run: fn(&Graph, u64) -> Result<MstResult, MstError>,
}

impl MstAlgorithm for FnAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }

    fn compute(&self, graph: &Graph, seed: u64) -> Result<MstResult, MstError> {
        (self.run)(graph, seed)
    }
}

/// The fixed, ordered list of algorithms exposed to the CLI and to `--filter`.
pub struct AlgorithmRegistry {
    algorithms: Vec<FnAlgorithm>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        AlgorithmRegistry {
            algorithms: vec![
                FnAlgorithm { name: "kruskal", run: |g, _| Ok(kruskal::kruskal(g)) },
                FnAlgorithm { name: "prim_bin_heap", run: |g, _| Ok(prim::prim_binary_heap(g)) },
                FnAlgorithm { name: "prim_fib_heap", run: |g, _| Ok(prim::prim_fibonacci_heap(g)) },
                FnAlgorithm { name: "boruvka", run: |g, _| Ok(boruvka::boruvka(g)) },
                FnAlgorithm { name: "random_KKT", run: kkt::random_kkt },
            ],
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    /// All registered algorithms, or only those named in `filter` if non-empty.
    pub fn select(&self, filter: &[String]) -> Vec<&dyn MstAlgorithm> {
        self.algorithms
            .iter()
            .filter(|a| filter.is_empty() || filter.iter().any(|f| f == a.name()))
            .map(|a| a as &dyn MstAlgorithm)
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives `test`/`bench` by invoking each selected algorithm and comparing
/// its result weight to the Kruskal reference within tolerance.
pub struct Runner<'a> {
    graph: &'a Graph,
    reference_weight: f64,
}

impl<'a> Runner<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Runner {
            graph,
            reference_weight: graph.reference_mst_weight(),
        }
    }

    /// Runs every algorithm, returning `(name, matches_reference)` pairs. An
    /// algorithm that errors is logged and reported as failing rather than
    /// aborting the whole session.
    pub fn test(&self, algorithms: &[&dyn MstAlgorithm], seed: u64) -> Vec<(String, bool)> {
        algorithms
            .iter()
            .map(|alg| {
                let passed = match alg.compute(self.graph, seed) {
                    Ok(result) => {
                        let weight = result.total_weight(self.graph);
                        let matches =
                            approx_eq!(f64, weight, self.reference_weight, epsilon = TOLERANCE);
                        if matches {
                            log::info!("{} passed: weight {weight} matches reference", alg.name());
                        } else {
                            log::warn!(
                                "{} failed: expected {}, got {weight}",
                                alg.name(),
                                self.reference_weight
                            );
                        }
                        matches
                    }
                    Err(e) => {
                        log::error!("{} did not yield a result: {e}", alg.name());
                        false
                    }
                };
                (alg.name().to_string(), passed)
            })
            .collect()
    }

    /// Times `runs` invocations of each algorithm, returning `(name,
    /// mean_microseconds)` pairs. An algorithm that errors is skipped from
    /// the output rather than aborting the whole session.
    pub fn bench(&self, algorithms: &[&dyn MstAlgorithm], seed: u64, runs: u32) -> Vec<(String, f64)> {
        algorithms
            .iter()
            .filter_map(|alg| {
                let start = Instant::now();
                for _ in 0..runs {
                    if let Err(e) = alg.compute(self.graph, seed) {
                        log::error!("{} did not yield a result: {e}", alg.name());
                        return None;
                    }
                }
                let mean_micros = start.elapsed().as_micros() as f64 / f64::from(runs);
                Some((alg.name().to_string(), mean_micros))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::new(3);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 2.0).unwrap();
        g.add_edge(0, 2, 3.0).unwrap();
        g
    }

    #[test]
    fn names_match_the_fixed_external_contract() {
        let registry = AlgorithmRegistry::new();
        assert_eq!(
            registry.names(),
            vec!["kruskal", "prim_bin_heap", "prim_fib_heap", "boruvka", "random_KKT"]
        );
    }

    #[test]
    fn filter_selects_a_subset() {
        let registry = AlgorithmRegistry::new();
        let selected = registry.select(&["boruvka".to_string()]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), "boruvka");
    }

    #[test]
    fn every_algorithm_matches_the_kruskal_reference_on_a_triangle() {
        let g = triangle();
        let registry = AlgorithmRegistry::new();
        let runner = Runner::new(&g);
        let results = runner.test(&registry.select(&[]), 0);
        for (name, passed) in results {
            assert!(passed, "{name} did not match the reference weight");
        }
    }
}
