//! Minimum-spanning-tree algorithms and their shared building blocks.

pub mod boruvka;
pub mod boruvka_step;
pub mod fbt;
pub mod kkt;
pub mod kruskal;
pub mod lca;
pub mod prim;
pub mod tpm;
pub mod verify;

use crate::error::MstError;
use crate::graph::{EdgeId, Graph};

/// An MST in one of three equivalent representations; every classical and
/// randomized algorithm in this module produces whichever is most natural
/// for it, and all three are comparable via [`MstResult::total_weight`].
#[derive(Debug, Clone)]
pub enum MstResult {
    EdgeList(Vec<EdgeId>),
    PairList(Vec<(usize, usize)>),
    /// `pred[v]` is `v`'s parent in the tree, `None` for the root (or for an
    /// unreached vertex, which contributes no weight).
    Predecessors(Vec<Option<usize>>),
}

impl MstResult {
    pub fn total_weight(&self, graph: &Graph) -> f64 {
        match self {
            MstResult::EdgeList(ids) => ids.iter().map(|&id| graph.edge_weight(id)).sum(),
            MstResult::PairList(pairs) => pairs
                .iter()
                .map(|&(u, v)| weight_of_pair(graph, u, v))
                .sum(),
            MstResult::Predecessors(pred) => pred
                .iter()
                .enumerate()
                .filter_map(|(v, p)| p.map(|u| weight_of_pair(graph, u, v)))
                .sum(),
        }
    }
}

fn weight_of_pair(graph: &Graph, u: usize, v: usize) -> f64 {
    graph
        .out_edges(u)
        .iter()
        .find(|a| a.to == v)
        .map(|a| a.weight)
        .expect("MstResult pair must name an existing edge")
}

/// Common contract implemented by every MST algorithm in the registry.
pub trait MstAlgorithm {
    fn name(&self) -> &'static str;

    /// Computes an MST of `graph`. `seed` is ignored by deterministic
    /// algorithms and drives the RNG of randomized ones (KKT).
    fn compute(&self, graph: &Graph, seed: u64) -> Result<MstResult, MstError>;
}
