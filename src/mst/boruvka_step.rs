//! Shared Borůvka contraction primitives for the classical Borůvka driver
//! and the KKT driver. Unlike [`crate::mst::fbt`]'s private contraction
//! round (which only needs weights to build FBT levels), contraction here
//! carries the original graph's stable `EdgeId` through every level, since
//! KKT's final result must name edges of the original graph.

use std::collections::{HashMap, HashSet};

use crate::graph::{EdgeId, Graph};
use crate::union_find::DisjointSets;

/// One round of Borůvka's algorithm applied directly over `graph`'s own
/// edge set via `uf`, without materializing a smaller graph. Looping this
/// until it returns no edges drives the classical Borůvka MST to
/// completion in place (see [`crate::mst::boruvka`]).
pub fn boruvka_round_inplace(graph: &Graph, uf: &mut DisjointSets) -> Vec<EdgeId> {
    let n = graph.num_vertices();
    let mut best: Vec<Option<(EdgeId, f64)>> = vec![None; n];
    for (id, u, v, w) in graph.edges() {
        let cu = uf.find(u);
        let cv = uf.find(v);
        if cu == cv {
            continue;
        }
        for c in [cu, cv] {
            match best[c] {
                None => best[c] = Some((id, w)),
                Some((_, bw)) if w < bw => best[c] = Some((id, w)),
                _ => {}
            }
        }
    }

    let mut seen = HashSet::new();
    let mut chosen = Vec::new();
    for comp in 0..n {
        if let Some((id, _)) = best[comp] {
            let (u, v) = graph.endpoints(id);
            if uf.union(u, v) && seen.insert(id) {
                chosen.push(id);
            }
        }
    }
    chosen
}

/// A contracted graph retaining original `EdgeId`s across contraction
/// levels; used by the KKT driver's two-step contraction and its recursive
/// subgraph calls, which each need their own fresh `0..num_components`
/// vertex space to contract further.
#[derive(Debug, Clone)]
pub struct ContractedGraph {
    adjacency: Vec<Vec<(usize, f64, EdgeId)>>,
}

impl ContractedGraph {
    pub fn from_graph(graph: &Graph) -> Self {
        let mut adjacency = vec![Vec::new(); graph.num_vertices()];
        for (id, u, v, w) in graph.edges() {
            adjacency[u].push((v, w, id));
            adjacency[v].push((u, w, id));
        }
        ContractedGraph { adjacency }
    }

    /// Builds a contracted graph directly from an edge list, used when a
    /// prior round already produced `(u, v, weight, original_id)` edges.
    pub fn from_edges(num_vertices: usize, edges: &[(usize, usize, f64, EdgeId)]) -> Self {
        let mut adjacency = vec![Vec::new(); num_vertices];
        for &(u, v, w, id) in edges {
            adjacency[u].push((v, w, id));
            adjacency[v].push((u, w, id));
        }
        ContractedGraph { adjacency }
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_trivial(&self) -> bool {
        self.num_vertices() <= 1
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64, EdgeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&(v, _, _)| v >= u)
                .map(move |&(v, w, id)| (u, v, w, id))
        })
    }

    /// Selects each vertex's minimum incident edge, unions endpoints, and
    /// returns the contracted next-level graph together with the chosen
    /// original `EdgeId`s (deduplicated: a mutually-chosen edge is reported
    /// once, not twice).
    pub fn contract_round(&self) -> (ContractedGraph, Vec<EdgeId>) {
        let n = self.adjacency.len();
        let mut min_edge: Vec<Option<(usize, f64, EdgeId)>> = vec![None; n];
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            for &(v, w, id) in neighbors {
                match min_edge[u] {
                    None => min_edge[u] = Some((v, w, id)),
                    Some((_, cur, _)) if w < cur => min_edge[u] = Some((v, w, id)),
                    _ => {}
                }
            }
        }

        let mut uf = DisjointSets::new(n);
        for u in 0..n {
            if let Some((v, _, _)) = min_edge[u] {
                uf.union(u, v);
            }
        }

        let root_of: Vec<usize> = (0..n).map(|u| uf.find(u)).collect();
        let mut comp_id: Vec<Option<usize>> = vec![None; n];
        let mut num_components = 0;
        for &r in &root_of {
            if comp_id[r].is_none() {
                comp_id[r] = Some(num_components);
                num_components += 1;
            }
        }
        let comp_of = |u: usize| comp_id[root_of[u]].expect("every vertex belongs to a component");

        let mut seen = HashSet::new();
        let mut chosen = Vec::new();
        for u in 0..n {
            if let Some((_, _, id)) = min_edge[u] {
                if seen.insert(id) {
                    chosen.push(id);
                }
            }
        }

        let mut best: HashMap<(usize, usize), (f64, EdgeId)> = HashMap::new();
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            let cu = comp_of(u);
            for &(v, w, id) in neighbors {
                let cv = comp_of(v);
                if cu != cv {
                    let key = (cu.min(cv), cu.max(cv));
                    best.entry(key)
                        .and_modify(|(bw, bid)| {
                            if w < *bw {
                                *bw = w;
                                *bid = id;
                            }
                        })
                        .or_insert((w, id));
                }
            }
        }

        let mut next_adj = vec![Vec::new(); num_components];
        for ((a, b), (w, id)) in best {
            next_adj[a].push((b, w, id));
            next_adj[b].push((a, w, id));
        }

        (ContractedGraph { adjacency: next_adj }, chosen)
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
    fn inplace_round_reaches_spanning_tree_on_triangle() {
        let g = triangle();
        let mut uf = DisjointSets::new(3);
        let mut chosen = Vec::new();
        loop {
            let round = boruvka_round_inplace(&g, &mut uf);
            if round.is_empty() {
                break;
            }
            chosen.extend(round);
        }
        assert_eq!(chosen.len(), 2);
        let total: f64 = chosen.iter().map(|&id| g.edge_weight(id)).sum();
        assert_eq!(total, 3.0);
    }

    #[test]
    fn contracted_graph_collapses_to_single_vertex() {
        let g = triangle();
        let mut current = ContractedGraph::from_graph(&g);
        let mut chosen = Vec::new();
        while !current.is_trivial() {
            let (next, round) = current.contract_round();
            chosen.extend(round);
            current = next;
        }
        assert_eq!(current.num_vertices(), 1);
        assert_eq!(chosen.len(), 2);
    }
}
