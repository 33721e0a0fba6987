//! Spanning tree → fully-branching tree (`st_to_fbt`).
//!
//! Builds the FBT by iterated Borůvka contraction on the input tree: each
//! round adds one internal node per surviving component, with a
//! child→parent edge carrying the weight of the component's chosen
//! minimum edge.

use std::collections::HashMap;

use crate::graph::Graph;
use crate::union_find::DisjointSets;

/// A fully-branching tree derived from a spanning tree: original vertices
/// appear only as leaves (`leaf_of[v] == v` by construction, since leaves are
/// allocated with the same ids as the original tree's vertices), every
/// internal node has at least two children, and all leaves share the same
/// depth.
#[derive(Debug, Clone)]
pub struct Fbt {
    pub children: Vec<Vec<usize>>,
    /// Weight of the edge from this node up to its parent; `-infinity` for
    /// the root.
    pub weight_to_parent: Vec<f64>,
    pub leaf_of: Vec<usize>,
    pub root: usize,
}

impl Fbt {
    pub fn num_nodes(&self) -> usize {
        self.children.len()
    }
}

/// Builds the FBT of `tree`, which must be an already-acyclic spanning tree
/// (`tree.num_edges() == tree.num_vertices() - 1`).
pub fn st_to_fbt(tree: &Graph) -> Fbt {
    let n = tree.num_vertices();
    let leaf_of: Vec<usize> = (0..n).collect();

    if n <= 1 {
        return Fbt {
            children: vec![Vec::new(); n],
            weight_to_parent: vec![f64::NEG_INFINITY; n],
            leaf_of,
            root: 0,
        };
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut weight_to_parent: Vec<f64> = vec![f64::NEG_INFINITY; n];

    let mut current_adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for (_, u, v, w) in tree.edges() {
        current_adj[u].push((v, w));
        current_adj[v].push((u, w));
    }

    let mut level_to_fbt: Vec<usize> = (0..n).collect();
    let mut next_id = n;
    let mut root = 0usize;

    while current_adj.len() > 1 {
        let (next_adj, merges) = boruvka_round(&current_adj);
        let mut comp_to_fbt: Vec<Option<usize>> = vec![None; next_adj.len()];

        for (old_idx, comp, weight) in merges {
            let src_fbt = level_to_fbt[old_idx];
            let dst_fbt = *comp_to_fbt[comp].get_or_insert_with(|| {
                let id = next_id;
                next_id += 1;
                children.push(Vec::new());
                weight_to_parent.push(f64::NEG_INFINITY);
                id
            });

            weight_to_parent[src_fbt] = weight;
            children[dst_fbt].push(src_fbt);
            root = dst_fbt;
        }

        level_to_fbt = comp_to_fbt
            .into_iter()
            .map(|c| c.expect("every surviving component receives at least one merge"))
            .collect();
        current_adj = next_adj;
    }

    Fbt {
        children,
        weight_to_parent,
        leaf_of,
        root,
    }
}

/// One Borůvka contraction round specialized for FBT construction: returns
/// the contracted adjacency and, for every current-level vertex, the
/// `(vertex, new_component_index, chosen_edge_weight)` triple used to wire
/// up the next FBT level.
fn boruvka_round(adj: &[Vec<(usize, f64)>]) -> (Vec<Vec<(usize, f64)>>, Vec<(usize, usize, f64)>) {
    let n = adj.len();
    let mut min_edge: Vec<Option<(usize, f64)>> = vec![None; n];
    for (u, neighbors) in adj.iter().enumerate() {
        for &(v, w) in neighbors {
            match min_edge[u] {
                None => min_edge[u] = Some((v, w)),
                Some((_, cur)) if w < cur => min_edge[u] = Some((v, w)),
                _ => {}
            }
        }
    }

    let mut uf = DisjointSets::new(n);
    for u in 0..n {
        if let Some((v, _)) = min_edge[u] {
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

    let merges: Vec<(usize, usize, f64)> = (0..n)
        .filter_map(|u| min_edge[u].map(|(_, w)| (u, comp_of(u), w)))
        .collect();

    let mut best: HashMap<(usize, usize), f64> = HashMap::new();
    for (u, neighbors) in adj.iter().enumerate() {
        let cu = comp_of(u);
        for &(v, w) in neighbors {
            let cv = comp_of(v);
            if cu != cv {
                let key = (cu.min(cv), cu.max(cv));
                best.entry(key).and_modify(|bw| {
                    if w < *bw {
                        *bw = w;
                    }
                }).or_insert(w);
            }
        }
    }

    let mut next_adj = vec![Vec::new(); num_components];
    for ((a, b), w) in best {
        next_adj[a].push((b, w));
        next_adj[b].push((a, w));
    }

    (next_adj, merges)
}
