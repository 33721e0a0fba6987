//! Kruskal's MST algorithm: sort edges ascending, add an edge iff it joins
//! two different components, stop at `|V| - 1` edges.

use crate::graph::Graph;
use crate::mst::MstResult;
use crate::union_find::DisjointSets;

pub fn kruskal(graph: &Graph) -> MstResult {
    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort_unstable_by(|a, b| a.3.partial_cmp(&b.3).expect("weights must be finite"));

    let mut components = DisjointSets::new(graph.num_vertices());
    let mut tree_edges = Vec::with_capacity(graph.num_vertices().saturating_sub(1));

    for (id, u, v, _) in edges {
        if components.union(u, v) {
            tree_edges.push(id);
            if tree_edges.len() == graph.num_vertices() - 1 {
                break;
            }
        }
    }

    MstResult::EdgeList(tree_edges)
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

    fn star() -> Graph {
        let mut g = Graph::new(4);
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(0, 2, 2.0).unwrap();
        g.add_edge(0, 3, 3.0).unwrap();
        g
    }

    #[test]
    fn triangle_picks_the_two_cheapest_edges() {
        let g = triangle();
        let result = kruskal(&g);
        assert_eq!(result.total_weight(&g), 3.0);
    }

    #[test]
    fn star_is_already_minimal() {
        let g = star();
        let result = kruskal(&g);
        assert_eq!(result.total_weight(&g), 6.0);
    }
}
