//! Classical Borůvka's MST algorithm: repeat the Borůvka step in place
//! until no component has a crossing edge left, i.e. a single component
//! remains.

use crate::graph::Graph;
use crate::mst::boruvka_step::boruvka_round_inplace;
use crate::mst::MstResult;
use crate::union_find::DisjointSets;

pub fn boruvka(graph: &Graph) -> MstResult {
    let mut components = DisjointSets::new(graph.num_vertices());
    let mut pairs = Vec::new();

    loop {
        let chosen = boruvka_round_inplace(graph, &mut components);
        if chosen.is_empty() {
            break;
        }
        for id in chosen {
            pairs.push(graph.endpoints(id));
        }
    }

    MstResult::PairList(pairs)
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
        assert_eq!(boruvka(&g).total_weight(&g), 3.0);
    }

    #[test]
    fn star_is_already_minimal() {
        let g = star();
        assert_eq!(boruvka(&g).total_weight(&g), 6.0);
    }
}
