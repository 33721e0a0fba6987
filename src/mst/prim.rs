//! Prim's MST algorithm, in the two forms distinguished by their
//! priority-queue backing: a binary heap with re-push-on-relax (no
//! decrease-key), and a Fibonacci heap with true decrease-key.

use binary_heap_plus::BinaryHeap;

use crate::fibonacci_heap::{FibonacciHeap, Handle};
use crate::graph::Graph;
use crate::mst::MstResult;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Grows from vertex 0, backed by [`binary_heap_plus::BinaryHeap`]. Since a
/// binary heap has no decrease-key, a relaxed vertex is simply re-pushed;
/// stale, now-superseded entries are detected and skipped on pop via the
/// `Black` color.
pub fn prim_binary_heap(graph: &Graph) -> MstResult {
    let n = graph.num_vertices();
    let mut pred: Vec<Option<usize>> = vec![None; n];
    if n == 0 {
        return MstResult::Predecessors(pred);
    }

    let mut colors = vec![Color::White; n];
    let mut best_weight = vec![f64::INFINITY; n];
    let mut queue = BinaryHeap::with_capacity_by(n, |a: &(f64, usize, usize), b: &(f64, usize, usize)| {
        b.0.partial_cmp(&a.0).expect("weights must be finite")
    });

    // fictitious self-edge into the start vertex
    best_weight[0] = 0.0;
    colors[0] = Color::Gray;
    queue.push((0.0, 0, 0));

    while let Some((_, u, from)) = queue.pop() {
        if colors[u] == Color::Black {
            continue;
        }
        colors[u] = Color::Black;
        if u != from {
            pred[u] = Some(from);
        }

        for a in graph.out_edges(u) {
            if colors[a.to] != Color::Black && a.weight < best_weight[a.to] {
                best_weight[a.to] = a.weight;
                colors[a.to] = Color::Gray;
                queue.push((a.weight, a.to, u));
            }
        }
    }

    MstResult::Predecessors(pred)
}

/// Identical growth logic to [`prim_binary_heap`], but every vertex is
/// inserted up front at weight `+infinity` and relaxation uses a true
/// `decrease_key`, since no crate in this codebase's dependency stack
/// provides a Fibonacci heap.
pub fn prim_fibonacci_heap(graph: &Graph) -> MstResult {
    let n = graph.num_vertices();
    let mut pred: Vec<Option<usize>> = vec![None; n];
    if n == 0 {
        return MstResult::Predecessors(pred);
    }

    let mut in_tree = vec![false; n];
    let mut best_weight = vec![f64::INFINITY; n];
    let mut heap = FibonacciHeap::new();
    let mut handles: Vec<Handle> = Vec::with_capacity(n);

    best_weight[0] = 0.0;
    handles.push(heap.push(0.0, 0));
    for v in 1..n {
        handles.push(heap.push(f64::INFINITY, v));
    }

    while let Some((_, u)) = heap.pop_min() {
        in_tree[u] = true;
        for a in graph.out_edges(u) {
            if !in_tree[a.to] && a.weight < best_weight[a.to] {
                best_weight[a.to] = a.weight;
                pred[a.to] = Some(u);
                heap.decrease_key(handles[a.to], a.weight);
            }
        }
    }

    MstResult::Predecessors(pred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

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

    #[rstest]
    #[case::binary_heap(prim_binary_heap as fn(&Graph) -> MstResult)]
    #[case::fibonacci_heap(prim_fibonacci_heap as fn(&Graph) -> MstResult)]
    fn triangle_picks_the_two_cheapest_edges(#[case] prim: fn(&Graph) -> MstResult) {
        let g = triangle();
        assert_eq!(prim(&g).total_weight(&g), 3.0);
    }

    #[rstest]
    #[case::binary_heap(prim_binary_heap as fn(&Graph) -> MstResult)]
    #[case::fibonacci_heap(prim_fibonacci_heap as fn(&Graph) -> MstResult)]
    fn star_is_already_minimal(#[case] prim: fn(&Graph) -> MstResult) {
        let g = star();
        assert_eq!(prim(&g).total_weight(&g), 6.0);
    }
}
