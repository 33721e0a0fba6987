//! Tree-Path-Maxima (Komlós / King / Hagerup) over a fully-branching tree.
//!
//! Given leaf-to-ancestor queries, answers each with the vertex whose
//! edge-to-parent is heaviest along the open path from the leaf up to (but
//! excluding) the ancestor. Ported from
//! https://www.cs.tau.ac.il/~zwick/grad-algo-0910/mst-verify.pdf.

use crate::mst::fbt::Fbt;
use crate::mst::lca::Lca;

const NONE: usize = usize::MAX;

/// A query for the heaviest parent-edge on the open path `(leaf, ancestor)`.
/// `ancestor` must be a proper, strict ancestor of `leaf`.
#[derive(Debug, Clone, Copy)]
pub struct BottomUpQuery {
    pub leaf: usize,
    pub ancestor: usize,
}

/// Answers a batch of [`BottomUpQuery`]s against one FBT.
pub struct TreePathMaxima {
    /// `answers[i]` is the vertex answering `queries[i]`.
    pub answers: Vec<usize>,
}

impl TreePathMaxima {
    pub fn new(queries: &[BottomUpQuery], fbt: &Fbt, lca: &Lca) -> Self {
        assert!(!queries.is_empty(), "TreePathMaxima requires at least one query");
        let depth = lca.depth(queries[0].leaf);
        let n = fbt.num_nodes();

        let mut first_query = vec![NONE; n];
        let mut next_query = vec![NONE; queries.len()];
        let mut query_sets = vec![0u64; n];
        for (i, q) in queries.iter().enumerate() {
            next_query[i] = first_query[q.leaf];
            first_query[q.leaf] = i;
            query_sets[q.leaf] |= 1u64 << lca.depth(q.ancestor);
        }
        propagate_query_sets_up(&mut query_sets, fbt, lca, depth);

        let median_table = compute_median_table(depth);

        let mut state = VisitState {
            fbt,
            lca,
            queries,
            first_query,
            next_query,
            query_sets,
            median_table,
            answers: vec![0usize; queries.len()],
        };
        state.visit(fbt.root, depth);
        TreePathMaxima { answers: state.answers }
    }
}

struct VisitState<'a> {
    fbt: &'a Fbt,
    lca: &'a Lca,
    queries: &'a [BottomUpQuery],
    first_query: Vec<usize>,
    next_query: Vec<usize>,
    query_sets: Vec<u64>,
    median_table: Vec<usize>,
    answers: Vec<usize>,
}

impl VisitState<'_> {
    fn weight(&self, v: usize) -> f64 {
        self.fbt.weight_to_parent[v]
    }

    fn binary_search(&self, w: f64, stack: &[usize], mut s: u64) -> usize {
        if s == 0 {
            return 0;
        }
        let mut j = self.median_table[s as usize];
        while s != (1u64 << j) {
            s &= if self.weight(stack[j]) > w {
                !((1u64 << j) - 1)
            } else {
                (1u64 << j) - 1
            };
            j = self.median_table[s as usize];
        }
        if self.weight(stack[j]) > w {
            j
        } else {
            0
        }
    }

    /// Explicit-stack traversal so FBT depth never grows the native call
    /// stack; mirrors the recursive `visit(v, S)` of the reference
    /// implementation.
    fn visit(&mut self, root: usize, depth: usize) {
        let mut p = vec![0usize; depth + 1];
        let mut s_of = vec![0u64; self.fbt.num_nodes()];
        // (vertex, incoming S from parent, next unvisited child index)
        let mut stack: Vec<(usize, u64, usize)> = vec![(root, 0, 0)];

        while let Some(&(v, s_in, child_idx)) = stack.last() {
            let top = stack.len() - 1;
            if child_idx == 0 {
                p[self.lca.depth(v)] = v;
                let k = self.binary_search(self.weight(v), &p, down(self.query_sets[v], s_in));
                let s_prime = down(
                    self.query_sets[v],
                    (s_in & ((1u64 << (k + 1)) - 1)) | (1u64 << self.lca.depth(v)),
                );
                s_of[v] = s_prime;

                let mut qi = self.first_query[v];
                while qi != NONE {
                    let ancestor_depth = self.lca.depth(self.queries[qi].ancestor);
                    let pos = self.median_table[down(1u64 << ancestor_depth, s_prime) as usize];
                    self.answers[qi] = p[pos];
                    qi = self.next_query[qi];
                }
            }

            let s_prime = s_of[v];
            if child_idx < self.fbt.children[v].len() {
                let child = self.fbt.children[v][child_idx];
                stack[top].2 += 1;
                stack.push((child, s_prime, 0));
            } else {
                stack.pop();
            }
        }
    }
}

/// Restricts `b` to the depths below the highest active bit of `a`.
fn down(a: u64, b: u64) -> u64 {
    b & (!(a | b) ^ (a.wrapping_add(a | !b)))
}

fn propagate_query_sets_up(query_sets: &mut [u64], fbt: &Fbt, lca: &Lca, depth: usize) {
    let n = fbt.num_nodes();
    let mut by_depth: Vec<Vec<usize>> = vec![Vec::new(); depth + 1];
    for v in 0..n {
        by_depth[lca.depth(v)].push(v);
    }
    for d in (1..=depth).rev() {
        let parent_mask = !(1u64 << (d - 1));
        for &v in &by_depth[d] {
            if let Some(parent) = lca.parent(v) {
                query_sets[parent] |= query_sets[v] & parent_mask;
            }
        }
    }
}

fn subsets(t: &mut [u64], n: usize, k: usize, p: usize) -> usize {
    if n < k {
        return p;
    }
    if k == 0 {
        t[p] = 0;
        return p + 1;
    }
    let q = subsets(t, n - 1, k - 1, p);
    for i in p..q {
        t[i] |= 1u64 << (n - 1);
    }
    subsets(t, n - 1, k, q)
}

fn compute_median_table(h: usize) -> Vec<usize> {
    let mut median_table = vec![0usize; 1usize << (h + 1)];
    let mut t = vec![0u64; (1usize << h) + 1];
    for s in 0..=h {
        for k in 0..=s {
            let p = subsets(&mut t, h - s, k, 0);
            let q1 = subsets(&mut t, s, k, p);
            let q = subsets(&mut t, s, k + 1, q1);
            for i in 0..p {
                let b = (1u64 << (s + 1)).wrapping_mul(t[i]) + (1u64 << s);
                for &tj in &t[p..q] {
                    median_table[(b + tj) as usize] = s;
                }
            }
        }
    }
    median_table
}

#[cfg(test)]
mod tests {
    use super::*;

    // T from spec scenario S3, already shaped as a valid FBT (every internal
    // node has exactly two children, all leaves at depth 2).
    fn sample_fbt() -> Fbt {
        Fbt {
            children: vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![], vec![], vec![], vec![]],
            weight_to_parent: vec![f64::NEG_INFINITY, 1.5, 2.3, 0.9, 1.2, 3.1, 2.8],
            leaf_of: (0..7).collect(),
            root: 0,
        }
    }

    #[test]
    fn matches_scenario_s3() {
        let fbt = sample_fbt();
        let lca = Lca::new(&fbt.children, fbt.root);
        let queries = [
            BottomUpQuery { leaf: 3, ancestor: 0 },
            BottomUpQuery { leaf: 3, ancestor: 1 },
            BottomUpQuery { leaf: 4, ancestor: 1 },
            BottomUpQuery { leaf: 5, ancestor: 0 },
            BottomUpQuery { leaf: 6, ancestor: 2 },
            BottomUpQuery { leaf: 4, ancestor: 0 },
        ];
        let tpm = TreePathMaxima::new(&queries, &fbt, &lca);
        let answer_weights: Vec<f64> = tpm
            .answers
            .iter()
            .map(|&v| fbt.weight_to_parent[v])
            .collect();
        assert_eq!(answer_weights, vec![1.5, 0.9, 1.2, 3.1, 2.8, 1.5]);
    }

    #[test]
    fn answer_lies_strictly_between_leaf_and_ancestor() {
        let fbt = sample_fbt();
        let lca = Lca::new(&fbt.children, fbt.root);
        let queries = [
            BottomUpQuery { leaf: 3, ancestor: 0 },
            BottomUpQuery { leaf: 5, ancestor: 0 },
        ];
        let tpm = TreePathMaxima::new(&queries, &fbt, &lca);
        for (q, &answer) in queries.iter().zip(&tpm.answers) {
            assert_ne!(answer, q.leaf);
            assert_ne!(answer, q.ancestor);
            assert!(lca.depth(answer) > lca.depth(q.ancestor));
            assert!(lca.depth(answer) <= lca.depth(q.leaf));
        }
    }
}
