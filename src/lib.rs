//! # Blossom Matching
//!
//! Maximum-weight matching in general (non-bipartite) graphs, using a
//! primal-dual implementation of the blossom method. The solver accepts any
//! undirected graph with integer edge weights, positive or negative, and
//! returns a matching of maximum total weight; an optional max-cardinality
//! mode maximizes the number of matched vertex pairs first and the total
//! weight second. Every result is certified against the dual optimality
//! conditions before it is returned.
//!

extern crate cfg_if;
extern crate derivative;
extern crate rand;
extern crate rand_xoshiro;
extern crate serde;
extern crate serde_json;

pub mod blossom;
pub mod graph;
pub mod matching;
pub mod random_graph;
pub mod util;
pub mod verifier;

use graph::*;
use matching::*;
use std::collections::BTreeSet;
use util::*;

/// compute a maximum-weight matching of `graph`; when `max_cardinality` is
/// true, maximize the number of matched pairs first and the weight second.
/// the result is a set of normalized vertex pairs, `u < v` in every pair.
/// runs in O(V^3), and panics on an invalid input graph
#[allow(clippy::unnecessary_cast)]
pub fn maximum_weight_matching(graph: &WeightedGraph, max_cardinality: bool) -> Matching {
    if let Err(message) = graph.sanity_check() {
        panic!("invalid input graph: {}", message);
    }
    if graph.vertex_num == 0 {
        return Matching::new();
    }
    // dual variables accumulate up to vertex_num deltas of edge-weight scale
    let max_safe_weight = ((Weight::MAX as usize) / (graph.vertex_num as usize)) as Weight / 4;
    for &(i, j, weight) in graph.weighted_edges.iter() {
        if weight.abs() > max_safe_weight {
            panic!(
                "edge {}-{} has weight {} whose magnitude exceeds the max safe weight {}, it may cause overflow",
                i, j, weight, max_safe_weight
            );
        }
    }
    let mut solver = MatchingSolver::new(graph, max_cardinality);
    solver.solve();
    // weights are integral, so the optimum can always be certified exactly
    solver.verify_optimum();
    solver.matching()
}

/// greedily compute a maximal matching in O(E): repeatedly take any edge whose
/// endpoints are both uncovered; the result cannot be extended by any edge,
/// but is generally neither maximum-cardinality nor maximum-weight
pub fn maximal_matching(graph: &WeightedGraph) -> Matching {
    let mut matching = Matching::new();
    let mut covered = BTreeSet::<VertexIndex>::new();
    for &(i, j, _weight) in graph.weighted_edges.iter() {
        if i != j && !covered.contains(&i) && !covered.contains(&j) {
            matching.insert(if i < j { (i, j) } else { (j, i) });
            covered.insert(i);
            covered.insert(j);
        }
    }
    matching
}

/// whether `matching` is a valid matching of `graph`: pairs of distinct
/// in-range vertices, no vertex appearing twice
pub fn is_matching(graph: &WeightedGraph, matching: &Matching) -> bool {
    let mut covered = BTreeSet::<VertexIndex>::new();
    for &(i, j) in matching.iter() {
        if i == j || i >= graph.vertex_num || j >= graph.vertex_num {
            return false;
        }
        if covered.contains(&i) || covered.contains(&j) {
            return false;
        }
        covered.insert(i);
        covered.insert(j);
    }
    true
}

/// whether `matching` is a maximal matching of `graph`: a valid matching that
/// becomes invalid as soon as any further graph edge is added
pub fn is_maximal_matching(graph: &WeightedGraph, matching: &Matching) -> bool {
    if !is_matching(graph, matching) {
        return false;
    }
    let mut covered = BTreeSet::<VertexIndex>::new();
    for &(i, j) in matching.iter() {
        covered.insert(i);
        covered.insert(j);
    }
    // maximal iff every edge has at least one covered endpoint
    for &(i, j, _weight) in graph.weighted_edges.iter() {
        if i != j && !covered.contains(&i) && !covered.contains(&j) {
            return false;
        }
    }
    true
}

/// whether `matching` is a perfect matching of `graph`: a valid matching that
/// covers every vertex
#[allow(clippy::unnecessary_cast)]
pub fn is_perfect_matching(graph: &WeightedGraph, matching: &Matching) -> bool {
    if !is_matching(graph, matching) {
        return false;
    }
    matching.len() * 2 == graph.vertex_num as usize
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn path_graph(vertex_num: VertexNum) -> WeightedGraph {
        let edges = (1..vertex_num).map(|v| (v - 1, v)).collect();
        WeightedGraph::new_unweighted(vertex_num, edges)
    }

    fn matching_of(pairs: &[EdgePair]) -> Matching {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn lib_is_matching_1() {
        // cargo test lib_is_matching_1 -- --nocapture
        let graph = path_graph(4);
        assert!(is_matching(&graph, &matching_of(&[(0, 1), (2, 3)])));
        assert!(is_matching(&graph, &matching_of(&[(1, 2)])));
        assert!(is_matching(&graph, &matching_of(&[])));
        // vertex 1 appears twice
        assert!(!is_matching(&graph, &matching_of(&[(0, 1), (1, 2)])));
        // out of range
        assert!(!is_matching(&graph, &matching_of(&[(3, 4)])));
        // self pair
        assert!(!is_matching(&graph, &matching_of(&[(2, 2)])));
    }

    #[test]
    fn lib_is_maximal_matching_1() {
        // cargo test lib_is_maximal_matching_1 -- --nocapture
        let graph = path_graph(5);
        assert!(is_maximal_matching(&graph, &matching_of(&[(0, 1), (2, 3)])));
        // edge (2, 3) could still be added
        assert!(!is_maximal_matching(&graph, &matching_of(&[(0, 1)])));
        // not even a matching
        assert!(!is_maximal_matching(&graph, &matching_of(&[(0, 1), (1, 2)])));
    }

    #[test]
    fn lib_is_perfect_matching_1() {
        // cargo test lib_is_perfect_matching_1 -- --nocapture
        let graph = path_graph(6);
        assert!(is_perfect_matching(&graph, &matching_of(&[(0, 1), (2, 3), (4, 5)])));
        // maximal but not perfect
        assert!(!is_perfect_matching(&graph, &matching_of(&[(1, 2), (3, 4)])));
        let odd_graph = path_graph(5);
        // an odd number of vertices can never be perfectly matched
        assert!(!is_perfect_matching(&odd_graph, &matching_of(&[(0, 1), (2, 3)])));
    }

    #[test]
    fn lib_maximal_matching_1() {
        // cargo test lib_maximal_matching_1 -- --nocapture
        let graph = path_graph(6);
        let matching = maximal_matching(&graph);
        assert!(is_maximal_matching(&graph, &matching));
        // a star graph has exactly one edge in any maximal matching
        let star = WeightedGraph::new_unweighted(5, vec![(0, 1), (0, 2), (0, 3), (0, 4)]);
        let matching = maximal_matching(&star);
        assert_eq!(matching.len(), 1);
        assert!(is_maximal_matching(&star, &matching));
        // self-loops are never picked
        let graph = WeightedGraph::new(3, vec![(0, 0, 9), (1, 2, 1)]);
        assert_eq!(maximal_matching(&graph), matching_of(&[(1, 2)]));
    }

    #[test]
    fn lib_maximum_is_maximal_1() {
        // cargo test lib_maximum_is_maximal_1 -- --nocapture
        // an unweighted max-cardinality matching is in particular maximal
        let graph = path_graph(7);
        let matching = maximum_weight_matching(&graph, true);
        assert!(is_maximal_matching(&graph, &matching));
        assert_eq!(matching.len(), 3);
    }

    #[test]
    #[should_panic]
    fn lib_duplicate_edge_rejected_1() {
        // cargo test lib_duplicate_edge_rejected_1 -- --nocapture
        let graph = WeightedGraph::new(3, vec![(0, 1, 5), (1, 0, 3)]);
        maximum_weight_matching(&graph, false);
    }
}
