//! Random Graph Utilities
//!
//! Seeded random graph generation and a brute-force reference solver, used to
//! cross validate the blossom solver on small instances.
//!

use super::graph::*;
use super::util::*;
use crate::rand_xoshiro::rand_core::{RngCore, SeedableRng};

/// generates random graphs deterministically given a seed, so that a failing
/// round can be reproduced exactly
#[derive(Debug)]
pub struct RandomGraphGenerator {
    pub rng: DeterministicRng,
}

impl RandomGraphGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::seed_from_u64(seed),
        }
    }

    /// generate a graph where each vertex pair is independently connected with
    /// probability `edge_probability`, with weights uniform in
    /// `[min_weight, max_weight]`
    pub fn generate(
        &mut self,
        vertex_num: VertexNum,
        edge_probability: f64,
        min_weight: Weight,
        max_weight: Weight,
    ) -> WeightedGraph {
        assert!(max_weight >= min_weight, "empty weight range");
        let weight_span = (max_weight - min_weight + 1) as u64;
        let mut weighted_edges = vec![];
        for i in 0..vertex_num {
            for j in (i + 1)..vertex_num {
                if self.rng.next_f64() < edge_probability {
                    let weight = min_weight + (self.rng.next_u64() % weight_span) as Weight;
                    weighted_edges.push((i, j, weight));
                }
            }
        }
        WeightedGraph::new(vertex_num, weighted_edges)
    }
}

/// exhaustively search the best matching objective `(cardinality, weight)`
/// over all matchings of the graph; exponential time, small graphs only.
/// in max-cardinality mode matchings are compared lexicographically by
/// cardinality then weight, otherwise by weight alone
#[allow(clippy::unnecessary_cast)]
pub fn brute_force_maximum_weight_matching(graph: &WeightedGraph, max_cardinality: bool) -> (usize, Weight) {
    let edges: Vec<(VertexIndex, VertexIndex, Weight)> =
        graph.weighted_edges.iter().cloned().filter(|&(i, j, _)| i != j).collect();
    let mut covered = vec![false; graph.vertex_num as usize];
    let mut best = (0, 0); // the empty matching is always available
    search_matchings(&edges, 0, &mut covered, (0, 0), max_cardinality, &mut best);
    best
}

#[allow(clippy::unnecessary_cast)]
fn search_matchings(
    edges: &[(VertexIndex, VertexIndex, Weight)],
    edge_index: usize,
    covered: &mut Vec<bool>,
    objective: (usize, Weight),
    max_cardinality: bool,
    best: &mut (usize, Weight),
) {
    if edge_index == edges.len() {
        let better = if max_cardinality {
            objective > *best
        } else {
            objective.1 > best.1
        };
        if better {
            *best = objective;
        }
        return;
    }
    // leave this edge out
    search_matchings(edges, edge_index + 1, covered, objective, max_cardinality, best);
    // take this edge if both endpoints are still free
    let (i, j, weight) = edges[edge_index];
    if !covered[i as usize] && !covered[j as usize] {
        covered[i as usize] = true;
        covered[j as usize] = true;
        let objective = (objective.0 + 1, objective.1 + weight);
        search_matchings(edges, edge_index + 1, covered, objective, max_cardinality, best);
        covered[i as usize] = false;
        covered[j as usize] = false;
    }
}
