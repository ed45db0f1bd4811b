//! Weighted Graph
//!
//! Input graph representation consumed by the matching solver: a plain list of
//! weighted undirected edges over `vertex_num` vertices, plus a derived
//! per-vertex neighbor map for O(log d) weight lookup during the search.
//!

use super::util::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// a matching as a set of normalized vertex pairs, `u < v` in every pair
pub type Matching = BTreeSet<EdgePair>;

/// an undirected graph with integer edge weights;
/// self-loops are representable but never considered for matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedGraph {
    /// the number of vertices, vertex indices are within the range [0, vertex_num)
    pub vertex_num: VertexNum,
    /// weighted undirected edges; multi-edges are not supported
    pub weighted_edges: Vec<(VertexIndex, VertexIndex, Weight)>,
}

impl WeightedGraph {
    pub fn new(vertex_num: VertexNum, weighted_edges: Vec<(VertexIndex, VertexIndex, Weight)>) -> Self {
        for &(i, j, _weight) in weighted_edges.iter() {
            assert!(i < vertex_num && j < vertex_num, "invalid edge {}-{} with only {} vertices", i, j, vertex_num);
        }
        Self {
            vertex_num,
            weighted_edges,
        }
    }

    /// create an unweighted graph, every edge implicitly carrying weight 1
    pub fn new_unweighted(vertex_num: VertexNum, edges: Vec<EdgePair>) -> Self {
        Self::new(vertex_num, edges.into_iter().map(|(i, j)| (i, j, 1)).collect())
    }

    /// sanity check to avoid duplicate edges that are hard to debug
    pub fn sanity_check(&self) -> Result<(), String> {
        let mut existing_edges = BTreeMap::<EdgePair, usize>::new();
        for (edge_index, &(i, j, _weight)) in self.weighted_edges.iter().enumerate() {
            if i >= self.vertex_num || j >= self.vertex_num {
                return Err(format!("edge {} has invalid incident vertices {} and {}", edge_index, i, j));
            }
            if i == j {
                continue; // self-loops are legal input, the solver skips them
            }
            let unique_edge = if i < j { (i, j) } else { (j, i) };
            if let Some(&previous_index) = existing_edges.get(&unique_edge) {
                return Err(format!(
                    "duplicate edge {} and {} with incident vertices {} and {}",
                    previous_index, edge_index, i, j
                ));
            }
            existing_edges.insert(unique_edge, edge_index);
        }
        Ok(())
    }

    /// the largest edge weight, ignoring self-loops; 0 for an edgeless graph
    pub fn max_edge_weight(&self) -> Weight {
        let mut max_weight = 0;
        for &(i, j, weight) in self.weighted_edges.iter() {
            if i != j && weight > max_weight {
                max_weight = weight;
            }
        }
        max_weight
    }

    /// total weight of a matching over this graph
    #[allow(clippy::unnecessary_cast)]
    pub fn matching_weight(&self, matching: &Matching) -> Weight {
        let neighbor_map = NeighborMap::new(self);
        matching.iter().map(|&(u, v)| neighbor_map.weight(u, v)).sum()
    }
}

/// per-vertex adjacency derived from a [`WeightedGraph`], self-loops excluded
#[derive(Debug, Clone)]
pub struct NeighborMap {
    /// all neighbors of each vertex together with the connecting edge weight
    pub nodes: Vec<BTreeMap<VertexIndex, Weight>>,
}

impl NeighborMap {
    #[allow(clippy::unnecessary_cast)]
    pub fn new(graph: &WeightedGraph) -> Self {
        let mut nodes: Vec<BTreeMap<VertexIndex, Weight>> = (0..graph.vertex_num).map(|_| BTreeMap::new()).collect();
        for &(i, j, weight) in graph.weighted_edges.iter() {
            if i == j {
                continue;
            }
            nodes[i as usize].insert(j, weight);
            nodes[j as usize].insert(i, weight);
        }
        Self { nodes }
    }

    /// all neighbors of vertex `v` in ascending index order
    #[allow(clippy::unnecessary_cast)]
    pub fn neighbors(&self, v: VertexIndex) -> Vec<VertexIndex> {
        self.nodes[v as usize].keys().cloned().collect()
    }

    /// the weight of edge `(v, w)`, which must exist
    #[allow(clippy::unnecessary_cast)]
    pub fn weight(&self, v: VertexIndex, w: VertexIndex) -> Weight {
        *self.nodes[v as usize]
            .get(&w)
            .unwrap_or_else(|| panic!("edge {}-{} does not exist", v, w))
    }
}
