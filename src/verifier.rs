//! Optimum Verifier
//!
//! Certifies a finished matching computation by checking dual feasibility and
//! complementary slackness directly against the input graph. With integer
//! weights every quantity is exact, so the check is run unconditionally after
//! every solve. A violated invariant indicates a defect in the solver and
//! aborts the program.
//!

use super::matching::*;
use super::util::*;
use std::cmp::max;

impl<'a> MatchingSolver<'a> {
    /// check the optimality certificate of the final matching:
    /// 1. all dual variables are non-negative
    /// 2. every edge has non-negative slack
    /// 3. every matched edge has zero slack
    /// 4. every single vertex has zero dual
    /// 5. every blossom with positive dual is an odd cycle whose non-base
    ///    edges alternate matched pairs
    #[allow(clippy::unnecessary_cast)]
    pub fn verify_optimum(&self) {
        if self.graph.vertex_num == 0 {
            return;
        }
        let minimum_vertex_dual = self.vertex_dual.iter().cloned().min().unwrap();
        // in max-cardinality mode vertex duals may end up negative; shifting
        // them all by a common constant preserves every slack, so feasibility
        // is checked against the shifted duals
        let vertex_dual_offset: Weight = if self.max_cardinality {
            max(0, -minimum_vertex_dual)
        } else {
            0
        };
        // 1. all dual variables are non-negative
        assert!(
            minimum_vertex_dual + vertex_dual_offset >= 0,
            "negative vertex dual {} even after offset {}",
            minimum_vertex_dual,
            vertex_dual_offset
        );
        for blossom_index in self.blossoms.live_indices() {
            let dual = self.blossoms.get(blossom_index).dual;
            assert!(dual >= 0, "blossom {} has negative dual {}", blossom_index, dual);
        }
        // 2. all edges have non-negative slack, and
        // 3. all matched edges have zero slack
        for &(i, j, weight) in self.graph.weighted_edges.iter() {
            if i == j {
                continue; // self-loops never participate
            }
            let mut edge_slack = self.vertex_dual[i as usize] + self.vertex_dual[j as usize] - 2 * weight;
            // edges inside a common blossom additionally collect the blossom
            // duals of every common ancestor
            let i_ancestors = self.blossom_ancestors(i);
            let j_ancestors = self.blossom_ancestors(j);
            for (bi, bj) in i_ancestors.iter().zip(j_ancestors.iter()) {
                if bi != bj {
                    break;
                }
                edge_slack += 2 * self.blossoms.get(*bi).dual;
            }
            assert!(edge_slack >= 0, "edge {}-{} has negative slack {}", i, j, edge_slack);
            if self.mate[i as usize] == Some(j) || self.mate[j as usize] == Some(i) {
                assert!(
                    self.mate[i as usize] == Some(j) && self.mate[j as usize] == Some(i),
                    "the matching must be symmetric at edge {}-{}",
                    i,
                    j
                );
                assert_eq!(edge_slack, 0, "matched edge {}-{} has nonzero slack {}", i, j, edge_slack);
            }
        }
        // 4. all single vertices have zero dual
        for v in 0..self.graph.vertex_num {
            assert!(
                self.mate[v as usize].is_some() || self.vertex_dual[v as usize] + vertex_dual_offset == 0,
                "single vertex {} has nonzero dual {}",
                v,
                self.vertex_dual[v as usize] + vertex_dual_offset
            );
        }
        // 5. all blossoms with positive dual are full
        for blossom_index in self.blossoms.live_indices() {
            let blossom = self.blossoms.get(blossom_index);
            if blossom.dual > 0 {
                assert_eq!(
                    blossom.edges.len() % 2,
                    1,
                    "a positive-dual blossom must be an odd cycle"
                );
                // every second cycle edge, skipping the one at the base, must be matched
                for &(w, x) in blossom.edges.iter().skip(1).step_by(2) {
                    assert!(
                        self.mate[w as usize] == Some(x) && self.mate[x as usize] == Some(w),
                        "cycle edge {}-{} of positive-dual blossom {} must be matched",
                        w,
                        x,
                        blossom_index
                    );
                }
            }
        }
    }

    /// the chain of blossoms containing vertex `v`, outermost first
    #[allow(clippy::unnecessary_cast)]
    fn blossom_ancestors(&self, v: VertexIndex) -> Vec<BlossomIndex> {
        let mut chain = vec![];
        let mut parent = self.vertex_parent[v as usize];
        while let Some(blossom_index) = parent {
            chain.push(blossom_index);
            parent = self.blossoms.get(blossom_index).parent;
        }
        chain.reverse();
        chain
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::graph::*;

    #[test]
    fn verifier_accepts_solved_instances_1() {
        // cargo test verifier_accepts_solved_instances_1 -- --nocapture
        // a 5-cycle forces a blossom with positive dual to survive the solve
        let graph = WeightedGraph::new(5, vec![(0, 1, 8), (1, 2, 8), (2, 3, 8), (3, 4, 8), (4, 0, 8)]);
        let mut solver = MatchingSolver::new(&graph, false);
        solver.solve();
        solver.verify_optimum();
        assert_eq!(solver.matching().len(), 2);
    }

    #[test]
    fn verifier_max_cardinality_offset_1() {
        // cargo test verifier_max_cardinality_offset_1 -- --nocapture
        // negative weights drive vertex duals negative in max-cardinality mode
        let graph = WeightedGraph::new(4, vec![(0, 1, 2), (0, 2, -2), (1, 2, 1), (1, 3, -1), (2, 3, -6)]);
        let mut solver = MatchingSolver::new(&graph, true);
        solver.solve();
        solver.verify_optimum();
        assert_eq!(solver.matching().len(), 2);
    }
}
