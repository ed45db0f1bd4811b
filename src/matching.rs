//! Maximum-Weight Matching Solver
//!
//! A primal-dual implementation of Galil's blossom method for maximum-weight
//! matching in general (non-bipartite) graphs. The solver grows an alternating
//! search forest from all unmatched vertices, contracts odd cycles into
//! blossoms, and pumps slack out of the dual variables whenever the search gets
//! stuck, until no augmenting path remains. The terms used in the comments
//! (S-node, T-node, stage, substage, delta types) follow the paper
//! "Efficient Algorithms for Finding Maximum Matching in Graphs" by Zvi Galil,
//! ACM Computing Surveys, 1986.
//!
//! All vertex duals store `2 u(v)`, so with integer edge weights every
//! intermediate quantity stays integral and the final result can be certified
//! exactly (see [`MatchingSolver::verify_optimum`]).
//!

use super::blossom::*;
use super::graph::*;
use super::util::*;
use crate::derivative::Derivative;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// the action selected by a dual-variable update, named after the four delta
/// types of the primal-dual method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaAction {
    /// delta type 1: bounded by the minimum vertex dual, the current matching
    /// is optimal and the algorithm terminates
    Optimum,
    /// delta type 2: an edge from an S-vertex to a free vertex became tight
    UnlockFreeEdge(EdgePair),
    /// delta type 3: an edge between two top-level S-blossoms became tight
    UnlockSToSEdge(EdgePair),
    /// delta type 4: a top-level T-blossom ran out of dual and must be expanded
    ExpandBlossom(BlossomIndex),
}

/// the whole mutable state of one matching computation: the blossom forest,
/// the per-vertex bookkeeping maps and the search queue; built fresh for every
/// call and discarded once the matching is extracted
#[derive(Derivative)]
#[derivative(Debug)]
pub struct MatchingSolver<'a> {
    /// the input graph, never mutated
    #[derivative(Debug = "ignore")]
    pub graph: &'a WeightedGraph,
    /// derived adjacency with per-edge weight lookup
    #[derivative(Debug = "ignore")]
    pub neighbor_map: NeighborMap,
    /// when true, prefer maximum cardinality over maximum weight
    pub max_cardinality: bool,
    /// `mate[v]` is the partner of v, or `None` while v is single
    pub mate: Vec<Option<VertexIndex>>,
    /// the top-level node containing each vertex; initially every vertex is
    /// its own trivial top-level blossom
    pub in_blossom: Vec<NodeKey>,
    /// immediate containing blossom of each vertex, if the vertex is a sub-blossom
    pub vertex_parent: Vec<Option<BlossomIndex>>,
    /// per-vertex label; for a vertex inside a T-blossom, T means the vertex is
    /// individually reachable from an S-vertex outside the blossom
    pub vertex_label: Vec<Label>,
    /// the edge through which each labeled vertex was reached
    pub vertex_label_edge: Vec<Option<EdgePair>>,
    /// least-slack edge cache: for a free vertex, the best edge from an
    /// S-vertex (delta 2); for a top-level trivial S-blossom, the best edge to
    /// a different S-blossom (delta 3)
    pub vertex_best_edge: Vec<Option<EdgePair>>,
    /// `2 u(v)` for each vertex; initially the maximum edge weight
    pub vertex_dual: Vec<Weight>,
    /// arena of non-trivial blossoms
    pub blossoms: BlossomArena,
    /// normalized pairs of edges known to have zero slack; not safely reusable
    /// across stages because the duals change
    allowed_edges: BTreeSet<EdgePair>,
    /// queue of newly discovered S-vertices
    queue: Vec<VertexIndex>,
}

#[inline]
fn wrapped_index(length: usize, index: isize) -> usize {
    index.rem_euclid(length as isize) as usize
}

#[inline]
fn normalize(v: VertexIndex, w: VertexIndex) -> EdgePair {
    if v < w {
        (v, w)
    } else {
        (w, v)
    }
}

impl<'a> MatchingSolver<'a> {
    #[allow(clippy::unnecessary_cast)]
    pub fn new(graph: &'a WeightedGraph, max_cardinality: bool) -> Self {
        let vertex_num = graph.vertex_num as usize;
        let max_weight = graph.max_edge_weight();
        Self {
            neighbor_map: NeighborMap::new(graph),
            graph,
            max_cardinality,
            mate: vec![None; vertex_num],
            in_blossom: (0..graph.vertex_num).map(NodeKey::Vertex).collect(),
            vertex_parent: vec![None; vertex_num],
            vertex_label: vec![Label::Free; vertex_num],
            vertex_label_edge: vec![None; vertex_num],
            vertex_best_edge: vec![None; vertex_num],
            vertex_dual: vec![max_weight; vertex_num],
            blossoms: BlossomArena::new(),
            allowed_edges: BTreeSet::new(),
            queue: vec![],
        }
    }

    /*
     * unified accessors over vertices and blossoms
     */

    #[allow(clippy::unnecessary_cast)]
    pub fn label(&self, node: NodeKey) -> Label {
        match node {
            NodeKey::Vertex(v) => self.vertex_label[v as usize],
            NodeKey::Blossom(blossom_index) => self.blossoms.get(blossom_index).label,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    fn set_label(&mut self, node: NodeKey, label: Label) {
        match node {
            NodeKey::Vertex(v) => self.vertex_label[v as usize] = label,
            NodeKey::Blossom(blossom_index) => self.blossoms.get_mut(blossom_index).label = label,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    pub fn label_edge(&self, node: NodeKey) -> Option<EdgePair> {
        match node {
            NodeKey::Vertex(v) => self.vertex_label_edge[v as usize],
            NodeKey::Blossom(blossom_index) => self.blossoms.get(blossom_index).label_edge,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    fn set_label_edge(&mut self, node: NodeKey, label_edge: Option<EdgePair>) {
        match node {
            NodeKey::Vertex(v) => self.vertex_label_edge[v as usize] = label_edge,
            NodeKey::Blossom(blossom_index) => self.blossoms.get_mut(blossom_index).label_edge = label_edge,
        }
    }

    /// the base vertex of a node, recursively down to a trivial vertex
    pub fn base_vertex(&self, node: NodeKey) -> VertexIndex {
        match node {
            NodeKey::Vertex(v) => v,
            NodeKey::Blossom(blossom_index) => self.blossoms.get(blossom_index).base,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    pub fn parent(&self, node: NodeKey) -> Option<BlossomIndex> {
        match node {
            NodeKey::Vertex(v) => self.vertex_parent[v as usize],
            NodeKey::Blossom(blossom_index) => self.blossoms.get(blossom_index).parent,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    fn set_parent(&mut self, node: NodeKey, parent: Option<BlossomIndex>) {
        match node {
            NodeKey::Vertex(v) => self.vertex_parent[v as usize] = parent,
            NodeKey::Blossom(blossom_index) => self.blossoms.get_mut(blossom_index).parent = parent,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    fn best_edge(&self, node: NodeKey) -> Option<EdgePair> {
        match node {
            NodeKey::Vertex(v) => self.vertex_best_edge[v as usize],
            NodeKey::Blossom(blossom_index) => self.blossoms.get(blossom_index).best_edge,
        }
    }

    #[allow(clippy::unnecessary_cast)]
    fn set_best_edge(&mut self, node: NodeKey, best_edge: Option<EdgePair>) {
        match node {
            NodeKey::Vertex(v) => self.vertex_best_edge[v as usize] = best_edge,
            NodeKey::Blossom(blossom_index) => self.blossoms.get_mut(blossom_index).best_edge = best_edge,
        }
    }

    /// 2 * slack of edge (v, w); not meaningful for edges internal to a blossom
    #[allow(clippy::unnecessary_cast)]
    pub fn slack(&self, v: VertexIndex, w: VertexIndex) -> Weight {
        self.vertex_dual[v as usize] + self.vertex_dual[w as usize] - 2 * self.neighbor_map.weight(v, w)
    }

    fn slack_of(&self, edge: EdgePair) -> Weight {
        self.slack(edge.0, edge.1)
    }

    fn is_allowed(&self, v: VertexIndex, w: VertexIndex) -> bool {
        self.allowed_edges.contains(&normalize(v, w))
    }

    fn allow_edge(&mut self, v: VertexIndex, w: VertexIndex) {
        self.allowed_edges.insert(normalize(v, w));
    }

    /*
     * search forest operations
     */

    /// assign a label to the top-level node containing vertex `w`, reached
    /// through an edge from vertex `v` (or from nothing for a root)
    #[allow(clippy::unnecessary_cast)]
    fn assign_label(&mut self, w: VertexIndex, label: Label, v: Option<VertexIndex>) {
        debug_assert!(matches!(label, Label::S | Label::T), "only S and T labels are assigned");
        let node = self.in_blossom[w as usize];
        assert!(
            self.vertex_label[w as usize] == Label::Free && self.label(node) == Label::Free,
            "labels are assigned to unlabeled nodes only"
        );
        let label_edge = v.map(|v| (v, w));
        self.vertex_label[w as usize] = label;
        self.set_label(node, label);
        self.vertex_label_edge[w as usize] = label_edge;
        self.set_label_edge(node, label_edge);
        self.vertex_best_edge[w as usize] = None;
        self.set_best_edge(node, None);
        if label == Label::S {
            // the node became an S-node; add its vertices to the queue
            match node {
                NodeKey::Vertex(vertex) => self.queue.push(vertex),
                NodeKey::Blossom(_) => {
                    let mut leaf_vertices = self.blossoms.leaves(node);
                    self.queue.append(&mut leaf_vertices);
                }
            }
        } else {
            // the node became a T-node; assign label S to its mate.
            // (if the node is a non-trivial blossom, its base is the only
            // vertex with an external mate)
            let base = self.base_vertex(node);
            let base_mate = self.mate[base as usize].expect("the base of a T-node must be matched");
            self.assign_label(base_mate, Label::S, Some(base));
        }
    }

    /// trace back from S-vertices `v` and `w` to discover either a new blossom
    /// or an augmenting path; returns the base vertex of the new blossom, or
    /// `None` when the traces reach two distinct unmatched roots
    #[allow(clippy::unnecessary_cast)]
    fn scan_blossom(&mut self, v: VertexIndex, w: VertexIndex) -> Option<VertexIndex> {
        // trace back from v and w, placing breadcrumbs as we go
        let mut path: Vec<NodeKey> = vec![];
        let mut base: Option<VertexIndex> = None;
        let mut v = Some(v);
        let mut w = Some(w);
        while let Some(vertex) = v {
            // look for a breadcrumb in this node or place a new breadcrumb
            let node = self.in_blossom[vertex as usize];
            if self.label(node) == Label::Breadcrumb {
                base = Some(self.base_vertex(node));
                break;
            }
            assert_eq!(self.label(node), Label::S, "an alternating trace walks through S-nodes");
            path.push(node);
            self.set_label(node, Label::Breadcrumb);
            // trace one step back
            match self.label_edge(node) {
                None => {
                    // the base of this node is single; stop tracing this path
                    debug_assert!(
                        self.mate[self.base_vertex(node) as usize].is_none(),
                        "an unlabeled-edge S-node must be a tree root"
                    );
                    v = None;
                }
                Some((u, _)) => {
                    debug_assert_eq!(
                        Some(u),
                        self.mate[self.base_vertex(node) as usize],
                        "the label edge of a non-root S-node comes from its base's mate"
                    );
                    let t_node = self.in_blossom[u as usize];
                    assert_eq!(self.label(t_node), Label::T, "the predecessor of an S-node is a T-node");
                    // the predecessor is a T-node; trace one more step back
                    v = Some(self.label_edge(t_node).expect("a T-node always has a label edge").0);
                }
            }
            // swap v and w so that we alternate between both paths
            if w.is_some() {
                std::mem::swap(&mut v, &mut w);
            }
        }
        // remove breadcrumbs
        for node in path {
            self.set_label(node, Label::S);
        }
        base
    }

    /// contract the odd cycle formed by edge (v, w) plus the two S-paths back
    /// to the common ancestor `base` into a new top-level S-blossom with dual
    /// variable zero; absorbed T-vertices turn into S-vertices and enter the
    /// queue, and the least-slack edge caches of the children are merged
    #[allow(clippy::unnecessary_cast)]
    fn add_blossom(&mut self, base: VertexIndex, v: VertexIndex, w: VertexIndex) {
        let base_node = self.in_blossom[base as usize];
        let mut bv = self.in_blossom[v as usize];
        let mut bw = self.in_blossom[w as usize];
        // make the list of sub-blossoms and their interconnecting edges
        let mut children: Vec<NodeKey> = vec![];
        let mut edges: Vec<EdgePair> = vec![(v, w)];
        // trace back from v to base
        let mut v = v;
        while bv != base_node {
            children.push(bv);
            let label_edge = self.label_edge(bv).expect("a node on the trace carries a label edge");
            edges.push(label_edge);
            assert!(
                self.label(bv) == Label::T
                    || (self.label(bv) == Label::S
                        && Some(label_edge.0) == self.mate[self.base_vertex(bv) as usize]),
                "the trace alternates between T-nodes and matched S-nodes"
            );
            // trace one step back
            v = label_edge.0;
            bv = self.in_blossom[v as usize];
        }
        // add the base sub-blossom; reverse the lists
        children.push(base_node);
        children.reverse();
        edges.reverse();
        // trace back from w to base
        let mut w = w;
        while bw != base_node {
            children.push(bw);
            let label_edge = self.label_edge(bw).expect("a node on the trace carries a label edge");
            edges.push((label_edge.1, label_edge.0));
            assert!(
                self.label(bw) == Label::T
                    || (self.label(bw) == Label::S
                        && Some(label_edge.0) == self.mate[self.base_vertex(bw) as usize]),
                "the trace alternates between T-nodes and matched S-nodes"
            );
            // trace one step back
            w = label_edge.0;
            bw = self.in_blossom[w as usize];
        }
        // the new blossom is labeled S through the base node's label edge and
        // starts with dual variable zero
        assert_eq!(self.label(base_node), Label::S, "the common ancestor must be an S-node");
        let blossom_index = self.blossoms.alloc(Blossom {
            children: children.clone(),
            edges,
            best_edges: None,
            parent: None,
            base,
            label: Label::S,
            label_edge: self.label_edge(base_node),
            best_edge: None,
            dual: 0,
        });
        for &child in children.iter() {
            self.set_parent(child, Some(blossom_index));
        }
        // relabel the absorbed vertices; a T-vertex turning into an S-vertex
        // because it becomes part of an S-blossom joins the queue
        let leaf_vertices = self.blossoms.leaves(NodeKey::Blossom(blossom_index));
        for &leaf in leaf_vertices.iter() {
            if self.label(self.in_blossom[leaf as usize]) == Label::T {
                self.queue.push(leaf);
            }
            self.in_blossom[leaf as usize] = NodeKey::Blossom(blossom_index);
        }
        // merge the least-slack edge caches of the children, keeping for each
        // distinct external top-level S-blossom the single least-slack edge
        let mut best_edge_to: BTreeMap<NodeKey, EdgePair> = BTreeMap::new();
        for &child in children.iter() {
            let mut neighbor_list: Vec<EdgePair> = vec![];
            match child {
                NodeKey::Blossom(child_index) => {
                    match self.blossoms.get_mut(child_index).best_edges.take() {
                        // the sub-blossom won't need this data again
                        Some(cached) => neighbor_list = cached,
                        None => {
                            // this sub-blossom has no cached least-slack edges;
                            // get the information from its vertices
                            for leaf in self.blossoms.leaves(child) {
                                for neighbor in self.neighbor_map.neighbors(leaf) {
                                    neighbor_list.push((leaf, neighbor));
                                }
                            }
                        }
                    }
                }
                NodeKey::Vertex(vertex) => {
                    for neighbor in self.neighbor_map.neighbors(vertex) {
                        neighbor_list.push((vertex, neighbor));
                    }
                }
            }
            for (mut i, mut j) in neighbor_list {
                if self.in_blossom[j as usize] == NodeKey::Blossom(blossom_index) {
                    std::mem::swap(&mut i, &mut j);
                }
                let other = self.in_blossom[j as usize];
                if other != NodeKey::Blossom(blossom_index) && self.label(other) == Label::S {
                    let better = match best_edge_to.get(&other) {
                        None => true,
                        Some(&edge) => self.slack(i, j) < self.slack_of(edge),
                    };
                    if better {
                        best_edge_to.insert(other, (i, j));
                    }
                }
            }
            // forget about the least-slack edge of the sub-blossom
            self.set_best_edge(child, None);
        }
        let my_best_edges: Vec<EdgePair> = best_edge_to.into_values().collect();
        let mut best_edge: Option<EdgePair> = None;
        for &edge in my_best_edges.iter() {
            if best_edge.map_or(true, |current| self.slack_of(edge) < self.slack_of(current)) {
                best_edge = Some(edge);
            }
        }
        let blossom = self.blossoms.get_mut(blossom_index);
        blossom.best_edges = Some(my_best_edges);
        blossom.best_edge = best_edge;
    }

    /// undo a contraction: every child becomes top-level again; when expanding
    /// a T-blossom mid-stage, walk around the cycle from the entry child and
    /// relabel the sub-blossoms (the traversal order is load-bearing for the
    /// T-relabeling invariant); at a stage end, zero-dual children dissolve
    /// recursively
    #[allow(clippy::unnecessary_cast)]
    fn expand_blossom(&mut self, blossom_index: BlossomIndex, end_stage: bool) {
        // convert sub-blossoms into top-level blossoms
        let children = self.blossoms.get(blossom_index).children.clone();
        for &child in children.iter() {
            self.set_parent(child, None);
            match child {
                NodeKey::Vertex(vertex) => self.in_blossom[vertex as usize] = child,
                NodeKey::Blossom(child_index) => {
                    if end_stage && self.blossoms.get(child_index).dual == 0 {
                        // recursively expand this sub-blossom
                        self.expand_blossom(child_index, end_stage);
                    } else {
                        for leaf in self.blossoms.leaves(child) {
                            self.in_blossom[leaf as usize] = child;
                        }
                    }
                }
            }
        }
        // if we expand a T-blossom during a stage, its sub-blossoms must be relabeled
        if !end_stage && self.blossoms.get(blossom_index).label == Label::T {
            // start at the sub-blossom through which the expanding blossom
            // obtained its label, and relabel sub-blossoms until we reach the
            // base; then continue until we get back to the entry child
            let blossom_label_edge = self
                .blossoms
                .get(blossom_index)
                .label_edge
                .expect("a labeled blossom records its label edge");
            let entry_child = self.in_blossom[blossom_label_edge.1 as usize];
            let child_count = children.len();
            let entry_index = children
                .iter()
                .position(|&child| child == entry_child)
                .expect("the entry child is a direct sub-blossom") as isize;
            // decide in which direction we will go round the blossom
            let (mut j, j_step): (isize, isize) = if entry_index % 2 == 1 {
                (entry_index - child_count as isize, 1) // odd start index: go forward and wrap
            } else {
                (entry_index, -1) // even start index: go backward
            };
            let edges = self.blossoms.get(blossom_index).edges.clone();
            let (mut v, mut w) = blossom_label_edge;
            while j != 0 {
                // relabel the T-sub-blossom
                let (p, q) = if j_step == 1 {
                    edges[wrapped_index(child_count, j)]
                } else {
                    let (q, p) = edges[wrapped_index(child_count, j - 1)];
                    (p, q)
                };
                self.vertex_label[w as usize] = Label::Free;
                self.vertex_label[q as usize] = Label::Free;
                self.assign_label(w, Label::T, Some(v));
                // step to the next S-sub-blossom and note its forward edge
                self.allow_edge(p, q);
                j += j_step;
                let (next_v, next_w) = if j_step == 1 {
                    edges[wrapped_index(child_count, j)]
                } else {
                    let (next_w, next_v) = edges[wrapped_index(child_count, j - 1)];
                    (next_v, next_w)
                };
                v = next_v;
                w = next_w;
                // step to the next T-sub-blossom
                self.allow_edge(v, w);
                j += j_step;
            }
            // relabel the base T-sub-blossom without stepping through to its
            // mate, which keeps its label from the other side of the tree
            let base_child = children[wrapped_index(child_count, j)];
            self.vertex_label[w as usize] = Label::T;
            self.set_label(base_child, Label::T);
            self.vertex_label_edge[w as usize] = Some((v, w));
            self.set_label_edge(base_child, Some((v, w)));
            self.set_best_edge(base_child, None);
            // continue along the blossom until we get back to the entry child
            j += j_step;
            while children[wrapped_index(child_count, j)] != entry_child {
                // examine the vertices of the sub-blossom to see whether it is
                // reachable from a neighboring S-vertex outside the expanding blossom
                let child = children[wrapped_index(child_count, j)];
                if self.label(child) == Label::S {
                    // this sub-blossom just got label S through one of its
                    // neighbors; leave it be
                    j += j_step;
                    continue;
                }
                let reached_vertex = match child {
                    NodeKey::Vertex(vertex) => Some(vertex),
                    NodeKey::Blossom(_) => self
                        .blossoms
                        .leaves(child)
                        .into_iter()
                        .find(|&leaf| self.vertex_label[leaf as usize] != Label::Free),
                };
                // if the sub-blossom contains a reachable vertex, assign label
                // T to the whole sub-blossom
                if let Some(reached) = reached_vertex {
                    if self.vertex_label[reached as usize] != Label::Free {
                        assert_eq!(
                            self.vertex_label[reached as usize],
                            Label::T,
                            "a vertex reached from outside a T-blossom carries label T"
                        );
                        assert_eq!(
                            self.in_blossom[reached as usize],
                            child,
                            "the reached vertex must live in this sub-blossom"
                        );
                        self.vertex_label[reached as usize] = Label::Free;
                        let base_mate = self.mate[self.base_vertex(child) as usize]
                            .expect("the base of a reachable sub-blossom is matched");
                        self.vertex_label[base_mate as usize] = Label::Free;
                        let via = self.vertex_label_edge[reached as usize]
                            .expect("an individually reached vertex records its entry edge")
                            .0;
                        self.assign_label(reached, Label::T, Some(via));
                    }
                }
                j += j_step;
            }
        }
        // remove the expanded blossom entirely; its handle is invalidated here
        // exactly once and may be reused by a later contraction
        self.blossoms.free(blossom_index);
    }

    /// swap matched/unmatched edges over the alternating path through blossom
    /// `blossom_index` between `vertex` and the current base, recursively
    /// handling nested blossoms; afterwards the child list is rotated so that
    /// `vertex` becomes the new base, keeping the bookkeeping consistent
    #[allow(clippy::unnecessary_cast)]
    fn augment_blossom(&mut self, blossom_index: BlossomIndex, vertex: VertexIndex) {
        // bubble up through the blossom tree from the vertex to an immediate
        // sub-blossom of the one we augment through
        let mut t = NodeKey::Vertex(vertex);
        while self.parent(t) != Some(blossom_index) {
            t = NodeKey::Blossom(self.parent(t).expect("the vertex must live inside the blossom"));
        }
        // recursively deal with the first sub-blossom
        if let NodeKey::Blossom(child_index) = t {
            self.augment_blossom(child_index, vertex);
        }
        let children = self.blossoms.get(blossom_index).children.clone();
        let edges = self.blossoms.get(blossom_index).edges.clone();
        let child_count = children.len();
        let entry_index = children
            .iter()
            .position(|&child| child == t)
            .expect("the entry node is a direct sub-blossom") as isize;
        // decide in which direction we will go round the blossom
        let (mut j, j_step): (isize, isize) = if entry_index % 2 == 1 {
            (entry_index - child_count as isize, 1) // odd start index: go forward and wrap
        } else {
            (entry_index, -1) // even start index: go backward
        };
        // move along the blossom until we get to the base
        while j != 0 {
            // step to the next sub-blossom and augment it recursively
            j += j_step;
            let child = children[wrapped_index(child_count, j)];
            let (w, x) = if j_step == 1 {
                edges[wrapped_index(child_count, j)]
            } else {
                let (x, w) = edges[wrapped_index(child_count, j - 1)];
                (w, x)
            };
            if let NodeKey::Blossom(child_index) = child {
                self.augment_blossom(child_index, w);
            }
            // step to the next sub-blossom and augment it recursively
            j += j_step;
            let child = children[wrapped_index(child_count, j)];
            if let NodeKey::Blossom(child_index) = child {
                self.augment_blossom(child_index, x);
            }
            // match the edge connecting those sub-blossoms
            self.mate[w as usize] = Some(x);
            self.mate[x as usize] = Some(w);
        }
        // rotate the list of sub-blossoms to put the new base at the front
        let blossom = self.blossoms.get_mut(blossom_index);
        blossom.children.rotate_left(entry_index as usize);
        blossom.edges.rotate_left(entry_index as usize);
        let new_base = self.base_vertex(self.blossoms.get(blossom_index).children[0]);
        self.blossoms.get_mut(blossom_index).base = new_base;
        assert_eq!(new_base, vertex, "after augmenting, the entry vertex becomes the blossom base");
    }

    /// swap matched/unmatched edges over the alternating path between two
    /// unmatched roots; the augmenting path runs through S-vertices `v` and `w`
    #[allow(clippy::unnecessary_cast)]
    fn augment_matching(&mut self, v: VertexIndex, w: VertexIndex) {
        for (start, partner) in [(v, w), (w, v)] {
            // match vertex `start` to `partner`, then trace back from `start`
            // until reaching a single vertex, swapping matched and unmatched
            // edges as we go
            let mut s = start;
            let mut j = partner;
            loop {
                let bs = self.in_blossom[s as usize];
                assert_eq!(self.label(bs), Label::S, "an augmenting path walks through S-nodes");
                debug_assert!(
                    match self.label_edge(bs) {
                        None => self.mate[self.base_vertex(bs) as usize].is_none(),
                        Some((u, _)) => Some(u) == self.mate[self.base_vertex(bs) as usize],
                    },
                    "the label edge of a non-root S-node comes from its base's mate"
                );
                // augment through the S-blossom from s to its base
                if let NodeKey::Blossom(blossom_index) = bs {
                    self.augment_blossom(blossom_index, s);
                }
                self.mate[s as usize] = Some(j);
                // trace one step back
                let label_edge = match self.label_edge(bs) {
                    Some(edge) => edge,
                    None => break, // reached a single vertex; stop
                };
                let t = label_edge.0;
                let bt = self.in_blossom[t as usize];
                assert_eq!(self.label(bt), Label::T, "the predecessor of an S-node is a T-node");
                // trace one more step back
                let (next_s, next_j) = self.label_edge(bt).expect("a T-node always has a label edge");
                debug_assert_eq!(self.base_vertex(bt), t, "a T-node is entered through its base");
                // augment through the T-blossom from next_j to its base
                if let NodeKey::Blossom(blossom_index) = bt {
                    self.augment_blossom(blossom_index, next_j);
                }
                self.mate[next_j as usize] = Some(next_s);
                s = next_s;
                j = next_j;
            }
        }
    }

    /*
     * stage/substage driver
     */

    /// compute the minimum of the four delta candidates, apply it to all dual
    /// variables of labeled top-level nodes, and report the action to take
    #[allow(clippy::unnecessary_cast)]
    fn update_duals(&mut self) -> DeltaAction {
        let mut delta: Option<Weight> = None;
        let mut action = DeltaAction::Optimum;
        // delta 1: the minimum value of any vertex dual; not applicable in
        // max-cardinality mode where vertex duals may go negative
        if !self.max_cardinality {
            delta = Some(self.vertex_dual.iter().cloned().min().unwrap());
        }
        // delta 2: the minimum slack on any edge between an S-vertex and a free vertex
        for v in 0..self.graph.vertex_num {
            if self.label(self.in_blossom[v as usize]) == Label::Free {
                if let Some(edge) = self.vertex_best_edge[v as usize] {
                    let d = self.slack_of(edge);
                    if delta.map_or(true, |current| d < current) {
                        delta = Some(d);
                        action = DeltaAction::UnlockFreeEdge(edge);
                    }
                }
            }
        }
        // delta 3: half the minimum slack on any edge between a pair of
        // top-level S-blossoms, trivial single-vertex blossoms included
        for v in 0..self.graph.vertex_num {
            if self.vertex_parent[v as usize].is_none() && self.vertex_label[v as usize] == Label::S {
                if let Some(edge) = self.vertex_best_edge[v as usize] {
                    let edge_slack = self.slack_of(edge);
                    debug_assert_eq!(edge_slack % 2, 0, "slack between two S-vertices stays even");
                    let d = edge_slack / 2;
                    if delta.map_or(true, |current| d < current) {
                        delta = Some(d);
                        action = DeltaAction::UnlockSToSEdge(edge);
                    }
                }
            }
        }
        for blossom_index in self.blossoms.live_indices() {
            let blossom = self.blossoms.get(blossom_index);
            if blossom.parent.is_none() && blossom.label == Label::S {
                if let Some(edge) = blossom.best_edge {
                    let edge_slack = self.slack_of(edge);
                    debug_assert_eq!(edge_slack % 2, 0, "slack between two S-blossoms stays even");
                    let d = edge_slack / 2;
                    if delta.map_or(true, |current| d < current) {
                        delta = Some(d);
                        action = DeltaAction::UnlockSToSEdge(edge);
                    }
                }
            }
        }
        // delta 4: the minimum dual of any top-level T-blossom
        for blossom_index in self.blossoms.live_indices() {
            let blossom = self.blossoms.get(blossom_index);
            if blossom.parent.is_none() && blossom.label == Label::T {
                if delta.map_or(true, |current| blossom.dual < current) {
                    delta = Some(blossom.dual);
                    action = DeltaAction::ExpandBlossom(blossom_index);
                }
            }
        }
        let delta = match delta {
            Some(delta) => delta,
            None => {
                // no further improvement possible; the max-cardinality optimum
                // is reached; do a final delta update to make it verifiable
                debug_assert!(self.max_cardinality, "delta candidates always exist in max-weight mode");
                action = DeltaAction::Optimum;
                std::cmp::max(0, self.vertex_dual.iter().cloned().min().unwrap())
            }
        };
        // update the dual variables of all labeled top-level nodes
        for v in 0..self.graph.vertex_num {
            match self.label(self.in_blossom[v as usize]) {
                Label::S => self.vertex_dual[v as usize] -= delta,
                Label::T => self.vertex_dual[v as usize] += delta,
                _ => {}
            }
        }
        for blossom_index in self.blossoms.live_indices() {
            let blossom = self.blossoms.get_mut(blossom_index);
            if blossom.parent.is_none() {
                match blossom.label {
                    Label::S => blossom.dual += delta,
                    Label::T => blossom.dual -= delta,
                    _ => {}
                }
            }
        }
        action
    }

    /// scan the neighbors of S-vertex `v`; returns true when an augmenting
    /// path was found and the matching was augmented
    #[allow(clippy::unnecessary_cast)]
    fn scan_neighbors(&mut self, v: VertexIndex) -> bool {
        for w in self.neighbor_map.neighbors(v) {
            // v's blossom may change while scanning, look it up freshly
            let bv = self.in_blossom[v as usize];
            let bw = self.in_blossom[w as usize];
            if bv == bw {
                continue; // this edge is internal to a blossom; ignore it
            }
            let mut edge_slack: Weight = 0;
            if !self.is_allowed(v, w) {
                edge_slack = self.slack(v, w);
                if edge_slack <= 0 {
                    // zero slack means the edge is allowable
                    self.allow_edge(v, w);
                }
            }
            if self.is_allowed(v, w) {
                if self.label(bw) == Label::Free {
                    // (C1) w is inside an unlabeled node: label it T and label
                    // its mate S
                    self.assign_label(w, Label::T, Some(v));
                } else if self.label(bw) == Label::S {
                    // (C2) w is an S-vertex in a different S-node: follow the
                    // back-links to discover either an augmenting path or a
                    // new blossom
                    match self.scan_blossom(v, w) {
                        Some(base) => self.add_blossom(base, v, w),
                        None => {
                            self.augment_matching(v, w);
                            return true; // the stage ends after an augmentation
                        }
                    }
                } else if self.vertex_label[w as usize] == Label::Free {
                    // w is inside a T-blossom but not yet individually reached
                    // from outside; mark it as reached, which is needed to
                    // relabel during T-blossom expansion
                    assert_eq!(self.label(bw), Label::T, "an individually reachable vertex sits in a T-blossom");
                    self.vertex_label[w as usize] = Label::T;
                    self.vertex_label_edge[w as usize] = Some((v, w));
                }
            } else if self.label(bw) == Label::S {
                // keep track of the least-slack non-allowable edge to a
                // different S-blossom, for delta 3
                if self.best_edge(bv).map_or(true, |edge| edge_slack < self.slack_of(edge)) {
                    self.set_best_edge(bv, Some((v, w)));
                }
            } else if self.vertex_label[w as usize] == Label::Free {
                // w is free (or unreached inside a T-blossom) but we cannot
                // reach it yet; keep track of the least-slack edge, for delta 2
                if self.vertex_best_edge[w as usize].map_or(true, |edge| edge_slack < self.slack_of(edge)) {
                    self.vertex_best_edge[w as usize] = Some((v, w));
                }
            }
        }
        false
    }

    /// run one stage: reset all labels and caches, seed the search forest from
    /// every unmatched top-level node, and loop substages until either the
    /// matching is augmented (true) or the stage proves optimal (false)
    #[allow(clippy::unnecessary_cast)]
    fn run_stage(&mut self) -> bool {
        // remove labels from top-level nodes and forget all about least-slack
        // edges; zero-slack knowledge does not survive a stage boundary because
        // the dual variables change
        for v in 0..self.graph.vertex_num {
            self.vertex_label[v as usize] = Label::Free;
            self.vertex_label_edge[v as usize] = None;
            self.vertex_best_edge[v as usize] = None;
        }
        for blossom_index in self.blossoms.live_indices() {
            let blossom = self.blossoms.get_mut(blossom_index);
            blossom.label = Label::Free;
            blossom.label_edge = None;
            blossom.best_edge = None;
            blossom.best_edges = None;
        }
        self.allowed_edges.clear();
        self.queue.clear();
        // label single top-level nodes with S and put their vertices in the queue
        for v in 0..self.graph.vertex_num {
            if self.mate[v as usize].is_none() && self.label(self.in_blossom[v as usize]) == Label::Free {
                self.assign_label(v, Label::S, None);
            }
        }
        let mut augmented = false;
        loop {
            // each iteration of this loop is a substage: continue labeling
            // until all vertices reachable through an alternating path have a
            // label, then pump slack out of the dual variables
            while let Some(v) = self.queue.pop() {
                debug_assert_eq!(
                    self.label(self.in_blossom[v as usize]),
                    Label::S,
                    "the queue holds S-vertices only"
                );
                if self.scan_neighbors(v) {
                    augmented = true;
                    break;
                }
            }
            if augmented {
                break;
            }
            // no augmenting path under these constraints; compute delta and
            // reduce the slack in the dual optimization problem
            match self.update_duals() {
                DeltaAction::Optimum => break, // no further improvement possible
                DeltaAction::UnlockFreeEdge((v, w)) => {
                    // use the now-tight edge to continue the search
                    debug_assert_eq!(
                        self.label(self.in_blossom[v as usize]),
                        Label::S,
                        "a delta-2 edge starts at an S-vertex"
                    );
                    self.allow_edge(v, w);
                    self.queue.push(v);
                }
                DeltaAction::UnlockSToSEdge((v, w)) => {
                    debug_assert_eq!(
                        self.label(self.in_blossom[v as usize]),
                        Label::S,
                        "a delta-3 edge starts at an S-vertex"
                    );
                    self.allow_edge(v, w);
                    self.queue.push(v);
                }
                DeltaAction::ExpandBlossom(blossom_index) => {
                    // expand the T-blossom whose dual reached zero
                    self.expand_blossom(blossom_index, false);
                }
            }
        }
        self.debug_assert_symmetric_mate();
        augmented
    }

    #[allow(clippy::unnecessary_cast)]
    fn debug_assert_symmetric_mate(&self) {
        for v in 0..self.graph.vertex_num {
            if let Some(w) = self.mate[v as usize] {
                debug_assert_eq!(self.mate[w as usize], Some(v), "the matching must be symmetric");
            }
        }
    }

    /// run stages until no further augmentation is possible; dual feasibility
    /// plus complementary slackness at termination prove the matching optimal
    pub fn solve(&mut self) {
        if self.graph.vertex_num == 0 {
            return; // don't bother with empty graphs
        }
        while self.run_stage() {
            // end of a stage; expand all S-blossoms which have zero dual, as
            // their contraction is no longer needed
            for blossom_index in self.blossoms.live_indices() {
                if !self.blossoms.contains(blossom_index) {
                    continue; // already expanded recursively
                }
                let blossom = self.blossoms.get(blossom_index);
                if blossom.parent.is_none() && blossom.label == Label::S && blossom.dual == 0 {
                    self.expand_blossom(blossom_index, true);
                }
            }
        }
    }

    /// extract the matching as a set of normalized vertex pairs
    #[allow(clippy::unnecessary_cast)]
    pub fn matching(&self) -> Matching {
        let mut matching = Matching::new();
        for v in 0..self.graph.vertex_num {
            if let Some(w) = self.mate[v as usize] {
                if v < w {
                    matching.insert((v, w));
                }
            }
        }
        matching
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::maximum_weight_matching;

    fn mwm(
        vertex_num: VertexNum,
        weighted_edges: Vec<(VertexIndex, VertexIndex, Weight)>,
        max_cardinality: bool,
    ) -> Matching {
        let graph = WeightedGraph::new(vertex_num, weighted_edges);
        maximum_weight_matching(&graph, max_cardinality)
    }

    fn matching_of(pairs: &[EdgePair]) -> Matching {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn matching_trivial_graphs_1() {
        // cargo test matching_trivial_graphs_1 -- --nocapture
        // empty graph
        assert_eq!(mwm(0, vec![], false), matching_of(&[]));
        // self loop only
        assert_eq!(mwm(1, vec![(0, 0, 100)], false), matching_of(&[]));
        // single edge
        assert_eq!(mwm(2, vec![(0, 1, 1)], false), matching_of(&[(0, 1)]));
        // two edges, take the heavier
        assert_eq!(mwm(3, vec![(0, 1, 10), (1, 2, 11)], false), matching_of(&[(1, 2)]));
        // isolated vertices do not disturb the result
        assert_eq!(mwm(5, vec![(0, 1, 10), (1, 2, 11)], false), matching_of(&[(1, 2)]));
    }

    #[test]
    fn matching_path_graph_1() {
        // cargo test matching_path_graph_1 -- --nocapture
        let edges = vec![(0, 1, 5), (1, 2, 11), (2, 3, 5)];
        assert_eq!(mwm(4, edges.clone(), false), matching_of(&[(1, 2)]));
        // max-cardinality prefers two light edges over one heavy edge
        assert_eq!(mwm(4, edges, true), matching_of(&[(0, 1), (2, 3)]));
    }

    #[test]
    fn matching_unweighted_path_max_cardinality_1() {
        // cargo test matching_unweighted_path_max_cardinality_1 -- --nocapture
        let graph = WeightedGraph::new_unweighted(4, vec![(0, 1), (1, 2), (2, 3)]);
        let matching = maximum_weight_matching(&graph, true);
        assert_eq!(matching, matching_of(&[(0, 1), (2, 3)]));
        assert_eq!(graph.matching_weight(&matching), 2);
    }

    #[test]
    fn matching_negative_weights_1() {
        // cargo test matching_negative_weights_1 -- --nocapture
        let edges = vec![(0, 1, 2), (0, 2, -2), (1, 2, 1), (1, 3, -1), (2, 3, -6)];
        assert_eq!(mwm(4, edges.clone(), false), matching_of(&[(0, 1)]));
        assert_eq!(mwm(4, edges, true), matching_of(&[(0, 2), (1, 3)]));
    }

    #[test]
    fn matching_triangle_with_heavy_edge_1() {
        // cargo test matching_triangle_with_heavy_edge_1 -- --nocapture
        // only one edge of a 3-cycle can be chosen; the heavy one wins
        assert_eq!(
            mwm(3, vec![(0, 1, 5), (1, 2, 1), (0, 2, 1)], false),
            matching_of(&[(0, 1)])
        );
    }

    #[test]
    fn matching_five_cycle_max_cardinality_1() {
        // cargo test matching_five_cycle_max_cardinality_1 -- --nocapture
        // an odd cycle cannot be perfectly matched; this exercises blossom
        // contraction and expansion
        let graph = WeightedGraph::new_unweighted(5, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let matching = maximum_weight_matching(&graph, true);
        assert_eq!(matching.len(), 2);
        assert!(crate::is_matching(&graph, &matching));
    }

    #[test]
    fn matching_s_blossom_1() {
        // cargo test matching_s_blossom_1 -- --nocapture
        // create an S-blossom and use it for augmentation
        let edges = vec![(0, 1, 8), (0, 2, 9), (1, 2, 10), (2, 3, 7)];
        assert_eq!(mwm(4, edges.clone(), false), matching_of(&[(0, 1), (2, 3)]));
        let mut more_edges = edges;
        more_edges.extend([(0, 5, 5), (3, 4, 6)]);
        assert_eq!(mwm(6, more_edges, false), matching_of(&[(0, 5), (1, 2), (3, 4)]));
    }

    #[test]
    fn matching_s_to_t_blossom_1() {
        // cargo test matching_s_to_t_blossom_1 -- --nocapture
        // create an S-blossom, relabel it as a T-blossom, use it for augmentation
        let edges = vec![(0, 1, 9), (0, 2, 8), (1, 2, 10), (0, 3, 5), (3, 4, 4), (0, 5, 3)];
        assert_eq!(mwm(6, edges, false), matching_of(&[(0, 5), (1, 2), (3, 4)]));
        let edges = vec![(0, 1, 9), (0, 2, 8), (1, 2, 10), (0, 3, 5), (3, 4, 3), (0, 5, 4)];
        assert_eq!(mwm(6, edges, false), matching_of(&[(0, 5), (1, 2), (3, 4)]));
        let edges = vec![(0, 1, 9), (0, 2, 8), (1, 2, 10), (0, 3, 5), (3, 4, 3), (2, 5, 4)];
        assert_eq!(mwm(6, edges, false), matching_of(&[(0, 1), (2, 5), (3, 4)]));
    }

    #[test]
    fn matching_nested_s_blossom_1() {
        // cargo test matching_nested_s_blossom_1 -- --nocapture
        // create a nested S-blossom and use it for augmentation
        let edges = vec![
            (0, 1, 9),
            (0, 2, 9),
            (1, 2, 10),
            (1, 3, 8),
            (2, 4, 8),
            (3, 4, 10),
            (4, 5, 6),
        ];
        assert_eq!(mwm(6, edges, false), matching_of(&[(0, 2), (1, 3), (4, 5)]));
    }

    #[test]
    fn matching_nested_s_blossom_relabel_1() {
        // cargo test matching_nested_s_blossom_relabel_1 -- --nocapture
        // create an S-blossom, relabel it as S, include it in a nested S-blossom
        let edges = vec![
            (0, 1, 10),
            (0, 6, 10),
            (1, 2, 12),
            (2, 3, 20),
            (2, 4, 20),
            (3, 4, 25),
            (4, 5, 10),
            (5, 6, 10),
            (6, 7, 8),
        ];
        assert_eq!(mwm(8, edges, false), matching_of(&[(0, 1), (2, 3), (4, 5), (6, 7)]));
    }

    #[test]
    fn matching_nested_s_blossom_expand_1() {
        // cargo test matching_nested_s_blossom_expand_1 -- --nocapture
        // create a nested S-blossom, augment, expand recursively
        let edges = vec![
            (0, 1, 8),
            (0, 2, 8),
            (1, 2, 10),
            (1, 3, 12),
            (2, 4, 12),
            (3, 4, 14),
            (3, 5, 12),
            (4, 6, 12),
            (5, 6, 14),
            (6, 7, 12),
        ];
        assert_eq!(mwm(8, edges, false), matching_of(&[(0, 1), (2, 4), (3, 5), (6, 7)]));
    }

    #[test]
    fn matching_s_blossom_relabel_expand_1() {
        // cargo test matching_s_blossom_relabel_expand_1 -- --nocapture
        // create an S-blossom, relabel it as T, expand it
        let edges = vec![
            (0, 1, 23),
            (0, 4, 22),
            (0, 5, 15),
            (1, 2, 25),
            (2, 3, 22),
            (3, 4, 25),
            (3, 7, 14),
            (4, 6, 13),
        ];
        assert_eq!(mwm(8, edges, false), matching_of(&[(0, 5), (1, 2), (3, 7), (4, 6)]));
    }

    #[test]
    fn matching_nested_s_blossom_relabel_expand_1() {
        // cargo test matching_nested_s_blossom_relabel_expand_1 -- --nocapture
        // create a nested S-blossom, relabel it as T, expand it
        let edges = vec![
            (0, 1, 19),
            (0, 2, 20),
            (0, 7, 8),
            (1, 2, 25),
            (1, 3, 18),
            (2, 4, 18),
            (3, 4, 13),
            (3, 6, 7),
            (4, 5, 7),
        ];
        assert_eq!(mwm(8, edges, false), matching_of(&[(0, 7), (1, 2), (3, 6), (4, 5)]));
    }

    #[test]
    fn matching_nasty_blossom_relabel_multiple_ways_1() {
        // cargo test matching_nasty_blossom_relabel_multiple_ways_1 -- --nocapture
        // create a blossom, relabel it as T in more than one way, expand, augment
        let edges = vec![
            (0, 1, 45),
            (0, 4, 45),
            (1, 2, 50),
            (2, 3, 45),
            (3, 4, 50),
            (0, 5, 30),
            (2, 8, 35),
            (3, 7, 35),
            (4, 6, 26),
            (8, 9, 5),
        ];
        assert_eq!(
            mwm(10, edges, false),
            matching_of(&[(0, 5), (1, 2), (3, 7), (4, 6), (8, 9)])
        );
    }

    #[test]
    fn matching_nasty_blossom_relabel_multiple_ways_2() {
        // cargo test matching_nasty_blossom_relabel_multiple_ways_2 -- --nocapture
        // again but slightly different
        let edges = vec![
            (0, 1, 45),
            (0, 4, 45),
            (1, 2, 50),
            (2, 3, 45),
            (3, 4, 50),
            (0, 5, 30),
            (2, 8, 35),
            (3, 7, 26),
            (4, 6, 40),
            (8, 9, 5),
        ];
        assert_eq!(
            mwm(10, edges, false),
            matching_of(&[(0, 5), (1, 2), (3, 7), (4, 6), (8, 9)])
        );
    }

    #[test]
    fn matching_nasty_blossom_least_slack_1() {
        // cargo test matching_nasty_blossom_least_slack_1 -- --nocapture
        // create a blossom, relabel it as T, expand such that a new
        // least-slack S-to-free edge is produced, augment
        let edges = vec![
            (0, 1, 45),
            (0, 4, 45),
            (1, 2, 50),
            (2, 3, 45),
            (3, 4, 50),
            (0, 5, 30),
            (2, 8, 35),
            (3, 7, 28),
            (4, 6, 26),
            (8, 9, 5),
        ];
        assert_eq!(
            mwm(10, edges, false),
            matching_of(&[(0, 5), (1, 2), (3, 7), (4, 6), (8, 9)])
        );
    }

    #[test]
    fn matching_nasty_blossom_augmenting_1() {
        // cargo test matching_nasty_blossom_augmenting_1 -- --nocapture
        // create a nested blossom, relabel it as T in more than one way, and
        // expand the outer blossom such that the inner blossom ends up on an
        // augmenting path
        let edges = vec![
            (0, 1, 45),
            (0, 6, 45),
            (1, 2, 50),
            (2, 3, 45),
            (3, 4, 95),
            (3, 5, 94),
            (4, 5, 94),
            (5, 6, 50),
            (0, 7, 30),
            (2, 10, 35),
            (4, 8, 36),
            (6, 9, 26),
            (10, 11, 5),
        ];
        assert_eq!(
            mwm(12, edges, false),
            matching_of(&[(0, 7), (1, 2), (3, 5), (4, 8), (6, 9), (10, 11)])
        );
    }

    #[test]
    fn matching_nasty_blossom_expand_recursively_1() {
        // cargo test matching_nasty_blossom_expand_recursively_1 -- --nocapture
        // create a nested S-blossom, relabel it as S, expand it recursively
        let edges = vec![
            (0, 1, 40),
            (0, 2, 40),
            (1, 2, 60),
            (1, 3, 55),
            (2, 4, 55),
            (3, 4, 50),
            (0, 7, 15),
            (4, 6, 30),
            (6, 5, 10),
            (7, 9, 10),
            (3, 8, 30),
        ];
        assert_eq!(
            mwm(10, edges, false),
            matching_of(&[(0, 1), (2, 4), (3, 8), (5, 6), (7, 9)])
        );
    }

    #[test]
    fn matching_verifier_is_read_only_1() {
        // cargo test matching_verifier_is_read_only_1 -- --nocapture
        let graph = WeightedGraph::new(4, vec![(0, 1, 5), (1, 2, 11), (2, 3, 5)]);
        let mut solver = MatchingSolver::new(&graph, false);
        solver.solve();
        let matching_before = solver.matching();
        solver.verify_optimum();
        solver.verify_optimum(); // verifying twice must be equally fine
        assert_eq!(solver.matching(), matching_before);
    }

    #[test]
    fn matching_random_cross_validation_1() {
        // cargo test matching_random_cross_validation_1 -- --nocapture
        use crate::random_graph::*;
        let mut generator = RandomGraphGenerator::new(0);
        for round in 0..150 {
            let graph = generator.generate(7, 0.5, 1, 9);
            let matching = maximum_weight_matching(&graph, false);
            assert!(crate::is_matching(&graph, &matching), "invalid matching at round {}", round);
            let weight = graph.matching_weight(&matching);
            let (_, best_weight) = brute_force_maximum_weight_matching(&graph, false);
            assert_eq!(weight, best_weight, "suboptimal matching at round {}", round);
        }
    }

    #[test]
    fn matching_random_cross_validation_max_cardinality_1() {
        // cargo test matching_random_cross_validation_max_cardinality_1 -- --nocapture
        use crate::random_graph::*;
        let mut generator = RandomGraphGenerator::new(123);
        for round in 0..150 {
            // negative weights make max-cardinality mode meaningfully different
            let graph = generator.generate(7, 0.5, -4, 8);
            let matching = maximum_weight_matching(&graph, true);
            assert!(crate::is_matching(&graph, &matching), "invalid matching at round {}", round);
            let objective = (matching.len(), graph.matching_weight(&matching));
            let best = brute_force_maximum_weight_matching(&graph, true);
            assert_eq!(objective, best, "suboptimal matching at round {}", round);
        }
    }
}
