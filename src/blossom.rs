//! Blossom Forest Storage
//!
//! Non-trivial blossoms (contracted odd alternating cycles) live in an arena
//! and are addressed by stable integer handles. A vertex and a blossom are
//! unified under [`NodeKey`] so that labels, label edges and best-edge caches
//! can be keyed uniformly: every vertex is itself a trivial blossom, and a
//! non-trivial blossom owns an ordered cycle of such nodes.
//!

use super::util::*;

/// search label of a top-level node during a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// unlabeled, not yet reached by the alternating search forest
    Free,
    /// reachable from an unmatched root via an even-length alternating path (outer)
    S,
    /// reachable via an odd-length alternating path (inner)
    T,
    /// temporary marker placed on S-nodes while tracing back two paths, removed afterwards
    Breadcrumb,
}

/// either a single vertex (a trivial blossom) or a handle of a non-trivial blossom
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeKey {
    Vertex(VertexIndex),
    Blossom(BlossomIndex),
}

/// a non-trivial blossom: a contracted odd cycle of sub-blossoms
#[derive(Debug, Clone)]
pub struct Blossom {
    /// ordered sub-blossoms, starting with the base and going round the cycle
    pub children: Vec<NodeKey>,
    /// connecting edges, such that `edges[i] = (v, w)` where `v` is a vertex in
    /// `children[i]` and `w` is a vertex in the next child around the cycle
    pub edges: Vec<EdgePair>,
    /// least-slack edges to neighboring top-level S-blossoms, lazily computed;
    /// only meaningful while this blossom is top-level and S-labeled
    pub best_edges: Option<Vec<EdgePair>>,
    /// immediate containing blossom, if not top-level
    pub parent: Option<BlossomIndex>,
    /// the base vertex, recursively the base of `children[0]`
    pub base: VertexIndex,
    /// search label, meaningful only while top-level
    pub label: Label,
    /// the edge through which this blossom obtained its label, if any
    pub label_edge: Option<EdgePair>,
    /// cached least-slack edge to a different top-level S-blossom
    pub best_edge: Option<EdgePair>,
    /// the dual variable z(b), always non-negative
    pub dual: Weight,
}

/// arena of non-trivial blossoms; handles are reused only after the blossom
/// they referred to has been dissolved, so a live handle is never ambiguous
#[derive(Debug, Clone, Default)]
pub struct BlossomArena {
    /// slot vector, `None` meaning the slot is free
    slots: Vec<Option<Blossom>>,
    /// free slots available for reuse
    free_slots: Vec<BlossomIndex>,
}

impl BlossomArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// the number of live blossoms
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, blossom_index: BlossomIndex) -> bool {
        blossom_index < self.slots.len() && self.slots[blossom_index].is_some()
    }

    /// store a new blossom, reusing a dissolved slot when possible
    pub fn alloc(&mut self, blossom: Blossom) -> BlossomIndex {
        match self.free_slots.pop() {
            Some(blossom_index) => {
                debug_assert!(self.slots[blossom_index].is_none(), "free slot must be vacant");
                self.slots[blossom_index] = Some(blossom);
                blossom_index
            }
            None => {
                self.slots.push(Some(blossom));
                self.slots.len() - 1
            }
        }
    }

    /// remove a dissolved blossom, invalidating its handle exactly once
    pub fn free(&mut self, blossom_index: BlossomIndex) -> Blossom {
        let blossom = self.slots[blossom_index]
            .take()
            .unwrap_or_else(|| panic!("blossom {} already dissolved", blossom_index));
        self.free_slots.push(blossom_index);
        blossom
    }

    pub fn get(&self, blossom_index: BlossomIndex) -> &Blossom {
        self.slots[blossom_index]
            .as_ref()
            .unwrap_or_else(|| panic!("blossom {} already dissolved", blossom_index))
    }

    pub fn get_mut(&mut self, blossom_index: BlossomIndex) -> &mut Blossom {
        self.slots[blossom_index]
            .as_mut()
            .unwrap_or_else(|| panic!("blossom {} already dissolved", blossom_index))
    }

    /// iterate the handles of all live blossoms
    pub fn live_indices(&self) -> Vec<BlossomIndex> {
        (0..self.slots.len()).filter(|&index| self.slots[index].is_some()).collect()
    }

    /// collect the leaf vertices of a node, in cycle order
    pub fn leaves(&self, node: NodeKey) -> Vec<VertexIndex> {
        let mut leaf_vertices = vec![];
        self.collect_leaves(node, &mut leaf_vertices);
        leaf_vertices
    }

    fn collect_leaves(&self, node: NodeKey, leaf_vertices: &mut Vec<VertexIndex>) {
        match node {
            NodeKey::Vertex(v) => leaf_vertices.push(v),
            NodeKey::Blossom(blossom_index) => {
                for &child in self.get(blossom_index).children.iter() {
                    self.collect_leaves(child, leaf_vertices);
                }
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn trivial_blossom(children: Vec<NodeKey>, base: VertexIndex) -> Blossom {
        Blossom {
            children,
            edges: vec![],
            best_edges: None,
            parent: None,
            base,
            label: Label::Free,
            label_edge: None,
            best_edge: None,
            dual: 0,
        }
    }

    #[test]
    fn blossom_arena_slot_reuse_1() {
        // cargo test blossom_arena_slot_reuse_1 -- --nocapture
        let mut arena = BlossomArena::new();
        let b0 = arena.alloc(trivial_blossom(vec![NodeKey::Vertex(0)], 0));
        let b1 = arena.alloc(trivial_blossom(vec![NodeKey::Vertex(1)], 1));
        assert_eq!(arena.len(), 2);
        arena.free(b0);
        assert!(!arena.contains(b0));
        assert!(arena.contains(b1));
        let b2 = arena.alloc(trivial_blossom(vec![NodeKey::Vertex(2)], 2));
        assert_eq!(b2, b0); // dissolved slot is reused
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.live_indices(), vec![b2, b1]);
    }

    #[test]
    fn blossom_arena_nested_leaves_1() {
        // cargo test blossom_arena_nested_leaves_1 -- --nocapture
        let mut arena = BlossomArena::new();
        let inner = arena.alloc(trivial_blossom(
            vec![NodeKey::Vertex(1), NodeKey::Vertex(2), NodeKey::Vertex(3)],
            1,
        ));
        let outer = arena.alloc(trivial_blossom(
            vec![NodeKey::Blossom(inner), NodeKey::Vertex(4), NodeKey::Vertex(5)],
            1,
        ));
        assert_eq!(arena.leaves(NodeKey::Blossom(outer)), vec![1, 2, 3, 4, 5]);
        assert_eq!(arena.leaves(NodeKey::Vertex(7)), vec![7]);
    }
}
