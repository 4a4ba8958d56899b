// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topology construction, renumbering, and traversal.

use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::linearization::Linearization;
use crate::node::{Node, NodeIndex};

/// How an edge list encodes parents.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgeSemantics {
    /// Edges are `(parent id, child id)` pairs. The tree is reconstructed from
    /// ids alone; a parent must have been listed (as a child or as the root)
    /// before any edge references it as a parent.
    ParentIdChildId,
    /// Edges are `(parent position, child id)` pairs, where the position refers
    /// to the order nodes are created in: the implicit root is position 0 and
    /// the child of edge `k` is position `k + 1`.
    ParentIndexChildId,
}

/// An edge list in one of the two accepted formats.
///
/// Tupled input is flattened to the interleaved form before processing.
#[derive(Copy, Clone, Debug)]
pub enum Edges<'a> {
    /// Flat interleaved pairs: `[p0, c0, p1, c1, ...]`.
    Interleaved(&'a [u32]),
    /// One 2-tuple per edge.
    Tupled(&'a [(u32, u32)]),
}

/// The central tree structure: a flat node array plus its [`Linearization`].
///
/// `Topology` owns everything derived from the edge list: the renumbered node
/// array, the depth slices, reverse-lookup maps from caller ids to indices
/// (separately for the inner and leaf id spaces, since they may overlap), and
/// index maps between the caller's edge order and the renumbered order.
///
/// [`Topology::initialize`] is a destructive rebuild; all previously obtained
/// [`NodeIndex`] values are invalidated by it.
///
/// ## Example
///
/// ```rust
/// use canopy_topology::{Edges, EdgeSemantics, Topology};
///
/// let mut topology = Topology::new();
/// topology.initialize(
///     EdgeSemantics::ParentIdChildId,
///     Edges::Tupled(&[(0, 1), (1, 2), (1, 3)]),
/// );
///
/// let root = topology.root().unwrap();
/// assert!(root.is_root());
/// // Children of the sole inner node, in delivery order.
/// let inner = topology.inner_index_by_id(1).unwrap();
/// let ids: Vec<u32> = topology.children(inner).map(|n| n.id()).collect();
/// assert_eq!(ids, [2, 3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    linearization: Linearization,
    inner_ids: HashMap<u32, NodeIndex>,
    leaf_ids: HashMap<u32, NodeIndex>,
    edge_to_topology: Vec<NodeIndex>,
    topology_to_edge: Vec<u32>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-node topology: a root with no children.
    ///
    /// The sole node lands in the leaf slice, so `number_of_inner_nodes()` is 0.
    pub fn from_root(id: u32) -> Self {
        let mut topology = Self::new();
        topology.nodes.push(Node::new(id, NodeIndex::new(0), 0, None));
        topology.linearization.push(0..1);
        topology.leaf_ids.insert(id, NodeIndex::new(0));
        topology.edge_to_topology.push(NodeIndex::new(0));
        topology.topology_to_edge.push(0);
        topology
    }

    /// Rebuild the topology from an edge list.
    ///
    /// An empty edge list produces an empty topology. An interleaved edge array
    /// of odd length panics; a child referencing a parent that has not been
    /// listed yet panics. Malformed input is a contract violation of the
    /// upstream parsing layer, not a recoverable condition.
    pub fn initialize(&mut self, semantics: EdgeSemantics, edges: Edges<'_>) {
        let flattened: Vec<u32>;
        let interleaved: &[u32] = match edges {
            Edges::Interleaved(edges) => edges,
            Edges::Tupled(tuples) => {
                flattened = tuples
                    .iter()
                    .flat_map(|&(parent, child)| [parent, child])
                    .collect();
                &flattened
            }
        };
        assert!(
            interleaved.len().is_multiple_of(2),
            "interleaved edge arrays must hold (parent, child) pairs"
        );

        self.nodes.clear();
        self.linearization.clear();
        self.inner_ids.clear();
        self.leaf_ids.clear();
        self.edge_to_topology.clear();
        self.topology_to_edge.clear();

        if interleaved.is_empty() {
            return;
        }

        let (raw, depths) = match semantics {
            EdgeSemantics::ParentIdChildId => build_parent_id_child_id(interleaved),
            EdgeSemantics::ParentIndexChildId => build_parent_index_child_id(interleaved),
        };
        self.from_nodes(raw, &depths);
    }

    /// Renumber raw creation-order nodes into leaf-separated breadth-first order.
    ///
    /// Within each depth bucket, leaves are extracted into one accumulating list
    /// and the remaining inner nodes keep their bucket; the leaf list becomes the
    /// final synthetic slice. Every link field is rewritten through the old→new
    /// index map, and the current sibling order is reset to the initial one.
    fn from_nodes(&mut self, raw: Vec<Node>, depths: &[Vec<u32>]) {
        let count = raw.len();
        let mut remap: Vec<u32> = alloc::vec![0; count];
        let mut leaves: Vec<u32> = Vec::new();
        let mut next: u32 = 0;

        for bucket in depths {
            let start = next;
            for &old in bucket {
                if raw[old as usize].first_child.is_none() {
                    leaves.push(old);
                } else {
                    remap[old as usize] = next;
                    next += 1;
                }
            }
            if next > start {
                self.linearization.push(start..next);
            }
        }
        let leaf_start = next;
        for &old in &leaves {
            remap[old as usize] = next;
            next += 1;
        }
        self.linearization.push(leaf_start..next);
        debug_assert_eq!(next as usize, count, "renumbering must cover every node");

        let mut nodes: Vec<Option<Node>> = (0..count).map(|_| None).collect();
        for (old, mut node) in raw.into_iter().enumerate() {
            let new = remap[old];
            node.index = NodeIndex::new(new);
            node.parent = node.parent.map(|p| NodeIndex::new(remap[p.idx()]));
            node.initial_first_child = node.first_child.map(|c| NodeIndex::new(remap[c.idx()]));
            node.initial_next_sibling = node.next_sibling.map(|s| NodeIndex::new(remap[s.idx()]));
            node.first_child = node.initial_first_child;
            node.next_sibling = node.initial_next_sibling;
            nodes[new as usize] = Some(node);
        }
        self.nodes = nodes
            .into_iter()
            .map(|slot| slot.expect("renumbering must assign every position"))
            .collect();

        for node in &self.nodes {
            if node.is_leaf() {
                self.leaf_ids.insert(node.id, node.index);
            } else {
                self.inner_ids.insert(node.id, node.index);
            }
        }

        self.edge_to_topology = remap.iter().map(|&new| NodeIndex::new(new)).collect();
        self.topology_to_edge = alloc::vec![0; count];
        for (old, &new) in remap.iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeIndex uses 32-bit indices by design."
            )]
            {
                self.topology_to_edge[new as usize] = old as u32;
            }
        }
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the topology holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `index`.
    ///
    /// Panics on out-of-range indices; indices from a previous `initialize` are
    /// a programmer error.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.idx()]
    }

    /// The root node, or `None` for an empty topology.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// The depth-slice index for this topology.
    pub fn linearization(&self) -> &Linearization {
        &self.linearization
    }

    /// Count of inner (non-leaf) nodes.
    pub fn number_of_inner_nodes(&self) -> u32 {
        self.linearization.number_of_inner_nodes()
    }

    /// Count of leaf nodes.
    pub fn number_of_leaf_nodes(&self) -> u32 {
        self.linearization.number_of_leaf_nodes()
    }

    /// Iterate every inner node in slice order (breadth first by depth, root
    /// first). Parents are always yielded before their inner children.
    pub fn inner_nodes(&self) -> impl Iterator<Item = &Node> {
        let range = self.linearization.inner_range();
        self.nodes[range.start as usize..range.end as usize].iter()
    }

    /// Iterate every leaf node (the final slice only).
    pub fn leaf_nodes(&self) -> impl Iterator<Item = &Node> {
        let range = self.linearization.leaf_range();
        self.nodes[range.start as usize..range.end as usize].iter()
    }

    /// Iterate all nodes top-down: inner nodes in slice order, then leaves.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate all nodes bottom-up: leaves first, then inner nodes from the
    /// deepest slice up to the root. Used for bottom-up aggregation.
    pub fn rev_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().rev()
    }

    /// Iterate the inner nodes bottom-up (deepest slice first, root last).
    pub fn rev_parents(&self) -> impl Iterator<Item = &Node> {
        let range = self.linearization.inner_range();
        self.nodes[range.start as usize..range.end as usize].iter().rev()
    }

    /// Iterate the whole tree in true recursive pre-order via the
    /// `first_child`/`next_sibling` links, honoring the current sibling order.
    ///
    /// This is distinct from the storage order: [`Topology::nodes`] is breadth
    /// first with leaves pooled last, while this walk interleaves leaves with
    /// their parents.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        let mut stack = SmallVec::new();
        if !self.nodes.is_empty() {
            stack.push(NodeIndex::new(0));
        }
        DepthFirst {
            topology: self,
            stack,
        }
    }

    /// Iterate the children of `parent` in the current sibling order.
    pub fn children(&self, parent: NodeIndex) -> Children<'_> {
        Children {
            topology: self,
            cursor: self.node(parent).first_child,
        }
    }

    /// Iterate siblings starting at `first`, up to but excluding `last`.
    ///
    /// With `last` of `None` the walk runs to the end of the chain. If `last`
    /// is never encountered the walk also ends at the chain's end.
    pub fn siblings_range(
        &self,
        first: Option<NodeIndex>,
        last: Option<NodeIndex>,
    ) -> SiblingsRange<'_> {
        SiblingsRange {
            topology: self,
            cursor: first,
            last,
        }
    }

    /// Look up an inner node's index by caller id.
    pub fn inner_index_by_id(&self, id: u32) -> Option<NodeIndex> {
        self.inner_ids.get(&id).copied()
    }

    /// Look up a leaf node's index by caller id.
    pub fn leaf_index_by_id(&self, id: u32) -> Option<NodeIndex> {
        self.leaf_ids.get(&id).copied()
    }

    /// Map from edge order (creation order: root, then one node per edge) to
    /// renumbered topology indices. For correlating caller-order attribute
    /// buffers with the node array.
    pub fn edge_index_to_topology_index(&self) -> &[NodeIndex] {
        &self.edge_to_topology
    }

    /// Inverse of [`Topology::edge_index_to_topology_index`].
    pub fn topology_index_to_edge_index(&self) -> &[u32] {
        &self.topology_to_edge
    }

    /// Rewrite every sibling chain according to `compare`.
    ///
    /// Affects `first_child`/`next_sibling` only; the initial order snapshots
    /// are untouched and can be restored with [`Topology::reset_order`].
    pub fn sort_children_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        let inner = self.linearization.inner_range();
        let mut kids: Vec<NodeIndex> = Vec::new();
        for parent in inner.start..inner.end {
            kids.clear();
            kids.extend(
                self.children(NodeIndex::new(parent))
                    .map(|child| child.index),
            );
            kids.sort_by(|&a, &b| compare(&self.nodes[a.idx()], &self.nodes[b.idx()]));

            let mut link = None;
            for &kid in kids.iter().rev() {
                self.nodes[kid.idx()].next_sibling = link;
                link = Some(kid);
            }
            self.nodes[parent as usize].first_child = link;
        }
    }

    /// Restore the sibling order the edge list was delivered in.
    pub fn reset_order(&mut self) {
        for node in &mut self.nodes {
            node.first_child = node.initial_first_child;
            node.next_sibling = node.initial_next_sibling;
        }
    }
}

/// Build creation-order nodes from `(parent id, child id)` edges.
///
/// A "current parent" is carried across edges and switched by peeking at the
/// next edge: if the next parent id equals the current child id, descend into
/// that child; if it differs from both the current parent and child ids, look
/// up the already-created node with that id. This reconstructs the implicit
/// tree from a flat stream without stack bookkeeping, trusting the input
/// ordering guarantee that a parent is fully listed before being abandoned.
fn build_parent_id_child_id(edges: &[u32]) -> (Vec<Node>, Vec<Vec<u32>>) {
    let count = edges.len() / 2;
    let mut raw: Vec<Node> = Vec::with_capacity(count + 1);
    let mut last_child: Vec<Option<u32>> = alloc::vec![None; count + 1];
    let mut depths: Vec<Vec<u32>> = Vec::new();
    let mut by_id: HashMap<u32, u32> = HashMap::with_capacity(count + 1);

    let root_id = edges[0];
    raw.push(Node::new(root_id, NodeIndex::new(0), 0, None));
    depths.push(alloc::vec![0]);
    by_id.insert(root_id, 0);

    let mut parent: u32 = 0;
    for k in 0..count {
        let parent_id = edges[2 * k];
        let child_id = edges[2 * k + 1];
        debug_assert_eq!(
            parent_id,
            raw[parent as usize].id,
            "a parent's children must be listed consecutively"
        );

        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeIndex uses 32-bit indices by design."
        )]
        let child = raw.len() as u32;
        let depth = raw[parent as usize].depth + 1;
        raw.push(Node::new(
            child_id,
            NodeIndex::new(child),
            depth,
            Some(NodeIndex::new(parent)),
        ));
        link_child(&mut raw, &mut last_child, parent, child);
        if depth as usize == depths.len() {
            depths.push(Vec::new());
        }
        depths[depth as usize].push(child);
        by_id.insert(child_id, child);

        if k + 1 < count {
            let next_parent_id = edges[2 * (k + 1)];
            if next_parent_id == child_id {
                parent = child;
            } else if next_parent_id != parent_id {
                parent = *by_id
                    .get(&next_parent_id)
                    .expect("edge references a parent id that has not been listed yet");
            }
        }
    }
    (raw, depths)
}

/// Build creation-order nodes from `(parent position, child id)` edges.
fn build_parent_index_child_id(edges: &[u32]) -> (Vec<Node>, Vec<Vec<u32>>) {
    let count = edges.len() / 2;
    let mut raw: Vec<Node> = Vec::with_capacity(count + 1);
    let mut last_child: Vec<Option<u32>> = alloc::vec![None; count + 1];
    let mut depths: Vec<Vec<u32>> = Vec::new();

    raw.push(Node::new(0, NodeIndex::new(0), 0, None));
    depths.push(alloc::vec![0]);

    for k in 0..count {
        let parent = edges[2 * k];
        let child_id = edges[2 * k + 1];
        assert!(
            (parent as usize) < raw.len(),
            "edge references a parent position that does not exist yet"
        );

        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeIndex uses 32-bit indices by design."
        )]
        let child = raw.len() as u32;
        let depth = raw[parent as usize].depth + 1;
        raw.push(Node::new(
            child_id,
            NodeIndex::new(child),
            depth,
            Some(NodeIndex::new(parent)),
        ));
        link_child(&mut raw, &mut last_child, parent, child);
        if depth as usize == depths.len() {
            depths.push(Vec::new());
        }
        depths[depth as usize].push(child);
    }
    (raw, depths)
}

/// Append `child` to `parent`'s sibling chain, tracking the last-inserted child
/// per parent. The last-child table exists only during construction.
fn link_child(raw: &mut [Node], last_child: &mut [Option<u32>], parent: u32, child: u32) {
    match last_child[parent as usize] {
        None => raw[parent as usize].first_child = Some(NodeIndex::new(child)),
        Some(previous) => raw[previous as usize].next_sibling = Some(NodeIndex::new(child)),
    }
    last_child[parent as usize] = Some(child);
}

/// Pre-order depth-first traversal over the current sibling order.
#[derive(Clone, Debug)]
pub struct DepthFirst<'a> {
    topology: &'a Topology,
    stack: SmallVec<[NodeIndex; 16]>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = self.topology.node(index);
        if let Some(sibling) = node.next_sibling {
            self.stack.push(sibling);
        }
        if let Some(child) = node.first_child {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Iterator over one node's children in the current sibling order.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    topology: &'a Topology,
    cursor: Option<NodeIndex>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.topology.node(self.cursor?);
        self.cursor = node.next_sibling;
        Some(node)
    }
}

/// Iterator over a sibling chain segment, exclusive of its endpoint.
#[derive(Clone, Debug)]
pub struct SiblingsRange<'a> {
    topology: &'a Topology,
    cursor: Option<NodeIndex>,
    last: Option<NodeIndex>,
}

impl<'a> Iterator for SiblingsRange<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        if self.last == Some(index) {
            return None;
        }
        let node = self.topology.node(index);
        self.cursor = node.next_sibling;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn id_by_id(edges: &[u32]) -> Topology {
        let mut topology = Topology::new();
        topology.initialize(EdgeSemantics::ParentIdChildId, Edges::Interleaved(edges));
        topology
    }

    /// Linearization partition and index permutation, per construction.
    fn assert_well_formed(topology: &Topology) {
        let lin = topology.linearization();
        let mut expected = 0;
        for at in 0..lin.number_of_slices() {
            let slice = lin.slice(at).unwrap();
            assert_eq!(slice.start, expected, "slices must be contiguous");
            expected = slice.end;
        }
        assert_eq!(expected as usize, topology.len(), "slices must cover all nodes");

        for (position, node) in topology.nodes().enumerate() {
            assert_eq!(node.index().idx(), position, "indices must be a permutation");
        }
        for leaf in topology.leaf_nodes() {
            assert!(leaf.is_leaf(), "final slice must hold only leaves");
        }
        for inner in topology.inner_nodes() {
            assert!(!inner.is_leaf(), "inner slices must hold no leaves");
        }

        // Walking parent links terminates at the root in exactly depth steps.
        for node in topology.nodes() {
            let mut steps = 0;
            let mut cursor = node.parent();
            while let Some(parent) = cursor {
                cursor = topology.node(parent).parent();
                steps += 1;
            }
            assert_eq!(steps, node.depth());
        }
    }

    #[test]
    fn three_level_scenario() {
        // root(0) -> inner(1) -> leaves (2, 3)
        let topology = id_by_id(&[0, 1, 1, 2, 1, 3]);
        assert_well_formed(&topology);

        assert_eq!(topology.len(), 4);
        assert_eq!(topology.number_of_inner_nodes(), 2);
        assert_eq!(topology.number_of_leaf_nodes(), 2);

        let root = topology.root().unwrap();
        assert_eq!(root.id(), 0);
        assert!(root.is_root());

        let inner = topology.inner_index_by_id(1).unwrap();
        let children: Vec<u32> = topology.children(inner).map(|n| n.id()).collect();
        assert_eq!(children, [2, 3]);

        // Both leaves sit in the final slice at depth 2.
        for leaf in topology.leaf_nodes() {
            assert_eq!(leaf.depth(), 2);
        }
    }

    #[test]
    fn leaves_are_pooled_across_depths() {
        // root(10) -> inner(20) -> leaf(40), plus shallow leaf(30) under root.
        let topology = id_by_id(&[10, 20, 20, 40, 10, 30]);
        assert_well_formed(&topology);

        assert_eq!(topology.number_of_inner_nodes(), 2);
        assert_eq!(topology.number_of_leaf_nodes(), 2);

        // Leaf 30 (depth 1) and leaf 40 (depth 2) share the final slice, in
        // depth-bucket order.
        let leaves: Vec<(u32, u32)> = topology.leaf_nodes().map(|n| (n.id(), n.depth())).collect();
        assert_eq!(leaves, [(30, 1), (40, 2)]);

        // Edge order is root, 20, 40, 30; leaf separation swaps the last two.
        let forward: Vec<usize> = topology
            .edge_index_to_topology_index()
            .iter()
            .map(|i| i.idx())
            .collect();
        assert_eq!(forward, [0, 1, 3, 2]);
        let backward = topology.topology_index_to_edge_index();
        for (edge, &index) in topology.edge_index_to_topology_index().iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "test trees are tiny"
            )]
            {
                assert_eq!(backward[index.idx()], edge as u32);
            }
        }
    }

    #[test]
    fn lookahead_switches_back_to_an_earlier_parent() {
        // Parent 1's children are listed, then a descent into 2, then back to 1.
        let topology = id_by_id(&[1, 2, 1, 3, 2, 4, 2, 5, 3, 6]);
        assert_well_formed(&topology);

        assert_eq!(topology.len(), 6);
        let two = topology.inner_index_by_id(2).unwrap();
        let three = topology.inner_index_by_id(3).unwrap();
        let of_two: Vec<u32> = topology.children(two).map(|n| n.id()).collect();
        let of_three: Vec<u32> = topology.children(three).map(|n| n.id()).collect();
        assert_eq!(of_two, [4, 5]);
        assert_eq!(of_three, [6]);
    }

    #[test]
    fn parent_index_semantics() {
        // Positions: root = 0, then one node per edge.
        let mut topology = Topology::new();
        topology.initialize(
            EdgeSemantics::ParentIndexChildId,
            Edges::Interleaved(&[0, 5, 0, 6, 1, 7]),
        );
        assert_well_formed(&topology);

        assert_eq!(topology.len(), 4);
        assert_eq!(topology.number_of_inner_nodes(), 2);
        let five = topology.inner_index_by_id(5).unwrap();
        let children: Vec<u32> = topology.children(five).map(|n| n.id()).collect();
        assert_eq!(children, [7]);
        assert!(topology.leaf_index_by_id(6).is_some());
    }

    #[test]
    fn tupled_input_matches_interleaved() {
        let a = id_by_id(&[0, 1, 1, 2, 1, 3]);
        let mut b = Topology::new();
        b.initialize(
            EdgeSemantics::ParentIdChildId,
            Edges::Tupled(&[(0, 1), (1, 2), (1, 3)]),
        );
        let ids_a: Vec<u32> = a.nodes().map(|n| n.id()).collect();
        let ids_b: Vec<u32> = b.nodes().map(|n| n.id()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    #[should_panic(expected = "interleaved edge arrays must hold (parent, child) pairs")]
    fn odd_interleaved_length_panics() {
        let mut topology = Topology::new();
        topology.initialize(EdgeSemantics::ParentIdChildId, Edges::Interleaved(&[0, 1, 1]));
    }

    #[test]
    fn empty_and_single_node_trees_degrade_gracefully() {
        let mut empty = Topology::new();
        empty.initialize(EdgeSemantics::ParentIdChildId, Edges::Interleaved(&[]));
        assert!(empty.is_empty());
        assert!(empty.root().is_none());
        assert_eq!(empty.inner_nodes().count(), 0);
        assert_eq!(empty.leaf_nodes().count(), 0);
        assert_eq!(empty.depth_first().count(), 0);

        let single = Topology::from_root(42);
        assert_well_formed(&single);
        assert_eq!(single.len(), 1);
        assert_eq!(single.number_of_inner_nodes(), 0);
        assert_eq!(single.number_of_leaf_nodes(), 1);
        assert_eq!(single.inner_nodes().count(), 0);
        assert_eq!(single.leaf_index_by_id(42), Some(NodeIndex::new(0)));
        let root = single.root().unwrap();
        assert!(root.is_root() && root.is_leaf());
    }

    #[test]
    fn id_lookup_round_trips() {
        let topology = id_by_id(&[10, 20, 20, 40, 10, 30]);
        for node in topology.nodes() {
            let index = if node.is_leaf() {
                topology.leaf_index_by_id(node.id())
            } else {
                topology.inner_index_by_id(node.id())
            }
            .unwrap();
            assert_eq!(topology.node(index).id(), node.id());
        }
    }

    #[test]
    fn depth_first_is_preorder_over_sibling_links() {
        // root(1) -> [2 -> [4, 5], 3 -> [6]]
        let topology = id_by_id(&[1, 2, 1, 3, 2, 4, 2, 5, 3, 6]);
        let order: Vec<u32> = topology.depth_first().map(|n| n.id()).collect();
        assert_eq!(order, [1, 2, 4, 5, 3, 6]);
    }

    #[test]
    fn rev_parents_runs_deepest_inner_first() {
        let topology = id_by_id(&[1, 2, 2, 3, 3, 4, 3, 5]);
        // Inner nodes: 1 (depth 0), 2 (depth 1), 3 (depth 2).
        let order: Vec<u32> = topology.rev_parents().map(|n| n.id()).collect();
        assert_eq!(order, [3, 2, 1]);
        // rev_nodes yields every leaf before any inner node.
        let mut seen_inner = false;
        for node in topology.rev_nodes() {
            if !node.is_leaf() {
                seen_inner = true;
            } else {
                assert!(!seen_inner, "leaves must precede inner nodes bottom-up");
            }
        }
    }

    #[test]
    fn siblings_range_excludes_its_endpoint() {
        let topology = id_by_id(&[1, 2, 1, 3, 1, 4]);
        let root = topology.root().unwrap().index();
        let kids: Vec<&Node> = topology.children(root).collect();
        let first = Some(kids[0].index());
        let last = Some(kids[2].index());

        let walked: Vec<u32> = topology
            .siblings_range(first, last)
            .map(|n| n.id())
            .collect();
        assert_eq!(walked, [2, 3]);

        // Open-ended walk runs to the chain's end.
        let full: Vec<u32> = topology.siblings_range(first, None).map(|n| n.id()).collect();
        assert_eq!(full, [2, 3, 4]);

        // Empty start yields nothing.
        assert_eq!(topology.siblings_range(None, None).count(), 0);
    }

    #[test]
    fn sort_children_and_reset_order() {
        let topology = &mut id_by_id(&[1, 2, 1, 3, 1, 4]);
        let root = topology.root().unwrap().index();

        topology.sort_children_by(|a, b| b.id().cmp(&a.id()));
        let sorted: Vec<u32> = topology.children(root).map(|n| n.id()).collect();
        assert_eq!(sorted, [4, 3, 2]);

        // Depth-first traversal honors the sorted order too.
        let order: Vec<u32> = topology.depth_first().map(|n| n.id()).collect();
        assert_eq!(order, [1, 4, 3, 2]);

        topology.reset_order();
        let initial: Vec<u32> = topology.children(root).map(|n| n.id()).collect();
        assert_eq!(initial, [2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "edge references a parent position that does not exist yet")]
    fn forward_parent_position_panics() {
        let mut topology = Topology::new();
        topology.initialize(
            EdgeSemantics::ParentIndexChildId,
            Edges::Interleaved(&[5, 1]),
        );
    }

    #[test]
    fn weight_aggregation_over_rev_nodes() {
        // Bottom-up sweep: parents accumulate their children's weights.
        let topology = id_by_id(&[1, 2, 1, 3, 2, 4, 2, 5]);
        let mut weights = vec![0.0_f64; topology.len()];
        for leaf in topology.leaf_nodes() {
            weights[leaf.index().idx()] = 1.0;
        }
        for node in topology.rev_nodes() {
            if let Some(parent) = node.parent() {
                weights[parent.idx()] += weights[node.index().idx()];
            }
        }
        let root = topology.root().unwrap().index();
        assert_eq!(weights[root.idx()], 3.0);
    }
}
