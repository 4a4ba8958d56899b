// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node records and the index type that links them.

/// Position of a node within the linearized array.
///
/// Indices are authoritative spatial identity once [`crate::Topology::initialize`]
/// has run: attribute and layout buffers are addressed by them, and the
/// linearization's depth slices are ranges over them. They are plain `u32`
/// positions, not generational handles; a rebuild invalidates all of them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// Create an index from a raw position.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw position as a `usize`, for slice addressing.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The raw position.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One tree node: identity plus index-based linkage into the node array.
///
/// A node stores two generations of sibling order. `first_child`/`next_sibling`
/// reflect the current order, which [`crate::Topology::sort_children_by`] may
/// rewrite; `initial_first_child`/`initial_next_sibling` snapshot the order the
/// edge list was delivered in and are restorable via
/// [`crate::Topology::reset_order`].
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: u32,
    pub(crate) index: NodeIndex,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) first_child: Option<NodeIndex>,
    pub(crate) next_sibling: Option<NodeIndex>,
    pub(crate) initial_first_child: Option<NodeIndex>,
    pub(crate) initial_next_sibling: Option<NodeIndex>,
}

impl Node {
    pub(crate) fn new(id: u32, index: NodeIndex, depth: u32, parent: Option<NodeIndex>) -> Self {
        Self {
            id,
            index,
            depth,
            parent,
            first_child: None,
            next_sibling: None,
            initial_first_child: None,
            initial_next_sibling: None,
        }
    }

    /// Caller-supplied identifier. Not necessarily unique across the inner and
    /// leaf id spaces; see [`crate::Topology::inner_index_by_id`] and
    /// [`crate::Topology::leaf_index_by_id`].
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Position within the linearized array.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Distance from the root (root is 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Parent link, `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// First child in the current sibling order.
    pub fn first_child(&self) -> Option<NodeIndex> {
        self.first_child
    }

    /// Next sibling in the current sibling order.
    pub fn next_sibling(&self) -> Option<NodeIndex> {
        self.next_sibling
    }

    /// First child in the order the edge list was delivered in.
    pub fn initial_first_child(&self) -> Option<NodeIndex> {
        self.initial_first_child
    }

    /// Next sibling in the order the edge list was delivered in.
    pub fn initial_next_sibling(&self) -> Option<NodeIndex> {
        self.initial_next_sibling
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
