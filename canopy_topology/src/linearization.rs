// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-slice index over the linearized node array.

use core::ops::Range;

use smallvec::SmallVec;

/// Contiguous index ranges ("depth slices") over a linearized node array.
///
/// Each slice is a half-open `Range<u32>`. Slices are ordered by depth, cover
/// `0..number_of_nodes` with no gaps or overlaps, and the final slice holds all
/// leaf nodes regardless of their true depth. That last point is the defining
/// property of the ordering: it is *leaf-separated* breadth first, not pure
/// breadth first, so "all inner nodes" and "all leaves" are both single
/// contiguous ranges.
#[derive(Clone, Debug, Default)]
pub struct Linearization {
    slices: SmallVec<[Range<u32>; 8]>,
}

impl Linearization {
    pub(crate) fn clear(&mut self) {
        self.slices.clear();
    }

    pub(crate) fn push(&mut self, slice: Range<u32>) {
        debug_assert!(
            slice.start <= slice.end,
            "depth slices must be non-inverted"
        );
        debug_assert_eq!(
            slice.start,
            self.slices.last().map_or(0, |s| s.end),
            "depth slices must be contiguous"
        );
        self.slices.push(slice);
    }

    /// Number of slices, including the final leaf slice.
    pub fn number_of_slices(&self) -> usize {
        self.slices.len()
    }

    /// The slice at position `at`, if present. The last slice is the leaf slice;
    /// the ones before it correspond to inner-node depths in increasing order.
    pub fn slice(&self, at: usize) -> Option<Range<u32>> {
        self.slices.get(at).cloned()
    }

    /// The index range holding every inner node (root first, by depth).
    pub fn inner_range(&self) -> Range<u32> {
        0..self.number_of_inner_nodes()
    }

    /// The index range of the final slice, holding every leaf node.
    pub fn leaf_range(&self) -> Range<u32> {
        self.slices.last().cloned().unwrap_or(0..0)
    }

    /// Count of inner (non-leaf) nodes; equals the start of the leaf slice.
    pub fn number_of_inner_nodes(&self) -> u32 {
        self.slices.last().map_or(0, |s| s.start)
    }

    /// Count of leaf nodes.
    pub fn number_of_leaf_nodes(&self) -> u32 {
        self.slices.last().map_or(0, |s| s.end - s.start)
    }

    /// Total number of nodes covered.
    pub fn number_of_nodes(&self) -> u32 {
        self.slices.last().map_or(0, |s| s.end)
    }

    /// Iterate the inner-node slices (every slice but the last), deepest last.
    pub fn inner_slices(&self) -> impl DoubleEndedIterator<Item = Range<u32>> + '_ {
        let count = self.slices.len().saturating_sub(1);
        self.slices[..count].iter().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::Linearization;

    #[test]
    fn empty_linearization_has_empty_ranges() {
        let lin = Linearization::default();
        assert_eq!(lin.number_of_slices(), 0);
        assert_eq!(lin.number_of_nodes(), 0);
        assert_eq!(lin.inner_range(), 0..0);
        assert_eq!(lin.leaf_range(), 0..0);
    }

    #[test]
    fn slices_partition_the_index_space() {
        let mut lin = Linearization::default();
        lin.push(0..1);
        lin.push(1..2);
        lin.push(2..5);

        assert_eq!(lin.number_of_slices(), 3);
        assert_eq!(lin.number_of_nodes(), 5);
        assert_eq!(lin.number_of_inner_nodes(), 2);
        assert_eq!(lin.number_of_leaf_nodes(), 3);
        assert_eq!(lin.inner_range(), 0..2);
        assert_eq!(lin.leaf_range(), 2..5);

        // Coverage: concatenated slices are exactly 0..number_of_nodes.
        let mut expected = 0;
        for at in 0..lin.number_of_slices() {
            let slice = lin.slice(at).unwrap();
            assert_eq!(slice.start, expected);
            expected = slice.end;
        }
        assert_eq!(expected, lin.number_of_nodes());
    }

    #[test]
    fn single_node_tree_is_one_leaf_slice() {
        let mut lin = Linearization::default();
        lin.push(0..1);
        assert_eq!(lin.number_of_inner_nodes(), 0);
        assert_eq!(lin.number_of_leaf_nodes(), 1);
        assert_eq!(lin.inner_slices().count(), 0);
    }
}
