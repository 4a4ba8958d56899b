// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Squarified strip packing.

use canopy_topology::Topology;

use crate::callbacks::LayoutCallbacks;
use crate::rect::Rect;
use crate::row::Row;

/// Subdivide every inner node's rectangle among its children.
///
/// Parents are visited in linearization order, so a child's cell is final
/// before the child is itself subdivided. Each parent runs one greedy row
/// loop: a sibling joins the current row unless doing so would worsen the
/// row's average aspect ratio, in which case the row is finalized and a fresh
/// one starts in the remaining space. Rows run across the parent's shorter
/// side and keep that single direction for the whole parent.
pub(crate) fn layout(
    topology: &Topology,
    weights: &[f64],
    callbacks: &LayoutCallbacks,
    rects: &mut [Rect],
    accessories: &mut [Option<Rect>],
) {
    for parent in topology.inner_nodes() {
        let index = parent.index();
        let depth = parent.depth();

        let (content, accessory) = (callbacks.accessory_padding)(depth, rects[index.idx()]);
        accessories[index.idx()] = accessory;
        let space = (callbacks.parent_padding)(depth, content);
        let space = (callbacks.sibling_margin_before)(depth, space);

        let available: f64 = topology
            .children(index)
            .map(|child| weights[child.index().idx()])
            .sum();
        let horizontal = space.is_vertical();
        let mut row = Row::new(space, available, horizontal);
        for child in topology.children(index) {
            let weight = weights[child.index().idx()];
            if row.increases_average_aspect_ratio(weight) {
                row.layout_nodes(rects);
                row.next(horizontal);
            }
            row.insert(child.index(), weight);
        }
        row.layout_nodes(rects);

        for child in topology.children(index) {
            let i = child.index().idx();
            rects[i] = (callbacks.sibling_margin_after)(child.depth(), rects[i]);
        }
    }
}
