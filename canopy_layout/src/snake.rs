// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip packing with alternating fill direction.

use canopy_topology::Topology;

use crate::callbacks::LayoutCallbacks;
use crate::rect::{Orientation, Rect};
use crate::row::DirectionalRow;

/// Subdivide every inner node's rectangle among its children, snake-style.
///
/// The row loop is the same greedy split as the strip layout, but rows are
/// [`DirectionalRow`]s: each row fills opposite to the previous one, and a
/// parent's starting direction is read off the orientation its own cell was
/// stamped with. Together these make the sibling order trace one continuous
/// path through the whole treemap.
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
        let orientation = space.orientation();
        let horizontal = space.is_vertical();
        let mut row = DirectionalRow::new(
            space,
            available,
            horizontal,
            orientation.contains(Orientation::REVERSED),
            orientation.contains(Orientation::STACK_REVERSED),
        );
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
