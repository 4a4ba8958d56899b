// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom-up shelf packing for the code-city look.

use alloc::vec::Vec;

use canopy_topology::Topology;

use crate::callbacks::LayoutCallbacks;
use crate::rect::Rect;
use crate::util::{sqrt, EPS};

/// Lay out the whole tree by growing parents around their children.
///
/// Every node starts as a square whose area is its weight's share of the root
/// weight. Working bottom-up, each parent shelf-packs its children into rows
/// no wider than the parent's own initial square, then becomes the packing's
/// bounding box. A top-down pass turns the child offsets, recorded relative to
/// their parents, into absolute positions, and the finished root is remapped
/// onto `target`. Because parents enclose rather than subdivide, sibling
/// rectangles never overlap but a parent's area exceeds its weight's share.
pub(crate) fn layout(
    topology: &Topology,
    weights: &[f64],
    callbacks: &LayoutCallbacks,
    target: &Rect,
    rects: &mut [Rect],
) {
    if topology.is_empty() {
        return;
    }
    let root_weight = weights[0].max(EPS);
    for node in topology.nodes() {
        let i = node.index().idx();
        let side = sqrt((weights[i] / root_weight).max(0.0));
        rects[i] = Rect::new(0.0, 0.0, side, side);
    }

    // Bottom-up: pack children, record parent-relative offsets, grow parents.
    let mut offsets: Vec<(f64, f64)> = alloc::vec![(0.0, 0.0); topology.len()];
    for parent in topology.rev_parents() {
        let index = parent.index();
        let shelf_width = rects[index.idx()].width();
        let mut cursor_x = 0.0_f64;
        let mut cursor_y = 0.0_f64;
        let mut shelf_height = 0.0_f64;
        let mut bound_width = 0.0_f64;
        let mut bound_height = 0.0_f64;
        for child in topology.children(index) {
            let c = child.index().idx();
            let (width, height) = (rects[c].width(), rects[c].height());
            if cursor_x > EPS && cursor_x + width > shelf_width + EPS {
                cursor_y += shelf_height;
                cursor_x = 0.0;
                shelf_height = 0.0;
            }
            offsets[c] = (cursor_x, cursor_y);
            cursor_x += width;
            shelf_height = shelf_height.max(height);
            bound_width = bound_width.max(cursor_x);
            bound_height = bound_height.max(cursor_y + height);
        }
        rects[index.idx()] = Rect::new(0.0, 0.0, bound_width, bound_height);
    }

    // Top-down: parents come before their children, so one sweep makes every
    // offset absolute.
    for parent in topology.inner_nodes() {
        let (parent_x, parent_y) = offsets[parent.index().idx()];
        for child in topology.children(parent.index()) {
            let c = child.index().idx();
            offsets[c].0 += parent_x;
            offsets[c].1 += parent_y;
        }
    }
    for (rect, &(dx, dy)) in rects.iter_mut().zip(offsets.iter()) {
        rect.apply_offset(dx, dy);
    }

    let source = rects[0];
    for rect in rects.iter_mut() {
        *rect = rect.map(&source, target);
    }
    for node in topology.nodes() {
        if node.parent().is_none() {
            continue;
        }
        let i = node.index().idx();
        rects[i] = (callbacks.sibling_margin_after)(node.depth(), rects[i]);
    }
}
