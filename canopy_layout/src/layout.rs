// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout entry point.

use alloc::vec::Vec;

use canopy_topology::Topology;

use crate::callbacks::{packing_layout_postprocessing, splitting_layout_postprocessing};
use crate::config::{Algorithm, Configuration};
use crate::rect::Rect;
use crate::util::sqrt;
use crate::{city, snake, strip};

/// One rectangle per node, plus the accessory strips carved for inner nodes.
///
/// Both vectors are indexed by topology index. `accessories[i]` is `Some` only
/// when the configuration requested accessory padding and node `i`'s rectangle
/// could afford the carve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
    /// Final rectangle per node.
    pub rects: Vec<Rect>,
    /// Accessory strip per node, where one was carved.
    pub accessories: Vec<Option<Rect>>,
}

impl LayoutResult {
    /// The node rectangles as [`kurbo::Rect`]s, for handing to a renderer.
    pub fn to_kurbo(&self) -> Vec<kurbo::Rect> {
        self.rects.iter().map(|&rect| rect.into()).collect()
    }
}

/// Compute a rectangle per node from one weight per node.
///
/// Weights are indexed by topology index; the root's weight must equal the
/// sum of the leaf weights (inner weights are aggregates, not additions). The
/// root rectangle is a unit-area box with the configured aspect ratio,
/// centered on `(0.5, 0.5)`.
///
/// # Panics
///
/// Panics if `config.aspect_ratio` is not positive. Mismatched weight counts
/// and inconsistent weights are caught by debug assertions.
pub fn create_layout(
    topology: &Topology,
    weights: &[f64],
    config: &Configuration,
) -> LayoutResult {
    assert!(config.aspect_ratio > 0.0, "aspect ratio must be positive");
    debug_assert_eq!(weights.len(), topology.len(), "one weight per node");
    debug_assert!(
        weights.iter().all(|w| w.is_finite() && *w >= 0.0),
        "weights must be finite and non-negative"
    );

    let mut result = LayoutResult {
        rects: alloc::vec![Rect::default(); topology.len()],
        accessories: alloc::vec![None; topology.len()],
    };
    if topology.is_empty() {
        return result;
    }

    #[cfg(debug_assertions)]
    {
        let leaf_sum: f64 = topology
            .leaf_nodes()
            .map(|leaf| weights[leaf.index().idx()])
            .sum();
        debug_assert!(
            (weights[0] - leaf_sum).abs() <= 1e-6 * weights[0].max(1.0),
            "the root weight must equal the sum of the leaf weights"
        );
    }

    let side = sqrt(config.aspect_ratio);
    let mut root_rect = Rect::new(0.0, 0.0, side, 1.0 / side);
    root_rect.center_around(0.5, 0.5);

    let callbacks = match config.algorithm {
        Algorithm::CodeCity => packing_layout_postprocessing(config),
        Algorithm::Strip | Algorithm::Snake => splitting_layout_postprocessing(config),
    };
    result.rects[0] = root_rect;
    match config.algorithm {
        Algorithm::Strip => strip::layout(
            topology,
            weights,
            &callbacks,
            &mut result.rects,
            &mut result.accessories,
        ),
        Algorithm::Snake => snake::layout(
            topology,
            weights,
            &callbacks,
            &mut result.rects,
            &mut result.accessories,
        ),
        Algorithm::CodeCity => {
            city::layout(topology, weights, &callbacks, &root_rect, &mut result.rects);
        }
    }

    #[cfg(debug_assertions)]
    for node in topology.nodes() {
        if let Some(parent) = node.parent() {
            debug_assert!(
                result.rects[parent.idx()].comprises(&result.rects[node.index().idx()]),
                "every rectangle must lie inside its parent's"
            );
        }
    }

    result
}
