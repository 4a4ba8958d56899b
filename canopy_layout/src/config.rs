// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration: algorithm choice and spacing rules.

use alloc::vec::Vec;

/// Which packing algorithm produces the rectangles.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Algorithm {
    /// Squarified strip packing.
    #[default]
    Strip,
    /// Strip packing with alternating fill direction.
    Snake,
    /// Bottom-up shelf packing; parents enclose their children.
    CodeCity,
}

/// Spacing between sibling rectangles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarginSpec {
    /// A fixed margin in layout units, degraded on cells too small to afford it.
    Absolute {
        /// Gap between adjacent siblings.
        value: f64,
    },
    /// A margin removing a fixed fraction of each cell's area.
    Relative {
        /// Area fraction in `0..=1` removed per cell.
        value: f64,
    },
}

/// Inset between a parent's border and its children.
#[derive(Clone, Debug, PartialEq)]
pub enum PaddingSpec {
    /// A fixed inset in layout units, degraded on small parents.
    Absolute {
        /// Inset on all four edges.
        value: f64,
    },
    /// An inset removing a fixed fraction of the parent's area.
    Relative {
        /// Area fraction in `0..=1` removed per parent.
        value: f64,
    },
    /// A fixed inset chosen by depth, falling back beyond the listed depths.
    Mixed {
        /// Absolute inset per depth, indexed by the parent's depth.
        per_depth: Vec<f64>,
        /// Inset for depths past the end of `per_depth`.
        fallback: f64,
    },
}

/// A per-depth parameter: one value for all depths, or a list clamped to its
/// last entry for deeper nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum PerDepth {
    /// The same value at every depth.
    Uniform(f64),
    /// One value per depth; depths past the end use the last entry.
    ByDepth(Vec<f64>),
}

impl PerDepth {
    /// The value at `depth`.
    pub fn at(&self, depth: u32) -> f64 {
        match self {
            Self::Uniform(value) => *value,
            Self::ByDepth(values) => {
                let index = (depth as usize).min(values.len().saturating_sub(1));
                values.get(index).copied().unwrap_or(0.0)
            }
        }
    }
}

/// Which edge of a parent the accessory strip is carved from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessoryDirection {
    /// Carve from the top edge (the usual title-bar position).
    Top,
    /// Carve from the bottom edge.
    Bottom,
    /// Carve from the left edge.
    Left,
    /// Carve from the right edge.
    Right,
}

/// An accessory strip (typically a label bar) carved out of each inner node's
/// rectangle before its children are laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessorySpec {
    /// Edge the strip is taken from.
    pub direction: AccessoryDirection,
    /// Whether `value` is an absolute thickness or a fraction of the parent's
    /// extent along the carve axis.
    pub absolute: bool,
    /// Strip thickness per depth.
    pub value: PerDepth,
    /// The carve is skipped when the remaining content area would drop to this
    /// fraction of the parent's area or below.
    pub relative_area_threshold: PerDepth,
    /// The carve is skipped when the remaining content's aspect ratio would
    /// fall below this value.
    pub target_aspect_ratio: PerDepth,
}

/// Full layout configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Packing algorithm.
    pub algorithm: Algorithm,
    /// Width-over-height ratio of the root rectangle. Must be positive.
    pub aspect_ratio: f64,
    /// Spacing between siblings, if any.
    pub sibling_margin: Option<MarginSpec>,
    /// Inset between parents and their children, if any.
    pub parent_padding: Option<PaddingSpec>,
    /// Accessory strip carved from inner nodes, if any.
    pub accessory_padding: Option<AccessorySpec>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            aspect_ratio: 1.0,
            sibling_margin: None,
            parent_padding: None,
            accessory_padding: None,
        }
    }
}
