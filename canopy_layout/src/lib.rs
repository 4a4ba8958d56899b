// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Layout: weight-proportional treemap rectangle layout.
//!
//! Canopy Layout turns a [`canopy_topology::Topology`] plus one weight per node
//! into one rectangle per node, such that every rectangle's area is
//! proportional to its weight and every child rectangle lies inside its
//! parent's.
//!
//! - [`Algorithm::Strip`]: squarified strip packing (Bruls-style rows along the
//!   shorter side of the remaining space).
//! - [`Algorithm::Snake`]: strip packing with alternating fill direction, so
//!   sibling order reads as one continuous path.
//! - [`Algorithm::CodeCity`]: bottom-up shelf packing producing the blocky
//!   "city district" look; parents grow to enclose their children instead of
//!   children subdividing their parent.
//!
//! All coordinates are y-up. The root rectangle is a unit-area box with a
//! configurable aspect ratio, centered on `(0.5, 0.5)`; convert to a rendering
//! space with [`Rect::map`] or via the [`kurbo::Rect`] conversion.
//!
//! ## Where this fits
//!
//! This crate is the geometry half of a treemap pipeline:
//! - Topology: edge-list ingestion and traversal order ([`canopy_topology`]).
//! - Layout: rectangles from weights (this crate).
//! - Rendering: turning rectangles into draw calls (out of scope here).
//!
//! ## Example
//!
//! ```rust
//! use canopy_layout::{create_layout, Configuration};
//! use canopy_topology::{EdgeSemantics, Edges, Topology};
//!
//! // root(0) -> inner(1) -> leaves (2, 3)
//! let mut topology = Topology::new();
//! topology.initialize(
//!     EdgeSemantics::ParentIdChildId,
//!     Edges::Interleaved(&[0, 1, 1, 2, 1, 3]),
//! );
//!
//! // One weight per node, in topology index order; inner weights are the
//! // sums of their leaves.
//! let weights = [3.0, 3.0, 1.0, 2.0];
//! let layout = create_layout(&topology, &weights, &Configuration::default());
//!
//! assert_eq!(layout.rects.len(), 4);
//! let root = layout.rects[0];
//! assert!((root.area() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Contract
//!
//! Weights are finite and non-negative, one per node in topology index order,
//! and the root's weight equals the sum of the leaf weights. Violations are
//! programmer errors and are caught by debug assertions, not reported as
//! recoverable errors.

#![no_std]

extern crate alloc;

mod callbacks;
mod city;
mod config;
mod layout;
mod rect;
mod row;
mod snake;
mod strip;
mod util;

pub use callbacks::{
    LayoutCallbacks, packing_layout_postprocessing, splitting_layout_postprocessing,
};
pub use config::{
    AccessoryDirection, AccessorySpec, Algorithm, Configuration, MarginSpec, PaddingSpec, PerDepth,
};
pub use layout::{LayoutResult, create_layout};
pub use rect::{Orientation, Rect};
pub use row::{DirectionalRow, Row};
