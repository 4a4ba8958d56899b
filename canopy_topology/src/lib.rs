// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Topology: a breadth-first, leaf-separated tree linearization.
//!
//! Canopy Topology is the hierarchy backbone of the Canopy treemap stack. It turns
//! an arbitrary parent/child edge list into a flat, index-linked node array plus a
//! set of depth slices, so that layout and rendering passes can iterate tiers of
//! the tree as contiguous ranges instead of chasing pointers.
//!
//! - Nodes are plain records in a single `Vec`, linked by integer index
//!   ([`NodeIndex`]); `Option<NodeIndex>` stands in for "no link".
//! - The node order is breadth first by depth, with one twist: all leaves, whatever
//!   their true depth, are pooled into one final slice. Inner tiers therefore come
//!   first (root at index 0), and per-node attribute buffers can be split into an
//!   inner part and a leaf part by a single index comparison.
//! - [`Topology::initialize`] rebuilds the whole structure from an edge list in one
//!   of two encodings ([`EdgeSemantics`]), renumbers every node, and exposes index
//!   maps back to the caller's edge order for attribute correlation.
//!
//! ## Where this fits
//!
//! Canopy separates hierarchy from geometry. This crate owns the hierarchy; the
//! `canopy_layout` crate walks it tier by tier and assigns a rectangle per node.
//! Parsing (CSV, configuration) and rendering are upstream and downstream of both
//! and never reach into the node array directly.
//!
//! ## Example
//!
//! ```rust
//! use canopy_topology::{Edges, EdgeSemantics, Topology};
//!
//! // root(0) -> inner(1) -> leaves (2, 3)
//! let mut topology = Topology::new();
//! topology.initialize(
//!     EdgeSemantics::ParentIdChildId,
//!     Edges::Interleaved(&[0, 1, 1, 2, 1, 3]),
//! );
//!
//! assert_eq!(topology.len(), 4);
//! assert_eq!(topology.number_of_inner_nodes(), 2);
//! assert_eq!(topology.number_of_leaf_nodes(), 2);
//!
//! // Inner tiers precede the pooled leaf slice.
//! let depths: Vec<u32> = topology.nodes().map(|n| n.depth()).collect();
//! assert_eq!(depths, [0, 1, 2, 2]);
//! ```
//!
//! ## Contract
//!
//! Malformed edge lists (odd interleaved length, a child that references a parent
//! id that was never listed) are programmer errors and panic; they are not
//! recoverable runtime conditions. Empty and single-node trees are valid and all
//! traversals degrade gracefully on them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod linearization;
mod node;
mod topology;

pub use linearization::Linearization;
pub use node::{Node, NodeIndex};
pub use topology::{Children, DepthFirst, EdgeSemantics, Edges, SiblingsRange, Topology};
