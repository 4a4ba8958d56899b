// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small numeric helpers shared across the crate.

/// Geometric tolerance for containment, intersection, and degeneracy tests.
///
/// Deliberately coarser than `f64::EPSILON`: layout math chains several
/// multiplications per level, so exact-epsilon comparisons get flaky on deep
/// trees.
pub(crate) const EPS: f64 = 1e-9;

/// `sqrt` for `no_std` builds.
pub(crate) fn sqrt(value: f64) -> f64 {
    libm::sqrt(value)
}
