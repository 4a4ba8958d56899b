// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spacing hooks applied around the packing passes.
//!
//! The packing algorithms do not interpret the configuration themselves; they
//! call through a [`LayoutCallbacks`] bundle built up front. Splitting
//! algorithms (strip, snake) get the full margin/padding/accessory treatment;
//! packing algorithms (code city) get identities, since their parents are
//! grown around the children rather than subdivided.

use alloc::boxed::Box;
use core::fmt;

use crate::config::{AccessoryDirection, Configuration, MarginSpec, PaddingSpec};
use crate::rect::Rect;
use crate::util::EPS;

/// Inner nodes keep at least this fraction of their area after padding.
const MIN_PADDED_AREA: f64 = 0.25;
/// Cells keep at least this fraction of their area after an absolute margin.
const MIN_MARGIN_AREA: f64 = 0.5;

type RectHook = Box<dyn Fn(u32, Rect) -> Rect>;
type AccessoryHook = Box<dyn Fn(u32, Rect) -> (Rect, Option<Rect>)>;

/// The spacing hooks one layout run uses. All hooks take the node's depth.
pub struct LayoutCallbacks {
    /// Shrinks an inner node's rectangle before its children are packed into it.
    pub(crate) parent_padding: RectHook,
    /// Shrinks the space children are packed into, before any row is built.
    pub(crate) sibling_margin_before: RectHook,
    /// Shrinks each child's cell once its parent's rows are committed, before
    /// the child is itself subdivided.
    pub(crate) sibling_margin_after: RectHook,
    /// Splits an inner node's rectangle into content and an optional accessory
    /// strip (label bar).
    pub(crate) accessory_padding: AccessoryHook,
}

impl fmt::Debug for LayoutCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCallbacks").finish_non_exhaustive()
    }
}

/// Build the hooks for splitting algorithms (strip and snake).
///
/// Absolute margins take half the margin per boundary: the before hook insets
/// the packing space, the after hook insets every child cell, so adjacent
/// siblings and the parent border each end up the full margin apart (degraded
/// on cells that cannot afford it). Relative margins are taken per child after
/// its parent's rows commit, so they never distort the weight proportions
/// rows are computed from.
pub fn splitting_layout_postprocessing(config: &Configuration) -> LayoutCallbacks {
    let padding = config.parent_padding.clone();
    let margin = config.sibling_margin;
    let accessory = config.accessory_padding.clone();

    LayoutCallbacks {
        parent_padding: Box::new(move |depth, rect| match &padding {
            None => rect,
            Some(PaddingSpec::Absolute { value }) => {
                rect.padded_with_min_area(*value, MIN_PADDED_AREA)
            }
            Some(PaddingSpec::Relative { value }) => {
                rect.padded(rect.equalized_relative_margin(*value))
            }
            Some(PaddingSpec::Mixed { per_depth, fallback }) => {
                let value = per_depth.get(depth as usize).copied().unwrap_or(*fallback);
                rect.padded_with_min_area(value, MIN_PADDED_AREA)
            }
        }),
        sibling_margin_before: Box::new(move |_, rect| match margin {
            Some(MarginSpec::Absolute { value }) => {
                rect.padded(rect.equalized_margin(value * 0.5, MIN_MARGIN_AREA, 0.0))
            }
            _ => rect,
        }),
        sibling_margin_after: Box::new(move |_, rect| match margin {
            Some(MarginSpec::Absolute { value }) => {
                rect.padded(rect.equalized_margin(value * 0.5, MIN_MARGIN_AREA, 0.0))
            }
            Some(MarginSpec::Relative { value }) => {
                rect.padded(rect.equalized_relative_margin(value))
            }
            None => rect,
        }),
        accessory_padding: Box::new(move |depth, rect| {
            let Some(spec) = &accessory else {
                return (rect, None);
            };
            carve_accessory(spec, depth, rect)
        }),
    }
}

/// Build identity hooks for packing algorithms (code city).
pub fn packing_layout_postprocessing(_config: &Configuration) -> LayoutCallbacks {
    LayoutCallbacks {
        parent_padding: Box::new(|_, rect| rect),
        sibling_margin_before: Box::new(|_, rect| rect),
        sibling_margin_after: Box::new(|_, rect| rect),
        accessory_padding: Box::new(|_, rect| (rect, None)),
    }
}

/// Split `rect` into content and an accessory strip, or refuse the carve.
///
/// The carve is refused when the strip would not fit, when it would leave too
/// little content area, or when the remaining content rectangle's aspect
/// ratio would fall below the configured target.
fn carve_accessory(
    spec: &crate::config::AccessorySpec,
    depth: u32,
    rect: Rect,
) -> (Rect, Option<Rect>) {
    let vertical_carve = matches!(
        spec.direction,
        AccessoryDirection::Top | AccessoryDirection::Bottom
    );
    let along = if vertical_carve { rect.height() } else { rect.width() };

    let value = spec.value.at(depth);
    let thickness = if spec.absolute { value } else { value * along };
    if thickness <= EPS || thickness >= along - EPS {
        return (rect, None);
    }

    let orientation = rect.orientation();
    let (content, strip) = match spec.direction {
        AccessoryDirection::Top => (
            Rect::new(rect.left(), rect.bottom(), rect.right(), rect.top() - thickness),
            Rect::new(rect.left(), rect.top() - thickness, rect.right(), rect.top()),
        ),
        AccessoryDirection::Bottom => (
            Rect::new(rect.left(), rect.bottom() + thickness, rect.right(), rect.top()),
            Rect::new(rect.left(), rect.bottom(), rect.right(), rect.bottom() + thickness),
        ),
        AccessoryDirection::Left => (
            Rect::new(rect.left() + thickness, rect.bottom(), rect.right(), rect.top()),
            Rect::new(rect.left(), rect.bottom(), rect.left() + thickness, rect.top()),
        ),
        AccessoryDirection::Right => (
            Rect::new(rect.left(), rect.bottom(), rect.right() - thickness, rect.top()),
            Rect::new(rect.right() - thickness, rect.bottom(), rect.right(), rect.top()),
        ),
    };

    if content.area() <= spec.relative_area_threshold.at(depth) * rect.area() {
        return (rect, None);
    }
    if content.aspect_ratio() < spec.target_aspect_ratio.at(depth) {
        return (rect, None);
    }
    (content.with_orientation(orientation), Some(strip))
}
