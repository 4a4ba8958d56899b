// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The strip-packing row accumulator.
//!
//! A [`Row`] holds the members of one strip while the packing loop decides
//! whether the next sibling still improves the strip's average aspect ratio.
//! Geometry follows Bruls-style squarified packing: the strip's thickness is
//! the row's share of the remaining weight, and each member's length is its
//! share of the row.

use canopy_topology::NodeIndex;
use smallvec::SmallVec;

use crate::rect::{Orientation, Rect};
use crate::util::EPS;

/// One strip of siblings being packed into the remaining space of a parent.
///
/// A horizontal row consumes from the top of the available space and fills
/// left to right; a vertical row consumes from the left and fills top to
/// bottom. [`DirectionalRow`] flips either convention.
#[derive(Clone, Debug)]
pub struct Row {
    available_space: Rect,
    available_weight: f64,
    current_weight: f64,
    horizontal: bool,
    reverse: bool,
    stack_reversed: bool,
    inserted: u32,
    members: SmallVec<[(NodeIndex, f64); 16]>,
}

impl Row {
    /// Create an empty row over `available_space`, which must receive members
    /// totalling `available_weight` across all rows.
    pub fn new(available_space: Rect, available_weight: f64, horizontal: bool) -> Self {
        Self {
            available_space,
            available_weight,
            current_weight: 0.0,
            horizontal,
            reverse: false,
            stack_reversed: false,
            inserted: 0,
            members: SmallVec::new(),
        }
    }

    /// The weight still unassigned, including the current row's members.
    pub fn available_weight(&self) -> f64 {
        self.available_weight
    }

    /// The space left for this row and all following ones.
    pub fn available_space(&self) -> Rect {
        self.available_space
    }

    /// Whether the row can produce no visible geometry.
    fn disabled(&self) -> bool {
        self.available_weight <= EPS
            || self.available_space.width() <= EPS
            || self.available_space.height() <= EPS
    }

    /// Append a member to the current row.
    ///
    /// The weight is clamped into the remaining budget, so accumulated float
    /// error in the caller's weights cannot overrun the strip.
    pub fn insert(&mut self, node: NodeIndex, weight: f64) {
        let clamped = weight
            .min(self.available_weight - self.current_weight)
            .max(0.0);
        self.members.push((node, clamped));
        self.current_weight += clamped;
        if clamped > EPS {
            self.inserted += 1;
        }
    }

    /// Whether adding a member of `weight` would worsen the row's average
    /// aspect ratio, meaning the row should be finalized first.
    ///
    /// Always `false` on an empty or disabled row, so the first member of
    /// every row is accepted unconditionally.
    pub fn increases_average_aspect_ratio(&self, weight: f64) -> bool {
        if self.inserted == 0 || self.disabled() {
            return false;
        }
        let clamped = weight
            .min(self.available_weight - self.current_weight)
            .max(0.0);
        if clamped <= EPS {
            return false;
        }

        let (primary, perpendicular) = if self.horizontal {
            (self.available_space.width(), self.available_space.height())
        } else {
            (self.available_space.height(), self.available_space.width())
        };

        let current = self.average_aspect_ratio(self.current_weight, None, primary, perpendicular);
        let hypothetical = self.average_aspect_ratio(
            self.current_weight + clamped,
            Some(clamped),
            primary,
            perpendicular,
        );
        hypothetical > current + EPS
    }

    /// Mean member aspect ratio for a row of `row_weight`, optionally with one
    /// extra hypothetical member.
    fn average_aspect_ratio(
        &self,
        row_weight: f64,
        extra: Option<f64>,
        primary: f64,
        perpendicular: f64,
    ) -> f64 {
        let thickness = row_weight / self.available_weight * perpendicular;
        let mut sum = 0.0;
        let mut count = 0;
        for &(_, weight) in self.members.iter().chain(extra.map(|w| (NodeIndex::new(0), w)).iter())
        {
            if weight <= EPS {
                continue;
            }
            let length = weight / row_weight * primary;
            sum += member_aspect(length, thickness);
            count += 1;
        }
        if count == 0 {
            return 0.0;
        }
        sum / f64::from(count)
    }

    /// Write the final rectangle of every member into `rects`, indexed by
    /// [`NodeIndex`].
    ///
    /// A disabled row writes zero-extent rectangles at the space's bottom-left
    /// corner so downstream passes see valid, contained geometry.
    pub fn layout_nodes(&self, rects: &mut [Rect]) {
        let orientation = self.member_orientation();
        if self.disabled() || self.current_weight <= EPS {
            let corner = Rect::new(
                self.available_space.left(),
                self.available_space.bottom(),
                self.available_space.left(),
                self.available_space.bottom(),
            )
            .with_orientation(orientation);
            for &(node, _) in &self.members {
                rects[node.idx()] = corner;
            }
            return;
        }

        let space = &self.available_space;
        if self.horizontal {
            let thickness = self.current_weight / self.available_weight * space.height();
            let strip_top = if self.stack_reversed {
                space.bottom() + thickness
            } else {
                space.top()
            };
            let mut cursor = if self.reverse { space.right() } else { space.left() };
            for &(node, weight) in &self.members {
                let length = weight / self.current_weight * space.width();
                let rect = if self.reverse {
                    cursor -= length;
                    Rect::new(cursor, strip_top - thickness, cursor + length, strip_top)
                } else {
                    cursor += length;
                    Rect::new(cursor - length, strip_top - thickness, cursor, strip_top)
                }
                .with_orientation(orientation);
                debug_assert!(space.comprises(&rect), "members must stay inside the strip");
                rects[node.idx()] = rect;
            }
        } else {
            let thickness = self.current_weight / self.available_weight * space.width();
            let strip_left = if self.stack_reversed {
                space.right() - thickness
            } else {
                space.left()
            };
            let mut cursor = if self.reverse { space.bottom() } else { space.top() };
            for &(node, weight) in &self.members {
                let length = weight / self.current_weight * space.height();
                let rect = if self.reverse {
                    cursor += length;
                    Rect::new(strip_left, cursor - length, strip_left + thickness, cursor)
                } else {
                    cursor -= length;
                    Rect::new(strip_left, cursor, strip_left + thickness, cursor + length)
                }
                .with_orientation(orientation);
                debug_assert!(space.comprises(&rect), "members must stay inside the strip");
                rects[node.idx()] = rect;
            }
        }
    }

    fn member_orientation(&self) -> Orientation {
        let mut orientation = Orientation::empty();
        if !self.horizontal {
            orientation |= Orientation::VERTICAL;
        }
        if self.reverse {
            orientation |= Orientation::REVERSED;
        }
        if self.stack_reversed {
            orientation |= Orientation::STACK_REVERSED;
        }
        orientation
    }

    /// The space left over once the current row's strip is consumed.
    pub fn remaining_space(&self) -> Rect {
        if self.disabled() || self.current_weight <= EPS {
            return self.available_space;
        }
        let fraction = (self.current_weight / self.available_weight).min(1.0);
        let space = &self.available_space;
        if self.horizontal {
            let thickness = fraction * space.height();
            if self.stack_reversed {
                Rect::new(space.left(), space.bottom() + thickness, space.right(), space.top())
            } else {
                Rect::new(space.left(), space.bottom(), space.right(), space.top() - thickness)
            }
        } else {
            let thickness = fraction * space.width();
            if self.stack_reversed {
                Rect::new(space.left(), space.bottom(), space.right() - thickness, space.top())
            } else {
                Rect::new(space.left() + thickness, space.bottom(), space.right(), space.top())
            }
        }
        .with_orientation(space.orientation())
    }

    /// Finalize the current row and start a fresh one in the remaining space,
    /// oriented per `horizontal`.
    pub fn next(&mut self, horizontal: bool) {
        self.available_space = self.remaining_space();
        self.available_weight = (self.available_weight - self.current_weight).max(0.0);
        self.current_weight = 0.0;
        self.inserted = 0;
        self.members.clear();
        self.horizontal = horizontal;
    }
}

fn member_aspect(length: f64, thickness: f64) -> f64 {
    if length <= EPS || thickness <= EPS {
        return f64::INFINITY;
    }
    (length / thickness).max(thickness / length)
}

/// A [`Row`] with explicit fill and stacking directions, for snake layouts.
///
/// Advancing to the next row flips the fill direction, which is what makes the
/// sibling order read as one continuous path.
#[derive(Clone, Debug)]
pub struct DirectionalRow {
    row: Row,
}

impl DirectionalRow {
    /// Create a directed row; `reverse` flips the fill direction within a
    /// strip and `stack_reversed` flips which edge strips are consumed from.
    pub fn new(
        available_space: Rect,
        available_weight: f64,
        horizontal: bool,
        reverse: bool,
        stack_reversed: bool,
    ) -> Self {
        let mut row = Row::new(available_space, available_weight, horizontal);
        row.reverse = reverse;
        row.stack_reversed = stack_reversed;
        Self { row }
    }

    /// See [`Row::insert`].
    pub fn insert(&mut self, node: NodeIndex, weight: f64) {
        self.row.insert(node, weight);
    }

    /// See [`Row::increases_average_aspect_ratio`].
    pub fn increases_average_aspect_ratio(&self, weight: f64) -> bool {
        self.row.increases_average_aspect_ratio(weight)
    }

    /// See [`Row::layout_nodes`].
    pub fn layout_nodes(&self, rects: &mut [Rect]) {
        self.row.layout_nodes(rects);
    }

    /// See [`Row::remaining_space`].
    pub fn remaining_space(&self) -> Rect {
        self.row.remaining_space()
    }

    /// Advance to the next row, alternating the fill direction.
    pub fn next(&mut self, horizontal: bool) {
        self.row.next(horizontal);
        self.row.reverse = !self.row.reverse;
    }
}
