// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The y-up layout rectangle and its margin solvers.

use bitflags::bitflags;

use crate::util::{sqrt, EPS};

bitflags! {
    /// Direction tags stamped onto rectangles by the row machinery.
    ///
    /// These record the context a rectangle was produced in, so a later pass
    /// over that rectangle's own children can continue in the same direction.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Orientation: u8 {
        /// The producing row ran vertically (members stacked along y).
        const VERTICAL = 1;
        /// Members filled opposite the usual reading direction.
        const REVERSED = 1 << 1;
        /// Rows consumed space from the opposite edge.
        const STACK_REVERSED = 1 << 2;
    }
}

/// An axis-aligned rectangle in a y-up coordinate system.
///
/// `top >= bottom` and `right >= left` always hold; the constructor clamps
/// inverted inputs to zero extent. Every derived-rectangle operation preserves
/// the [`Orientation`] tag.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub(crate) left: f64,
    pub(crate) bottom: f64,
    pub(crate) right: f64,
    pub(crate) top: f64,
    pub(crate) orientation: Orientation,
}

impl Rect {
    /// Create a rectangle from its edges, clamping inverted extents to zero.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right: right.max(left),
            top: top.max(bottom),
            orientation: Orientation::empty(),
        }
    }

    pub(crate) fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Bottom edge (y-up: the smaller y).
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Top edge (y-up: the larger y).
    pub fn top(&self) -> f64 {
        self.top
    }

    /// The direction tag stamped by the row that produced this rectangle.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Area; zero for degenerate rectangles.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether the rectangle is taller than wide.
    pub fn is_vertical(&self) -> bool {
        self.height() > self.width()
    }

    /// Ratio of the longer side to the shorter, always `>= 1`.
    ///
    /// Degenerate rectangles report `f64::INFINITY`.
    pub fn aspect_ratio(&self) -> f64 {
        let (width, height) = (self.width(), self.height());
        if width <= EPS || height <= EPS {
            return f64::INFINITY;
        }
        (width / height).max(height / width)
    }

    /// Inset all four edges by `margin`.
    ///
    /// If the inset would invert the rectangle, the result collapses to a
    /// zero-extent rectangle at the bottom-left corner. `padded(0.0)` is the
    /// identity.
    pub fn padded(&self, margin: f64) -> Self {
        if margin <= 0.0 {
            return *self;
        }
        if 2.0 * margin >= self.width() || 2.0 * margin >= self.height() {
            return Self::new(self.left, self.bottom, self.left, self.bottom)
                .with_orientation(self.orientation);
        }
        Self::new(
            self.left + margin,
            self.bottom + margin,
            self.right - margin,
            self.top - margin,
        )
        .with_orientation(self.orientation)
    }

    /// The uniform margin that removes exactly the `relative_area` fraction of
    /// this rectangle's area when applied with [`Rect::padded`].
    ///
    /// Solves `(w - 2d)(h - 2d) = (1 - relative_area) * w * h` for the smaller
    /// non-negative root, so `equalized_relative_margin(0.0)` is `0.0` and the
    /// inset never inverts the rectangle.
    pub fn equalized_relative_margin(&self, relative_area: f64) -> f64 {
        debug_assert!(
            (0.0..=1.0).contains(&relative_area),
            "relative area must be a fraction"
        );
        let (width, height) = (self.width(), self.height());
        let half_perimeter = width + height;
        let discriminant = half_perimeter * half_perimeter - 4.0 * relative_area * width * height;
        // Non-negative whenever relative_area <= 1; clamp shields rounding.
        (half_perimeter - sqrt(discriminant.max(0.0))) / 4.0
    }

    /// An absolute margin, degraded to an area-preserving one when it would
    /// consume too much of the rectangle.
    ///
    /// Returns `absolute` unchanged when it fits (it stays under half the
    /// short side and leaves at least the `min_relative_area` fraction of the
    /// area). Otherwise falls back to the equalized margin that removes the
    /// `1 - min_relative_area` fraction (but never less than the
    /// `relative_margin` fraction), capped at `absolute`.
    pub fn equalized_margin(
        &self,
        absolute: f64,
        min_relative_area: f64,
        relative_margin: f64,
    ) -> f64 {
        let short = self.width().min(self.height());
        let area = self.area();
        if absolute <= 0.5 * short && area > EPS {
            let remaining = self.padded(absolute).area() / area;
            if remaining >= min_relative_area {
                return absolute;
            }
        }
        self.equalized_relative_margin((1.0 - min_relative_area).max(relative_margin))
            .min(absolute)
    }

    /// Inset by `margin`, scaled down if the inset would leave less than the
    /// `min_relative_area` fraction of the area.
    pub fn padded_with_min_area(&self, margin: f64, min_relative_area: f64) -> Self {
        let short = self.width().min(self.height());
        let area = self.area();
        if area > EPS && short > 4.0 * margin {
            let remaining = self.padded(margin).area() / area;
            if remaining >= min_relative_area {
                return self.padded(margin);
            }
        }
        let capped = margin
            .min(short / 4.0)
            .min(self.equalized_relative_margin(1.0 - min_relative_area));
        self.padded(capped)
    }

    /// Remap this rectangle from the `source` space into the `target` space.
    ///
    /// The affine map sending `source` onto `target` is applied to `self`.
    /// Degenerate source axes map to the corresponding target edge.
    pub fn map(&self, source: &Self, target: &Self) -> Self {
        let scale_x = if source.width() > EPS {
            target.width() / source.width()
        } else {
            0.0
        };
        let scale_y = if source.height() > EPS {
            target.height() / source.height()
        } else {
            0.0
        };
        Self::new(
            target.left + (self.left - source.left) * scale_x,
            target.bottom + (self.bottom - source.bottom) * scale_y,
            target.left + (self.right - source.left) * scale_x,
            target.bottom + (self.top - source.bottom) * scale_y,
        )
        .with_orientation(self.orientation)
    }

    /// Whether `other` lies entirely inside this rectangle, with tolerance.
    pub fn comprises(&self, other: &Self) -> bool {
        other.left >= self.left - EPS
            && other.right <= self.right + EPS
            && other.bottom >= self.bottom - EPS
            && other.top <= self.top + EPS
    }

    /// Whether the two rectangles overlap by more than the tolerance.
    ///
    /// Rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right - EPS
            && other.left < self.right - EPS
            && self.bottom < other.top - EPS
            && other.bottom < self.top - EPS
    }

    /// Translate by `(dx, dy)`.
    pub fn apply_offset(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.right += dx;
        self.bottom += dy;
        self.top += dy;
    }

    /// Grow to cover `other` as well.
    pub fn enclose(&mut self, other: &Self) {
        self.left = self.left.min(other.left);
        self.bottom = self.bottom.min(other.bottom);
        self.right = self.right.max(other.right);
        self.top = self.top.max(other.top);
    }

    /// Translate so the center lands on `(x, y)`.
    pub fn center_around(&mut self, x: f64, y: f64) {
        let dx = x - (self.left + self.right) * 0.5;
        let dy = y - (self.bottom + self.top) * 0.5;
        self.apply_offset(dx, dy);
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.left, rect.bottom, rect.right, rect.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_clamps_inverted_extents() {
        let rect = Rect::new(2.0, 3.0, 1.0, 1.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
        assert_eq!(rect.area(), 0.0);
    }

    #[test]
    fn zero_margins_are_identities() {
        let rect = Rect::new(1.0, 2.0, 5.0, 4.0);
        assert_eq!(rect.padded(0.0), rect);
        assert_eq!(rect.equalized_relative_margin(0.0), 0.0);
    }

    #[test]
    fn padded_collapses_instead_of_inverting() {
        let rect = Rect::new(0.0, 0.0, 4.0, 1.0);
        let collapsed = rect.padded(0.6);
        assert_eq!(collapsed.area(), 0.0);
        assert_eq!(collapsed.left(), 0.0);
        assert_eq!(collapsed.bottom(), 0.0);
    }

    #[test]
    fn equalized_relative_margin_removes_the_requested_area() {
        let rect = Rect::new(0.0, 0.0, 4.0, 2.0);
        for fraction in [0.1, 0.25, 0.5, 0.9] {
            let margin = rect.equalized_relative_margin(fraction);
            let remaining = rect.padded(margin).area() / rect.area();
            assert!((remaining - (1.0 - fraction)).abs() < 1e-12);
        }
    }

    #[test]
    fn equalized_margin_falls_back_on_thin_rectangles() {
        // The absolute margin of 2 does not fit a 4x1 rectangle; the fallback
        // is the margin that removes half the area: (5 - sqrt(17)) / 4.
        let rect = Rect::new(0.0, 0.0, 4.0, 1.0);
        let margin = rect.equalized_margin(2.0, 0.5, 0.1);
        let expected = (5.0 - crate::util::sqrt(17.0)) / 4.0;
        assert!((margin - expected).abs() < 1e-12);
        // A comfortable absolute margin passes through untouched.
        let margin = rect.equalized_margin(0.1, 0.5, 0.1);
        assert_eq!(margin, 0.1);
    }

    #[test]
    fn padded_with_min_area_preserves_the_floor() {
        let rect = Rect::new(0.0, 0.0, 2.0, 1.0);
        let inset = rect.padded_with_min_area(0.9, 0.25);
        assert!(inset.area() / rect.area() >= 0.25 - 1e-12);
        assert!(rect.comprises(&inset));
    }

    #[test]
    fn map_round_trips() {
        let source = Rect::new(0.0, 0.0, 2.0, 2.0);
        let target = Rect::new(10.0, 20.0, 14.0, 22.0);
        let rect = Rect::new(0.5, 0.5, 1.5, 1.0);
        let there = rect.map(&source, &target);
        assert!(target.comprises(&there));
        let back = there.map(&target, &source);
        assert!((back.left() - rect.left()).abs() < 1e-12);
        assert!((back.top() - rect.top()).abs() < 1e-12);
    }

    #[test]
    fn containment_and_intersection() {
        let outer = Rect::new(0.0, 0.0, 4.0, 4.0);
        let inner = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(outer.comprises(&inner));
        assert!(!inner.comprises(&outer));
        assert!(outer.intersects(&inner));

        // Shared edges do not count as intersection.
        let neighbor = Rect::new(4.0, 0.0, 8.0, 4.0);
        assert!(!outer.intersects(&neighbor));
        assert!(!outer.comprises(&neighbor));
    }

    #[test]
    fn mutators() {
        let mut rect = Rect::new(0.0, 0.0, 2.0, 1.0);
        rect.apply_offset(1.0, 2.0);
        assert_eq!(rect, Rect::new(1.0, 2.0, 3.0, 3.0));

        rect.enclose(&Rect::new(0.0, 0.0, 1.5, 4.0));
        assert_eq!(rect, Rect::new(0.0, 0.0, 3.0, 4.0));

        rect.center_around(0.5, 0.5);
        assert!((rect.left() + rect.right() - 1.0).abs() < 1e-12);
        assert!((rect.bottom() + rect.top() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kurbo_conversion_keeps_edges() {
        let rect = Rect::new(1.0, 2.0, 3.0, 5.0);
        let converted: kurbo::Rect = rect.into();
        assert_eq!(converted.x0, 1.0);
        assert_eq!(converted.y0, 2.0);
        assert_eq!(converted.x1, 3.0);
        assert_eq!(converted.y1, 5.0);
    }
}
