// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The clamped integer AABB and its conversion policy.

/// Saturate a float coordinate into the `i16` range.
///
/// Infinities map to the nearest representable extreme and `NaN` maps to
/// zero, so callers never observe wrap-around from oversized or invalid
/// geometry.
#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the saturating cast is the numeric policy"
)]
pub fn clamp16(value: f64) -> i16 {
    // Float `as` casts saturate.
    value as i16
}

/// Axis-aligned bounding box with `i16` coordinates.
///
/// Stored as min/max corners. A box is empty when either axis is
/// degenerate (`max <= min`); empty boxes never contain and are never
/// contained.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aabb16 {
    /// Minimum x (left).
    pub min_x: i16,
    /// Minimum y (top).
    pub min_y: i16,
    /// Maximum x (right).
    pub max_x: i16,
    /// Maximum y (bottom).
    pub max_y: i16,
}

impl Aabb16 {
    /// The canonical empty box.
    pub const EMPTY: Self = Self {
        min_x: 0,
        min_y: 0,
        max_x: 0,
        max_y: 0,
    };

    /// Create a box from min/max corners.
    #[inline]
    pub const fn new(min_x: i16, min_y: i16, max_x: i16, max_y: i16) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box from origin and size, saturating on overflow.
    #[inline]
    pub const fn from_ltwh(left: i16, top: i16, width: i16, height: i16) -> Self {
        Self {
            min_x: left,
            min_y: top,
            max_x: left.saturating_add(width),
            max_y: top.saturating_add(height),
        }
    }

    /// Whether the box has no area. Inverted boxes count as empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Width, zero for empty boxes. Widened to `i32` because a box spanning
    /// the full coordinate range exceeds `i16`.
    #[inline]
    pub const fn width(self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_x as i32 - self.min_x as i32
        }
    }

    /// Height, zero for empty boxes. Widened like [`Self::width`].
    #[inline]
    pub const fn height(self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_y as i32 - self.min_y as i32
        }
    }

    /// Area in square device pixels. Widened to `i64`: the maximum-size
    /// box has an area of `65535 * 65535`, which does not fit in `i32`.
    #[inline]
    pub const fn area(self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// The intersection of two boxes, normalized to [`Self::EMPTY`] when
    /// they do not overlap.
    #[inline]
    pub fn intersect(self, other: Self) -> Self {
        let r = Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        if r.is_empty() { Self::EMPTY } else { r }
    }

    /// Whether `self` lies entirely inside `other`.
    ///
    /// An empty box is never inside anything and nothing is inside an
    /// empty box; this is what makes degenerate rectangles inert in
    /// occlusion reasoning.
    #[inline]
    pub fn is_inside_of(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x >= other.min_x
            && self.min_y >= other.min_y
            && self.max_x <= other.max_x
            && self.max_y <= other.max_y
    }
}
