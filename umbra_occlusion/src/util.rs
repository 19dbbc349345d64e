// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float-to-integer rounding at the `kurbo` / `Aabb16` boundary.

use kurbo::{Rect, RoundedRectRadii};
use umbra_geom::{Aabb16, clamp16};

#[cfg(feature = "std")]
#[inline]
fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(feature = "std")]
#[inline]
fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Whether a rect has no area, treating NaN extents as empty.
#[inline]
pub(crate) fn rect_is_empty(r: Rect) -> bool {
    !(r.x1 > r.x0 && r.y1 > r.y0)
}

/// Outward-rounded integer bounds of a float rect: floor the left/top edge,
/// ceil the right/bottom edge. Degenerate input yields [`Aabb16::EMPTY`].
pub(crate) fn outer_bounds(r: Rect) -> Aabb16 {
    if rect_is_empty(r) {
        return Aabb16::EMPTY;
    }
    let out = Aabb16::new(
        clamp16(floor(r.x0)),
        clamp16(floor(r.y0)),
        clamp16(ceil(r.x1)),
        clamp16(ceil(r.y1)),
    );
    if out.is_empty() { Aabb16::EMPTY } else { out }
}

/// Inward-rounded integer bounds of a float rect, shrunk vertically for
/// corner radii: ceil the left/top edge, floor the right/bottom edge, then
/// pull the top down by the larger top radius and the bottom up by the
/// larger bottom radius.
///
/// Only the vertical axis is shrunk; the radius vector's convention makes
/// the horizontal extremes of a rounded rect lie on the straight edges.
pub(crate) fn inner_bounds(r: Rect, radii: RoundedRectRadii) -> Aabb16 {
    if rect_is_empty(r) {
        return Aabb16::EMPTY;
    }
    let top_shrink = radii.top_left.max(radii.top_right);
    let bottom_shrink = radii.bottom_left.max(radii.bottom_right);
    let out = Aabb16::new(
        clamp16(ceil(r.x0)),
        clamp16(ceil(r.y0 + top_shrink)),
        clamp16(floor(r.x1)),
        clamp16(floor(r.y1 - bottom_shrink)),
    );
    if out.is_empty() { Aabb16::EMPTY } else { out }
}
