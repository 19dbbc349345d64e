// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only scene-node collaborator interface.

use kurbo::{Point, Rect, RoundedRectRadii, Vec2};

use crate::types::{ModifierSet, NodeId, NodeKind};

/// Read-only facts the occlusion engine needs about one scene node.
///
/// The engine depends only on this trait, never on a concrete scene-graph
/// type. Implementations are expected to be cheap accessors over an
/// already-computed property snapshot; the engine calls them at most a few
/// times per node per frame and never mutates anything through them.
///
/// All geometry is in the node's local coordinate space. The pivot is
/// normalized (0..1 relative to the bounds size). Rotation values are
/// degrees, but the engine only ever compares them against zero.
pub trait SceneNode {
    /// Stable scene-node id.
    fn id(&self) -> NodeId;

    /// Node kind; only [`NodeKind::Canvas`] nodes can be culled.
    fn kind(&self) -> NodeKind;

    /// The set of property modifiers attached to this node.
    fn modifiers(&self) -> ModifierSet;

    /// Local bounds (origin and size before transform).
    fn bounds(&self) -> Rect;

    /// Local translation.
    fn translate(&self) -> Vec2;

    /// Normalized scale/translate pivot.
    fn pivot(&self) -> Point;

    /// Local per-axis scale.
    fn scale(&self) -> Vec2;

    /// Local uniform alpha in `0..=1`.
    fn alpha(&self) -> f64;

    /// Skew factors (x, y).
    fn skew(&self) -> Vec2;

    /// Perspective factors (x, y).
    fn perspective(&self) -> Vec2;

    /// Rotation around z, in degrees.
    fn rotation(&self) -> f64;

    /// Rotation around x, in degrees.
    fn rotation_x(&self) -> f64;

    /// Rotation around y, in degrees.
    fn rotation_y(&self) -> f64;

    /// Whether children are clipped to the bounds.
    fn clips_to_bounds(&self) -> bool;

    /// Whether children are clipped to the frame.
    fn clips_to_frame(&self) -> bool;

    /// Whether children are clipped to the clip rounded-rect.
    fn clips_to_rrect(&self) -> bool;

    /// Rectangle part of the clip rounded-rect, in local coordinates.
    fn clip_rrect(&self) -> Rect;

    /// Whether an arbitrary clip path is active. Paths make the draw region
    /// non-rectangular, so they exclude the subtree.
    fn has_clip_path(&self) -> bool;

    /// Per-corner radius of the bounds.
    fn corner_radius(&self) -> RoundedRectRadii;

    /// Whether the node is a pure container with no drawing content.
    fn is_pure_container(&self) -> bool;

    /// Whether draw-command modifiers are attached.
    fn has_draw_commands(&self) -> bool;

    /// Whether the node needs a filter pass.
    fn needs_filter(&self) -> bool;

    /// Whether the background color is fully opaque.
    fn background_is_solid(&self) -> bool;

    /// Whether a background brightness adjustment is active.
    fn background_brightness_active(&self) -> bool;

    /// Whether the node is grouped for offscreen/animation rendering.
    fn is_render_group(&self) -> bool;

    /// Whether the node exports its texture out of this tree.
    fn is_texture_export(&self) -> bool;

    /// Whether a shared transition parameter is attached.
    fn has_shared_transition(&self) -> bool;
}
