// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node property collection: classification and the local draw rect.

use kurbo::{Rect, Vec2};

use crate::node::OcclusionNode;
use crate::source::SceneNode;
use crate::tree::OcclusionTree;
use crate::types::{
    IgnoreReason, NotOpaqueReason, OCCLUDER_MODIFIERS, OPAQUE_MODIFIERS, Opacity,
};
use crate::util::rect_is_empty;

impl OcclusionTree {
    /// Pull one scene node's current properties into its shadow node.
    ///
    /// Classifies the node as opaque, occluder-only, or subtree-ignored and
    /// computes its local draw rectangle. The classification is re-derived
    /// from scratch on every call, so a node that loses a disqualifying
    /// property rejoins occlusion reasoning on the next frame.
    ///
    /// Called by the integrating scene traversal top-down, parents before
    /// children: the root link is inherited from the parent's shadow node.
    pub fn collect_node_properties(&mut self, source: &impl SceneNode) {
        let id = source.id();
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let parent = node.parent;
        let parent_root = parent.and_then(|p| self.nodes.get(&p)).and_then(|p| p.root);
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };

        if parent.is_none() {
            node.ignored = Some(IgnoreReason::NoParent);
            return;
        }
        if source.is_render_group() {
            node.ignored = Some(IgnoreReason::RenderGroup);
            return;
        }
        if source.is_texture_export() {
            node.ignored = Some(IgnoreReason::TextureExport);
            return;
        }
        if source.has_shared_transition() {
            node.ignored = Some(IgnoreReason::SharedTransition);
            return;
        }

        let modifiers = source.modifiers();
        let opaque_candidate = OPAQUE_MODIFIERS.contains(modifiers);
        node.opacity = classify_opacity(opaque_candidate, source);
        if !(OPAQUE_MODIFIERS | OCCLUDER_MODIFIERS).contains(modifiers) {
            node.ignored = Some(IgnoreReason::UnknownModifier);
            return;
        }

        // Rotation, projection, skew, and clip paths make the draw region
        // non-rectangular; the rectangle model cannot reason about them.
        let skew = source.skew();
        let persp = source.perspective();
        if skew.x != 0.0
            || skew.y != 0.0
            || persp.x != 0.0
            || persp.y != 0.0
            || source.rotation() != 0.0
            || source.rotation_x() != 0.0
            || source.rotation_y() != 0.0
            || source.has_clip_path()
        {
            node.ignored = Some(IgnoreReason::NonRectTransform);
            return;
        }

        let bounds = source.bounds();
        let translate = source.translate();
        let pivot = source.pivot();
        let scale = source.scale();
        if !bounds.is_finite()
            || !translate.is_finite()
            || !pivot.is_finite()
            || !scale.is_finite()
            || !source.clip_rrect().is_finite()
        {
            node.ignored = Some(IgnoreReason::NonFiniteGeometry);
            return;
        }

        node.ignored = None;
        node.root = parent_root;
        node.local_scale = scale;
        node.local_alpha = source.alpha();
        node.needs_clip =
            source.clips_to_bounds() || source.clips_to_frame() || source.clips_to_rrect();
        node.corner_radius = source.corner_radius();
        calculate_draw_rect(node, source);
    }
}

/// First disqualifier wins, in a fixed order, so traces stay comparable
/// across frames.
fn classify_opacity(opaque_candidate: bool, source: &impl SceneNode) -> Opacity {
    if !opaque_candidate {
        Opacity::NotOpaque(NotOpaqueReason::Modifier)
    } else if source.is_pure_container() {
        Opacity::NotOpaque(NotOpaqueReason::PureContainer)
    } else if source.has_draw_commands() {
        Opacity::NotOpaque(NotOpaqueReason::DrawCommands)
    } else if source.alpha() != 1.0 {
        Opacity::NotOpaque(NotOpaqueReason::Alpha)
    } else if source.needs_filter() {
        Opacity::NotOpaque(NotOpaqueReason::Filter)
    } else if !source.background_is_solid() || source.background_brightness_active() {
        Opacity::NotOpaque(NotOpaqueReason::TranslucentBackground)
    } else {
        Opacity::Opaque
    }
}

/// Compose bounds, pivot-relative scale, and translation into the local
/// draw rect, then intersect with the clip rounded-rect when clipping.
///
/// The node's own scale is baked in here; bounds propagation only applies
/// the ancestor product.
fn calculate_draw_rect(node: &mut OcclusionNode, source: &impl SceneNode) {
    let bounds = source.bounds();
    let translate = source.translate();
    let pivot = source.pivot();
    let (w, h) = (bounds.width(), bounds.height());

    let pivot_offset = Vec2::new(pivot.x * w, pivot.y * h);
    let mut pos = Vec2::new(bounds.x0, bounds.y0) + pivot_offset;
    pos -= Vec2::new(
        pivot_offset.x * node.local_scale.x,
        pivot_offset.y * node.local_scale.y,
    );
    pos += translate;
    node.local_position = pos;

    let mut draw = Rect::new(
        pos.x,
        pos.y,
        pos.x + w * node.local_scale.x,
        pos.y + h * node.local_scale.y,
    );
    let clip = source.clip_rrect();
    if node.needs_clip && !rect_is_empty(clip) {
        draw = draw.intersect(clip + translate);
    }
    node.draw_rect = draw;
}
