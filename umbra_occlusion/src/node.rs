// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shadow node mirroring one scene node.

use kurbo::{Rect, RoundedRectRadii, Vec2};
use umbra_geom::Aabb16;

use crate::types::{IgnoreReason, NodeId, NodeKind, Opacity};

/// One shadow node in the occlusion tree.
///
/// Owned by the tree's registry and addressed by [`NodeId`]; parent, sibling
/// and child relationships are plain id fields rather than pointers, so the
/// back-references cannot form ownership cycles. Geometry fields are only
/// meaningful after the parent's bounds have been propagated in the current
/// frame (top-down dependency).
#[derive(Clone, Debug)]
pub struct OcclusionNode {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,

    pub(crate) parent: Option<NodeId>,
    pub(crate) left_sibling: Option<NodeId>,
    pub(crate) right_sibling: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    /// Per-display root, used for the out-of-root test.
    pub(crate) root: Option<NodeId>,

    pub(crate) opacity: Opacity,
    pub(crate) ignored: Option<IgnoreReason>,
    /// Accumulated alpha dropped below one somewhere on the ancestor chain.
    pub(crate) alpha_needed: bool,
    pub(crate) needs_clip: bool,

    pub(crate) local_scale: Vec2,
    pub(crate) local_alpha: f64,
    pub(crate) local_position: Vec2,
    pub(crate) accumulated_scale: Vec2,
    pub(crate) accumulated_alpha: f64,

    /// Local draw rectangle before absolute placement.
    pub(crate) draw_rect: Rect,
    /// Absolute top-left in root coordinates.
    pub(crate) abs_position: Vec2,
    pub(crate) corner_radius: RoundedRectRadii,

    /// Conservative outward-rounded absolute bounds.
    pub(crate) outer_rect: Aabb16,
    /// Conservative inward-rounded, corner-radius-aware absolute bounds.
    pub(crate) inner_rect: Aabb16,
    /// Inherited ancestor clip (outer-rounded).
    pub(crate) clip_outer: Aabb16,
    /// Inherited ancestor clip (inner-rounded).
    pub(crate) clip_inner: Aabb16,

    pub(crate) out_of_root: bool,
    /// The opaque node that occludes this one, when culled by containment.
    pub(crate) occluded_by: Option<NodeId>,
    /// Liveness flag; consumed by detection, re-established by the next
    /// frame's refresh. Nodes left false are reported off-tree.
    pub(crate) valid_in_frame: bool,
    /// Diagnostic: some child extends beyond this node's rect.
    pub(crate) has_children_out_of_rect: bool,
}

impl OcclusionNode {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            left_sibling: None,
            right_sibling: None,
            first_child: None,
            last_child: None,
            root: None,
            opacity: Opacity::default(),
            ignored: None,
            alpha_needed: false,
            needs_clip: false,
            local_scale: Vec2::new(1.0, 1.0),
            local_alpha: 1.0,
            local_position: Vec2::ZERO,
            accumulated_scale: Vec2::new(1.0, 1.0),
            accumulated_alpha: 1.0,
            draw_rect: Rect::ZERO,
            abs_position: Vec2::ZERO,
            corner_radius: RoundedRectRadii::from_single_radius(0.0),
            outer_rect: Aabb16::EMPTY,
            inner_rect: Aabb16::EMPTY,
            clip_outer: Aabb16::EMPTY,
            clip_inner: Aabb16::EMPTY,
            out_of_root: false,
            occluded_by: None,
            valid_in_frame: false,
            has_children_out_of_rect: false,
        }
    }

    /// Stable scene-node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Mirrored scene-node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent shadow node, `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Current opacity classification.
    pub fn opacity(&self) -> Opacity {
        self.opacity
    }

    /// Whether every pixel of the inner rect is known painted.
    pub fn is_opaque(&self) -> bool {
        self.opacity.is_opaque()
    }

    /// Why the subtree is excluded from occlusion reasoning, if it is.
    pub fn ignore_reason(&self) -> Option<IgnoreReason> {
        self.ignored
    }

    /// Whether this subtree is excluded from occlusion reasoning.
    pub fn is_subtree_ignored(&self) -> bool {
        self.ignored.is_some()
    }

    /// Whether this node clips its children.
    pub fn needs_clip(&self) -> bool {
        self.needs_clip
    }

    /// Outward-rounded absolute bounds.
    pub fn outer_rect(&self) -> Aabb16 {
        self.outer_rect
    }

    /// Inward-rounded, corner-radius-shrunk absolute bounds.
    pub fn inner_rect(&self) -> Aabb16 {
        self.inner_rect
    }

    /// Clip rect propagated to children (outer rounding).
    pub fn clip_outer(&self) -> Aabb16 {
        self.clip_outer
    }

    /// Whether the outer rect cannot intersect the root clip.
    pub fn is_out_of_root(&self) -> bool {
        self.out_of_root
    }

    /// The opaque node recorded as occluding this one in the last
    /// detection pass, if any.
    pub fn occluded_by(&self) -> Option<NodeId> {
        self.occluded_by
    }

    /// Whether the node was refreshed since the last detection pass.
    pub fn is_valid_in_current_frame(&self) -> bool {
        self.valid_in_frame
    }

    /// Effective alpha after ancestor accumulation.
    pub fn effective_alpha(&self) -> f64 {
        self.local_alpha * self.accumulated_alpha
    }
}
