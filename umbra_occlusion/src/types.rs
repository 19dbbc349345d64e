// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: node identifiers, kinds, modifier sets, and the tagged
//! opacity/ignore classification state.

use core::fmt;

/// Identifier of a scene node, shared between the scene graph and its
/// shadow occlusion node.
///
/// Unlike a generational arena handle, this is the scene graph's own stable
/// id; the occlusion tree keys its registry with it and reports culled and
/// off-tree nodes in terms of it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create an id from the raw scene-node id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of scene node a shadow node mirrors.
///
/// Only [`NodeKind::Canvas`] nodes are eligible to be culled; every kind can
/// still contribute opaque coverage.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// Per-display root of the shadow tree.
    Root,
    /// Plain drawing node; the only cullable kind.
    Canvas,
    /// Surface (window) node.
    Surface,
    /// Effect container.
    Effect,
    /// Anything else the scene graph grows.
    Other,
}

bitflags::bitflags! {
    /// Property-modifier categories attached to a scene node.
    ///
    /// These mirror the scene graph's modifier taxonomy at the granularity
    /// the occlusion model cares about. Membership in
    /// [`OPAQUE_MODIFIERS`] or [`OCCLUDER_MODIFIERS`] drives
    /// classification; any bit outside both sets forces the subtree out of
    /// occlusion reasoning entirely.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierSet: u64 {
        /// Bounds geometry.
        const BOUNDS = 1 << 0;
        /// Frame geometry.
        const FRAME = 1 << 1;
        /// Z position within the parent.
        const POSITION_Z = 1 << 2;
        /// Scale/translate pivot.
        const PIVOT = 1 << 3;
        /// Uniform or per-axis scale.
        const SCALE = 1 << 4;
        /// Translation.
        const TRANSLATE = 1 << 5;
        /// Per-corner radius.
        const CORNER_RADIUS = 1 << 6;
        /// Foreground color fill.
        const FOREGROUND_COLOR = 1 << 7;
        /// Background color fill.
        const BACKGROUND_COLOR = 1 << 8;
        /// Rounded-rect clip.
        const CLIP_RRECT = 1 << 9;
        /// Arbitrary clip path.
        const CLIP_BOUNDS = 1 << 10;
        /// Clip children to bounds.
        const CLIP_TO_BOUNDS = 1 << 11;
        /// Clip children to frame.
        const CLIP_TO_FRAME = 1 << 12;
        /// Visibility toggle.
        const VISIBLE = 1 << 13;
        /// Uniform alpha.
        const ALPHA = 1 << 14;
        /// Border color.
        const BORDER_COLOR = 1 << 15;

        /// Background image.
        const BG_IMAGE = 1 << 16;
        /// Brightness adjustment.
        const BRIGHTNESS = 1 << 17;
        /// Border geometry (width/style/dash).
        const BORDER_WIDTH = 1 << 18;
        /// 3D camera distance.
        const CAMERA_DISTANCE = 1 << 19;
        /// Saturation filter.
        const SATURATE = 1 << 20;
        /// Background shader.
        const BACKGROUND_SHADER = 1 << 21;
        /// Background blur.
        const BACKGROUND_BLUR = 1 << 22;
        /// Foreground blur.
        const FOREGROUND_BLUR = 1 << 23;
        /// Rotation around z.
        const ROTATION = 1 << 24;
        /// Rotation around x.
        const ROTATION_X = 1 << 25;
        /// Rotation around y.
        const ROTATION_Y = 1 << 26;
        /// Content gravity within the frame.
        const FRAME_GRAVITY = 1 << 27;
        /// Grayscale filter.
        const GRAY_SCALE = 1 << 28;

        /// Shadow color (outside both classification sets).
        const SHADOW_COLOR = 1 << 29;
        /// Render-effect reference (outside both classification sets).
        const USE_EFFECT = 1 << 30;
    }
}

/// Modifiers that do not by themselves break opacity reasoning.
///
/// A node whose modifiers all fall in this set can still be opaque; anything
/// outside it makes the node a non-opaque occluder at best.
pub const OPAQUE_MODIFIERS: ModifierSet = ModifierSet::from_bits_retain(
    ModifierSet::BOUNDS.bits()
        | ModifierSet::FRAME.bits()
        | ModifierSet::POSITION_Z.bits()
        | ModifierSet::PIVOT.bits()
        | ModifierSet::SCALE.bits()
        | ModifierSet::TRANSLATE.bits()
        | ModifierSet::CORNER_RADIUS.bits()
        | ModifierSet::FOREGROUND_COLOR.bits()
        | ModifierSet::BACKGROUND_COLOR.bits()
        | ModifierSet::CLIP_RRECT.bits()
        | ModifierSet::CLIP_BOUNDS.bits()
        | ModifierSet::CLIP_TO_BOUNDS.bits()
        | ModifierSet::CLIP_TO_FRAME.bits()
        | ModifierSet::VISIBLE.bits()
        | ModifierSet::ALPHA.bits()
        | ModifierSet::BORDER_COLOR.bits(),
);

/// Modifiers that disqualify a node from being opaque but keep its subtree
/// in occlusion reasoning (the node can still be occluded by others).
///
/// A modifier outside both this set and [`OPAQUE_MODIFIERS`] means the
/// classification is open-world and the subtree is ignored for safety.
pub const OCCLUDER_MODIFIERS: ModifierSet = ModifierSet::from_bits_retain(
    ModifierSet::BG_IMAGE.bits()
        | ModifierSet::BRIGHTNESS.bits()
        | ModifierSet::BORDER_WIDTH.bits()
        | ModifierSet::CAMERA_DISTANCE.bits()
        | ModifierSet::SATURATE.bits()
        | ModifierSet::BACKGROUND_SHADER.bits()
        | ModifierSet::BACKGROUND_BLUR.bits()
        | ModifierSet::FOREGROUND_BLUR.bits()
        | ModifierSet::ROTATION.bits()
        | ModifierSet::ROTATION_X.bits()
        | ModifierSet::ROTATION_Y.bits()
        | ModifierSet::FRAME_GRAVITY.bits()
        | ModifierSet::GRAY_SCALE.bits(),
);

/// Whether a node is known to paint every pixel of its inner rect.
///
/// The non-opaque arm records the first reason that disqualified the node,
/// so a wrong culling decision can be traced without re-deriving the
/// classification.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Opacity {
    /// Every pixel of the inner rect is painted at full alpha.
    Opaque,
    /// The node cannot be relied on to cover what is behind it.
    NotOpaque(NotOpaqueReason),
}

impl Opacity {
    /// Whether this is the [`Opacity::Opaque`] arm.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        matches!(self, Self::Opaque)
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self::NotOpaque(NotOpaqueReason::Unevaluated)
    }
}

/// Why a node is not opaque.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NotOpaqueReason {
    /// Properties have not been collected this frame.
    Unevaluated,
    /// A modifier outside [`OPAQUE_MODIFIERS`] is attached.
    Modifier,
    /// Pure container; draws nothing, covers nothing.
    PureContainer,
    /// Has draw-command modifiers whose output is unknown.
    DrawCommands,
    /// Own alpha is below one.
    Alpha,
    /// Needs a filter pass.
    Filter,
    /// Background color is translucent or brightness-adjusted.
    TranslucentBackground,
    /// Accumulated ancestor alpha dropped below one.
    AccumulatedAlpha,
    /// The corner-radius-shrunk inner rect has no area.
    EmptyInner,
}

/// Why a subtree is excluded from occlusion reasoning.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IgnoreReason {
    /// No parent shadow node (root, or structurally disconnected).
    NoParent,
    /// The scene node is grouped for offscreen rendering or animation.
    RenderGroup,
    /// The scene node exports its texture out of this tree.
    TextureExport,
    /// A shared transition is in flight.
    SharedTransition,
    /// A modifier outside both classification sets is attached.
    UnknownModifier,
    /// Skew, perspective, rotation, or a clip path makes the draw region
    /// non-rectangular.
    NonRectTransform,
    /// Geometry inputs contained NaN or infinity.
    NonFiniteGeometry,
}
