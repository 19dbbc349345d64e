// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test double for the scene-node collaborator.

use kurbo::{Point, Rect, RoundedRectRadii, Vec2};

use crate::source::SceneNode;
use crate::types::{ModifierSet, NodeId, NodeKind};

/// A scene node made of plain fields.
///
/// Defaults describe the most cullable node there is: a solid, fully opaque
/// 100x100 canvas with no transforms or clips. Tests flip individual fields
/// to exercise one classification rule at a time.
pub(crate) struct FakeSceneNode {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) modifiers: ModifierSet,
    pub(crate) bounds: Rect,
    pub(crate) translate: Vec2,
    pub(crate) pivot: Point,
    pub(crate) scale: Vec2,
    pub(crate) alpha: f64,
    pub(crate) skew: Vec2,
    pub(crate) perspective: Vec2,
    pub(crate) rotation: f64,
    pub(crate) rotation_x: f64,
    pub(crate) rotation_y: f64,
    pub(crate) clips_to_bounds: bool,
    pub(crate) clips_to_frame: bool,
    pub(crate) clips_to_rrect: bool,
    pub(crate) clip_rrect: Rect,
    pub(crate) has_clip_path: bool,
    pub(crate) corner_radius: RoundedRectRadii,
    pub(crate) is_pure_container: bool,
    pub(crate) has_draw_commands: bool,
    pub(crate) needs_filter: bool,
    pub(crate) background_is_solid: bool,
    pub(crate) background_brightness_active: bool,
    pub(crate) is_render_group: bool,
    pub(crate) is_texture_export: bool,
    pub(crate) has_shared_transition: bool,
}

impl FakeSceneNode {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id: NodeId(id),
            kind: NodeKind::Canvas,
            modifiers: ModifierSet::BOUNDS,
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            translate: Vec2::ZERO,
            pivot: Point::ZERO,
            scale: Vec2::new(1.0, 1.0),
            alpha: 1.0,
            skew: Vec2::ZERO,
            perspective: Vec2::ZERO,
            rotation: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            clips_to_bounds: false,
            clips_to_frame: false,
            clips_to_rrect: false,
            clip_rrect: Rect::ZERO,
            has_clip_path: false,
            corner_radius: RoundedRectRadii::from_single_radius(0.0),
            is_pure_container: false,
            has_draw_commands: false,
            needs_filter: false,
            background_is_solid: true,
            background_brightness_active: false,
            is_render_group: false,
            is_texture_export: false,
            has_shared_transition: false,
        }
    }

    /// Same defaults at the given bounds.
    pub(crate) fn with_bounds(id: u64, bounds: Rect) -> Self {
        let mut fake = Self::new(id);
        fake.bounds = bounds;
        fake
    }
}

impl SceneNode for FakeSceneNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn translate(&self) -> Vec2 {
        self.translate
    }

    fn pivot(&self) -> Point {
        self.pivot
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn skew(&self) -> Vec2 {
        self.skew
    }

    fn perspective(&self) -> Vec2 {
        self.perspective
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn rotation_x(&self) -> f64 {
        self.rotation_x
    }

    fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    fn clips_to_bounds(&self) -> bool {
        self.clips_to_bounds
    }

    fn clips_to_frame(&self) -> bool {
        self.clips_to_frame
    }

    fn clips_to_rrect(&self) -> bool {
        self.clips_to_rrect
    }

    fn clip_rrect(&self) -> Rect {
        self.clip_rrect
    }

    fn has_clip_path(&self) -> bool {
        self.has_clip_path
    }

    fn corner_radius(&self) -> RoundedRectRadii {
        self.corner_radius
    }

    fn is_pure_container(&self) -> bool {
        self.is_pure_container
    }

    fn has_draw_commands(&self) -> bool {
        self.has_draw_commands
    }

    fn needs_filter(&self) -> bool {
        self.needs_filter
    }

    fn background_is_solid(&self) -> bool {
        self.background_is_solid
    }

    fn background_brightness_active(&self) -> bool {
        self.background_brightness_active
    }

    fn is_render_group(&self) -> bool {
        self.is_render_group
    }

    fn is_texture_export(&self) -> bool {
        self.is_texture_export
    }

    fn has_shared_transition(&self) -> bool {
        self.has_shared_transition
    }
}
