// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The occlusion tree: registry, structural operations, and bounds
//! propagation.

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};
use smallvec::SmallVec;
use umbra_geom::Aabb16;

use crate::node::OcclusionNode;
use crate::types::{NodeId, NodeKind, NotOpaqueReason, Opacity};
use crate::util::{inner_bounds, outer_bounds};

/// The shadow tree for one display.
///
/// Owns every [`OcclusionNode`] in a registry keyed by the scene node's
/// stable id; structural links between nodes are id fields, so removal is
/// simply erasure from the registry. All operations are null-safe: an
/// absent id is a no-op, and structural mismatches are reported by return
/// value rather than panicking.
///
/// The tree is single-threaded by design. The integrating render thread
/// drives one frame as: structural sync, per-node property collection,
/// [`Self::update_subtree_props`], then [`Self::detect_occlusion`]
/// (see [`crate::OcclusionResult`]).
#[derive(Debug, Default)]
pub struct OcclusionTree {
    pub(crate) nodes: HashMap<NodeId, OcclusionNode>,
}

impl OcclusionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Ensure a shadow node exists for `id`.
    ///
    /// Inserting an id that is already present leaves the existing node
    /// (and its links) untouched.
    pub fn create(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes
            .entry(id)
            .or_insert_with(|| OcclusionNode::new(id, kind));
    }

    /// Number of registered shadow nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` has a shadow node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Borrow a shadow node.
    pub fn node(&self, id: NodeId) -> Option<&OcclusionNode> {
        self.nodes.get(&id)
    }

    /// Children of `id` in insertion order (bottom to top).
    pub fn children_of(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        let mut out = SmallVec::new();
        let mut child = self.nodes.get(&id).and_then(|n| n.first_child);
        while let Some(c) = child {
            out.push(c);
            child = self.nodes.get(&c).and_then(|n| n.right_sibling);
        }
        out
    }

    /// Mark `id` as the per-display root: it anchors the out-of-root test
    /// and starts the frame valid.
    pub fn mark_as_root(&mut self, id: NodeId) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.root = Some(id);
            n.valid_in_frame = true;
        }
    }

    /// Set the root's clip rect from the display's bounds. Children clip
    /// against this during bounds propagation, and the out-of-root test
    /// compares against it.
    pub fn set_root_clip(&mut self, id: NodeId, width: i16, height: i16) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.clip_outer = Aabb16::from_ltwh(0, 0, width, height);
            n.clip_inner = n.clip_outer;
        }
    }

    /// Append `child` as the new last (topmost) child of `parent`.
    ///
    /// If `child` is already attached somewhere, it is detached first; a
    /// node never appears in two child lists. Marks `child` valid in the
    /// current frame. O(1). Absent ids are a no-op.
    pub fn forward_order_insert(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child)
        {
            return;
        }
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            self.remove_child(old_parent, child);
        }
        let old_last = self.nodes.get(&parent).and_then(|n| n.last_child);
        if let Some(n) = self.nodes.get_mut(&child) {
            n.parent = Some(parent);
            n.left_sibling = old_last;
            n.right_sibling = None;
            n.valid_in_frame = true;
        }
        if let Some(last) = old_last
            && let Some(n) = self.nodes.get_mut(&last)
        {
            n.right_sibling = Some(child);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            if old_last.is_none() {
                p.first_child = Some(child);
            }
            p.last_child = Some(child);
        }
    }

    /// Unlink `child` from `parent`'s child list.
    ///
    /// Returns false without touching anything if `child`'s recorded parent
    /// is not `parent` (the parent field is authoritative for ownership).
    /// O(1).
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(c) = self.nodes.get(&child) else {
            return false;
        };
        if c.parent != Some(parent) {
            return false;
        }
        let (left, right) = (c.left_sibling, c.right_sibling);
        if let Some(l) = left
            && let Some(n) = self.nodes.get_mut(&l)
        {
            n.right_sibling = right;
        }
        if let Some(r) = right
            && let Some(n) = self.nodes.get_mut(&r)
        {
            n.left_sibling = left;
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            if p.first_child == Some(child) {
                p.first_child = right;
            }
            if p.last_child == Some(child) {
                p.last_child = left;
            }
        }
        if let Some(n) = self.nodes.get_mut(&child) {
            n.parent = None;
            n.left_sibling = None;
            n.right_sibling = None;
        }
        true
    }

    /// Detach `id` from its parent and erase it and every descendant from
    /// the registry.
    ///
    /// A node with no parent is left alone: the per-display root is never
    /// removed this way. The child list is snapshotted before recursion
    /// because recursion mutates it.
    pub fn remove_subtree(&mut self, id: NodeId) {
        let Some(n) = self.nodes.get(&id) else {
            return;
        };
        let Some(parent) = n.parent else {
            return;
        };
        let mut child = n.last_child;
        self.remove_child(parent, id);
        while let Some(c) = child {
            let left = self.nodes.get(&c).and_then(|n| n.left_sibling);
            self.remove_subtree(c);
            child = left;
        }
        self.nodes.remove(&id);
    }

    /// Diagnostic flag: some child extends beyond this node's rect.
    pub fn update_children_out_of_rect_info(&mut self, id: NodeId, value: bool) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.has_children_out_of_rect = value;
        }
    }

    /// Re-establish a node's liveness for the current frame and recompute
    /// its absolute bounds.
    ///
    /// The integrating scene traversal calls this for every node it still
    /// visits; nodes it stops visiting keep their consumed flag and are
    /// reported off-tree by the next detection pass.
    pub fn refresh(&mut self, id: NodeId) {
        let Some(n) = self.nodes.get_mut(&id) else {
            return;
        };
        n.valid_in_frame = true;
        if n.ignored.is_some() {
            return;
        }
        if n.parent.is_some() {
            self.calculate_node_all_bounds(id);
        }
    }

    /// Refresh `id` and recursively every descendant, topmost child first.
    ///
    /// Ignored nodes are marked valid but not descended into, which is what
    /// leaves stale descendants invalid for off-tree reporting.
    pub fn update_subtree_props(&mut self, id: NodeId) {
        self.refresh(id);
        if let Some(n) = self.nodes.get(&id)
            && n.ignored.is_some()
        {
            return;
        }
        let mut child = self.nodes.get(&id).and_then(|n| n.last_child);
        while let Some(c) = child {
            let left = self.nodes.get(&c).and_then(|n| n.left_sibling);
            self.update_subtree_props(c);
            child = left;
        }
    }

    /// Compose the parent's scale/alpha/position into this node's absolute
    /// integer rects and inherited clip.
    ///
    /// Top-down: the parent must have been processed this frame. No-op for
    /// roots and ignored subtrees.
    pub fn calculate_node_all_bounds(&mut self, id: NodeId) {
        let Some(n) = self.nodes.get(&id) else {
            return;
        };
        if n.ignored.is_some() {
            return;
        }
        let Some(parent_id) = n.parent else {
            return;
        };
        let root = n.root;
        let Some(p) = self.nodes.get(&parent_id) else {
            return;
        };
        let p_scale = Vec2::new(
            p.local_scale.x * p.accumulated_scale.x,
            p.local_scale.y * p.accumulated_scale.y,
        );
        let p_alpha = p.local_alpha * p.accumulated_alpha;
        let p_abs = p.abs_position;
        let (p_clip_outer, p_clip_inner) = (p.clip_outer, p.clip_inner);
        let root_clip = root.and_then(|r| self.nodes.get(&r)).map(|r| r.clip_outer);

        let Some(n) = self.nodes.get_mut(&id) else {
            return;
        };
        n.accumulated_scale = p_scale;
        n.accumulated_alpha = p_alpha;
        n.alpha_needed = n.local_alpha * n.accumulated_alpha < 1.0;
        if n.alpha_needed && n.opacity.is_opaque() {
            n.opacity = Opacity::NotOpaque(NotOpaqueReason::AccumulatedAlpha);
        }
        n.abs_position = p_abs
            + Vec2::new(
                n.local_position.x * n.accumulated_scale.x,
                n.local_position.y * n.accumulated_scale.y,
            );
        let abs_rect = Rect::new(
            n.draw_rect.x0 * n.accumulated_scale.x + p_abs.x,
            n.draw_rect.y0 * n.accumulated_scale.y + p_abs.y,
            n.draw_rect.x1 * n.accumulated_scale.x + p_abs.x,
            n.draw_rect.y1 * n.accumulated_scale.y + p_abs.y,
        );
        n.outer_rect = outer_bounds(abs_rect).intersect(p_clip_outer);
        n.inner_rect = inner_bounds(abs_rect, n.corner_radius).intersect(p_clip_inner);
        n.clip_outer = p_clip_outer;
        n.clip_inner = p_clip_inner;
        if n.needs_clip {
            n.clip_outer = n.outer_rect;
            n.clip_inner = n.inner_rect;
        }
        if n.inner_rect.is_empty() && n.opacity.is_opaque() {
            n.opacity = Opacity::NotOpaque(NotOpaqueReason::EmptyInner);
        }
        // Right/bottom are tested against the root clip, left/top against
        // zero: the root's origin is the display origin.
        n.out_of_root = match root_clip {
            None => false,
            Some(rc) => {
                n.outer_rect.min_x >= rc.max_x
                    || n.outer_rect.max_x < 0
                    || n.outer_rect.min_y >= rc.max_y
                    || n.outer_rect.max_y < 0
                    || n.outer_rect.is_empty()
            }
        };
    }
}
