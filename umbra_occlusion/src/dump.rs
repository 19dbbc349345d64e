// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug helpers for comparing the shadow tree against the scene graph.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::tree::OcclusionTree;
use crate::types::NodeId;

impl OcclusionTree {
    /// Ids of the subtree under `root` in preorder, skipping ignored
    /// subtrees, for diffing against the scene graph's own traversal.
    pub fn preorder_traversal(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.preorder_inner(root, &mut out);
        out
    }

    fn preorder_inner(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.ignored.is_some() {
            return;
        }
        out.push(id);
        let mut child = node.first_child;
        while let Some(c) = child {
            self.preorder_inner(c, out);
            child = self.nodes.get(&c).and_then(|n| n.right_sibling);
        }
    }

    /// One-line state dump of a node, empty string for unknown ids.
    pub fn node_info_string(&self, id: NodeId) -> String {
        let Some(n) = self.nodes.get(&id) else {
            return String::new();
        };
        format!(
            "OcclusionNode id: {}, occludedBy id: {}, outerRectCoords left: {}, right: {}, \
             top: {}, bottom: {}, innerRectCoords left: {}, right: {}, top: {}, bottom: {}, \
             subTreeIgnore: {}, outOfScreen: {}, opaque: {}, alpha: {}, isNeedClip: {}, \
             hasChildrenOutOfRect: {}",
            n.id,
            n.occluded_by.map_or(0, NodeId::raw),
            n.outer_rect.min_x,
            n.outer_rect.max_x,
            n.outer_rect.min_y,
            n.outer_rect.max_y,
            n.inner_rect.min_x,
            n.inner_rect.max_x,
            n.inner_rect.min_y,
            n.inner_rect.max_y,
            n.ignored.is_some(),
            n.out_of_root,
            n.opacity.is_opaque(),
            n.local_alpha * n.accumulated_alpha,
            n.needs_clip,
            n.has_children_out_of_rect,
        )
    }
}
