// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The detection pass: walk the tree top-of-z first, tracking the single
//! largest opaque rectangle seen so far.

use hashbrown::HashSet;
use umbra_geom::Aabb16;

use crate::tree::OcclusionTree;
use crate::types::{NodeId, NodeKind};

/// The largest opaque rectangle established at some point of the walk.
///
/// A plain value: the global best is threaded through the recursion by
/// mutable reference, subtree bests are returned by value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Coverage {
    /// Inner rect of the owning opaque node.
    pub rect: Aabb16,
    /// Cached area of `rect`.
    pub area: i64,
    /// The opaque node that owns `rect`, `None` when no coverage exists.
    pub id: Option<NodeId>,
}

/// Output of one detection pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OcclusionResult {
    /// Nodes whose drawing can be skipped this frame: fully covered by an
    /// opaque node above them, or entirely outside the root clip.
    pub culled: HashSet<NodeId>,
    /// Nodes still registered here but no longer visited by the scene
    /// traversal; candidates for [`OcclusionTree::remove_subtree`].
    pub off_tree: HashSet<NodeId>,
}

impl OcclusionTree {
    /// Run occlusion detection over the subtree rooted at `root`.
    ///
    /// Consumes every visited node's validity flag; the next frame's
    /// property refresh re-establishes it. Nodes whose flag was already
    /// consumed are reported off-tree without being descended into.
    pub fn detect_occlusion(&mut self, root: NodeId) -> OcclusionResult {
        let mut result = OcclusionResult::default();
        if self.nodes.contains_key(&root) {
            let mut global = Coverage::default();
            self.detect_inner(root, &mut global, &mut result);
        }
        result
    }

    /// Returns the largest coverage found in this subtree, self included.
    fn detect_inner(
        &mut self,
        id: NodeId,
        global: &mut Coverage,
        out: &mut OcclusionResult,
    ) -> Coverage {
        let Some(node) = self.nodes.get_mut(&id) else {
            return Coverage::default();
        };
        node.valid_in_frame = false;
        node.occluded_by = None;
        let mut child = node.last_child;

        // Anything drawn before this point in the walk is above this node,
        // so the global best can already cull it. Children still have to be
        // descended into: they draw above their parent too.
        self.check_node_occlusion(id, global, out);

        let mut max_child = Coverage::default();
        while let Some(c) = child {
            let Some(n) = self.nodes.get(&c) else {
                break;
            };
            let (ignored, valid, left) = (n.ignored.is_some(), n.valid_in_frame, n.left_sibling);
            if !ignored && valid {
                let cover = self.detect_inner(c, global, out);
                if cover.area > max_child.area {
                    max_child = cover;
                }
            } else if !valid {
                out.off_tree.insert(c);
            } else if let Some(n) = self.nodes.get_mut(&c) {
                n.valid_in_frame = false;
            }
            child = left;
        }
        self.check_node_occlusion(id, &max_child, out);

        let mut self_cov = Coverage::default();
        if let Some(n) = self.nodes.get(&id)
            && n.opacity.is_opaque()
        {
            self_cov = Coverage {
                rect: n.inner_rect,
                area: n.inner_rect.area(),
                id: Some(id),
            };
            if self_cov.area > global.area {
                *global = self_cov;
            }
        }
        if max_child.area > self_cov.area {
            max_child
        } else {
            self_cov
        }
    }

    /// Cull `id` if the coverage fully contains it or it lies outside the
    /// root clip. Only canvas nodes without a clip flag are eligible.
    fn check_node_occlusion(&mut self, id: NodeId, coverage: &Coverage, out: &mut OcclusionResult) {
        let Some(n) = self.nodes.get_mut(&id) else {
            return;
        };
        if n.kind == NodeKind::Canvas
            && !n.needs_clip
            && (n.out_of_root || n.outer_rect.is_inside_of(coverage.rect))
        {
            out.culled.insert(id);
            n.occluded_by = coverage.id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    use crate::fixtures::FakeSceneNode;
    use crate::source::SceneNode;
    use crate::types::ModifierSet;
    use kurbo::Rect;

    const ROOT: NodeId = NodeId(0);

    /// Root with the given nodes as direct children, inserted in order
    /// (later entries are topmost), fully collected and propagated.
    fn frame(children: &[FakeSceneNode]) -> OcclusionTree {
        let mut tree = OcclusionTree::new();
        tree.create(ROOT, NodeKind::Root);
        tree.mark_as_root(ROOT);
        tree.set_root_clip(ROOT, 1000, 1000);
        for fake in children {
            tree.create(fake.id, fake.kind);
            tree.forward_order_insert(ROOT, fake.id);
            tree.collect_node_properties(fake);
        }
        tree.update_subtree_props(ROOT);
        tree
    }

    fn culled_ids(result: &OcclusionResult) -> Vec<u64> {
        let mut ids: Vec<u64> = result.culled.iter().map(|id| id.raw()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn fully_covered_node_is_culled() {
        // Same bounds, node 2 on top.
        let mut tree = frame(&[FakeSceneNode::new(1), FakeSceneNode::new(2)]);
        let result = tree.detect_occlusion(ROOT);
        assert_eq!(culled_ids(&result), [1]);
        assert!(result.off_tree.is_empty());
        assert_eq!(tree.node(NodeId(1)).unwrap().occluded_by(), Some(NodeId(2)));
        assert_eq!(tree.node(NodeId(2)).unwrap().occluded_by(), None);
    }

    #[test]
    fn partial_overlap_is_not_culled() {
        let mut tree = frame(&[
            FakeSceneNode::new(1),
            FakeSceneNode::with_bounds(2, Rect::new(50.0, 50.0, 150.0, 150.0)),
        ]);
        let result = tree.detect_occlusion(ROOT);
        assert!(result.culled.is_empty());
    }

    #[test]
    fn translucent_cover_does_not_cull() {
        let mut below = FakeSceneNode::new(1);
        below.background_is_solid = false;
        let mut above = FakeSceneNode::new(2);
        above.alpha = 0.5;
        above.modifiers = ModifierSet::BOUNDS | ModifierSet::ALPHA;
        let mut tree = frame(&[below, above]);
        let result = tree.detect_occlusion(ROOT);
        assert!(result.culled.is_empty());
    }

    #[test]
    fn clipping_cover_still_contributes_coverage() {
        let mut above = FakeSceneNode::new(2);
        above.modifiers = ModifierSet::BOUNDS | ModifierSet::CLIP_TO_BOUNDS;
        above.clips_to_bounds = true;
        let mut tree = frame(&[FakeSceneNode::new(1), above]);
        let result = tree.detect_occlusion(ROOT);
        assert_eq!(culled_ids(&result), [1]);
    }

    #[test]
    fn clipping_node_is_never_culled_by_containment() {
        let mut below = FakeSceneNode::new(1);
        below.modifiers = ModifierSet::BOUNDS | ModifierSet::CLIP_TO_BOUNDS;
        below.clips_to_bounds = true;
        let mut tree = frame(&[below, FakeSceneNode::new(2)]);
        let result = tree.detect_occlusion(ROOT);
        assert!(result.culled.is_empty());
    }

    #[test]
    fn out_of_root_node_is_culled_unconditionally() {
        let off = FakeSceneNode::with_bounds(1, Rect::new(2000.0, 0.0, 2050.0, 50.0));
        let mut tree = frame(&[off]);
        let result = tree.detect_occlusion(ROOT);
        assert_eq!(culled_ids(&result), [1]);
        let n = tree.node(NodeId(1)).unwrap();
        assert!(n.is_out_of_root());
        assert_eq!(n.occluded_by(), None, "nothing occludes it, it is off-screen");
    }

    #[test]
    fn stale_node_is_reported_off_tree() {
        let mut tree = frame(&[FakeSceneNode::new(1), FakeSceneNode::new(2)]);
        let baseline = tree.detect_occlusion(ROOT);
        assert!(baseline.off_tree.is_empty());

        // Next frame the scene traversal stops visiting node 2.
        tree.refresh(ROOT);
        tree.refresh(NodeId(1));
        let result = tree.detect_occlusion(ROOT);
        assert!(result.off_tree.contains(&NodeId(2)));
        assert!(!result.culled.contains(&NodeId(2)));
    }

    #[test]
    fn unchanged_frames_are_idempotent() {
        let nodes = [
            FakeSceneNode::new(1),
            FakeSceneNode::with_bounds(2, Rect::new(50.0, 50.0, 150.0, 150.0)),
            FakeSceneNode::new(3),
        ];
        let mut tree = frame(&nodes);
        let first = tree.detect_occlusion(ROOT);
        tree.update_subtree_props(ROOT);
        let second = tree.detect_occlusion(ROOT);
        assert_eq!(first, second);
    }

    #[test]
    fn opaque_child_culls_its_parent() {
        let mut parent = FakeSceneNode::new(1);
        parent.background_is_solid = false;
        let child = FakeSceneNode::new(2);

        let mut tree = frame(&[parent]);
        tree.create(NodeId(2), NodeKind::Canvas);
        tree.forward_order_insert(NodeId(1), NodeId(2));
        tree.collect_node_properties(&child);
        tree.update_subtree_props(ROOT);

        let result = tree.detect_occlusion(ROOT);
        assert_eq!(culled_ids(&result), [1]);
        assert_eq!(tree.node(NodeId(1)).unwrap().occluded_by(), Some(NodeId(2)));
    }

    #[test]
    fn ignored_valid_child_is_invalidated_without_descent() {
        let mut grouped = FakeSceneNode::new(1);
        grouped.is_render_group = true;
        let mut tree = frame(&[grouped]);
        assert!(tree.node(NodeId(1)).unwrap().is_valid_in_current_frame());

        let result = tree.detect_occlusion(ROOT);
        assert!(result.culled.is_empty());
        assert!(result.off_tree.is_empty());
        assert!(
            !tree.node(NodeId(1)).unwrap().is_valid_in_current_frame(),
            "detection consumes the flag even for ignored children"
        );
    }

    #[test]
    fn ignored_subtree_contributes_no_coverage() {
        let mut above = FakeSceneNode::new(2);
        above.is_render_group = true;
        let mut tree = frame(&[FakeSceneNode::new(1), above]);
        let result = tree.detect_occlusion(ROOT);
        assert!(
            result.culled.is_empty(),
            "a render-grouped cover must not cull what is under it"
        );
    }

    #[test]
    fn coverage_prefers_the_larger_rectangle() {
        // Two disjoint opaque covers; only the larger one wins the single
        // coverage slot, so a node under the smaller one survives.
        let big = FakeSceneNode::with_bounds(3, Rect::new(0.0, 0.0, 500.0, 500.0));
        let small = FakeSceneNode::with_bounds(2, Rect::new(600.0, 600.0, 700.0, 700.0));
        let under_small = FakeSceneNode::with_bounds(1, Rect::new(610.0, 610.0, 690.0, 690.0));
        let under_big = FakeSceneNode::with_bounds(4, Rect::new(10.0, 10.0, 90.0, 90.0));

        // z-order bottom to top: under_small, under_big, small, big.
        let mut tree = frame(&[under_small, under_big, small, big]);
        let result = tree.detect_occlusion(ROOT);
        assert_eq!(culled_ids(&result), [4]);
    }

    #[test]
    fn detection_on_missing_root_is_empty() {
        let mut tree = OcclusionTree::new();
        let result = tree.detect_occlusion(NodeId(42));
        assert_eq!(result, OcclusionResult::default());
    }

    #[test]
    fn empty_rects_neither_occlude_nor_get_occluded() {
        let zero = FakeSceneNode::with_bounds(2, Rect::new(50.0, 50.0, 50.0, 50.0));
        let mut tree = frame(&[FakeSceneNode::new(1), zero]);
        let result = tree.detect_occlusion(ROOT);
        // The zero-area node is out of root (empty outer rect) and culled
        // on that path; it cannot cull node 1.
        assert_eq!(culled_ids(&result), [2]);
    }

    #[test]
    fn fake_defaults_describe_an_opaque_canvas() {
        let fake = FakeSceneNode::new(7);
        assert_eq!(fake.kind(), NodeKind::Canvas);
        assert_eq!(fake.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(crate::types::OPAQUE_MODIFIERS.contains(fake.modifiers()));
    }
}
