// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Umbra Occlusion: a shadow-tree occlusion-culling engine for compositors.
//!
//! This crate decides, frame by frame, which draw commands are guaranteed to
//! be invisible and can be skipped. It maintains a lightweight shadow tree
//! (one [`OcclusionNode`] per participating scene node) that mirrors the
//! scene graph's structure and z-order, propagates geometry and opacity
//! top-down, and then walks the tree tracking the single largest opaque
//! rectangle established so far, culling any eligible node whose bounds are
//! fully contained in it or that lie entirely off the display.
//!
//! ## Pipeline
//!
//! One frame runs four phases, all driven by the integrating render thread:
//!
//! 1. **Tree build** — [`OcclusionTree::forward_order_insert`] /
//!    [`OcclusionTree::remove_child`] / [`OcclusionTree::remove_subtree`]
//!    keep the shadow tree in sync with scene mutations. Insertion order is
//!    z-order: the last-inserted child is topmost.
//! 2. **Property collection** — [`OcclusionTree::collect_node_properties`]
//!    classifies each node as opaque, occluder-only, or subtree-ignored from
//!    its [`ModifierSet`] and scene facts, and computes its local draw
//!    rectangle.
//! 3. **Bounds propagation** — [`OcclusionTree::update_subtree_props`]
//!    composes ancestor scale/alpha/position into clamped integer rects
//!    ([`umbra_geom::Aabb16`]) and inherited clips.
//! 4. **Detection** — [`OcclusionTree::detect_occlusion`] emits the culled
//!    and off-tree node sets as an [`OcclusionResult`].
//!
//! The scene graph is consumed only through the read-only [`SceneNode`]
//! trait, so the engine can be exercised with fakes and never depends on a
//! concrete scene type.
//!
//! ## What this is not
//!
//! No pixels are drawn here and no GPU resources are touched. Classification
//! is deliberately conservative: any geometry this rectangle model cannot
//! express (rotation, skew, perspective, clip paths, unrecognized modifiers)
//! excludes the subtree from occlusion reasoning rather than risking
//! over-culling. Coverage is a single rectangle chosen by area, not a region
//! union; this trades exactness for O(1) per-node comparisons.
//!
//! This crate is `no_std` and uses `alloc`. Enable the `std` feature
//! (default) or `libm` for float rounding.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("umbra_occlusion requires either the `std` or `libm` feature");

mod collect;
mod detect;
mod dump;
mod node;
mod source;
mod tree;
mod types;
mod util;

#[cfg(test)]
pub(crate) mod fixtures;

pub use detect::{Coverage, OcclusionResult};
pub use node::OcclusionNode;
pub use source::SceneNode;
pub use tree::OcclusionTree;
pub use types::{
    IgnoreReason, ModifierSet, NodeId, NodeKind, NotOpaqueReason, OCCLUDER_MODIFIERS,
    OPAQUE_MODIFIERS, Opacity,
};
