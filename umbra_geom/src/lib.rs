// Copyright 2025 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Umbra Geom: clamped 16-bit integer AABBs.
//!
//! This crate holds the integer-rectangle primitive shared by the Umbra
//! occlusion engine. Coordinates are deliberately stored as `i16` and every
//! conversion from float space saturates into `[i16::MIN, i16::MAX]`. This
//! bounds the memory and comparison cost of per-node rectangles at the
//! expense of correctness for displays or content exceeding ±32767 device
//! pixels, which is an accepted tradeoff of the engine's numeric policy.
//!
//! - [`Aabb16`]: min/max-corner axis-aligned box with empty-safe
//!   intersection and containment.
//! - [`clamp16`]: the saturating `f64 → i16` conversion.
//!
//! Empty boxes have degenerate semantics throughout: an empty box contains
//! nothing, is contained by nothing, and intersecting with one yields
//! [`Aabb16::EMPTY`].
//!
//! This crate is `no_std` and dependency-free. Higher layers compute float
//! geometry with whatever library they choose and round into [`Aabb16`]
//! at the integer boundary.

#![no_std]

mod aabb;

pub use aabb::{Aabb16, clamp16};
