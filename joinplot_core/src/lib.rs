// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained drawing-surface core.
//!
//! This crate provides:
//! - a typed [`Surface`] capability (create child, set attribute, select
//!   descendants, remove, animate an attribute over a duration),
//! - [`RetainedSurface`], an in-memory implementation used by demos and tests, and
//! - [`join`], the positional enter/update/exit reconciliation that keeps a set of
//!   elements in sync with a data slice.
//!
//! Chart semantics (scales, axes, marks) live in `joinplot_charts`.

#![no_std]

mod join;
mod node;
mod retained;
mod surface;

pub use join::{JoinSummary, join};
pub use node::{Attr, AttrValue, ElementKind, NodeId, Selector};
pub use retained::{RetainedSurface, Transition};
pub use surface::{Surface, SurfaceError};
