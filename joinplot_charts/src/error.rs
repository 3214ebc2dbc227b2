// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart errors.

extern crate alloc;

use alloc::string::String;

use joinplot_core::{NodeId, SurfaceError};

/// Errors returned by chart operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// A surface operation failed.
    #[error("surface operation failed: {0}")]
    Surface(#[from] SurfaceError),
    /// No `svg` element was found under the host container.
    #[error("no drawing surface mounted under host node {0:?}")]
    MissingSurface(NodeId),
    /// An axis name other than `x` or `y`.
    #[error("unknown axis `{0}`, expected `x` or `y`")]
    UnknownAxis(String),
}
