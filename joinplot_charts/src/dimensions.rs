// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable-area computation.
//!
//! The plot area is the measured surface box minus fixed margins. Nothing is
//! clamped: a surface smaller than its margins yields negative inner extents,
//! and downstream scales receive them as-is.

use joinplot_core::{Attr, NodeId, Surface, SurfaceError};
use kurbo::{Rect, Size};

/// Fixed space reserved around the plot area for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    /// Space left of the plot (y axis).
    pub left: f64,
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot (x axis and its label).
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 40.0,
            top: 10.0,
            right: 20.0,
            bottom: 40.0,
        }
    }
}

/// Outer and inner extents for one pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    /// Measured surface width.
    pub width: f64,
    /// Measured surface height.
    pub height: f64,
    /// Width available to the plot (may be negative).
    pub inner_width: f64,
    /// Height available to the plot (may be negative).
    pub inner_height: f64,
}

impl Dimensions {
    /// The logical view box `[0, 0, width, height]`.
    pub fn view_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Subtracts `margins` from the measured `total` size.
pub fn compute_dimensions(total: Size, margins: &Margins) -> Dimensions {
    Dimensions {
        width: total.width,
        height: total.height,
        inner_width: total.width - margins.left - margins.right,
        inner_height: total.height - margins.top - margins.bottom,
    }
}

/// Writes the view box of `dims` onto the `svg` node.
pub fn apply_view_box<S: Surface + ?Sized>(
    surface: &mut S,
    svg: NodeId,
    dims: &Dimensions,
) -> Result<(), SurfaceError> {
    surface.set_attr(svg, Attr::ViewBox, dims.view_box().into())
}
