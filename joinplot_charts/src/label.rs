// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis captions.

use joinplot_core::{Attr, ElementKind, NodeId, Surface, SurfaceError};
use kurbo::{Affine, Point};

use crate::dimensions::{Dimensions, Margins};

/// Distance of the x caption's baseline from the bottom edge.
const X_CAPTION_INSET: f64 = 5.0;
/// Horizontal position of the rotated y caption.
const Y_CAPTION_OFFSET: f64 = 15.0;

/// A positioned group holding one `text.label` caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisLabel {
    /// The positioned group.
    pub container: NodeId,
    /// The caption text node.
    pub text: NodeId,
}

impl AxisLabel {
    /// Creates the caption group under `parent`, tagged with `class`.
    ///
    /// A `vertical` caption is rotated a quarter turn counter-clockwise.
    pub fn create<S: Surface + ?Sized>(
        surface: &mut S,
        parent: NodeId,
        class: &str,
        vertical: bool,
    ) -> Result<Self, SurfaceError> {
        let container = surface.create_child(parent, ElementKind::Group)?;
        surface.set_attr(container, Attr::Class, class.into())?;
        let text = surface.create_child(container, ElementKind::Text)?;
        surface.set_attr(text, Attr::Class, "label".into())?;
        surface.set_attr(text, Attr::TextAnchor, "middle".into())?;
        if vertical {
            surface.set_attr(
                text,
                Attr::Transform,
                Affine::rotate(-core::f64::consts::FRAC_PI_2).into(),
            )?;
        }
        Ok(Self { container, text })
    }

    /// Moves the caption to `at` and sets its text to `field`, or clears it.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        at: Point,
        field: Option<&str>,
    ) -> Result<(), SurfaceError> {
        surface.set_attr(
            self.container,
            Attr::Transform,
            Affine::translate(at.to_vec2()).into(),
        )?;
        surface.set_attr(self.text, Attr::Content, field.unwrap_or("").into())
    }
}

/// Where the x caption sits: centered under the plot, just above the bottom edge.
pub fn x_caption_anchor(dims: &Dimensions, margins: &Margins) -> Point {
    Point::new(
        margins.left + dims.inner_width / 2.0,
        dims.height - X_CAPTION_INSET,
    )
}

/// Where the y caption sits: left of the y axis, centered on the plot.
pub fn y_caption_anchor(dims: &Dimensions, margins: &Margins) -> Point {
    Point::new(Y_CAPTION_OFFSET, margins.top + dims.inner_height / 2.0)
}
