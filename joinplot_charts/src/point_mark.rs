// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark reconciliation.

extern crate alloc;

use alloc::string::String;

use joinplot_core::{Attr, ElementKind, JoinSummary, NodeId, Selector, Surface, SurfaceError, join};

use crate::scale::Scales;
use crate::selection::ScatterPoint;

/// Circle marks bound by position to a sequence of [`ScatterPoint`]s.
///
/// Mark identity is the index into the point sequence: a reordered dataset of
/// the same length moves existing circles and keeps their colors.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMarkSpec {
    /// Circle radius.
    pub radius: f64,
    /// Fill opacity.
    pub opacity: f64,
    /// Class token identifying the marks under their container.
    pub class: String,
}

impl Default for PointMarkSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl PointMarkSpec {
    /// Creates a spec for `circle.data` marks with radius 4 and opacity 0.4.
    pub fn new() -> Self {
        Self {
            radius: 4.0,
            opacity: 0.4,
            class: String::from("data"),
        }
    }

    /// Sets the circle radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the fill opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// The selector matching this spec's marks.
    pub fn selector(&self) -> Selector<'_> {
        Selector::new(ElementKind::Circle).with_class(&self.class)
    }

    /// Reconciles the circles under `container` with `points`.
    ///
    /// Fill is assigned once, when a circle is created. Positions are written
    /// for every bound circle on every pass.
    pub fn join<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        container: NodeId,
        points: &[ScatterPoint],
        scales: &Scales,
    ) -> Result<JoinSummary, SurfaceError> {
        let summary = join(
            surface,
            container,
            self.selector(),
            points,
            |s, node, _, p| {
                s.set_attr(node, Attr::R, self.radius.into())?;
                s.set_attr(node, Attr::Fill, scales.color.color(&p.category).into())?;
                s.set_attr(node, Attr::Opacity, self.opacity.into())
            },
            |s, node, _, p| {
                s.set_attr(node, Attr::Cx, finite_or_origin(scales.x.map(p.x)).into())?;
                s.set_attr(node, Attr::Cy, finite_or_origin(scales.y.map(p.y)).into())
            },
        )?;
        log::debug!(target: "joinplot_charts", "points: {summary:?}");
        Ok(summary)
    }
}

fn finite_or_origin(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
