// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use peniko::Color;
use smallvec::SmallVec;

use crate::axis::{AxisSpec, GridStyle};
use crate::dimensions::Margins;
use crate::point_mark::PointMarkSpec;
use crate::scale::{CATEGORY10, palette_colors};

/// Everything about a [`crate::ScatterChart`] that is fixed at construction.
///
/// Defaults reproduce the stock chart: 40/10/20/40 margins, radius 4 points at
/// 0.4 opacity colored by `Species`, a 5-tick left axis with `#ddd` dashed
/// gridlines, and 500 ms axis transitions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChartConfig {
    /// Space reserved around the plot.
    pub margins: Margins,
    /// Point radius.
    pub point_radius: f64,
    /// Point opacity.
    pub point_opacity: f64,
    /// Field whose text value picks the point color.
    pub category_field: String,
    /// Category colors as RGB triples, reused from the start when exhausted.
    pub palette: Vec<[u8; 3]>,
    /// Requested tick count for the bottom axis.
    pub x_tick_count: usize,
    /// Requested tick count for the left axis.
    pub y_tick_count: usize,
    /// Gridline color as an RGB triple.
    pub grid_color: [u8; 3],
    /// Gridline dash pattern.
    pub grid_dash: Vec<f64>,
    /// Axis redraw duration in milliseconds. `0` redraws instantly.
    pub axis_transition_ms: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            point_radius: 4.0,
            point_opacity: 0.4,
            category_field: String::from("Species"),
            palette: CATEGORY10.to_vec(),
            x_tick_count: 10,
            y_tick_count: 5,
            grid_color: [0xdd, 0xdd, 0xdd],
            grid_dash: alloc::vec![2.0, 2.0],
            axis_transition_ms: 500,
        }
    }
}

impl ChartConfig {
    /// Sets the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the category field.
    pub fn with_category_field(mut self, field: impl Into<String>) -> Self {
        self.category_field = field.into();
        self
    }

    /// Sets the category palette.
    pub fn with_palette(mut self, palette: Vec<[u8; 3]>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets point radius and opacity.
    pub fn with_points(mut self, radius: f64, opacity: f64) -> Self {
        self.point_radius = radius;
        self.point_opacity = opacity;
        self
    }

    /// Sets the axis redraw duration in milliseconds.
    pub fn with_axis_transition_ms(mut self, ms: u64) -> Self {
        self.axis_transition_ms = ms;
        self
    }

    /// Sets the left axis tick count.
    pub fn with_y_tick_count(mut self, count: usize) -> Self {
        self.y_tick_count = count;
        self
    }

    pub(crate) fn axis_transition(&self) -> Duration {
        Duration::from_millis(self.axis_transition_ms)
    }

    pub(crate) fn palette_colors(&self) -> Vec<Color> {
        palette_colors(&self.palette)
    }

    pub(crate) fn point_mark(&self) -> PointMarkSpec {
        PointMarkSpec::new()
            .with_radius(self.point_radius)
            .with_opacity(self.point_opacity)
    }

    pub(crate) fn x_axis(&self) -> AxisSpec {
        AxisSpec::bottom()
            .with_tick_count(self.x_tick_count)
            .with_tick_size_outer(0.0)
    }

    /// Left axis whose tick lines span `inner_width` as gridlines.
    pub(crate) fn y_axis(&self, inner_width: f64) -> AxisSpec {
        let [r, g, b] = self.grid_color;
        AxisSpec::left()
            .with_tick_count(self.y_tick_count)
            .with_tick_size_outer(0.0)
            .with_tick_size_inner(-inner_width)
            .with_grid(GridStyle {
                color: Color::from_rgb8(r, g, b),
                dash: SmallVec::from_slice(&self.grid_dash),
            })
    }
}
