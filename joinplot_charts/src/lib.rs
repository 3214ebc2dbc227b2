// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter-plot charts for `joinplot_core` surfaces.
//!
//! This crate turns a field-keyed [`Dataset`] and a [`FieldSelection`] into
//! elements on a [`joinplot_core::Surface`]:
//! - **Scales** map data values into plot coordinates and categories into colors.
//! - **Guides** (axes with gridlines, axis captions) are redrawn on every run.
//! - **Point marks** are reconciled with the data by position (enter/update/exit).
//!
//! [`ScatterChart`] ties these together behind an explicit lifecycle
//! (`new` → `init` → `set_data`/`select_field`/`update` → `destroy`).

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
#[cfg(test)]
mod chart_tests;
mod config;
mod dimensions;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod host;
mod label;
mod point_mark;
mod record;
mod scale;
mod scatter_chart;
mod selection;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridStyle, StrokeStyle};
pub use config::ChartConfig;
pub use dimensions::{Dimensions, Margins, apply_view_box, compute_dimensions};
pub use error::ChartError;
pub use format::format_tick;
pub use host::Host;
pub use label::{AxisLabel, x_caption_anchor, y_caption_anchor};
pub use point_mark::PointMarkSpec;
pub use record::{Dataset, FieldLookup, Record, Value, coerce_number};
pub use scale::{CATEGORY10, ScaleLinear, ScaleOrdinal, Scales, domain_max, palette_colors};
pub use scatter_chart::{ChartState, RenderReport, ScatterChart};
pub use selection::{AxisName, FieldSelection, ScatterPoint, scatter_points};
