// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scatter chart: instance state, lifecycle, and the render pipeline.
//!
//! A [`ScatterChart`] owns its [`Host`] and renders into the host's drawing
//! surface. Every data replacement or field selection re-runs the whole
//! pipeline, in order:
//!
//! 1. measure the surface and compute [`Dimensions`] (view box and container
//!    placement follow),
//! 2. build [`Scales`] from the dataset and selection,
//! 3. write the axis captions,
//! 4. redraw both axes,
//! 5. join the point marks against the derived [`ScatterPoint`]s.
//!
//! Nothing derived is kept between runs except the last [`Dimensions`], which
//! is exposed for inspection only.

extern crate alloc;

use alloc::vec::Vec;

use joinplot_core::{Attr, ElementKind, JoinSummary, NodeId, Surface};
use kurbo::Affine;

use crate::config::ChartConfig;
use crate::dimensions::{Dimensions, apply_view_box, compute_dimensions};
use crate::error::ChartError;
use crate::host::Host;
use crate::label::{AxisLabel, x_caption_anchor, y_caption_anchor};
use crate::record::Dataset;
use crate::scale::Scales;
use crate::selection::{AxisName, FieldSelection, ScatterPoint, scatter_points};

/// Lifecycle state of a [`ScatterChart`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartState {
    /// Constructed; no surface acquired yet.
    Uninitialized,
    /// Surface acquired and containers created.
    Initialized,
    /// At least one full pipeline run has completed.
    Rendered,
    /// Torn down. Further calls are ignored.
    Destroyed,
}

/// What one pipeline run did.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    /// Dimensions measured for this run.
    pub dimensions: Dimensions,
    /// Domain of the x scale.
    pub x_domain: (f64, f64),
    /// Domain of the y scale.
    pub y_domain: (f64, f64),
    /// Point mark reconciliation.
    pub marks: JoinSummary,
    /// Bottom axis tick reconciliation.
    pub x_ticks: JoinSummary,
    /// Left axis tick reconciliation.
    pub y_ticks: JoinSummary,
}

#[derive(Clone, Copy, Debug)]
struct Containers {
    x_axis: NodeId,
    y_axis: NodeId,
    x_label: AxisLabel,
    y_label: AxisLabel,
    marks: NodeId,
}

impl Containers {
    fn create<S: Surface + ?Sized>(surface: &mut S, svg: NodeId) -> Result<Self, ChartError> {
        let x_axis = group(surface, svg, "xAxisContainer")?;
        let y_axis = group(surface, svg, "yAxisContainer")?;
        let x_label = AxisLabel::create(surface, svg, "xLabelContainer", false)?;
        let y_label = AxisLabel::create(surface, svg, "yLabelContainer", true)?;
        let marks = group(surface, svg, "dataContainer")?;
        Ok(Self {
            x_axis,
            y_axis,
            x_label,
            y_label,
            marks,
        })
    }

    fn nodes(&self) -> [NodeId; 5] {
        [
            self.x_axis,
            self.y_axis,
            self.x_label.container,
            self.y_label.container,
            self.marks,
        ]
    }
}

fn group<S: Surface + ?Sized>(
    surface: &mut S,
    parent: NodeId,
    class: &str,
) -> Result<NodeId, ChartError> {
    let node = surface.create_child(parent, ElementKind::Group)?;
    surface.set_attr(node, Attr::Class, class.into())?;
    Ok(node)
}

/// A scatter plot bound to a host surface.
///
/// Data and field selection are injected by the caller; the chart only keeps
/// the latest of each. Operations return `Ok(None)` when they stored state
/// without rendering (before [`ScatterChart::init`], or after
/// [`ScatterChart::destroy`]).
#[derive(Debug)]
pub struct ScatterChart<S> {
    host: Host<S>,
    config: ChartConfig,
    data: Dataset,
    selection: FieldSelection,
    containers: Option<Containers>,
    dimensions: Option<Dimensions>,
    state: ChartState,
}

impl<S: Surface> ScatterChart<S> {
    /// Creates an uninitialized chart.
    pub fn new(host: Host<S>, config: ChartConfig) -> Self {
        Self {
            host,
            config,
            data: Dataset::default(),
            selection: FieldSelection::default(),
            containers: None,
            dimensions: None,
            state: ChartState::Uninitialized,
        }
    }

    /// Acquires the drawing surface, creates the chart containers and renders once.
    ///
    /// Fails with [`ChartError::MissingSurface`] if no `svg` is mounted under
    /// the host container; the chart then stays uninitialized.
    pub fn init(&mut self) -> Result<Option<RenderReport>, ChartError> {
        if self.state != ChartState::Uninitialized {
            log::warn!(target: "joinplot_charts", "init ignored in state {:?}", self.state);
            return Ok(None);
        }
        let svg = self.host.acquire_surface()?;
        let size = self.host.bounding_dimensions()?;
        let dims = compute_dimensions(size, &self.config.margins);
        let surface = self.host.surface_mut();
        apply_view_box(surface, svg, &dims)?;
        self.containers = Some(Containers::create(surface, svg)?);
        self.dimensions = Some(dims);
        self.state = ChartState::Initialized;
        log::debug!(target: "joinplot_charts", "initialized on {svg:?}, {size:?}");
        self.update()
    }

    /// Replaces the dataset and re-renders.
    pub fn set_data(&mut self, data: impl Into<Dataset>) -> Result<Option<RenderReport>, ChartError> {
        if self.state == ChartState::Destroyed {
            log::warn!(target: "joinplot_charts", "set_data ignored after destroy");
            return Ok(None);
        }
        self.data = data.into();
        self.update()
    }

    /// Maps `field` to `axis` and re-renders. An empty `field` clears the axis.
    pub fn select_field(
        &mut self,
        axis: AxisName,
        field: &str,
    ) -> Result<Option<RenderReport>, ChartError> {
        if self.state == ChartState::Destroyed {
            log::warn!(target: "joinplot_charts", "select_field ignored after destroy");
            return Ok(None);
        }
        self.selection.set(axis, Some(field));
        log::debug!(target: "joinplot_charts", "selected {axis:?} = {field:?}");
        self.update()
    }

    /// Runs the full pipeline.
    pub fn update(&mut self) -> Result<Option<RenderReport>, ChartError> {
        let containers = match (self.state, self.containers) {
            (ChartState::Initialized | ChartState::Rendered, Some(c)) => c,
            (ChartState::Destroyed, _) => {
                log::warn!(target: "joinplot_charts", "update ignored after destroy");
                return Ok(None);
            }
            _ => {
                log::trace!(target: "joinplot_charts", "update before init, state stored only");
                return Ok(None);
            }
        };
        let svg = self
            .host
            .svg()
            .ok_or(ChartError::MissingSurface(self.host.container()))?;

        let size = self.host.bounding_dimensions()?;
        let dims = compute_dimensions(size, &self.config.margins);
        let margins = self.config.margins;
        let transition = self.config.axis_transition();
        let surface = self.host.surface_mut();

        apply_view_box(surface, svg, &dims)?;
        let plot_origin = Affine::translate((margins.left, margins.top));
        surface.set_attr(
            containers.x_axis,
            Attr::Transform,
            Affine::translate((margins.left, margins.top + dims.inner_height)).into(),
        )?;
        surface.set_attr(containers.y_axis, Attr::Transform, plot_origin.into())?;
        surface.set_attr(containers.marks, Attr::Transform, plot_origin.into())?;

        let scales = Scales::build(
            &self.data,
            &self.selection,
            &dims,
            &self.config.category_field,
            self.config.palette_colors(),
        );

        containers
            .x_label
            .render(surface, x_caption_anchor(&dims, &margins), self.selection.x())?;
        containers
            .y_label
            .render(surface, y_caption_anchor(&dims, &margins), self.selection.y())?;

        let x_ticks = self
            .config
            .x_axis()
            .render(surface, containers.x_axis, &scales.x, transition)?;
        let y_ticks = self
            .config
            .y_axis(dims.inner_width)
            .render(surface, containers.y_axis, &scales.y, transition)?;

        let points = scatter_points(&self.data, &self.selection, &self.config.category_field);
        let marks = self
            .config
            .point_mark()
            .join(surface, containers.marks, &points, &scales)?;

        self.dimensions = Some(dims);
        self.state = ChartState::Rendered;
        let report = RenderReport {
            dimensions: dims,
            x_domain: scales.x.domain(),
            y_domain: scales.y.domain(),
            marks,
            x_ticks,
            y_ticks,
        };
        log::debug!(
            target: "joinplot_charts",
            "rendered {} records: x {:?} y {:?}, marks {:?}",
            self.data.len(),
            report.x_domain,
            report.y_domain,
            report.marks
        );
        Ok(Some(report))
    }

    /// Removes everything the chart created and stops responding to updates.
    pub fn destroy(&mut self) -> Result<(), ChartError> {
        if let Some(containers) = self.containers.take() {
            let surface = self.host.surface_mut();
            for node in containers.nodes() {
                surface.remove(node)?;
            }
        }
        self.state = ChartState::Destroyed;
        log::debug!(target: "joinplot_charts", "destroyed");
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChartState {
        self.state
    }

    /// The chart configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The current dataset.
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// The current field selection.
    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Dimensions of the last measurement, if any.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// Points derived from the current dataset and selection.
    pub fn points(&self) -> Vec<ScatterPoint> {
        scatter_points(&self.data, &self.selection, &self.config.category_field)
    }

    /// The container holding the point marks, once initialized.
    pub fn marks_container(&self) -> Option<NodeId> {
        self.containers.map(|c| c.marks)
    }

    /// The host adapter.
    pub fn host(&self) -> &Host<S> {
        &self.host
    }

    /// Mutable access to the host adapter.
    pub fn host_mut(&mut self) -> &mut Host<S> {
        &mut self.host
    }

    /// Returns the host adapter, consuming the chart.
    pub fn into_host(self) -> Host<S> {
        self.host
    }
}
