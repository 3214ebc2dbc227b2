// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis rendering.
//!
//! An axis draws into a container group that the chart has already positioned:
//! - a `path.domain` along the scale range (created once, before any tick),
//! - one `g.tick` per tick value, each holding a `line` and a `text`.
//!
//! Ticks are reconciled with the positional [`join`], so an axis whose tick
//! count is unchanged only moves and relabels its existing ticks. When the
//! axis has a [`GridStyle`], every tick line except the first (the origin)
//! is restyled as a light dashed gridline on each render.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use joinplot_core::{
    Attr, AttrValue, ElementKind, JoinSummary, NodeId, Selector, Surface, SurfaceError, join,
};
use kurbo::{Affine, BezPath};
use peniko::Color;
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::format::format_tick;
use crate::scale::ScaleLinear;

const TICKS: Selector<'static> = Selector {
    kind: ElementKind::Group,
    class: Some("tick"),
};
const DOMAIN: Selector<'static> = Selector {
    kind: ElementKind::Path,
    class: Some("domain"),
};

/// A paint + width pair for stroked axis parts (domain line, tick lines).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisStyle {
    /// Domain line and tick lines.
    pub rule: StrokeStyle,
    /// Tick label fill.
    pub label_fill: Color,
    /// Tick label font size.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: StrokeStyle::default(),
            label_fill: css::BLACK,
            label_font_size: 10.0,
        }
    }
}

/// Styling for tick lines that double as gridlines.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Gridline color.
    pub color: Color,
    /// Gridline dash pattern.
    pub dash: SmallVec<[f64; 4]>,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0xdd, 0xdd, 0xdd),
            dash: SmallVec::from_slice(&[2.0, 2.0]),
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis, ticks pointing up.
    Top,
    /// Horizontal axis, ticks pointing down.
    Bottom,
    /// Vertical axis, ticks pointing left.
    Left,
    /// Vertical axis, ticks pointing right.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `-1` for axes whose ticks point toward negative coordinates.
    fn direction(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }

    fn text_anchor(self) -> &'static str {
        match self {
            Self::Right => "start",
            Self::Left => "end",
            Self::Top | Self::Bottom => "middle",
        }
    }

    fn label_dy(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Bottom => 0.71,
            Self::Left | Self::Right => 0.32,
        }
    }
}

/// Layout and styling of one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Axis placement.
    pub orient: AxisOrient,
    /// Requested number of ticks (the scale picks round values near this count).
    pub tick_count: usize,
    /// Length of tick lines. Negative values extend lines across the plot.
    pub tick_size_inner: f64,
    /// Length of the domain path end caps.
    pub tick_size_outer: f64,
    /// Gap between tick line and label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling for every tick but the first.
    pub grid: Option<GridStyle>,
}

impl AxisSpec {
    /// Creates an axis with 10 requested ticks, tick sizes of 6 and padding of 3.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            grid: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom() -> Self {
        Self::new(AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left() -> Self {
        Self::new(AxisOrient::Left)
    }

    /// Set the requested tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set the inner tick size.
    pub fn with_tick_size_inner(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self
    }

    /// Set the outer tick size (`0` drops the domain end caps).
    pub fn with_tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridline styling.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Draws or updates the axis inside `container`.
    ///
    /// Positions are written with `animate_attr` over `transition`; a zero
    /// duration writes them directly. Either way the committed state is the same.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        container: NodeId,
        scale: &ScaleLinear,
        transition: Duration,
    ) -> Result<JoinSummary, SurfaceError> {
        let orient = self.orient;
        let k = orient.direction();
        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        let values = scale.ticks(self.tick_count);
        let step = scale.tick_step(self.tick_count);
        let ticks: Vec<(f64, f64)> = values.iter().map(|&v| (v, scale.map(v))).collect();

        surface.set_attr(container, Attr::Fill, "none".into())?;
        surface.set_attr(
            container,
            Attr::FontSize,
            self.style.label_font_size.into(),
        )?;
        surface.set_attr(container, Attr::TextAnchor, orient.text_anchor().into())?;

        let domain = match surface.select(container, DOMAIN) {
            Some(node) => node,
            None => {
                let node = surface.create_child(container, ElementKind::Path)?;
                surface.set_attr(node, Attr::Class, "domain".into())?;
                node
            }
        };
        surface.set_attr(domain, Attr::Stroke, self.style.rule.color.into())?;
        surface.set_attr(domain, Attr::StrokeWidth, self.style.rule.width.into())?;
        surface.set_attr(domain, Attr::D, self.domain_path(scale.range()).into())?;

        let style = self.style;
        let summary = join(
            surface,
            container,
            TICKS,
            &ticks,
            |s, tick, _, _| {
                let line = s.create_child(tick, ElementKind::Line)?;
                s.set_attr(line, Attr::StrokeWidth, style.rule.width.into())?;
                let text = s.create_child(tick, ElementKind::Text)?;
                s.set_attr(text, Attr::Fill, style.label_fill.into())?;
                s.set_attr(text, Attr::Dy, orient.label_dy().into())?;
                Ok(())
            },
            |s, tick, i, &(value, pos)| {
                let offset = if orient.is_horizontal() {
                    Affine::translate((pos, 0.0))
                } else {
                    Affine::translate((0.0, pos))
                };
                s.animate_attr(tick, Attr::Transform, offset.into(), transition)?;

                if let Some(line) = s.select(tick, Selector::new(ElementKind::Line)) {
                    let along = if orient.is_horizontal() { Attr::Y2 } else { Attr::X2 };
                    s.animate_attr(line, along, (k * self.tick_size_inner).into(), transition)?;
                    let (stroke, dash) = match &self.grid {
                        Some(grid) if i > 0 => (grid.color, grid.dash.clone()),
                        _ => (style.rule.color, SmallVec::new()),
                    };
                    s.set_attr(line, Attr::Stroke, stroke.into())?;
                    s.set_attr(line, Attr::StrokeDasharray, AttrValue::Dash(dash))?;
                }

                if let Some(text) = s.select(tick, Selector::new(ElementKind::Text)) {
                    let at = if orient.is_horizontal() { Attr::Y } else { Attr::X };
                    s.set_attr(text, at, (k * spacing).into())?;
                    s.set_attr(text, Attr::Content, format_tick(value, step).into())?;
                }
                Ok(())
            },
        )?;
        log::trace!(
            target: "joinplot_charts",
            "{:?} axis: {} ticks, step {step}, {summary:?}",
            orient,
            ticks.len()
        );
        Ok(summary)
    }

    fn domain_path(&self, range: (f64, f64)) -> BezPath {
        let k = self.orient.direction();
        let cap = k * self.tick_size_outer;
        let (r0, r1) = range;
        let mut p = BezPath::new();
        if self.orient.is_horizontal() {
            p.move_to((r0, cap));
            p.line_to((r0, 0.0));
            p.line_to((r1, 0.0));
            p.line_to((r1, cap));
        } else {
            p.move_to((cap, r0));
            p.line_to((0.0, r0));
            p.line_to((0.0, r1));
            p.line_to((cap, r1));
        }
        p
    }
}
