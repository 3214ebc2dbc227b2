// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles, element kinds and typed attributes.

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, BezPath, Rect};
use peniko::Color;
use smallvec::SmallVec;

/// An opaque handle to a node on a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// The kind of element a node represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The page-level container the chart is embedded in.
    Host,
    /// The drawing surface itself.
    Svg,
    /// A grouping element carrying a transform.
    Group,
    /// A circle, positioned by `cx`/`cy` with radius `r`.
    Circle,
    /// A line from the local origin to `x2`/`y2`.
    Line,
    /// An arbitrary path (`d`).
    Path,
    /// A text run (`Content`).
    Text,
}

impl ElementKind {
    /// Returns the SVG tag name for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Host => "div",
            Self::Svg => "svg",
            Self::Group => "g",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Path => "path",
            Self::Text => "text",
        }
    }
}

/// Attribute names understood by a [`Surface`](crate::Surface).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attr {
    /// Logical coordinate system of an `svg` element.
    ViewBox,
    /// Whitespace-separated class list.
    Class,
    /// Local transform.
    Transform,
    /// Circle center x.
    Cx,
    /// Circle center y.
    Cy,
    /// Circle radius.
    R,
    /// Text x offset.
    X,
    /// Text y offset.
    Y,
    /// Line end x.
    X2,
    /// Line end y.
    Y2,
    /// Baseline shift of a text run, in `em`.
    Dy,
    /// Path geometry.
    D,
    /// Fill paint.
    Fill,
    /// Stroke paint.
    Stroke,
    /// Stroke width.
    StrokeWidth,
    /// Dash pattern for strokes.
    StrokeDasharray,
    /// Element opacity.
    Opacity,
    /// Font size.
    FontSize,
    /// Horizontal text anchor (`start`, `middle`, `end`).
    TextAnchor,
    /// Text content of a text element.
    Content,
}

impl Attr {
    /// Returns the SVG attribute name, or `None` for [`Attr::Content`].
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::ViewBox => "viewBox",
            Self::Class => "class",
            Self::Transform => "transform",
            Self::Cx => "cx",
            Self::Cy => "cy",
            Self::R => "r",
            Self::X => "x",
            Self::Y => "y",
            Self::X2 => "x2",
            Self::Y2 => "y2",
            Self::Dy => "dy",
            Self::D => "d",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "stroke-width",
            Self::StrokeDasharray => "stroke-dasharray",
            Self::Opacity => "opacity",
            Self::FontSize => "font-size",
            Self::TextAnchor => "text-anchor",
            Self::Content => return None,
        })
    }
}

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A plain number.
    Number(f64),
    /// A string (classes, anchors, text content).
    Text(String),
    /// A solid color.
    Color(Color),
    /// A rectangle (view boxes).
    Rect(Rect),
    /// An affine transform.
    Transform(Affine),
    /// A stroke dash pattern.
    Dash(SmallVec<[f64; 4]>),
    /// Path geometry.
    Path(BezPath),
}

impl AttrValue {
    /// Returns the number if this is a [`AttrValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string if this is a [`AttrValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the color if this is a [`AttrValue::Color`].
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the transform if this is a [`AttrValue::Transform`].
    pub fn as_transform(&self) -> Option<Affine> {
        match self {
            Self::Transform(a) => Some(*a),
            _ => None,
        }
    }

    /// Interpolates between two values at `t` in `[0, 1]`.
    ///
    /// Numbers and transforms interpolate component-wise; everything else
    /// (and mismatched variants) snaps to `to`.
    pub fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        match (from, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(a + (b - a) * t),
            (Self::Transform(a), Self::Transform(b)) => {
                let a = a.as_coeffs();
                let b = b.as_coeffs();
                let mut out = [0.0; 6];
                for (i, c) in out.iter_mut().enumerate() {
                    *c = a[i] + (b[i] - a[i]) * t;
                }
                Self::Transform(Affine::new(out))
            }
            _ => to.clone(),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Rect> for AttrValue {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

impl From<Affine> for AttrValue {
    fn from(value: Affine) -> Self {
        Self::Transform(value)
    }
}

impl From<BezPath> for AttrValue {
    fn from(value: BezPath) -> Self {
        Self::Path(value)
    }
}

/// Matches elements by kind and (optionally) a class token.
///
/// `Selector::new(ElementKind::Circle).with_class("data")` is the equivalent
/// of the CSS selector `circle.data`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selector<'a> {
    /// Element kind to match.
    pub kind: ElementKind,
    /// Class token that must appear in the element's class list.
    pub class: Option<&'a str>,
}

impl<'a> Selector<'a> {
    /// Matches every element of `kind`.
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, class: None }
    }

    /// Restricts the selector to elements carrying `class`.
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Returns `true` if an element of `kind` with the given class list matches.
    pub fn matches(&self, kind: ElementKind, class_list: Option<&str>) -> bool {
        if kind != self.kind {
            return false;
        }
        match self.class {
            None => true,
            Some(want) => class_list.is_some_and(|list| list.split_whitespace().any(|c| c == want)),
        }
    }
}
