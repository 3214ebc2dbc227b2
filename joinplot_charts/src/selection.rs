// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field selection and derived scatter points.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use crate::error::ChartError;
use crate::record::{Dataset, FieldLookup};

/// One of the two positional axes a field can be mapped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisName {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl FromStr for AxisName {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(ChartError::UnknownAxis(other.to_string())),
        }
    }
}

/// The fields currently mapped to the x and y axes.
///
/// Both start unset. Setting an axis to an empty name clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSelection {
    x: Option<String>,
    y: Option<String>,
}

impl FieldSelection {
    /// Creates a selection with both axes set.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        let x: String = x.into();
        let y: String = y.into();
        let mut s = Self::default();
        s.set(AxisName::X, Some(&x));
        s.set(AxisName::Y, Some(&y));
        s
    }

    /// Sets or clears the field for `axis`.
    pub fn set(&mut self, axis: AxisName, field: Option<&str>) {
        let field = field.filter(|f| !f.is_empty()).map(String::from);
        match axis {
            AxisName::X => self.x = field,
            AxisName::Y => self.y = field,
        }
    }

    /// Returns the field mapped to `axis`.
    pub fn get(&self, axis: AxisName) -> Option<&str> {
        match axis {
            AxisName::X => self.x.as_deref(),
            AxisName::Y => self.y.as_deref(),
        }
    }

    /// Returns the x field.
    pub fn x(&self) -> Option<&str> {
        self.x.as_deref()
    }

    /// Returns the y field.
    pub fn y(&self) -> Option<&str> {
        self.y.as_deref()
    }

    /// Returns both fields if both are set.
    pub fn both(&self) -> Option<(&str, &str)> {
        Some((self.x.as_deref()?, self.y.as_deref()?))
    }
}

/// A point derived from one record under the current selection.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    /// Value of the x field (`NaN` if missing or non-numeric).
    pub x: f64,
    /// Value of the y field (`NaN` if missing or non-numeric).
    pub y: f64,
    /// Value of the category field (`""` if missing).
    pub category: String,
}

/// Derives one point per record, or none if either axis is unset.
///
/// Records are never dropped: malformed values come through as `NaN`.
pub fn scatter_points(
    data: &Dataset,
    selection: &FieldSelection,
    category_field: &str,
) -> Vec<ScatterPoint> {
    let Some((x, y)) = selection.both() else {
        return Vec::new();
    };
    data.iter()
        .map(|r| ScatterPoint {
            x: r.number(x),
            y: r.number(y),
            category: r.text(category_field).into_owned(),
        })
        .collect()
}
