// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales.
//!
//! Every pipeline run rebuilds its scales from the current dataset and field
//! selection; nothing is carried over between runs.
//!
//! - x: `[0, max(x field)]` → `[0, inner_width]`
//! - y: `[0, max(y field)]` → `[inner_height, 0]` (larger values render higher)
//! - color: distinct categories in first-seen order → palette, wrapping around.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::palette::css;

use crate::dimensions::Dimensions;
use crate::record::Dataset;
use crate::selection::FieldSelection;

/// The ten-color categorical palette used by default.
pub const CATEGORY10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

/// Converts RGB triples to colors.
pub fn palette_colors(rgb: &[[u8; 3]]) -> Vec<Color> {
    rgb.iter()
        .map(|[r, g, b]| Color::from_rgb8(*r, *g, *b))
        .collect()
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the middle of the range; `NaN`
    /// stays `NaN`.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        let t = if denom == 0.0 {
            0.5
        } else if denom.is_nan() {
            f64::NAN
        } else {
            (x - d0) / denom
        };
        r0 + t * (r1 - r0)
    }

    /// Returns roughly `count` round tick values inside the domain.
    ///
    /// A domain with a non-finite bound has no ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the spacing between the values [`ScaleLinear::ticks`] produces.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }
}

const E10: f64 = 7.071_067_811_865_475;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = 1.414_213_562_373_095_1;

/// Returns `(i1, i2, inc)`; a negative `inc` means ticks are `i / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powi(clamp_exponent(power));
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10_f64.powi(clamp_exponent(-power)) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10_f64.powi(clamp_exponent(power)) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn clamp_exponent(power: f64) -> i32 {
    if !power.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
    {
        power.clamp(-400.0, 400.0) as i32
    }
}

fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n_f = (i2 - i1 + 1.0).min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by the i2 >= i1 check and capped at 10k"
    )]
    let n = n_f as usize;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            let k = if reverse {
                i2 - i as f64
            } else {
                i1 + i as f64
            };
            value(k)
        })
        .collect()
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count as f64);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// A discrete mapping from category names to colors.
///
/// Categories are assigned palette slots in domain order; the palette wraps
/// when there are more categories than colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    palette: Vec<Color>,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale over `domain` (duplicates keep their first slot).
    pub fn new(domain: Vec<String>, palette: Vec<Color>) -> Self {
        let mut index = HashMap::with_capacity(domain.len());
        let mut unique = Vec::with_capacity(domain.len());
        for name in domain {
            if !index.contains_key(&name) {
                index.insert(name.clone(), unique.len());
                unique.push(name);
            }
        }
        Self {
            domain: unique,
            index,
            palette,
        }
    }

    /// Returns the categories in slot order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns the palette.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Returns the color of `category`.
    ///
    /// A category outside the domain gets the slot it would take if appended.
    pub fn color(&self, category: &str) -> Color {
        if self.palette.is_empty() {
            return css::BLACK;
        }
        let slot = self
            .index
            .get(category)
            .copied()
            .unwrap_or(self.domain.len());
        self.palette[slot % self.palette.len()]
    }
}

/// Upper domain bound for a field: its maximum, or `1` when unset or absent.
pub fn domain_max(data: &Dataset, field: Option<&str>) -> f64 {
    field.and_then(|f| data.max_number(f)).unwrap_or(1.0)
}

/// The scales of one pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct Scales {
    /// Horizontal position scale.
    pub x: ScaleLinear,
    /// Vertical position scale (inverted range).
    pub y: ScaleLinear,
    /// Category color scale.
    pub color: ScaleOrdinal,
}

impl Scales {
    /// Builds all three scales from the current dataset, selection and dimensions.
    pub fn build(
        data: &Dataset,
        selection: &FieldSelection,
        dims: &Dimensions,
        category_field: &str,
        palette: Vec<Color>,
    ) -> Self {
        let x = ScaleLinear::new(
            (0.0, domain_max(data, selection.x())),
            (0.0, dims.inner_width),
        );
        let y = ScaleLinear::new(
            (0.0, domain_max(data, selection.y())),
            (dims.inner_height, 0.0),
        );
        let color = ScaleOrdinal::new(data.distinct_text(category_field), palette);
        log::trace!(
            target: "joinplot_charts",
            "scales: x {:?} -> {:?}, y {:?} -> {:?}, {} categories",
            x.domain,
            x.range,
            y.domain,
            y.range,
            color.domain.len()
        );
        Self { x, y, color }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::record::Record;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn linear_maps_domain_onto_range() {
        let s = ScaleLinear::new((0.0, 4.0), (350.0, 0.0));
        assert_eq!(s.map(0.0), 350.0);
        assert_eq!(s.map(4.0), 0.0);
        assert_eq!(s.map(2.0), 175.0);
        assert!(s.map(f64::NAN).is_nan());
    }

    #[test]
    fn zero_width_domain_maps_to_range_middle() {
        let s = ScaleLinear::new((0.0, 0.0), (0.0, 100.0));
        assert_eq!(s.map(0.0), 50.0);
        assert_eq!(s.map(42.0), 50.0);
    }

    #[test]
    fn ticks_stay_inside_the_domain() {
        assert!(close(
            &ScaleLinear::new((0.0, 1.0), (0.0, 1.0)).ticks(10),
            &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        ));
        assert!(close(
            &ScaleLinear::new((0.0, 7.9), (0.0, 1.0)).ticks(5),
            &[0.0, 2.0, 4.0, 6.0]
        ));
        assert!(close(
            &ScaleLinear::new((0.0, 4.4), (0.0, 1.0)).ticks(5),
            &[0.0, 1.0, 2.0, 3.0, 4.0]
        ));
        let fifths: Vec<f64> = (0..=15).map(|i| f64::from(i) * 0.2).collect();
        assert!(close(
            &ScaleLinear::new((0.0, 3.0), (0.0, 1.0)).ticks(10),
            &fifths
        ));
        assert_eq!(ScaleLinear::new((0.0, 0.0), (0.0, 1.0)).ticks(5), [0.0]);
        assert!(ScaleLinear::new((0.0, 1.0), (0.0, 1.0)).ticks(0).is_empty());
    }

    #[test]
    fn reversed_domains_tick_downward() {
        assert!(close(
            &ScaleLinear::new((0.0, -10.0), (0.0, 1.0)).ticks(5),
            &[0.0, -2.0, -4.0, -6.0, -8.0, -10.0]
        ));
        assert_eq!(ScaleLinear::new((0.0, -10.0), (0.0, 1.0)).tick_step(5), -2.0);
    }

    #[test]
    fn non_finite_domains_have_no_ticks() {
        for domain in [(0.0, f64::INFINITY), (f64::NEG_INFINITY, 0.0), (0.0, f64::NAN)] {
            let s = ScaleLinear::new(domain, (0.0, 1.0));
            assert!(s.ticks(10).is_empty(), "{domain:?}");
            assert_eq!(s.tick_step(10), 0.0);
        }
    }

    #[test]
    fn tick_step_matches_tick_spacing() {
        assert_eq!(ScaleLinear::new((0.0, 7.9), (0.0, 1.0)).tick_step(5), 2.0);
        assert!((ScaleLinear::new((0.0, 1.0), (0.0, 1.0)).tick_step(10) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn ordinal_assigns_in_first_seen_order_and_wraps() {
        let names: Vec<String> = (0..12).map(|i| alloc::format!("c{i}")).collect();
        let s = ScaleOrdinal::new(names, palette_colors(&CATEGORY10));
        assert_eq!(s.color("c0"), Color::from_rgb8(0x1f, 0x77, 0xb4));
        assert_eq!(s.color("c1"), Color::from_rgb8(0xff, 0x7f, 0x0e));
        assert_eq!(s.color("c10"), s.color("c0"));
        assert_eq!(s.color("c11"), s.color("c1"));
        // Unknown categories take the next implicit slot.
        assert_eq!(s.color("nope"), s.color("c2"));
    }

    #[test]
    fn example_domains_follow_field_maxima() {
        let data: Dataset = vec![
            Record::new().with("x", "1").with("y", "2").with("Species", "a"),
            Record::new().with("x", "3").with("y", "4").with("Species", "b"),
        ]
        .into();
        let dims = Dimensions {
            width: 600.0,
            height: 400.0,
            inner_width: 540.0,
            inner_height: 350.0,
        };
        let palette = palette_colors(&CATEGORY10);

        let s = Scales::build(&data, &FieldSelection::new("x", "y"), &dims, "Species", palette.clone());
        assert_eq!(s.x.domain(), (0.0, 3.0));
        assert_eq!(s.y.domain(), (0.0, 4.0));
        assert_eq!(s.x.range(), (0.0, 540.0));
        assert_eq!(s.y.range(), (350.0, 0.0));
        assert_eq!(s.color.domain(), ["a", "b"]);

        let s = Scales::build(&data, &FieldSelection::default(), &dims, "Species", palette);
        assert_eq!(s.x.domain(), (0.0, 1.0));
        assert_eq!(s.y.domain(), (0.0, 1.0));
    }

    #[test]
    fn domain_max_falls_back_to_one() {
        let data: Dataset = vec![Record::new().with("x", "abc")].into();
        assert_eq!(domain_max(&data, None), 1.0);
        assert_eq!(domain_max(&data, Some("x")), 1.0);
        assert_eq!(domain_max(&Dataset::default(), Some("x")), 1.0);
    }
}
