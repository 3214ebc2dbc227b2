// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Number of decimals needed to tell ticks `step` apart.
pub(crate) fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exp = step.abs().log10().floor();
    if exp >= 0.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "negative exponent of a finite f64 is bounded by ~324"
    )]
    {
        (-exp) as usize
    }
}

/// Formats a tick value with fixed precision derived from `step` and `,` thousands grouping.
///
/// `format_tick(1500.0, 500.0) == "1,500"`, `format_tick(0.4, 0.2) == "0.4"`.
pub fn format_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let precision = precision_for_step(step);
    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let mut out = String::with_capacity(fixed.len() + 4);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn precision_follows_the_step() {
        assert_eq!(precision_for_step(1.0), 0);
        assert_eq!(precision_for_step(50.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.2), 1);
        assert_eq!(precision_for_step(0.05), 2);
        assert_eq!(precision_for_step(0.0), 0);
    }

    #[test]
    fn formats_with_grouping_and_fixed_decimals() {
        assert_eq!(format_tick(0.0, 1.0), "0");
        assert_eq!(format_tick(1500.0, 500.0), "1,500");
        assert_eq!(format_tick(1_234_567.0, 1.0), "1,234,567");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(2.0, 0.5), "2.0");
        assert_eq!(format_tick(-20.0, 10.0), "-20");
        assert_eq!(format_tick(-0.0, 1.0), "0");
    }
}
