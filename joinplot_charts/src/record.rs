// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records, datasets and field lookup.
//!
//! Records have no fixed schema: fields are looked up by name at render time.
//! Lookups never fail. A missing or non-numeric field reads as `NaN`, and a
//! missing field reads as `""` when used as text.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

/// A single field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A number.
    Number(f64),
    /// Text, possibly holding a number (`"5.1"`).
    Text(String),
}

impl Value {
    /// Reads the value as a number, coercing text with [`coerce_number`].
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Text(s) => coerce_number(s),
        }
    }

    /// Reads the value as text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(v) => Cow::Owned(format!("{v}")),
            Self::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Coerces text to a number the way a JavaScript unary `+` does.
///
/// Surrounding whitespace is ignored and blank text is `0`. Accepted forms are
/// decimal literals with an optional sign and exponent, `Infinity` with an
/// optional sign, and unsigned `0x`/`0o`/`0b` integers. Anything else is `NaN`.
pub fn coerce_number(text: &str) -> f64 {
    let t = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if t.is_empty() {
        return 0.0;
    }
    if let Some(v) = radix_integer(t) {
        return v;
    }
    let (negative, unsigned) = match t.as_bytes()[0] {
        b'-' => (true, &t[1..]),
        b'+' => (false, &t[1..]),
        _ => (false, t),
    };
    if unsigned == "Infinity" {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // `str::parse` also takes `inf` and `nan` spellings, which are not numbers here.
    if !unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses `0x1A`, `0o17` or `0b101`; `None` when `t` has no radix prefix.
fn radix_integer(t: &str) -> Option<f64> {
    let radix = match t.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &t[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Read access to named fields.
pub trait FieldLookup {
    /// Returns the field as a number, `NaN` if missing or non-numeric.
    fn number(&self, field: &str) -> f64;

    /// Returns the field as text, `""` if missing.
    fn text(&self, field: &str) -> Cow<'_, str>;
}

/// One row of a dataset: a field name → value mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the record (builder style).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldLookup for Record {
    fn number(&self, field: &str) -> f64 {
        self.get(field).map_or(f64::NAN, Value::as_number)
    }

    fn text(&self, field: &str) -> Cow<'_, str> {
        self.get(field).map_or(Cow::Borrowed(""), Value::as_text)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// An ordered sequence of records.
///
/// Datasets are replaced wholesale; nothing diffs one dataset against another.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Returns the records in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the largest numeric value of `field`, ignoring `NaN`.
    ///
    /// Returns `None` if no record yields a number.
    pub fn max_number(&self, field: &str) -> Option<f64> {
        self.iter()
            .map(|r| r.number(field))
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// Returns the distinct text values of `field` in first-seen order.
    pub fn distinct_text(&self, field: &str) -> Vec<String> {
        let mut seen: HashSet<Cow<'_, str>> = HashSet::new();
        let mut out = Vec::new();
        for record in &self.records {
            let v = record.text(field);
            if seen.insert(v.clone()) {
                out.push(v.into_owned());
            }
        }
        out
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
