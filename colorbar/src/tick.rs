// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick values and labels.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::format::format_significant;

/// An annotated domain value drawn as a mark plus a label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Value in domain units.
    pub value: f64,
    /// Explicit label; `None` uses the default number formatting.
    pub label: Option<String>,
}

impl Tick {
    /// A tick labelled with its formatted value.
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    /// A tick with an explicit label.
    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }

    /// Returns the label to draw, formatting the value when no label was given.
    pub fn label_text(&self, precision: usize) -> Cow<'_, str> {
        match &self.label {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(format_significant(self.value, precision)),
        }
    }
}

impl From<f64> for Tick {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Returns `count` values evenly spaced over `[min, min + span]`, ends included.
///
/// Counts below 2 are raised to 2 so both domain ends are always marked.
pub fn default_tick_values(min: f64, span: f64, count: usize) -> Vec<f64> {
    let count = count.max(2);
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                min + span
            } else {
                min + span * (i as f64 / last)
            }
        })
        .collect()
}
