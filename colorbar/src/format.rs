// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.
//!
//! Default labels follow printf's `%.Ng` rules: round to `N` significant digits,
//! print in plain decimal when the exponent fits, otherwise in exponent form,
//! and drop trailing zeros either way.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

/// Formats `value` with `precision` significant digits in `%g` style.
///
/// `precision` below 1 is treated as 1. Negative zero prints as `"0"`.
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // The exponent must come from the rounded value: 9.96 at two digits is 1.0e1.
    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    let precision = i32::try_from(precision).unwrap_or(i32::MAX);
    if exp < -4 || exp >= precision {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exp.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(precision - 1 - exp).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
