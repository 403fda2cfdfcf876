// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use thiserror::Error;

/// Errors returned by [`crate::Colorbar::new`].
///
/// Painting never fails; every check happens once, while the legend geometry
/// is derived.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorbarError {
    /// The color mapping has no stops.
    #[error("color mapping has no stops")]
    EmptyMapping,
    /// Every stop sits at the same position, so the domain has zero span.
    #[error("color mapping domain is degenerate: every stop is at {value}")]
    DegenerateDomain {
        /// The shared stop position.
        value: f64,
    },
    /// The stops are finite but `max - min` overflows to infinity.
    #[error("color mapping domain [{min}, {max}] is too wide to represent")]
    DomainOverflow {
        /// Smallest stop position.
        min: f64,
        /// Largest stop position.
        max: f64,
    },
    /// A stop position is NaN or infinite.
    #[error("stop {index} has a non-finite position ({position})")]
    NonFiniteStop {
        /// Index of the offending stop.
        index: usize,
        /// The offending position.
        position: f64,
    },
    /// A caller-supplied tick value is NaN or infinite.
    #[error("tick {index} has a non-finite value ({value})")]
    NonFiniteTick {
        /// Index of the offending tick.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// The bar width or height is not a finite positive number.
    #[error("invalid colorbar size {width}x{height}")]
    InvalidSize {
        /// Requested bar width.
        width: f64,
        /// Requested bar height.
        height: f64,
    },
}
