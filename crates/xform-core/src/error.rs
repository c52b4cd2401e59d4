//! Error types for the checked kernel paths.
//!
//! The kernels in `xform-math` treat degenerate input (dividing by zero,
//! normalizing a zero vector, extracting an axis from a zero rotation) as a
//! caller contract violation: debug builds assert, release builds let the
//! resulting NaN/Inf propagate. The `try_*` companions of those kernels report
//! the same conditions through [`Error`] instead.
//!
//! # Usage
//!
//! ```rust
//! use xform_core::{Error, Result};
//!
//! fn checked_ratio(num: f32, den: f32) -> Result<f32> {
//!     if den == 0.0 {
//!         return Err(Error::DivisionByZero);
//!     }
//!     Ok(num / den)
//! }
//!
//! assert!(checked_ratio(1.0, 0.0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive for [`std::error::Error`] and [`std::fmt::Display`]
//!
//! # Used By
//!
//! - `xform-math` - `try_divide`, `try_normalize`, `Quat::try_to_axis`
//! - [`crate::backend`] - level parsing and host verification

use thiserror::Error;

use crate::backend::SimdLevel;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by checked kernels and backend configuration.
///
/// # Categories
///
/// - **Numeric preconditions**: [`DivisionByZero`](Error::DivisionByZero),
///   [`ZeroLength`](Error::ZeroLength),
///   [`DegenerateRotation`](Error::DegenerateRotation)
/// - **Backend configuration**: [`UnknownLevel`](Error::UnknownLevel),
///   [`UnsupportedLevel`](Error::UnsupportedLevel)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A scalar divisor was exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A vector or quaternion with zero magnitude cannot be normalized.
    #[error("cannot normalize a zero-length value")]
    ZeroLength,

    /// The rotation angle is 0 (or a full turn) so no unique axis exists.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xform_core::Error;
    ///
    /// let err = Error::DegenerateRotation { w: 1.0 };
    /// assert!(err.to_string().contains("w = 1"));
    /// ```
    #[error("degenerate rotation: quaternion with w = {w} has no unique axis")]
    DegenerateRotation {
        /// Scalar part of the offending quaternion
        w: f32,
    },

    /// A SIMD level name could not be parsed.
    #[error("unknown SIMD level '{0}' (expected scalar, sse2, sse4 or avx)")]
    UnknownLevel(String),

    /// The running CPU cannot execute the requested level natively.
    #[error("SIMD level {required} is not supported by this CPU (best available: {available})")]
    UnsupportedLevel {
        /// Level that was requested or compiled in
        required: SimdLevel,
        /// Best level the host executes natively
        available: SimdLevel,
    },
}
