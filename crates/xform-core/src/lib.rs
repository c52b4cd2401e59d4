//! # xform-core
//!
//! Core types shared by every xform-rs crate.
//!
//! - [`SimdLevel`] and the [`Backend`] marker types - compile-time backend tags
//! - [`Radians`], [`Degrees`] - angle units
//! - [`Error`], [`Result`] - checked-path errors
//! - [`consts`] - `PI`, `TAU`, `HALF_PI`
//!
//! ## Backend tags
//!
//! Every SIMD-eligible kernel in `xform-math` takes a backend marker as a type
//! parameter. The marker resolves at compile time, so there is no branch on the
//! backend in the generated code:
//!
//! ```rust
//! use xform_core::{Backend, DefaultBackend, Scalar, Sse4, SimdLevel};
//!
//! fn level_of<B: Backend>() -> SimdLevel {
//!     B::LEVEL
//! }
//!
//! assert_eq!(level_of::<Scalar>(), SimdLevel::Scalar);
//! assert_eq!(level_of::<Sse4>(), SimdLevel::Sse4);
//! assert!(level_of::<DefaultBackend>() <= SimdLevel::Avx);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! xform-core (this crate)
//!    ^
//!    |
//!    +-- xform-math (vectors, matrices, quaternions, trig)
//!    +-- xform-cli  (level report, backend audit)
//!    +-- xform-bench, xform-tests
//! ```
//!
//! ## Feature Flags
//!
//! - `sse2`, `sse4`, `avx` - raise the compiled-in [`DefaultBackend`]
//! - `force-scalar` - pin [`DefaultBackend`] to [`Scalar`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod angle;
pub mod backend;
pub mod consts;
pub mod error;

// Re-exports for convenience
pub use angle::{Angle, Degrees, Radians};
pub use backend::{
    Avx, Backend, DEFAULT_LEVEL, DefaultBackend, LevelInfo, Scalar, SimdLevel, Sse2, Sse4,
    describe_levels, detect_levels, host_level, verify_host,
};
pub use consts::{HALF_PI, PI, TAU};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use xform_core::prelude::*;
///
/// let quarter = Radians::new(HALF_PI);
/// assert_eq!(Degrees::from(quarter).get().round(), 90.0);
/// ```
pub mod prelude {
    pub use crate::angle::{Angle, Degrees, Radians};
    pub use crate::backend::{Avx, Backend, DefaultBackend, Scalar, SimdLevel, Sse2, Sse4};
    pub use crate::consts::{HALF_PI, PI, TAU};
    pub use crate::error::{Error, Result};
}
