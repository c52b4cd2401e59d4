//! Single-precision angle constants.

/// Archimedes' constant.
pub const PI: f32 = core::f32::consts::PI;

/// Full turn, `2 * PI`.
pub const TAU: f32 = core::f32::consts::TAU;

/// Quarter turn, `PI / 2`.
pub const HALF_PI: f32 = core::f32::consts::FRAC_PI_2;
