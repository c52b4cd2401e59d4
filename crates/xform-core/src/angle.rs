//! Angle unit types.
//!
//! [`Radians`] and [`Degrees`] are distinct newtypes so an angle in one unit
//! cannot be passed where the other is expected. Every angle-taking API in
//! xform-rs is generic over [`Angle`] and converts to radians internally.
//!
//! ```rust
//! use xform_core::{Angle, Degrees, Radians, HALF_PI};
//!
//! let a = Degrees::new(90.0);
//! let b: Radians = a.into();
//! assert!((b.get() - HALF_PI).abs() < 1e-6);
//! assert!((a.to_radians().get() - b.get()).abs() < 1e-6);
//!
//! // Raw scalar for math
//! let raw: f32 = b.into();
//! assert!((raw.sin() - 1.0).abs() < 1e-6);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::consts::PI;

/// An angle measured in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Radians(f32);

/// An angle measured in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(f32);

/// Any angle unit that can be expressed in radians.
pub trait Angle: Copy {
    /// Converts the angle to radians.
    fn to_radians(self) -> Radians;
}

impl Radians {
    /// Wraps a raw radian value.
    #[inline]
    pub const fn new(angle: f32) -> Self {
        Self(angle)
    }

    /// Converts a raw degree value to radians.
    #[inline]
    pub fn from_degrees(angle: f32) -> Self {
        Self(angle * (PI / 180.0))
    }

    /// Returns the raw radian value.
    #[inline]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Degrees {
    /// Wraps a raw degree value.
    #[inline]
    pub const fn new(angle: f32) -> Self {
        Self(angle)
    }

    /// Converts a raw radian value to degrees.
    #[inline]
    pub fn from_radians(angle: f32) -> Self {
        Self(angle * (180.0 / PI))
    }

    /// Returns the raw degree value.
    #[inline]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Angle for Radians {
    #[inline]
    fn to_radians(self) -> Radians {
        self
    }
}

impl Angle for Degrees {
    #[inline]
    fn to_radians(self) -> Radians {
        Radians::from_degrees(self.0)
    }
}

impl From<Degrees> for Radians {
    #[inline]
    fn from(d: Degrees) -> Self {
        Radians::from_degrees(d.0)
    }
}

impl From<Radians> for Degrees {
    #[inline]
    fn from(r: Radians) -> Self {
        Degrees::from_radians(r.0)
    }
}

impl From<Radians> for f32 {
    #[inline]
    fn from(r: Radians) -> f32 {
        r.0
    }
}

impl From<Degrees> for f32 {
    #[inline]
    fn from(d: Degrees) -> f32 {
        d.0
    }
}

macro_rules! impl_angle_ops {
    ($t:ident) => {
        impl Neg for $t {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Add for $t {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $t {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f32> for $t {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f32> for $t {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_angle_ops!(Radians);
impl_angle_ops!(Degrees);

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rad", self.0)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degrees_to_radians() {
        assert_relative_eq!(Radians::from(Degrees::new(180.0)).get(), PI);
        assert_relative_eq!(Degrees::new(45.0).to_radians().get(), PI / 4.0);
    }

    #[test]
    fn test_radians_to_degrees() {
        assert_relative_eq!(Degrees::from(Radians::new(PI)).get(), 180.0);
        assert_relative_eq!(Degrees::from_radians(-PI / 2.0).get(), -90.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Radians::new(1.0) + Radians::new(0.5);
        assert_eq!(a, Radians::new(1.5));
        assert_eq!(-a, Radians::new(-1.5));
        assert_eq!(a / 2.0, Radians::new(0.75));
        assert_eq!(Degrees::new(30.0) * 3.0, Degrees::new(90.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Radians::new(1.5).to_string(), "1.5 rad");
        assert_eq!(Degrees::new(90.0).to_string(), "90°");
    }
}
