//! 8-bit color packing and sRGB transfer curves.
//!
//! Packed colors hold one channel per byte of a `u32`, red in the lowest
//! byte for the RGB(A) forms and blue in the lowest byte for the BGR(A)
//! forms. Float channels are in `0..=255`; they are clamped and rounded with
//! [`round_positive_to_u32`] when packing. The alpha byte of the RGB/BGR
//! forms is set to 1.
//!
//! ```rust
//! use xform_math::color::{pack_rgba_u32, unpack_rgba_u32};
//! use xform_math::Vec4;
//!
//! let c = Vec4::new(255.0, 128.0, 0.0, 64.0);
//! let packed = pack_rgba_u32(c);
//! assert_eq!(packed, 0x4000_80FF);
//! assert_eq!(unpack_rgba_u32(packed), c);
//! ```

use crate::scalar::{round_positive_to_u32, square};
use crate::vec3::Vec3;
use crate::vec4::Vec4;

const INV_255: f32 = 1.0 / 255.0;

#[inline]
fn channel(c: f32) -> u32 {
    round_positive_to_u32(c).min(0xFF)
}

#[inline]
fn byte(c: u32, shift: u32) -> f32 {
    ((c >> shift) & 0xFF) as f32
}

/// Packs RGB into `0x01BBGGRR`.
pub fn pack_rgb_u32(c: Vec3) -> u32 {
    (1 << 24) | (channel(c.b()) << 16) | (channel(c.g()) << 8) | channel(c.r())
}

/// Packs RGBA into `0xAABBGGRR`.
pub fn pack_rgba_u32(c: Vec4) -> u32 {
    (channel(c.a()) << 24) | (channel(c.b()) << 16) | (channel(c.g()) << 8) | channel(c.r())
}

/// Packs RGB into `0x01RRGGBB`.
pub fn pack_bgr_u32(c: Vec3) -> u32 {
    (1 << 24) | (channel(c.r()) << 16) | (channel(c.g()) << 8) | channel(c.b())
}

/// Packs RGBA into `0xAARRGGBB`.
pub fn pack_bgra_u32(c: Vec4) -> u32 {
    (channel(c.a()) << 24) | (channel(c.r()) << 16) | (channel(c.g()) << 8) | channel(c.b())
}

/// Unpacks `0x__BBGGRR`; the top byte is ignored.
pub fn unpack_rgb_u32(c: u32) -> Vec3 {
    Vec3::new(byte(c, 0), byte(c, 8), byte(c, 16))
}

/// Unpacks `0xAABBGGRR`.
pub fn unpack_rgba_u32(c: u32) -> Vec4 {
    Vec4::new(byte(c, 0), byte(c, 8), byte(c, 16), byte(c, 24))
}

/// Unpacks `0x__RRGGBB`; the top byte is ignored.
pub fn unpack_bgr_u32(c: u32) -> Vec3 {
    Vec3::new(byte(c, 16), byte(c, 8), byte(c, 0))
}

/// Unpacks `0xAARRGGBB`.
pub fn unpack_bgra_u32(c: u32) -> Vec4 {
    Vec4::new(byte(c, 16), byte(c, 8), byte(c, 0), byte(c, 24))
}

/// Gamma-2 approximation of the sRGB decode.
///
/// Input channels in `0..=255`, output in `[0, 1]`; alpha is scaled but not
/// squared.
pub fn srgb_to_linear(c: Vec4) -> Vec4 {
    Vec4::new(
        square(c.r() * INV_255),
        square(c.g() * INV_255),
        square(c.b() * INV_255),
        c.a() * INV_255,
    )
}

/// Gamma-2 approximation of the sRGB encode; inverse of [`srgb_to_linear`].
pub fn linear_to_srgb(c: Vec4) -> Vec4 {
    Vec4::new(
        255.0 * c.r().sqrt(),
        255.0 * c.g().sqrt(),
        255.0 * c.b().sqrt(),
        255.0 * c.a(),
    )
}

/// IEC 61966-2-1 sRGB encode of a linear value clamped to `[0, 1]`.
pub fn exact_linear_to_srgb(l: f32) -> f32 {
    let l = l.clamp(0.0, 1.0);
    if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// [`exact_linear_to_srgb`] per channel.
pub fn exact_linear_to_srgb3(l: Vec3) -> Vec3 {
    Vec3::new(
        exact_linear_to_srgb(l.r()),
        exact_linear_to_srgb(l.g()),
        exact_linear_to_srgb(l.b()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rgb_byte_order() {
        let c = Vec3::new(0x11 as f32, 0x22 as f32, 0x33 as f32);
        assert_eq!(pack_rgb_u32(c), 0x0133_2211);
        assert_eq!(pack_bgr_u32(c), 0x0111_2233);
        assert_eq!(unpack_rgb_u32(0x0133_2211), c);
        assert_eq!(unpack_bgr_u32(0x0111_2233), c);
    }

    #[test]
    fn test_rgba_roundtrip() {
        let c = Vec4::new(10.0, 20.0, 30.0, 255.0);
        assert_eq!(unpack_rgba_u32(pack_rgba_u32(c)), c);
        assert_eq!(unpack_bgra_u32(pack_bgra_u32(c)), c);
        assert_eq!(pack_bgra_u32(c), 0xFF0A_141E);
    }

    #[test]
    fn test_pack_rounds_and_clamps() {
        assert_eq!(pack_rgba_u32(Vec4::new(0.4, 0.5, 254.6, 300.0)), 0xFFFF_0100);
        assert_eq!(pack_rgb_u32(Vec3::new(-5.0, 0.0, 0.0)), 0x0100_0000);
    }

    #[test]
    fn test_gamma2_roundtrip() {
        let c = Vec4::new(255.0, 127.5, 0.0, 51.0);
        let lin = srgb_to_linear(c);
        assert_abs_diff_eq!(lin.r(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lin.g(), 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(lin.a(), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(linear_to_srgb(lin), c, epsilon = 1e-3);
    }

    #[test]
    fn test_exact_srgb_curve() {
        assert_eq!(exact_linear_to_srgb(-1.0), 0.0);
        assert_abs_diff_eq!(exact_linear_to_srgb(1.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(exact_linear_to_srgb(0.002), 0.002 * 12.92);
        assert_abs_diff_eq!(exact_linear_to_srgb(0.5), 0.735_357, epsilon = 1e-5);
        let v = exact_linear_to_srgb3(Vec3::new(0.0, 0.5, 2.0));
        assert_abs_diff_eq!(v, Vec3::new(0.0, 0.735_357, 1.0), epsilon = 1e-5);
    }
}
