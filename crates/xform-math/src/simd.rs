//! Lane helpers shared by the SIMD kernels.
//!
//! Thin wrappers over [`wide`] registers: horizontal sums in the two orders
//! the 4-lane backends use, all-lane equality masks, and the packing used by
//! the 8-lane matrix kernels.

use wide::{CmpEq, f32x4, f32x8};
use xform_core::SimdLevel;

/// Sign bits of the x, y and z lanes; XOR negates those three lanes.
pub(crate) const XYZ_SIGN_MASK: [f32; 4] = [-0.0, -0.0, -0.0, 0.0];

/// Horizontal sum folded as `(x + z) + (y + w)`.
///
/// Emulates the movehl/shuffle sequence available before dedicated
/// horizontal instructions.
#[inline]
pub(crate) fn hsum_pairwise(v: f32x4) -> f32 {
    let [x, y, z, w] = v.to_array();
    let folded = (v + f32x4::from([z, w, x, y])).to_array();
    folded[0] + folded[1]
}

/// Horizontal sum as a single full-register reduction.
#[inline]
pub(crate) fn hsum_full(v: f32x4) -> f32 {
    v.reduce_add()
}

/// Horizontal sum in the order used by `level`.
#[inline]
pub(crate) fn hsum(level: SimdLevel, v: f32x4) -> f32 {
    match level {
        SimdLevel::Sse2 => hsum_pairwise(v),
        _ => hsum_full(v),
    }
}

/// True when every one of the 4 lanes compares equal.
#[inline]
pub(crate) fn all_eq_x4(a: f32x4, b: f32x4) -> bool {
    a.cmp_eq(b).move_mask() == 0b1111
}

/// True when every one of the 8 lanes compares equal.
#[inline]
pub(crate) fn all_eq_x8(a: f32x8, b: f32x8) -> bool {
    a.cmp_eq(b).move_mask() == 0xFF
}

/// Packs two 4-lane values into one 8-lane register, `lo` first.
#[inline]
pub(crate) fn join(lo: [f32; 4], hi: [f32; 4]) -> f32x8 {
    f32x8::from([lo[0], lo[1], lo[2], lo[3], hi[0], hi[1], hi[2], hi[3]])
}

/// Splits an 8-lane register into its low and high halves.
#[inline]
pub(crate) fn split(v: f32x8) -> ([f32; 4], [f32; 4]) {
    let a = v.to_array();
    ([a[0], a[1], a[2], a[3]], [a[4], a[5], a[6], a[7]])
}

/// `lo` broadcast over the low half, `hi` over the high half.
#[inline]
pub(crate) fn broadcast_pair(lo: f32, hi: f32) -> f32x8 {
    f32x8::from([lo, lo, lo, lo, hi, hi, hi, hi])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsum_orders() {
        let v = f32x4::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hsum_pairwise(v), 10.0);
        assert_eq!(hsum_full(v), 10.0);
        assert_eq!(hsum(SimdLevel::Sse2, v), hsum(SimdLevel::Avx, v));
    }

    #[test]
    fn test_mask_checks_every_lane() {
        let a = f32x4::from([1.0, 2.0, 3.0, 4.0]);
        assert!(all_eq_x4(a, a));
        // A difference confined to the last lane must still be seen
        assert!(!all_eq_x4(a, f32x4::from([1.0, 2.0, 3.0, 5.0])));

        let b = join([1.0; 4], [2.0; 4]);
        assert!(all_eq_x8(b, b));
        assert!(!all_eq_x8(b, join([1.0; 4], [2.0, 2.0, 2.0, 0.0])));
        assert!(!all_eq_x8(b, join([0.0, 1.0, 1.0, 1.0], [2.0; 4])));
    }

    #[test]
    fn test_join_split() {
        let (lo, hi) = split(join([1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]));
        assert_eq!(lo, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hi, [5.0, 6.0, 7.0, 8.0]);
        assert_eq!(split(broadcast_pair(1.5, -2.0)), ([1.5; 4], [-2.0; 4]));
    }

    #[test]
    fn test_sign_mask_spares_w() {
        let v = f32x4::from([1.0, -2.0, 3.0, 4.0]) ^ f32x4::from(XYZ_SIGN_MASK);
        assert_eq!(v.to_array(), [-1.0, 2.0, -3.0, 4.0]);
    }
}
