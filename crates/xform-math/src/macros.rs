// Operator surface shared by the vector types.
//
// Each operator forwards to the named kernel so `a + b` and `add(a, b)` are
// the same computation.
macro_rules! impl_vector_ops {
    (
        $ty:ident, $n:literal,
        add: $add:expr,
        subtract: $subtract:expr,
        multiply: $multiply:expr,
        divide: $divide:expr,
        inverse: $inverse:expr,
        compare: $compare:expr $(,)?
    ) => {
        impl ::std::ops::Add for $ty {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                ($add)(self, rhs)
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                ($subtract)(self, rhs)
            }
        }

        impl ::std::ops::Mul<f32> for $ty {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                ($multiply)(self, rhs)
            }
        }

        impl ::std::ops::Mul<$ty> for f32 {
            type Output = $ty;

            #[inline]
            fn mul(self, rhs: $ty) -> $ty {
                ($multiply)(rhs, self)
            }
        }

        impl ::std::ops::Div<f32> for $ty {
            type Output = Self;

            #[inline]
            fn div(self, rhs: f32) -> Self {
                ($divide)(self, rhs)
            }
        }

        impl ::std::ops::Neg for $ty {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                ($inverse)(self)
            }
        }

        impl ::std::ops::AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = ($add)(*self, rhs);
            }
        }

        impl ::std::ops::SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = ($subtract)(*self, rhs);
            }
        }

        impl ::std::ops::MulAssign<f32> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = ($multiply)(*self, rhs);
            }
        }

        impl ::std::ops::DivAssign<f32> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = ($divide)(*self, rhs);
            }
        }

        impl PartialEq for $ty {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                ($compare)(*self, *other)
            }
        }

        impl ::std::ops::Index<usize> for $ty {
            type Output = f32;

            #[inline]
            fn index(&self, i: usize) -> &f32 {
                &self.as_array()[i]
            }
        }

        impl ::std::ops::IndexMut<usize> for $ty {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut f32 {
                &mut self.as_array_mut()[i]
            }
        }

        impl From<[f32; $n]> for $ty {
            #[inline]
            fn from(a: [f32; $n]) -> Self {
                Self::from_array(a)
            }
        }

        impl From<$ty> for [f32; $n] {
            #[inline]
            fn from(v: $ty) -> [f32; $n] {
                v.to_array()
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str("[")?;
                for (i, e) in self.as_array().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    ::std::fmt::Display::fmt(e, f)?;
                }
                f.write_str("]")
            }
        }
    };
}

// Compile-time check that a `Pod` type keeps its expected size and alignment.
macro_rules! assert_layout {
    ($ty:ty, $size:expr, $align:expr) => {
        const _: () = assert!(::std::mem::size_of::<$ty>() == $size);
        const _: () = assert!(::std::mem::align_of::<$ty>() == $align);
    };
}
