//! The numeric abstraction every geometric type in this crate is generic
//! over. Unlike `lyon_geom`'s private `scalar` module (which bounds on
//! `num_traits::Float` and therefore only ever supports `f32`/`f64`), this
//! trait deliberately avoids requiring `Float` so that a fixed-point type
//! (see [`Fixed`](crate::Fixed)) can implement it too, per the numeric
//! parameterization requirement of the engine this crate backs.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// A numeric type usable as vertex coordinates throughout the tessellation
/// core.
///
/// Implementors must compare with their native `==`/`<`/`>` — classification
/// predicates in the planarizer rely on exact equality, never an epsilon.
pub trait Scalar:
    Copy
    + Clone
    + Debug
    + PartialOrd
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Absolute value.
    fn abs(self) -> Self {
        if self < Self::ZERO {
            -self
        } else {
            self
        }
    }

    /// Sign of `self`: `-1`, `0` or `1`, expressed in `Self`.
    fn signum(self) -> i32 {
        if self > Self::ZERO {
            1
        } else if self < Self::ZERO {
            -1
        } else {
            0
        }
    }

    /// Square root, used only by the stroke tessellator's normal
    /// computation. Fixed-point implementations may round-trip through
    /// `f64`; this is acceptable since it only affects offset vertex
    /// placement, never a topological decision.
    fn sqrt(self) -> Self;

    /// Lossy conversion to `f64`, used for reporting and for the
    /// round-trip `sqrt` fallback.
    fn to_f64(self) -> f64;

    /// Lossy conversion from `f64`.
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_scalar_float {
    ($t:ty, $libm_sqrt:path) => {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                #[cfg(feature = "std")]
                {
                    <$t>::sqrt(self)
                }
                #[cfg(not(feature = "std"))]
                {
                    $libm_sqrt(self)
                }
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }
        }
    };
}

impl_scalar_float!(f32, libm::sqrtf);
impl_scalar_float!(f64, libm::sqrt);
