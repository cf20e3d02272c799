use crate::scalar::Scalar;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// A fixed-point numeric type with `BITS` fractional bits, backed by `i64`.
///
/// This is the second `Scalar` implementation spec §9 asks for alongside
/// IEEE floats, exposing `to_fixed(real, bits)` and the exact
/// equality/comparison contract the planarizer's classification predicates
/// require. `BITS` is a const generic so `Fixed<16>` and `Fixed<8>` are
/// distinct, non-interconvertible types, matching the spec's "configurable
/// fractional bits" wording.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fixed<const BITS: u32>(pub i64);

impl<const BITS: u32> Fixed<BITS> {
    /// Converts a real number to its nearest fixed-point representation
    /// with `BITS` fractional bits, per spec §9's `to_fixed(real, bits)`.
    #[inline]
    pub fn to_fixed(real: f64, bits: u32) -> Self {
        debug_assert_eq!(bits, BITS, "Fixed::<BITS> called with mismatched bit count");
        Fixed((real * (1i64 << BITS) as f64).round() as i64)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1i64 << BITS) as f64
    }
}

impl<const BITS: u32> Add for Fixed<BITS> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fixed(self.0 + rhs.0)
    }
}

impl<const BITS: u32> Sub for Fixed<BITS> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fixed(self.0 - rhs.0)
    }
}

impl<const BITS: u32> Mul for Fixed<BITS> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Widen to i128 so the product of two Q(BITS) values, which carries
        // 2*BITS fractional bits, doesn't overflow before being rescaled
        // back down to BITS fractional bits (spec §4.1 failure modes: numeric
        // overflow in this step is the caller's responsibility for a given
        // coordinate range, this widening just buys headroom).
        let product = (self.0 as i128) * (rhs.0 as i128);
        Fixed((product >> BITS) as i64)
    }
}

impl<const BITS: u32> Div for Fixed<BITS> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let numerator = (self.0 as i128) << BITS;
        Fixed((numerator / rhs.0 as i128) as i64)
    }
}

impl<const BITS: u32> Neg for Fixed<BITS> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Fixed(-self.0)
    }
}

impl<const BITS: u32> Scalar for Fixed<BITS> {
    const ZERO: Self = Fixed(0);
    const ONE: Self = Fixed(1i64 << BITS);

    #[inline]
    fn abs(self) -> Self {
        Fixed(self.0.abs())
    }

    #[inline]
    fn sqrt(self) -> Self {
        Fixed::to_fixed(Scalar::sqrt(self.to_f64()), BITS)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        Fixed::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Fixed::to_fixed(v, BITS)
    }
}

pub type Fixed16 = Fixed<16>;

#[test]
fn test_roundtrip() {
    let a = Fixed16::to_fixed(3.5, 16);
    assert!((a.to_f64() - 3.5).abs() < 1e-6);
}

#[test]
fn test_arithmetic() {
    let a = Fixed16::to_fixed(2.0, 16);
    let b = Fixed16::to_fixed(3.0, 16);
    assert!(((a * b).to_f64() - 6.0).abs() < 1e-6);
    assert!(((a + b).to_f64() - 5.0).abs() < 1e-6);
    assert!(((b / a).to_f64() - 1.5).abs() < 1e-6);
}
