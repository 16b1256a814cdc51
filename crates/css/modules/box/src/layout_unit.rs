//! Sub-pixel layout coordinates using fixed-point arithmetic.
//!
//! Every edge, offset and extent produced by layout is a `LayoutUnit`: an `i32`
//! counting 1/64px. Integer storage keeps box arithmetic exact, so a margin box
//! is always precisely the sum of its parts and two passes over the same tree
//! produce identical values.
//!
//! Arithmetic saturates at the ends of the `i32` range instead of wrapping, so
//! a runaway extent stays huge and positive rather than turning negative.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Fixed-point coordinate in 1/64px units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct LayoutUnit(i32);

impl LayoutUnit {
    /// Number of fractional bits (6 bits = 1/64px precision)
    pub const FRACTIONAL_BITS: u32 = 6;

    /// Scale factor (2^6 = 64)
    pub const SCALE: i32 = 1 << Self::FRACTIONAL_BITS;

    /// Largest pixel value accepted by [`LayoutUnit::from_px_checked`].
    ///
    /// Keeps a margin below `i32::MAX / SCALE` so sums of a few extents cannot wrap.
    pub const MAX_PX: f32 = 8_000_000.0;

    /// Largest representable value.
    pub const MAX: Self = Self(i32::MAX);

    /// Smallest representable value.
    pub const MIN: Self = Self(i32::MIN);

    /// Raw magnitude of [`Self::MAX_PX`].
    const MAX_PX_RAW: i32 = 8_000_000 * Self::SCALE;

    /// Create from raw 1/64px units
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Create from pixels (f32). Non-finite input quantizes to zero.
    #[inline]
    pub fn from_px(pixels: f32) -> Self {
        if pixels.is_finite() {
            let clamped = pixels.clamp(-Self::MAX_PX, Self::MAX_PX);
            Self((clamped * Self::SCALE as f32).round() as i32)
        } else {
            Self(0)
        }
    }

    /// Create from pixels, rejecting NaN, infinities and out-of-range magnitudes.
    #[inline]
    pub fn from_px_checked(pixels: f32) -> Option<Self> {
        (pixels.is_finite() && pixels.abs() <= Self::MAX_PX)
            .then(|| Self((pixels * Self::SCALE as f32).round() as i32))
    }

    /// Create from pixels (i32)
    #[inline]
    pub const fn from_px_i32(pixels: i32) -> Self {
        Self(pixels.saturating_mul(Self::SCALE))
    }

    /// Convert to pixels (f32)
    #[inline]
    pub const fn to_px(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Convert to pixels, rounding to nearest integer
    #[inline]
    pub const fn to_px_rounded(self) -> i32 {
        self.0.saturating_add(Self::SCALE / 2).div_euclid(Self::SCALE)
    }

    /// Get raw value in 1/64px units
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Zero value
    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Absolute value
    #[inline]
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Clamp negative values to zero.
    #[inline]
    #[must_use]
    pub fn non_negative(self) -> Self {
        self.max(Self::zero())
    }

    /// Whether the value is strictly positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Whether the value is strictly negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by `numerator / denominator` with `f64` intermediate precision.
    ///
    /// Used for aspect-ratio derivations. A zero denominator yields zero.
    #[inline]
    #[must_use]
    pub fn mul_div(self, numerator: Self, denominator: Self) -> Self {
        if denominator.0 == 0 {
            return Self::zero();
        }
        let scaled =
            f64::from(self.0) * f64::from(numerator.0) / f64::from(denominator.0);
        Self(scaled.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
    }
}

impl fmt::Display for LayoutUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}px", self.to_px())
    }
}

// Arithmetic operations
impl Add for LayoutUnit {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for LayoutUnit {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for LayoutUnit {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for LayoutUnit {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for LayoutUnit {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Mul<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

/// Scaling by a factor clamps to the [`LayoutUnit::MAX_PX`] range, like `from_px`.
impl Mul<f32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        let limit = Self::MAX_PX_RAW as f32;
        let scaled = (self.0 as f32 * rhs).round();
        if scaled.is_nan() {
            Self::zero()
        } else {
            Self(scaled.clamp(-limit, limit) as i32)
        }
    }
}

impl Div<i32> for LayoutUnit {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        // Zero divisor yields zero, like `mul_div`.
        Self(self.0.checked_div(rhs).unwrap_or_else(|| if rhs == 0 { 0 } else { i32::MAX }))
    }
}

impl Sum for LayoutUnit {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
