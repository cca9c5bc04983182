//! Signed 24.8 fixed-point numbers (`wl_fixed_t`).

use std::fmt;

/// A protocol `fixed` value: 24 integer bits and 8 fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Zero.
    pub const ZERO: Fixed = Fixed(0);

    /// Reinterpret a native `wl_fixed_t`.
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    /// The native `wl_fixed_t` representation.
    pub const fn to_raw(self) -> i32 {
        self.0
    }

    /// Convert from an integer. Values outside the 24-bit range wrap.
    pub const fn from_int(value: i32) -> Self {
        Fixed(value.wrapping_mul(256))
    }

    /// Truncate towards zero.
    pub const fn to_int(self) -> i32 {
        self.0 / 256
    }

    /// Convert from a float, rounding to the nearest 1/256.
    pub fn from_f64(value: f64) -> Self {
        Fixed((value * 256.0).round() as i32)
    }

    /// Convert to a float.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 256.0
    }
}

impl From<i32> for Fixed {
    fn from(value: i32) -> Self {
        Fixed::from_int(value)
    }
}

impl From<Fixed> for f64 {
    fn from(value: Fixed) -> Self {
        value.to_f64()
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
