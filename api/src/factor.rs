use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use steel::*;

/// Fixed-point units per whole token unit in a [`Factor`].
pub const FACTOR_SCALE: u128 = 1_000_000_000_000;

/// Cumulative reward-per-share value, scaled by [`FACTOR_SCALE`].
///
/// Stored as two little-endian u64 limbs so account structs carrying a factor
/// keep 8-byte alignment for zero-copy loads. The decimal scale makes the
/// truncation behavior of reward settlement exact: `from_fraction` and
/// `to_u64` both round toward zero, and the sub-unit remainder stays in the
/// reserve as dust.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Factor([u64; 2]);

impl Factor {
    pub const ZERO: Factor = Factor([0; 2]);

    pub fn from_scaled(value: u128) -> Self {
        Factor([value as u64, (value >> 64) as u64])
    }

    pub fn to_scaled(self) -> u128 {
        ((self.0[1] as u128) << 64) | self.0[0] as u128
    }

    /// Fixed-point ratio of `numerator` whole units to `denominator` shares.
    pub fn from_fraction(numerator: u64, denominator: u64) -> Self {
        Self::from_scaled(numerator as u128 * FACTOR_SCALE / denominator as u128)
    }

    /// Scales the factor by a whole-unit stake balance.
    pub fn times(self, units: u64) -> Self {
        Self::from_scaled(self.to_scaled() * units as u128)
    }

    /// Truncates to whole token units.
    pub fn to_u64(self) -> u64 {
        (self.to_scaled() / FACTOR_SCALE) as u64
    }
}

impl Add for Factor {
    type Output = Factor;

    fn add(self, rhs: Factor) -> Factor {
        Factor::from_scaled(self.to_scaled() + rhs.to_scaled())
    }
}

impl AddAssign for Factor {
    fn add_assign(&mut self, rhs: Factor) {
        *self = *self + rhs;
    }
}

impl Sub for Factor {
    type Output = Factor;

    fn sub(self, rhs: Factor) -> Factor {
        Factor::from_scaled(self.to_scaled() - rhs.to_scaled())
    }
}

impl SubAssign for Factor {
    fn sub_assign(&mut self, rhs: Factor) {
        *self = *self - rhs;
    }
}

impl PartialOrd for Factor {
    fn partial_cmp(&self, other: &Factor) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Factor {
    fn cmp(&self, other: &Factor) -> Ordering {
        self.to_scaled().cmp(&other.to_scaled())
    }
}
