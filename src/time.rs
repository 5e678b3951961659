//! Scalar time used by phase sequences

use std::fmt::Debug;
use std::ops::{Add, Sub};

use num_traits::{ToPrimitive, Zero};

/// Totally ordered time scalar, continuous (`f64`, `f32`) or discrete (`i32`, `i64`, ...).
///
/// Floating point times are only partially ordered; NaN values are rejected by the
/// sequence before they reach the binary search.
pub trait SwitchTime:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Zero + ToPrimitive + Debug
{
    /// Time as `f64`, for error reports and printing. NaN if not representable.
    fn as_f64(&self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// True if the value compares with itself (false for NaN).
    fn is_comparable(&self) -> bool {
        self.partial_cmp(self).is_some()
    }
}

impl<T> SwitchTime for T where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T> + Zero + ToPrimitive + Debug
{
}
