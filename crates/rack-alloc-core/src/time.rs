// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Time Types
//!
//! - [`TimePoint<T>`]: a specific point in time.
//! - [`TimeDelta<T>`]: a duration, the difference between two time points.
//! - [`TimeInterval<T>`]: a half-open interval `[start, end)` of time points.
//!
//! Distinct newtypes keep the arithmetic honest: two `TimePoint`s cannot be
//! added, a `TimeDelta` cannot be used where an absolute instant is meant.
//! All arithmetic is checked and panics on overflow rather than wrapping.

use crate::interval::Interval;
use num_traits::{CheckedAdd, CheckedSub, PrimInt, Signed, Zero};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePoint<T: PrimInt>(T);

impl<T: PrimInt> TimePoint<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimePoint(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimePoint(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn checked_add<D>(self, delta: D) -> Option<Self>
    where
        T: Signed,
        D: Into<TimeDelta<T>>,
    {
        self.0.checked_add(&delta.into().value()).map(TimePoint)
    }

    #[inline]
    pub fn checked_sub<D>(self, delta: D) -> Option<Self>
    where
        T: Signed,
        D: Into<TimeDelta<T>>,
    {
        self.0.checked_sub(&delta.into().value()).map(TimePoint)
    }
}

impl<T: PrimInt> Default for TimePoint<T> {
    #[inline]
    fn default() -> Self {
        TimePoint(T::zero())
    }
}

impl<T: PrimInt> From<T> for TimePoint<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimePoint(v)
    }
}

impl<T: PrimInt + Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.0)
    }
}

impl<T: PrimInt + Signed> Add<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn add(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimePoint + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> AddAssign<TimeDelta<T>> for TimePoint<T> {
    #[inline]
    fn add_assign(&mut self, rhs: TimeDelta<T>) {
        *self = *self + rhs;
    }
}

impl<T: PrimInt + Signed> Sub<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn sub(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_sub(&rhs.0)
                .expect("overflow in TimePoint - TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> SubAssign<TimeDelta<T>> for TimePoint<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeDelta<T>) {
        *self = *self - rhs;
    }
}

impl<T: PrimInt + Signed> Sub<TimePoint<T>> for TimePoint<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: TimePoint<T>) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(&rhs.0)
                .expect("overflow in TimePoint - TimePoint"),
        )
    }
}

pub type TimeInterval<T> = Interval<TimePoint<T>>;

#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeDelta<T: PrimInt + Signed>(T);

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimeDelta(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimeDelta(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Self {
        TimeDelta(self.0.abs())
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_positive()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn checked_add(self, rhs: TimeDelta<T>) -> Option<Self> {
        self.0.checked_add(&rhs.0).map(TimeDelta)
    }

    #[inline]
    pub fn checked_sub(self, rhs: TimeDelta<T>) -> Option<Self> {
        self.0.checked_sub(&rhs.0).map(TimeDelta)
    }
}

impl<T: PrimInt + Signed> Default for TimeDelta<T> {
    #[inline]
    fn default() -> Self {
        TimeDelta(T::zero())
    }
}

impl<T: PrimInt + Signed> From<T> for TimeDelta<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimeDelta(v)
    }
}

impl<T: PrimInt + Signed + Display> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

impl<T: PrimInt + Signed> Add for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimeDelta + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> AddAssign for TimeDelta<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: PrimInt + Signed> Sub for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(
            self.0
                .checked_sub(&rhs.0)
                .expect("overflow in TimeDelta - TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> SubAssign for TimeDelta<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: PrimInt + Signed> Neg for TimeDelta<T> {
    type Output = TimeDelta<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        TimeDelta(
            T::zero()
                .checked_sub(&self.0)
                .expect("overflow in -TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Zero for TimeDelta<T> {
    #[inline]
    fn zero() -> Self {
        TimeDelta(T::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<T: PrimInt + Signed> Sum for TimeDelta<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TimeDelta::zero(), |acc, d| acc + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn tp(v: i64) -> TimePoint<i64> {
        TimePoint::new(v)
    }

    #[inline]
    fn td(v: i64) -> TimeDelta<i64> {
        TimeDelta::new(v)
    }

    #[test]
    fn test_point_plus_delta() {
        assert_eq!(tp(10) + td(5), tp(15));
        assert_eq!(tp(10) + td(-5), tp(5));
    }

    #[test]
    fn test_point_minus_delta() {
        assert_eq!(tp(10) - td(4), tp(6));
    }

    #[test]
    fn test_point_difference_is_delta() {
        assert_eq!(tp(10) - tp(3), td(7));
        assert_eq!(tp(3) - tp(10), td(-7));
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        assert_eq!(tp(i64::MAX).checked_add(td(1)), None);
        assert_eq!(tp(1).checked_add(td(1)), Some(tp(2)));
    }

    #[test]
    fn test_delta_sum_and_neg() {
        let total: TimeDelta<i64> = [td(1), td(2), td(3)].into_iter().sum();
        assert_eq!(total, td(6));
        assert_eq!(-td(6), td(-6));
    }

    #[test]
    fn test_delta_sign_queries() {
        assert!(td(3).is_positive());
        assert!(td(-3).is_negative());
        assert!(td(0).is_zero());
        assert_eq!(td(-3).abs(), td(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", tp(7)), "TimePoint(7)");
        assert_eq!(format!("{}", td(-2)), "TimeDelta(-2)");
    }
}
