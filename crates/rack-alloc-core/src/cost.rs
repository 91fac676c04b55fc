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

use num_traits::{CheckedAdd, CheckedMul, PrimInt, Signed, Zero};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul},
};

/// A travel or rearrangement cost.
///
/// Costs share the model scalar with times and distances but live in their
/// own newtype so an objective coefficient cannot be mistaken for a
/// timestamp.
#[repr(transparent)]
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Cost<T>(T);

impl<T: PrimInt + Signed> Cost<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Cost(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Cost(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn checked_add(self, rhs: Cost<T>) -> Option<Self> {
        self.0.checked_add(&rhs.0).map(Cost)
    }
}

impl<T: PrimInt + Signed + Display> Display for Cost<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl<T: PrimInt + Signed> Add for Cost<T> {
    type Output = Cost<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0.checked_add(&rhs.0).expect("overflow in Cost + Cost"))
    }
}

impl<T: PrimInt + Signed> AddAssign for Cost<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: PrimInt + Signed> Mul<T> for Cost<T> {
    type Output = Cost<T>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        Cost(self.0.checked_mul(&rhs).expect("overflow in Cost * scalar"))
    }
}

impl<T: PrimInt + Signed> Zero for Cost<T> {
    #[inline]
    fn zero() -> Self {
        Cost(T::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<T: PrimInt + Signed> Sum for Cost<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cost::zero(), |acc, c| acc + c)
    }
}
