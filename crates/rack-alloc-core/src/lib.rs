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

//! # Core Primitives
//!
//! Numeric building blocks for the deep-lane storage assignment model:
//! typed time points and durations, half-open intervals, and travel costs.
//! Everything is generic over one signed integer scalar so that lane
//! coordinates, depths, timestamps, and travel costs share a single
//! arithmetic domain.

use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};

pub mod cost;
pub mod interval;
pub mod time;

/// The scalar every model quantity is expressed in.
///
/// Instantiated at `i64` throughout the binary and the tests; the bound
/// exists so the model layer can stay integer-exact and thread-safe.
pub trait SolverVariable: PrimInt + Signed + Send + Sync + Debug + Display {}
impl<T: PrimInt + Signed + Send + Sync + Debug + Display> SolverVariable for T {}

pub mod prelude {
    pub use crate::SolverVariable;
    pub use crate::cost::Cost;
    pub use crate::interval::Interval;
    pub use crate::time::{TimeDelta, TimeInterval, TimePoint};
}
