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

use crate::common::{Identifier, IdentifierMarkerName};
use crate::problem::err::{PositionError, ZeroDepthError};
use num_traits::{One, Signed, Zero};
use rack_alloc_core::prelude::{SolverVariable, TimeDelta};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionIdentifierMarker;

impl IdentifierMarkerName for PositionIdentifierMarker {
    const NAME: &'static str = "PositionId";
}

pub type PositionIdentifier = Identifier<u32, PositionIdentifierMarker>;

/// One storage slot in a deep lane.
///
/// `x` and `y` locate the lane; the signed `depth` encodes both the
/// nesting level (`|depth|`, counted from the lane opening) and the access
/// direction (sign). Depth zero would be a slot without a lane side and is
/// rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<T: SolverVariable> {
    id: PositionIdentifier,
    x: T,
    y: T,
    depth: T,
}

impl<T: SolverVariable> Position<T> {
    #[inline]
    pub fn new(id: PositionIdentifier, x: T, y: T, depth: T) -> Result<Self, PositionError> {
        if depth.is_zero() {
            return Err(ZeroDepthError::new(id))?;
        }
        Ok(Self { id, x, y, depth })
    }

    #[inline]
    pub fn id(&self) -> PositionIdentifier {
        self.id
    }

    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.y
    }

    #[inline]
    pub fn depth(&self) -> T {
        self.depth
    }

    #[inline]
    pub fn nesting_level(&self) -> T {
        self.depth.abs()
    }

    /// Extra round-trip cost of reaching this slot, growing superlinearly
    /// with the nesting level: `|d| * (|d| - 1)`.
    #[inline]
    pub fn depth_penalty(&self) -> TimeDelta<T> {
        let level = self.depth.abs();
        TimeDelta::new(level * (level - T::one()))
    }

    /// Travel cost contribution of entering the lane down to this slot:
    /// `sum_{i=1..|d|} 2*i = |d| * (|d| + 1)`.
    #[inline]
    pub fn approach_cost(&self) -> TimeDelta<T> {
        let level = self.depth.abs();
        TimeDelta::new(level * (level + T::one()))
    }

    #[inline]
    pub fn shares_lane_with(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Whether this slot sits between `deeper` and the lane opening, so
    /// that any handling at `deeper` has to pass through it.
    ///
    /// Requires the same lane, the same access side, and a strictly
    /// smaller nesting level.
    #[inline]
    pub fn lies_in_front_of(&self, deeper: &Self) -> bool {
        self.shares_lane_with(deeper)
            && ((deeper.depth > self.depth && self.depth > T::zero())
                || (deeper.depth < self.depth && self.depth < T::zero()))
    }
}

impl<T: SolverVariable> std::fmt::Display for Position<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@({}, {}, {})", self.id, self.x, self.y, self.depth)
    }
}

#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct PositionContainer<T: SolverVariable>(HashMap<PositionIdentifier, Position<T>>);

impl<T: SolverVariable> Default for PositionContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SolverVariable> PositionContainer<T> {
    #[inline]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self(HashMap::with_capacity(cap))
    }

    #[inline]
    pub fn insert(&mut self, position: Position<T>) -> Option<Position<T>> {
        self.0.insert(position.id(), position)
    }

    #[inline]
    pub fn get(&self, id: PositionIdentifier) -> Option<&Position<T>> {
        self.0.get(&id)
    }

    #[inline]
    pub fn contains_id(&self, id: PositionIdentifier) -> bool {
        self.0.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Position<T>> {
        self.0.values()
    }

    #[inline]
    pub fn iter_ids(&self) -> impl Iterator<Item = PositionIdentifier> + '_ {
        self.0.keys().copied()
    }
}

impl<T: SolverVariable> FromIterator<Position<T>> for PositionContainer<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Position<T>>>(iter: I) -> Self {
        let mut c = Self::new();
        for p in iter {
            c.insert(p);
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn pid(n: u32) -> PositionIdentifier {
        PositionIdentifier::new(n)
    }

    #[inline]
    fn pos(n: u32, x: i64, y: i64, d: i64) -> Position<i64> {
        Position::new(pid(n), x, y, d).expect("nonzero depth")
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = Position::new(pid(1), 0i64, 0, 0).expect_err("depth 0 must be rejected");
        assert_eq!(err, PositionError::ZeroDepth(ZeroDepthError::new(pid(1))));
    }

    #[test]
    fn test_depth_penalty_grows_superlinearly() {
        assert_eq!(pos(1, 0, 0, 1).depth_penalty(), TimeDelta::new(0));
        assert_eq!(pos(2, 0, 0, 2).depth_penalty(), TimeDelta::new(2));
        assert_eq!(pos(3, 0, 0, 3).depth_penalty(), TimeDelta::new(6));
        assert_eq!(pos(4, 0, 0, -3).depth_penalty(), TimeDelta::new(6));
    }

    #[test]
    fn test_approach_cost() {
        assert_eq!(pos(1, 0, 0, 1).approach_cost(), TimeDelta::new(2));
        assert_eq!(pos(2, 0, 0, 3).approach_cost(), TimeDelta::new(12));
        assert_eq!(pos(3, 0, 0, -2).approach_cost(), TimeDelta::new(6));
    }

    #[test]
    fn test_lies_in_front_of_same_side() {
        let shallow = pos(1, 0, 0, 1);
        let deep = pos(2, 0, 0, 2);
        assert!(shallow.lies_in_front_of(&deep));
        assert!(!deep.lies_in_front_of(&shallow));
    }

    #[test]
    fn test_lies_in_front_of_negative_side() {
        let shallow = pos(1, 0, 0, -1);
        let deep = pos(2, 0, 0, -3);
        assert!(shallow.lies_in_front_of(&deep));
        assert!(!deep.lies_in_front_of(&shallow));
    }

    #[test]
    fn test_opposite_sides_do_not_block() {
        let front = pos(1, 0, 0, 1);
        let back = pos(2, 0, 0, -2);
        assert!(!front.lies_in_front_of(&back));
        assert!(!back.lies_in_front_of(&front));
    }

    #[test]
    fn test_different_lane_does_not_block() {
        let a = pos(1, 0, 0, 1);
        let b = pos(2, 1, 0, 2);
        assert!(!a.lies_in_front_of(&b));
    }

    #[test]
    fn test_position_not_in_front_of_itself() {
        let p = pos(1, 0, 0, 2);
        assert!(!p.lies_in_front_of(&p));
    }

    #[test]
    fn test_container_roundtrip() {
        let c: PositionContainer<i64> = [pos(1, 0, 0, 1), pos(2, 0, 0, 2)].into_iter().collect();
        assert_eq!(c.len(), 2);
        assert!(c.contains_id(pid(1)));
        assert_eq!(c.get(pid(2)).map(|p| p.depth()), Some(2));
    }
}
