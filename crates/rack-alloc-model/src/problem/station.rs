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
use rack_alloc_core::prelude::SolverVariable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationIdentifierMarker;

impl IdentifierMarkerName for StationIdentifierMarker {
    const NAME: &'static str = "StationId";
}

pub type StationIdentifier = Identifier<u32, StationIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RackIdentifierMarker;

impl IdentifierMarkerName for RackIdentifierMarker {
    const NAME: &'static str = "RackId";
}

pub type RackIdentifier = Identifier<u32, RackIdentifierMarker>;

/// A physical storage aisle. Stopovers reference racks; reporting groups
/// by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rack {
    id: RackIdentifier,
}

impl Rack {
    #[inline]
    pub const fn new(id: RackIdentifier) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> RackIdentifier {
        self.id
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rack({})", self.id)
    }
}

/// A pick/drop point at the lane grid's edge.
///
/// The coordinates exist for distance-table construction; the model layer
/// itself only ever sees the finished table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickingStation<T: SolverVariable> {
    id: StationIdentifier,
    x: T,
    y: T,
}

impl<T: SolverVariable> PickingStation<T> {
    #[inline]
    pub fn new(id: StationIdentifier, x: T, y: T) -> Self {
        Self { id, x, y }
    }

    #[inline]
    pub fn id(&self) -> StationIdentifier {
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
}

impl<T: SolverVariable> std::fmt::Display for PickingStation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@({}, {})", self.id, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let s = PickingStation::new(StationIdentifier::new(2), 4i64, 0);
        assert_eq!(format!("{s}"), "StationId(2)@(4, 0)");
        assert_eq!(format!("{}", Rack::new(RackIdentifier::new(1))), "Rack(RackId(1))");
    }
}
