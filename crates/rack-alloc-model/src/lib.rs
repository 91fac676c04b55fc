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

//! # Deep-Lane Storage Model
//!
//! Typed problem entities for multi-deep warehouse storage assignment, the
//! break-interval calculus that decides when a stopover may occupy a slot,
//! and the conflict graphs (same-slot overlap, storing blockage, retrieval
//! blockage) that an optimization model is assembled from.

pub mod common;
pub mod conflict;
pub mod generator;
pub mod intervals;
pub mod problem;
pub mod solution;
pub mod validation;

pub mod prelude {
    pub use crate::common::{FlexibleKind, Identifier, Kind, PinnedKind};
    pub use crate::conflict::ConflictGraphs;
    pub use crate::intervals::{BreakIntervalTable, break_interval, feasible_positions};
    pub use crate::problem::asg::{PinnedAssignment, PinnedAssignmentContainer};
    pub use crate::problem::distance::DistanceMap;
    pub use crate::problem::err::{EmptyFeasibleSetError, InfeasiblePinningError, ProblemError};
    pub use crate::problem::nested::NestedIndex;
    pub use crate::problem::position::{Position, PositionContainer, PositionIdentifier};
    pub use crate::problem::prob::Problem;
    pub use crate::problem::station::{PickingStation, Rack, RackIdentifier, StationIdentifier};
    pub use crate::problem::stopover::{
        Destination, Stopover, StopoverContainer, StopoverIdentifier,
    };
    pub use crate::solution::{BlockageEvent, BlockagePhase, Placement, Solution};
}
