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

use crate::problem::{position::PositionIdentifier, stopover::StopoverIdentifier};
use rack_alloc_core::prelude::{SolverVariable, TimeInterval};

/// Which handling step forced a rearrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockagePhase {
    Storing,
    Retrieval,
}

impl std::fmt::Display for BlockagePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockagePhase::Storing => write!(f, "storing"),
            BlockagePhase::Retrieval => write!(f, "retrieval"),
        }
    }
}

/// One stopover's assigned slot and the window it holds that slot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<T: SolverVariable> {
    stopover: StopoverIdentifier,
    position: PositionIdentifier,
    window: TimeInterval<T>,
}

impl<T: SolverVariable> Placement<T> {
    #[inline]
    pub fn new(
        stopover: StopoverIdentifier,
        position: PositionIdentifier,
        window: TimeInterval<T>,
    ) -> Self {
        Self {
            stopover,
            position,
            window,
        }
    }

    #[inline]
    pub fn stopover(&self) -> StopoverIdentifier {
        self.stopover
    }

    #[inline]
    pub fn position(&self) -> PositionIdentifier {
        self.position
    }

    #[inline]
    pub fn window(&self) -> TimeInterval<T> {
        self.window
    }
}

impl<T: SolverVariable> std::fmt::Display for Placement<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} during [{}, {})",
            self.stopover,
            self.position,
            self.window.start().value(),
            self.window.end().value()
        )
    }
}

/// A fired blockage indicator: handling `stopover` at `position` had to
/// move whatever sat at `front` out of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockageEvent {
    position: PositionIdentifier,
    front: PositionIdentifier,
    stopover: StopoverIdentifier,
    phase: BlockagePhase,
}

impl BlockageEvent {
    #[inline]
    pub fn new(
        position: PositionIdentifier,
        front: PositionIdentifier,
        stopover: StopoverIdentifier,
        phase: BlockagePhase,
    ) -> Self {
        Self {
            position,
            front,
            stopover,
            phase,
        }
    }

    #[inline]
    pub fn position(&self) -> PositionIdentifier {
        self.position
    }

    #[inline]
    pub fn front(&self) -> PositionIdentifier {
        self.front
    }

    #[inline]
    pub fn stopover(&self) -> StopoverIdentifier {
        self.stopover
    }

    #[inline]
    pub fn phase(&self) -> BlockagePhase {
        self.phase
    }
}

impl std::fmt::Display for BlockageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {} shifted {} while {}",
            self.stopover, self.position, self.front, self.phase
        )
    }
}

/// A solved assignment: placements for every stopover, the rearrangements
/// the optimum accepted, and the objective value reported by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T: SolverVariable> {
    placements: Vec<Placement<T>>,
    blockages: Vec<BlockageEvent>,
    objective: f64,
}

impl<T: SolverVariable> Solution<T> {
    pub fn new(
        mut placements: Vec<Placement<T>>,
        mut blockages: Vec<BlockageEvent>,
        objective: f64,
    ) -> Self {
        placements.sort_by_key(|p| p.stopover());
        blockages.sort_by_key(|b| (b.stopover(), b.position(), b.front()));
        Self {
            placements,
            blockages,
            objective,
        }
    }

    #[inline]
    pub fn placements(&self) -> &[Placement<T>] {
        &self.placements
    }

    #[inline]
    pub fn blockages(&self) -> &[BlockageEvent] {
        &self.blockages
    }

    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective
    }

    #[inline]
    pub fn placement_of(&self, stopover: StopoverIdentifier) -> Option<&Placement<T>> {
        self.placements
            .iter()
            .find(|p| p.stopover() == stopover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_alloc_core::prelude::TimePoint;

    #[inline]
    fn sid(n: u32) -> StopoverIdentifier {
        StopoverIdentifier::new(n)
    }

    #[inline]
    fn pid(n: u32) -> PositionIdentifier {
        PositionIdentifier::new(n)
    }

    #[inline]
    fn iv(a: i64, b: i64) -> TimeInterval<i64> {
        TimeInterval::new(TimePoint::new(a), TimePoint::new(b))
    }

    #[test]
    fn test_placements_sorted_by_stopover() {
        let sol = Solution::new(
            vec![
                Placement::new(sid(3), pid(1), iv(0, 5)),
                Placement::new(sid(1), pid(2), iv(0, 5)),
            ],
            vec![],
            12.0,
        );
        let ids: Vec<_> = sol.placements().iter().map(|p| p.stopover()).collect();
        assert_eq!(ids, vec![sid(1), sid(3)]);
    }

    #[test]
    fn test_placement_lookup() {
        let sol = Solution::new(vec![Placement::new(sid(2), pid(4), iv(1, 9))], vec![], 0.0);
        assert_eq!(sol.placement_of(sid(2)).map(|p| p.position()), Some(pid(4)));
        assert_eq!(sol.placement_of(sid(9)), None);
    }

    #[test]
    fn test_display() {
        let p = Placement::new(sid(1), pid(2), iv(3, 8));
        assert_eq!(
            format!("{p}"),
            "StopoverId(1) -> PositionId(2) during [3, 8)"
        );
        let b = BlockageEvent::new(pid(2), pid(1), sid(1), BlockagePhase::Storing);
        assert_eq!(
            format!("{b}"),
            "StopoverId(1) at PositionId(2) shifted PositionId(1) while storing"
        );
    }
}
