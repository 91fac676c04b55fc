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

//! Cross-checks a solved assignment against the instance it came from.
//! Every rule is re-derived from the break-interval formula rather than
//! trusting whatever produced the solution.

use crate::intervals::break_interval;
use crate::problem::{position::PositionIdentifier, prob::Problem, stopover::StopoverIdentifier};
use crate::solution::Solution;
use rack_alloc_core::prelude::SolverVariable;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionValidationError {
    MissingPlacement(StopoverIdentifier),
    DuplicatePlacement(StopoverIdentifier),
    UnknownPlacementPosition(StopoverIdentifier, PositionIdentifier),
    InfeasiblePlacement(StopoverIdentifier, PositionIdentifier),
    PinViolation {
        stopover: StopoverIdentifier,
        expected: PositionIdentifier,
        actual: PositionIdentifier,
    },
    OverlapViolation {
        position: PositionIdentifier,
        first: StopoverIdentifier,
        second: StopoverIdentifier,
    },
}

impl std::fmt::Display for SolutionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SolutionValidationError::*;
        match self {
            MissingPlacement(j) => write!(f, "Stopover {j} has no placement"),
            DuplicatePlacement(j) => write!(f, "Stopover {j} is placed more than once"),
            UnknownPlacementPosition(j, s) => {
                write!(f, "Stopover {j} is placed at unknown position {s}")
            }
            InfeasiblePlacement(j, s) => {
                write!(f, "Stopover {j} is placed at {s} outside its feasible window")
            }
            PinViolation {
                stopover,
                expected,
                actual,
            } => write!(
                f,
                "Pinned stopover {stopover} must stay at {expected} but was placed at {actual}"
            ),
            OverlapViolation {
                position,
                first,
                second,
            } => write!(
                f,
                "Stopovers {first} and {second} hold {position} at overlapping times"
            ),
        }
    }
}

impl std::error::Error for SolutionValidationError {}

#[derive(Debug, Clone)]
pub struct SolutionValidator;

impl SolutionValidator {
    pub fn validate<T: SolverVariable>(
        problem: &Problem<T>,
        solution: &Solution<T>,
    ) -> Result<(), SolutionValidationError> {
        let mut seen: HashMap<StopoverIdentifier, PositionIdentifier> = HashMap::new();
        for placement in solution.placements() {
            if seen
                .insert(placement.stopover(), placement.position())
                .is_some()
            {
                return Err(SolutionValidationError::DuplicatePlacement(
                    placement.stopover(),
                ));
            }
        }

        for j in problem.iter_flexible_stopovers() {
            let Some(&s) = seen.get(&j.id()) else {
                return Err(SolutionValidationError::MissingPlacement(j.id()));
            };
            let Some(position) = problem.positions().get(s) else {
                return Err(SolutionValidationError::UnknownPlacementPosition(j.id(), s));
            };
            if break_interval(j, position, problem.distances()).is_empty() {
                return Err(SolutionValidationError::InfeasiblePlacement(j.id(), s));
            }
        }

        for pin in problem.iter_pinned_assignments() {
            match seen.get(&pin.stopover_id()) {
                None => {
                    return Err(SolutionValidationError::MissingPlacement(pin.stopover_id()));
                }
                Some(&actual) if actual != pin.position() => {
                    return Err(SolutionValidationError::PinViolation {
                        stopover: pin.stopover_id(),
                        expected: pin.position(),
                        actual,
                    });
                }
                Some(_) => {}
            }
        }

        // Same-slot occupancy must stay disjoint among flexible stopovers.
        let mut by_position: HashMap<PositionIdentifier, Vec<StopoverIdentifier>> = HashMap::new();
        for (&j, &s) in &seen {
            if problem.flexible_stopovers().contains_id(j) {
                by_position.entry(s).or_default().push(j);
            }
        }
        for (s, holders) in by_position {
            let position = problem
                .positions()
                .get(s)
                .ok_or(SolutionValidationError::UnknownPlacementPosition(
                    *holders.first().expect("group is non-empty"),
                    s,
                ))?;
            for (i, &j1) in holders.iter().enumerate() {
                for &j2 in holders.iter().skip(i + 1) {
                    let w1 = break_interval(
                        problem
                            .flexible_stopovers()
                            .get(j1)
                            .expect("holder ids come from the flexible container"),
                        position,
                        problem.distances(),
                    );
                    let w2 = break_interval(
                        problem
                            .flexible_stopovers()
                            .get(j2)
                            .expect("holder ids come from the flexible container"),
                        position,
                        problem.distances(),
                    );
                    if w1.intersects(&w2) {
                        return Err(SolutionValidationError::OverlapViolation {
                            position: s,
                            first: j1,
                            second: j2,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FlexibleKind;
    use crate::problem::asg::PinnedAssignmentContainer;
    use crate::problem::distance::DistanceMap;
    use crate::problem::position::{Position, PositionContainer};
    use crate::problem::station::{PickingStation, RackIdentifier, StationIdentifier};
    use crate::problem::stopover::{Destination, Stopover, StopoverContainer};
    use crate::solution::Placement;
    use rack_alloc_core::prelude::{TimeDelta, TimeInterval, TimePoint};

    #[inline]
    fn sid(n: u32) -> StopoverIdentifier {
        StopoverIdentifier::new(n)
    }

    #[inline]
    fn stid(n: u32) -> StationIdentifier {
        StationIdentifier::new(n)
    }

    #[inline]
    fn pid(n: u32) -> PositionIdentifier {
        PositionIdentifier::new(n)
    }

    #[inline]
    fn tp(v: i64) -> TimePoint<i64> {
        TimePoint::new(v)
    }

    fn problem_with_two_trips() -> Problem<i64> {
        let positions: PositionContainer<i64> = [
            Position::new(pid(1), 0, 0, 1).unwrap(),
            Position::new(pid(2), 1, 0, 1).unwrap(),
        ]
        .into_iter()
        .collect();
        let distances: DistanceMap<i64> = [
            (stid(1), pid(1), TimeDelta::new(1)),
            (stid(1), pid(2), TimeDelta::new(2)),
        ]
        .into_iter()
        .collect();
        let flexible: StopoverContainer<FlexibleKind, i64> = [
            Stopover::new_flexible(
                sid(1),
                RackIdentifier::new(0),
                Some(stid(1)),
                Some(tp(0)),
                Destination::Station(stid(1)),
                tp(20),
            )
            .unwrap(),
            Stopover::new_flexible(
                sid(2),
                RackIdentifier::new(0),
                Some(stid(1)),
                Some(tp(5)),
                Destination::Station(stid(1)),
                tp(25),
            )
            .unwrap(),
        ]
        .into_iter()
        .collect();
        Problem::new(
            vec![],
            positions,
            vec![PickingStation::new(stid(1), 0, 0)],
            distances,
            flexible,
            PinnedAssignmentContainer::new(),
        )
        .unwrap()
    }

    fn window(problem: &Problem<i64>, j: u32, s: u32) -> TimeInterval<i64> {
        break_interval(
            problem.flexible_stopovers().get(sid(j)).unwrap(),
            problem.positions().get(pid(s)).unwrap(),
            problem.distances(),
        )
    }

    #[test]
    fn test_disjoint_placements_pass() {
        let p = problem_with_two_trips();
        let sol = Solution::new(
            vec![
                Placement::new(sid(1), pid(1), window(&p, 1, 1)),
                Placement::new(sid(2), pid(2), window(&p, 2, 2)),
            ],
            vec![],
            0.0,
        );
        SolutionValidator::validate(&p, &sol).expect("separate slots cannot clash");
    }

    #[test]
    fn test_missing_placement_detected() {
        let p = problem_with_two_trips();
        let sol = Solution::new(vec![Placement::new(sid(1), pid(1), window(&p, 1, 1))], vec![], 0.0);
        assert_eq!(
            SolutionValidator::validate(&p, &sol),
            Err(SolutionValidationError::MissingPlacement(sid(2)))
        );
    }

    #[test]
    fn test_overlapping_cohabitation_detected() {
        let p = problem_with_two_trips();
        let sol = Solution::new(
            vec![
                Placement::new(sid(1), pid(1), window(&p, 1, 1)),
                Placement::new(sid(2), pid(1), window(&p, 2, 1)),
            ],
            vec![],
            0.0,
        );
        assert!(matches!(
            SolutionValidator::validate(&p, &sol),
            Err(SolutionValidationError::OverlapViolation { position, .. }) if position == pid(1)
        ));
    }
}
