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

//! # Break Intervals
//!
//! The one place that knows when a stopover would occupy a slot. Every
//! feasibility filter and every conflict predicate goes through
//! [`break_interval`]; nothing else in the workspace re-derives the
//! occupancy formula.
//!
//! For stopover `j` at slot `s` with depth penalty
//! `beta(s) = |d| * (|d| - 1)`:
//!
//! - earliest occupancy: `0` if `j` has no recorded arrival, otherwise
//!   `arrival + travel(origin, s) + beta(s)`;
//! - latest vacation: `deadline - travel(destination, s)`, with `beta(s)`
//!   charged on top unless the destination is the terminal event;
//! - the slot is feasible for `j` exactly when earliest < latest. Equal
//!   bounds are infeasible.

use crate::common::Kind;
use crate::problem::{
    distance::DistanceMap,
    position::{Position, PositionContainer, PositionIdentifier},
    prob::Problem,
    stopover::{Stopover, StopoverIdentifier},
};
use rack_alloc_core::prelude::{SolverVariable, TimeInterval, TimePoint};
use rayon::prelude::*;
use std::collections::HashMap;

/// Computes the occupancy window of `stopover` at `position`.
///
/// The distance table must cover every station the stopover references;
/// [`Problem`](crate::problem::prob::Problem) construction guarantees that
/// for every table it hands out.
pub fn break_interval<K: Kind, T: SolverVariable>(
    stopover: &Stopover<K, T>,
    position: &Position<T>,
    distances: &DistanceMap<T>,
) -> TimeInterval<T> {
    let beta = position.depth_penalty();

    let earliest = match stopover.arrival() {
        None => TimePoint::zero(),
        Some(t) => {
            let origin = stopover
                .origin()
                .expect("a stopover with an arrival time always has an origin station");
            let travel = distances
                .from_station(origin, position.id())
                .expect("distance table covers every referenced station");
            t + travel + beta
        }
    };

    let egress = distances
        .to_destination(stopover.destination(), position.id())
        .expect("distance table covers every referenced station");
    let latest = if stopover.destination().is_terminal() {
        stopover.deadline() - egress
    } else {
        stopover.deadline() - egress - beta
    };

    TimeInterval::new(earliest, latest)
}

/// Slots with a non-empty break interval for `stopover`, in id order.
///
/// An empty result for a flexible stopover means the instance cannot be
/// solved; callers turn that into
/// [`EmptyFeasibleSetError`](crate::problem::err::EmptyFeasibleSetError).
pub fn feasible_positions<K: Kind, T: SolverVariable>(
    stopover: &Stopover<K, T>,
    positions: &PositionContainer<T>,
    distances: &DistanceMap<T>,
) -> Vec<PositionIdentifier> {
    let mut feasible: Vec<PositionIdentifier> = positions
        .iter()
        .filter(|s| !break_interval(stopover, s, distances).is_empty())
        .map(|s| s.id())
        .collect();
    feasible.sort();
    feasible
}

/// All break intervals of a problem, materialized once.
///
/// Conflict construction probes the same windows many times over; the
/// table is filled in parallel up front and then shared read-only.
/// Infeasible (empty) windows are kept: the conflict predicates are
/// vacuously false on them, and the overlap filter needs to see them to
/// stay aligned with the on-demand formula.
#[derive(Debug, Clone, Default)]
pub struct BreakIntervalTable<T: SolverVariable> {
    windows: HashMap<(StopoverIdentifier, PositionIdentifier), TimeInterval<T>>,
}

impl<T: SolverVariable> BreakIntervalTable<T> {
    pub fn build(problem: &Problem<T>) -> Self {
        let positions: Vec<&Position<T>> = problem.positions().iter().collect();
        let windows = positions
            .par_iter()
            .flat_map_iter(|position| {
                let flexible = problem.iter_flexible_stopovers().map(|j| {
                    (
                        (j.id(), position.id()),
                        break_interval(j, position, problem.distances()),
                    )
                });
                let pinned = problem.iter_pinned_stopovers().map(|j| {
                    (
                        (j.id(), position.id()),
                        break_interval(j, position, problem.distances()),
                    )
                });
                flexible.chain(pinned).collect::<Vec<_>>()
            })
            .collect();
        Self { windows }
    }

    /// Builds a table from raw windows, bypassing the formula. Intended
    /// for tests and for callers that already hold materialized windows.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ((StopoverIdentifier, PositionIdentifier), TimeInterval<T>)>,
    {
        Self {
            windows: entries.into_iter().collect(),
        }
    }

    #[inline]
    pub fn window(
        &self,
        stopover: StopoverIdentifier,
        position: PositionIdentifier,
    ) -> Option<TimeInterval<T>> {
        self.windows.get(&(stopover, position)).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{FlexibleKind, PinnedKind};
    use crate::problem::station::{RackIdentifier, StationIdentifier};
    use crate::problem::stopover::Destination;
    use rack_alloc_core::prelude::TimeDelta;

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

    fn pos(n: u32, depth: i64) -> Position<i64> {
        Position::new(pid(n), 0, 0, depth).unwrap()
    }

    /// One station, uniform travel time `t` to every listed position.
    fn uniform_distances(t: i64, positions: &[u32]) -> DistanceMap<i64> {
        positions
            .iter()
            .map(|&p| (stid(1), pid(p), TimeDelta::new(t)))
            .collect()
    }

    fn trip(
        n: u32,
        arrival: Option<i64>,
        destination: Destination,
        deadline: i64,
    ) -> Stopover<FlexibleKind, i64> {
        Stopover::new_flexible(
            sid(n),
            RackIdentifier::new(0),
            arrival.map(|_| stid(1)),
            arrival.map(tp),
            destination,
            tp(deadline),
        )
        .unwrap()
    }

    #[test]
    fn test_window_with_arrival_and_station_egress() {
        // arrival 10, travel 4, depth 2 => beta 2: earliest 16, latest 100 - 4 - 2.
        let d = uniform_distances(4, &[1]);
        let j = trip(1, Some(10), Destination::Station(stid(1)), 100);
        let iv = break_interval(&j, &pos(1, 2), &d);
        assert_eq!(iv.start(), tp(16));
        assert_eq!(iv.end(), tp(94));
    }

    #[test]
    fn test_unknown_arrival_starts_at_zero() {
        let d = uniform_distances(4, &[1]);
        let j = trip(2, None, Destination::Station(stid(1)), 50);
        let iv = break_interval(&j, &pos(1, 1), &d);
        assert_eq!(iv.start(), tp(0));
        assert_eq!(iv.end(), tp(46));
    }

    #[test]
    fn test_terminal_egress_skips_travel_and_depth_penalty() {
        let d = uniform_distances(4, &[1]);
        let j = trip(3, Some(0), Destination::Terminal, 50);
        let iv = break_interval(&j, &pos(1, 3), &d);
        // earliest: 0 + 4 + beta(3)=6 => 10; latest: deadline untouched.
        assert_eq!(iv.start(), tp(10));
        assert_eq!(iv.end(), tp(50));
    }

    #[test]
    fn test_depth_penalty_shrinks_window_on_both_sides() {
        let d = uniform_distances(1, &[1, 2]);
        let j = trip(4, Some(0), Destination::Station(stid(1)), 20);
        let shallow = break_interval(&j, &pos(1, 1), &d);
        let deep = break_interval(&j, &pos(2, 3), &d);
        assert_eq!(shallow.start(), tp(1));
        assert_eq!(shallow.end(), tp(19));
        assert_eq!(deep.start(), tp(7));
        assert_eq!(deep.end(), tp(13));
    }

    #[test]
    fn test_membership_matches_window_feasibility_exactly() {
        let positions: PositionContainer<i64> =
            [pos(1, 1), pos(2, 2), pos(3, 3)].into_iter().collect();
        let d = uniform_distances(2, &[1, 2, 3]);
        // Tight deadline: only shallow slots stay feasible.
        let j = trip(5, Some(0), Destination::Station(stid(1)), 9);
        let feasible = feasible_positions(&j, &positions, &d);
        for s in positions.iter() {
            let member = feasible.contains(&s.id());
            let window = break_interval(&j, s, &d);
            assert_eq!(member, window.start() < window.end(), "slot {}", s.id());
        }
    }

    #[test]
    fn test_equal_bounds_are_infeasible() {
        // arrival 0, travel 2, depth 1: window (2, deadline - 2).
        let positions: PositionContainer<i64> = [pos(1, 1)].into_iter().collect();
        let d = uniform_distances(2, &[1]);
        let j = trip(6, Some(0), Destination::Station(stid(1)), 4);
        let iv = break_interval(&j, &pos(1, 1), &d);
        assert_eq!(iv.start(), iv.end());
        assert!(feasible_positions(&j, &positions, &d).is_empty());
    }

    #[test]
    fn test_feasibility_monotone_in_deadline() {
        let positions: PositionContainer<i64> =
            [pos(1, 1), pos(2, 2), pos(3, 3)].into_iter().collect();
        let d = uniform_distances(2, &[1, 2, 3]);
        let mut previous: Option<Vec<PositionIdentifier>> = None;
        for deadline in [6, 10, 20, 50] {
            let j = trip(7, Some(0), Destination::Station(stid(1)), deadline);
            let feasible = feasible_positions(&j, &positions, &d);
            if let Some(prev) = previous {
                for s in prev {
                    assert!(
                        feasible.contains(&s),
                        "raising the deadline must not lose slot {s}"
                    );
                }
            }
            previous = Some(feasible);
        }
    }

    #[test]
    fn test_feasibility_monotone_in_arrival() {
        let positions: PositionContainer<i64> =
            [pos(1, 1), pos(2, 2), pos(3, 3)].into_iter().collect();
        let d = uniform_distances(2, &[1, 2, 3]);
        let mut previous: Option<Vec<PositionIdentifier>> = None;
        for arrival in [12, 8, 4, 0] {
            let j = trip(8, Some(arrival), Destination::Station(stid(1)), 20);
            let feasible = feasible_positions(&j, &positions, &d);
            if let Some(prev) = previous {
                for s in prev {
                    assert!(
                        feasible.contains(&s),
                        "an earlier arrival must not lose slot {s}"
                    );
                }
            }
            previous = Some(feasible);
        }
    }

    #[test]
    fn test_pinned_stopover_window_uses_same_formula() {
        let d = uniform_distances(3, &[1]);
        let j = Stopover::<PinnedKind, i64>::new_pinned(
            sid(9),
            RackIdentifier::new(0),
            Destination::Station(stid(1)),
            tp(30),
        );
        let iv = break_interval(&j, &pos(1, 2), &d);
        assert_eq!(iv.start(), tp(0));
        assert_eq!(iv.end(), tp(25));
    }

    #[test]
    fn test_table_from_entries_roundtrip() {
        let table = BreakIntervalTable::from_entries([(
            (sid(1), pid(1)),
            TimeInterval::new(tp(0), tp(10)),
        )]);
        assert_eq!(
            table.window(sid(1), pid(1)),
            Some(TimeInterval::new(tp(0), tp(10)))
        );
        assert_eq!(table.window(sid(1), pid(2)), None);
        assert_eq!(table.len(), 1);
    }
}
