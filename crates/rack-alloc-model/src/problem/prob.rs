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

use crate::common::{FlexibleKind, Kind, PinnedKind};
use crate::intervals::break_interval;
use crate::problem::{
    asg::{PinnedAssignment, PinnedAssignmentContainer},
    distance::DistanceMap,
    err::{
        InfeasiblePinningError, MissingDistanceError, ProblemError, UnknownPositionError,
        UnknownStationError,
    },
    position::{PositionContainer, PositionIdentifier},
    station::{PickingStation, Rack, StationIdentifier},
    stopover::{Destination, Stopover, StopoverContainer},
};
use rack_alloc_core::prelude::{Cost, SolverVariable, TimeDelta};
use std::collections::HashSet;

/// A validated deep-lane storage assignment instance.
///
/// Construction checks referential consistency (stations, positions,
/// distance coverage) and rejects pins whose own occupancy window at the
/// pinned slot is empty. Everything downstream may rely on those
/// guarantees.
#[derive(Debug, Clone)]
pub struct Problem<T: SolverVariable> {
    racks: Vec<Rack>,
    positions: PositionContainer<T>,
    stations: Vec<PickingStation<T>>,
    distances: DistanceMap<T>,
    flexible_stopovers: StopoverContainer<FlexibleKind, T>,
    pinned_assignments: PinnedAssignmentContainer<T>,
}

impl<T: SolverVariable> Problem<T> {
    pub fn new(
        racks: Vec<Rack>,
        positions: PositionContainer<T>,
        stations: Vec<PickingStation<T>>,
        distances: DistanceMap<T>,
        flexible_stopovers: StopoverContainer<FlexibleKind, T>,
        pinned_assignments: PinnedAssignmentContainer<T>,
    ) -> Result<Self, ProblemError> {
        let known_stations: HashSet<StationIdentifier> =
            stations.iter().map(|s| s.id()).collect();

        for j in flexible_stopovers.iter() {
            validate_station_refs(j, &known_stations, &positions, &distances)?;
        }
        for a in pinned_assignments.iter() {
            validate_station_refs(a.stopover(), &known_stations, &positions, &distances)?;
            let Some(position) = positions.get(a.position()) else {
                return Err(UnknownPositionError::new(a.stopover_id(), a.position()))?;
            };
            // The initial placement itself must be workable; a solver
            // cannot be asked to fix resident inventory.
            if break_interval(a.stopover(), position, &distances).is_empty() {
                return Err(InfeasiblePinningError::new(a.stopover_id(), a.position()))?;
            }
        }

        Ok(Self {
            racks,
            positions,
            stations,
            distances,
            flexible_stopovers,
            pinned_assignments,
        })
    }

    #[inline]
    pub fn racks(&self) -> &[Rack] {
        &self.racks
    }

    #[inline]
    pub fn positions(&self) -> &PositionContainer<T> {
        &self.positions
    }

    #[inline]
    pub fn stations(&self) -> &[PickingStation<T>] {
        &self.stations
    }

    #[inline]
    pub fn distances(&self) -> &DistanceMap<T> {
        &self.distances
    }

    #[inline]
    pub fn flexible_stopovers(&self) -> &StopoverContainer<FlexibleKind, T> {
        &self.flexible_stopovers
    }

    #[inline]
    pub fn pinned_assignments(&self) -> &PinnedAssignmentContainer<T> {
        &self.pinned_assignments
    }

    #[inline]
    pub fn iter_flexible_stopovers(&self) -> impl Iterator<Item = &Stopover<FlexibleKind, T>> {
        self.flexible_stopovers.iter()
    }

    #[inline]
    pub fn iter_pinned_stopovers(&self) -> impl Iterator<Item = &Stopover<PinnedKind, T>> {
        self.pinned_assignments.iter().map(|a| a.stopover())
    }

    #[inline]
    pub fn iter_pinned_assignments(&self) -> impl Iterator<Item = &PinnedAssignment<T>> {
        self.pinned_assignments.iter()
    }

    #[inline]
    pub fn stopover_count(&self) -> usize {
        self.flexible_stopovers.len() + self.pinned_assignments.len()
    }

    /// Travel cost of serving `stopover` through slot `position`: the way
    /// in from the origin station plus the way out to the destination.
    /// Unknown arrivals have no inbound trip; terminal egress is free.
    pub fn round_trip_cost<K: Kind>(
        &self,
        stopover: &Stopover<K, T>,
        position: PositionIdentifier,
    ) -> Cost<T> {
        let inbound = stopover
            .origin()
            .and_then(|o| self.distances.from_station(o, position))
            .unwrap_or_else(TimeDelta::zero);
        let outbound = self
            .distances
            .to_destination(stopover.destination(), position)
            .expect("distance table validated at problem construction");
        Cost::new(inbound.value()) + Cost::new(outbound.value())
    }
}

fn validate_station_refs<K: Kind, T: SolverVariable>(
    stopover: &Stopover<K, T>,
    known_stations: &HashSet<StationIdentifier>,
    positions: &PositionContainer<T>,
    distances: &DistanceMap<T>,
) -> Result<(), ProblemError> {
    let mut referenced: Vec<StationIdentifier> = Vec::with_capacity(2);
    if let Some(origin) = stopover.origin() {
        referenced.push(origin);
    }
    if let Destination::Station(dest) = stopover.destination() {
        referenced.push(dest);
    }

    for station in referenced {
        if !known_stations.contains(&station) {
            return Err(UnknownStationError::new(stopover.id(), station))?;
        }
        for position in positions.iter() {
            if !distances.contains(station, position.id()) {
                return Err(MissingDistanceError::new(station, position.id()))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::position::Position;
    use crate::problem::station::RackIdentifier;
    use crate::problem::stopover::StopoverIdentifier;
    use rack_alloc_core::prelude::TimePoint;

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

    fn positions() -> PositionContainer<i64> {
        [
            Position::new(pid(1), 0, 0, 1).unwrap(),
            Position::new(pid(2), 0, 0, 2).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    fn stations() -> Vec<PickingStation<i64>> {
        vec![PickingStation::new(stid(1), 3, 0)]
    }

    fn distances() -> DistanceMap<i64> {
        [
            (stid(1), pid(1), TimeDelta::new(5)),
            (stid(1), pid(2), TimeDelta::new(9)),
        ]
        .into_iter()
        .collect()
    }

    fn flexible(deadline: i64) -> StopoverContainer<FlexibleKind, i64> {
        [Stopover::new_flexible(
            sid(1),
            RackIdentifier::new(0),
            Some(stid(1)),
            Some(tp(0)),
            Destination::Station(stid(1)),
            tp(deadline),
        )
        .unwrap()]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_valid_problem_constructs() {
        let p = Problem::new(
            vec![Rack::new(RackIdentifier::new(0))],
            positions(),
            stations(),
            distances(),
            flexible(100),
            PinnedAssignmentContainer::new(),
        )
        .expect("consistent instance");
        assert_eq!(p.stopover_count(), 1);
    }

    #[test]
    fn test_unknown_station_rejected() {
        let bad: StopoverContainer<FlexibleKind, i64> = [Stopover::new_flexible(
            sid(2),
            RackIdentifier::new(0),
            Some(stid(9)),
            Some(tp(0)),
            Destination::Terminal,
            tp(100),
        )
        .unwrap()]
        .into_iter()
        .collect();
        let err = Problem::new(
            vec![],
            positions(),
            stations(),
            distances(),
            bad,
            PinnedAssignmentContainer::new(),
        )
        .expect_err("station 9 does not exist");
        assert_eq!(
            err,
            ProblemError::UnknownStation(UnknownStationError::new(sid(2), stid(9)))
        );
    }

    #[test]
    fn test_missing_distance_rejected() {
        let sparse: DistanceMap<i64> =
            [(stid(1), pid(1), TimeDelta::new(5))].into_iter().collect();
        let err = Problem::new(
            vec![],
            positions(),
            stations(),
            sparse,
            flexible(100),
            PinnedAssignmentContainer::new(),
        )
        .expect_err("no distance for position 2");
        assert_eq!(
            err,
            ProblemError::MissingDistance(MissingDistanceError::new(stid(1), pid(2)))
        );
    }

    #[test]
    fn test_pin_to_unknown_position_rejected() {
        let pin = PinnedAssignment::new(
            Stopover::new_pinned(sid(3), RackIdentifier::new(0), Destination::Terminal, tp(50)),
            pid(9),
        );
        let err = Problem::new(
            vec![],
            positions(),
            stations(),
            distances(),
            StopoverContainer::new(),
            [pin].into_iter().collect(),
        )
        .expect_err("position 9 does not exist");
        assert_eq!(
            err,
            ProblemError::UnknownPosition(UnknownPositionError::new(sid(3), pid(9)))
        );
    }

    #[test]
    fn test_infeasible_pin_rejected_before_assembly() {
        // Deadline 10, egress to station 1 from slot 2 costs 9 plus depth
        // penalty 2: the window is (0, -1) and the pin cannot work.
        let pin = PinnedAssignment::new(
            Stopover::new_pinned(
                sid(4),
                RackIdentifier::new(0),
                Destination::Station(stid(1)),
                tp(10),
            ),
            pid(2),
        );
        let err = Problem::new(
            vec![],
            positions(),
            stations(),
            distances(),
            StopoverContainer::new(),
            [pin].into_iter().collect(),
        )
        .expect_err("pin is out of reach");
        assert_eq!(
            err,
            ProblemError::InfeasiblePinning(InfeasiblePinningError::new(sid(4), pid(2)))
        );
    }

    #[test]
    fn test_zero_width_pin_window_is_rejected() {
        // Deadline 11 makes the window exactly empty: (0, 0).
        let pin = PinnedAssignment::new(
            Stopover::new_pinned(
                sid(5),
                RackIdentifier::new(0),
                Destination::Station(stid(1)),
                tp(11),
            ),
            pid(2),
        );
        let err = Problem::new(
            vec![],
            positions(),
            stations(),
            distances(),
            StopoverContainer::new(),
            [pin].into_iter().collect(),
        )
        .expect_err("empty window must not silently proceed");
        assert_eq!(
            err,
            ProblemError::InfeasiblePinning(InfeasiblePinningError::new(sid(5), pid(2)))
        );
    }

    #[test]
    fn test_feasible_pin_accepted() {
        let pin = PinnedAssignment::new(
            Stopover::new_pinned(
                sid(6),
                RackIdentifier::new(0),
                Destination::Station(stid(1)),
                tp(50),
            ),
            pid(2),
        );
        let p = Problem::new(
            vec![],
            positions(),
            stations(),
            distances(),
            StopoverContainer::new(),
            [pin].into_iter().collect(),
        )
        .expect("window (0, 39) is fine");
        assert_eq!(
            p.pinned_assignments().pinned_position_of(sid(6)),
            Some(pid(2))
        );
    }

    #[test]
    fn test_round_trip_cost_sums_both_legs() {
        let p = Problem::new(
            vec![],
            positions(),
            stations(),
            distances(),
            flexible(100),
            PinnedAssignmentContainer::new(),
        )
        .unwrap();
        let j = p.flexible_stopovers().get(sid(1)).unwrap();
        assert_eq!(p.round_trip_cost(j, pid(1)), Cost::new(10));
        assert_eq!(p.round_trip_cost(j, pid(2)), Cost::new(18));
    }
}
