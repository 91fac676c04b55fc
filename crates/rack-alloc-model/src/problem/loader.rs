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

//! Text-format instance loader.
//!
//! The format is whitespace-separated integers:
//!
//! ```text
//! R P S F V
//! x y depth                      (P position lines)
//! x y                            (S station lines)
//! rack origin dest arrival deadline   (F flexible-stopover lines)
//! rack dest deadline position         (V pinned-stopover lines)
//! ```
//!
//! `origin = -1` means no recorded origin, `dest = -1` the terminal event,
//! `arrival = -1` an unknown arrival time. Stations, positions and racks
//! are referenced by their zero-based index. Travel times are derived
//! here: Manhattan distance between station and lane plus the lane
//! approach cost of the slot's depth.

use crate::common::{FlexibleKind, PinnedKind};
use crate::problem::{
    asg::{PinnedAssignment, PinnedAssignmentContainer},
    distance::DistanceMap,
    err::ProblemLoaderError,
    position::{Position, PositionContainer, PositionIdentifier},
    prob::Problem,
    station::{PickingStation, Rack, RackIdentifier, StationIdentifier},
    stopover::{Destination, Stopover, StopoverContainer, StopoverIdentifier},
};
use rack_alloc_core::prelude::{TimeDelta, TimePoint};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

struct Scanner<'a, R: BufRead> {
    reader: &'a mut R,
    tokens: Vec<String>,
    cursor: usize,
}

impl<'a, R: BufRead> Scanner<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    fn next_i64(&mut self) -> Result<i64, ProblemLoaderError> {
        loop {
            if self.cursor < self.tokens.len() {
                let tok = &self.tokens[self.cursor];
                self.cursor += 1;
                return Ok(tok.parse::<i64>()?);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(ProblemLoaderError::UnexpectedEof);
            }
            self.tokens = line.split_whitespace().map(str::to_owned).collect();
            self.cursor = 0;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProblemLoader;

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Problem<i64>, ProblemLoaderError> {
        let mut reader = BufReader::new(File::open(path)?);
        self.from_bufread(&mut reader)
    }

    pub fn from_bufread<R: BufRead>(&self, br: &mut R) -> Result<Problem<i64>, ProblemLoaderError> {
        let mut sc = Scanner::new(br);

        let rack_count = sc.next_i64()?;
        let position_count = sc.next_i64()?;
        let station_count = sc.next_i64()?;
        let flexible_count = sc.next_i64()?;
        let pinned_count = sc.next_i64()?;
        if position_count <= 0 || flexible_count + pinned_count <= 0 {
            return Err(ProblemLoaderError::NonPositiveCounts);
        }

        let racks: Vec<Rack> = (0..rack_count.max(0) as u32)
            .map(|r| Rack::new(RackIdentifier::new(r)))
            .collect();

        let mut positions = PositionContainer::with_capacity(position_count as usize);
        for i in 0..position_count {
            let (x, y, depth) = (sc.next_i64()?, sc.next_i64()?, sc.next_i64()?);
            positions.insert(Position::new(PositionIdentifier::new(i as u32), x, y, depth)?);
        }

        let mut stations = Vec::with_capacity(station_count.max(0) as usize);
        for i in 0..station_count {
            let (x, y) = (sc.next_i64()?, sc.next_i64()?);
            stations.push(PickingStation::new(StationIdentifier::new(i as u32), x, y));
        }

        let distances = build_distances(&stations, &positions);

        let rack_ref = |idx: i64| -> Result<RackIdentifier, ProblemLoaderError> {
            if idx < 0 || idx >= rack_count {
                return Err(ProblemLoaderError::InvalidReference(format!(
                    "rack index {idx}"
                )));
            }
            Ok(RackIdentifier::new(idx as u32))
        };
        let station_ref = |idx: i64| -> Result<StationIdentifier, ProblemLoaderError> {
            if idx < 0 || idx >= station_count {
                return Err(ProblemLoaderError::InvalidReference(format!(
                    "station index {idx}"
                )));
            }
            Ok(StationIdentifier::new(idx as u32))
        };

        let mut flexible = StopoverContainer::with_capacity(flexible_count as usize);
        for i in 0..flexible_count {
            let rack = rack_ref(sc.next_i64()?)?;
            let origin_raw = sc.next_i64()?;
            let dest_raw = sc.next_i64()?;
            let arrival_raw = sc.next_i64()?;
            let deadline = sc.next_i64()?;

            let origin = if origin_raw < 0 {
                None
            } else {
                Some(station_ref(origin_raw)?)
            };
            let destination = if dest_raw < 0 {
                Destination::Terminal
            } else {
                Destination::Station(station_ref(dest_raw)?)
            };
            let arrival = if arrival_raw < 0 {
                None
            } else {
                Some(TimePoint::new(arrival_raw))
            };

            flexible.insert(Stopover::<FlexibleKind, i64>::new(
                StopoverIdentifier::new(i as u32),
                rack,
                origin,
                arrival,
                destination,
                TimePoint::new(deadline),
            )?);
        }

        let mut pinned = PinnedAssignmentContainer::new();
        for i in 0..pinned_count {
            let rack = rack_ref(sc.next_i64()?)?;
            let dest_raw = sc.next_i64()?;
            let deadline = sc.next_i64()?;
            let position_raw = sc.next_i64()?;

            let destination = if dest_raw < 0 {
                Destination::Terminal
            } else {
                Destination::Station(station_ref(dest_raw)?)
            };
            if position_raw < 0 || position_raw >= position_count {
                return Err(ProblemLoaderError::InvalidReference(format!(
                    "position index {position_raw}"
                )));
            }

            let stopover = Stopover::<PinnedKind, i64>::new_pinned(
                StopoverIdentifier::new((flexible_count + i) as u32),
                rack,
                destination,
                TimePoint::new(deadline),
            );
            pinned.insert(PinnedAssignment::new(
                stopover,
                PositionIdentifier::new(position_raw as u32),
            ));
        }

        Ok(Problem::new(
            racks, positions, stations, distances, flexible, pinned,
        )?)
    }
}

/// Manhattan distance from station to lane mouth plus the lane approach
/// cost of the slot's depth.
pub fn build_distances(
    stations: &[PickingStation<i64>],
    positions: &PositionContainer<i64>,
) -> DistanceMap<i64> {
    let mut distances = DistanceMap::new();
    for station in stations {
        for position in positions.iter() {
            let travel = (station.x() - position.x()).abs()
                + (station.y() - position.y()).abs()
                + position.approach_cost().value();
            distances.insert(station.id(), position.id(), TimeDelta::new(travel));
        }
    }
    distances
}
