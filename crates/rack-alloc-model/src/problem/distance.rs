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

use crate::problem::{
    position::PositionIdentifier,
    station::StationIdentifier,
    stopover::Destination,
};
use rack_alloc_core::prelude::{SolverVariable, TimeDelta};
use std::collections::HashMap;

/// Precomputed travel times between picking stations and storage slots.
///
/// The table is produced by a collaborator (loader or generator) and is
/// assumed internally consistent: every (station, position) pair a problem
/// references must be present. Terminal egress is the sentinel "stays
/// until the end of the horizon" case and always costs zero; it is
/// answered without a table entry.
#[derive(Debug, Clone, Default)]
pub struct DistanceMap<T: SolverVariable> {
    travel: HashMap<(StationIdentifier, PositionIdentifier), TimeDelta<T>>,
}

impl<T: SolverVariable> DistanceMap<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            travel: HashMap::new(),
        }
    }

    #[inline]
    pub fn insert(
        &mut self,
        station: StationIdentifier,
        position: PositionIdentifier,
        time: TimeDelta<T>,
    ) -> Option<TimeDelta<T>> {
        self.travel.insert((station, position), time)
    }

    #[inline]
    pub fn from_station(
        &self,
        station: StationIdentifier,
        position: PositionIdentifier,
    ) -> Option<TimeDelta<T>> {
        self.travel.get(&(station, position)).copied()
    }

    #[inline]
    pub fn to_destination(
        &self,
        destination: Destination,
        position: PositionIdentifier,
    ) -> Option<TimeDelta<T>> {
        match destination {
            Destination::Terminal => Some(TimeDelta::zero()),
            Destination::Station(id) => self.from_station(id, position),
        }
    }

    #[inline]
    pub fn contains(&self, station: StationIdentifier, position: PositionIdentifier) -> bool {
        self.travel.contains_key(&(station, position))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.travel.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.travel.is_empty()
    }
}

impl<T: SolverVariable> FromIterator<(StationIdentifier, PositionIdentifier, TimeDelta<T>)>
    for DistanceMap<T>
{
    fn from_iter<I: IntoIterator<Item = (StationIdentifier, PositionIdentifier, TimeDelta<T>)>>(
        iter: I,
    ) -> Self {
        let mut map = Self::new();
        for (station, position, time) in iter {
            map.insert(station, position, time);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn stid(n: u32) -> StationIdentifier {
        StationIdentifier::new(n)
    }

    #[inline]
    fn pid(n: u32) -> PositionIdentifier {
        PositionIdentifier::new(n)
    }

    #[test]
    fn test_station_lookup() {
        let map: DistanceMap<i64> = [(stid(1), pid(1), TimeDelta::new(4))].into_iter().collect();
        assert_eq!(map.from_station(stid(1), pid(1)), Some(TimeDelta::new(4)));
        assert_eq!(map.from_station(stid(1), pid(2)), None);
    }

    #[test]
    fn test_terminal_is_free_without_entries() {
        let map: DistanceMap<i64> = DistanceMap::new();
        assert_eq!(
            map.to_destination(Destination::Terminal, pid(7)),
            Some(TimeDelta::zero())
        );
    }

    #[test]
    fn test_destination_station_goes_through_table() {
        let map: DistanceMap<i64> = [(stid(2), pid(3), TimeDelta::new(9))].into_iter().collect();
        assert_eq!(
            map.to_destination(Destination::Station(stid(2)), pid(3)),
            Some(TimeDelta::new(9))
        );
        assert_eq!(map.to_destination(Destination::Station(stid(2)), pid(4)), None);
    }
}
