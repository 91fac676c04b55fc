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

use crate::{
    common::{FlexibleKind, Identifier, IdentifierMarkerName, Kind, PinnedKind},
    problem::{
        err::{MissingOriginError, StopoverError},
        station::{RackIdentifier, StationIdentifier},
    },
};
use rack_alloc_core::prelude::{SolverVariable, TimePoint};
use std::{collections::HashMap, hash::Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopoverIdentifierMarker;

impl IdentifierMarkerName for StopoverIdentifierMarker {
    const NAME: &'static str = "StopoverId";
}

pub type StopoverIdentifier = Identifier<u32, StopoverIdentifierMarker>;

/// Where a stored unit leaves to.
///
/// The plan horizon's sentinel "everything still resident at the end" case
/// is a first-class variant instead of a magic station id, resolved once
/// at stopover construction. Terminal egress carries no travel cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Station(StationIdentifier),
    Terminal,
}

impl Destination {
    #[inline]
    pub fn station(&self) -> Option<StationIdentifier> {
        match self {
            Destination::Station(id) => Some(*id),
            Destination::Terminal => None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Destination::Terminal)
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Station(id) => write!(f, "{id}"),
            Destination::Terminal => write!(f, "Terminal"),
        }
    }
}

/// One storage or retrieval event that occupies a slot for a while.
///
/// A flexible stopover is assigned its slot by the solver; a pinned one
/// represents inventory already resident at plan start and is tied to its
/// slot through a [`crate::problem::asg::PinnedAssignment`].
///
/// An unknown arrival time means the unit is present from time zero. A
/// recorded arrival time requires an origin station, because the slot
/// can only be reached by travelling from somewhere.
#[derive(Debug, Clone)]
pub struct Stopover<K: Kind, T: SolverVariable> {
    id: StopoverIdentifier,
    rack: RackIdentifier,
    origin: Option<StationIdentifier>,
    arrival: Option<TimePoint<T>>,
    destination: Destination,
    deadline: TimePoint<T>,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: Kind, T: SolverVariable> PartialEq for Stopover<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: Kind, T: SolverVariable> Eq for Stopover<K, T> {}

impl<K: Kind, T: SolverVariable> std::hash::Hash for Stopover<K, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl<T: SolverVariable> Stopover<FlexibleKind, T> {
    #[inline]
    pub fn new_flexible(
        id: StopoverIdentifier,
        rack: RackIdentifier,
        origin: Option<StationIdentifier>,
        arrival: Option<TimePoint<T>>,
        destination: Destination,
        deadline: TimePoint<T>,
    ) -> Result<Self, StopoverError> {
        Stopover::<FlexibleKind, T>::new(id, rack, origin, arrival, destination, deadline)
    }
}

impl<T: SolverVariable> Stopover<PinnedKind, T> {
    #[inline]
    pub fn new_pinned(
        id: StopoverIdentifier,
        rack: RackIdentifier,
        destination: Destination,
        deadline: TimePoint<T>,
    ) -> Self {
        // Resident inventory has neither an origin trip nor an arrival
        // time, so this constructor cannot fail.
        Stopover {
            id,
            rack,
            origin: None,
            arrival: None,
            destination,
            deadline,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<K: Kind, T: SolverVariable> Stopover<K, T> {
    #[inline]
    pub fn new(
        id: StopoverIdentifier,
        rack: RackIdentifier,
        origin: Option<StationIdentifier>,
        arrival: Option<TimePoint<T>>,
        destination: Destination,
        deadline: TimePoint<T>,
    ) -> Result<Self, StopoverError> {
        if arrival.is_some() && origin.is_none() {
            return Err(MissingOriginError::new(id))?;
        }
        Ok(Self {
            id,
            rack,
            origin,
            arrival,
            destination,
            deadline,
            _phantom: std::marker::PhantomData,
        })
    }

    #[inline]
    pub fn id(&self) -> StopoverIdentifier {
        self.id
    }

    #[inline]
    pub fn rack(&self) -> RackIdentifier {
        self.rack
    }

    #[inline]
    pub fn origin(&self) -> Option<StationIdentifier> {
        self.origin
    }

    #[inline]
    pub fn arrival(&self) -> Option<TimePoint<T>> {
        self.arrival
    }

    #[inline]
    pub fn destination(&self) -> Destination {
        self.destination
    }

    #[inline]
    pub fn deadline(&self) -> TimePoint<T> {
        self.deadline
    }
}

impl<K: Kind, T: SolverVariable> std::fmt::Display for Stopover<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-Stopover: Id: {}, Rack: {}, Destination: {}, Deadline: {}",
            K::NAME,
            self.id,
            self.rack,
            self.destination,
            self.deadline
        )
    }
}

#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct StopoverContainer<K: Kind, T: SolverVariable>(
    HashMap<StopoverIdentifier, Stopover<K, T>>,
);

impl<K: Kind, T: SolverVariable> Default for StopoverContainer<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kind, T: SolverVariable> StopoverContainer<K, T> {
    #[inline]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self(HashMap::with_capacity(cap))
    }

    #[inline]
    pub fn insert(&mut self, stopover: Stopover<K, T>) -> Option<Stopover<K, T>> {
        self.0.insert(stopover.id(), stopover)
    }

    #[inline]
    pub fn get(&self, id: StopoverIdentifier) -> Option<&Stopover<K, T>> {
        self.0.get(&id)
    }

    #[inline]
    pub fn contains_id(&self, id: StopoverIdentifier) -> bool {
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
    pub fn iter(&self) -> impl Iterator<Item = &Stopover<K, T>> {
        self.0.values()
    }

    #[inline]
    pub fn iter_ids(&self) -> impl Iterator<Item = StopoverIdentifier> + '_ {
        self.0.keys().copied()
    }
}

impl<K: Kind, T: SolverVariable> FromIterator<Stopover<K, T>> for StopoverContainer<K, T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Stopover<K, T>>>(iter: I) -> Self {
        let mut c = Self::new();
        for s in iter {
            c.insert(s);
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn sid(n: u32) -> StopoverIdentifier {
        StopoverIdentifier::new(n)
    }

    #[inline]
    fn rid(n: u32) -> RackIdentifier {
        RackIdentifier::new(n)
    }

    #[inline]
    fn stid(n: u32) -> StationIdentifier {
        StationIdentifier::new(n)
    }

    #[inline]
    fn tp(v: i64) -> TimePoint<i64> {
        TimePoint::new(v)
    }

    #[test]
    fn test_arrival_without_origin_rejected() {
        let err = Stopover::<FlexibleKind, i64>::new_flexible(
            sid(1),
            rid(0),
            None,
            Some(tp(5)),
            Destination::Terminal,
            tp(100),
        )
        .expect_err("arrival without origin must be rejected");
        assert_eq!(
            err,
            StopoverError::MissingOrigin(MissingOriginError::new(sid(1)))
        );
    }

    #[test]
    fn test_flexible_with_trip_ok() {
        let j = Stopover::<FlexibleKind, i64>::new_flexible(
            sid(2),
            rid(0),
            Some(stid(1)),
            Some(tp(5)),
            Destination::Station(stid(2)),
            tp(100),
        )
        .expect("origin present");
        assert_eq!(j.origin(), Some(stid(1)));
        assert_eq!(j.arrival(), Some(tp(5)));
        assert_eq!(j.destination().station(), Some(stid(2)));
        assert_eq!(j.deadline(), tp(100));
    }

    #[test]
    fn test_unknown_arrival_without_origin_ok() {
        let j = Stopover::<FlexibleKind, i64>::new_flexible(
            sid(3),
            rid(0),
            None,
            None,
            Destination::Terminal,
            tp(50),
        )
        .expect("no arrival, no origin needed");
        assert_eq!(j.arrival(), None);
        assert!(j.destination().is_terminal());
    }

    #[test]
    fn test_pinned_constructor_has_no_trip() {
        let j = Stopover::<PinnedKind, i64>::new_pinned(
            sid(4),
            rid(1),
            Destination::Station(stid(1)),
            tp(30),
        );
        assert_eq!(j.origin(), None);
        assert_eq!(j.arrival(), None);
    }

    #[test]
    fn test_identity_is_the_id() {
        let a = Stopover::<FlexibleKind, i64>::new_flexible(
            sid(5),
            rid(0),
            None,
            None,
            Destination::Terminal,
            tp(10),
        )
        .unwrap();
        let b = Stopover::<FlexibleKind, i64>::new_flexible(
            sid(5),
            rid(1),
            None,
            None,
            Destination::Terminal,
            tp(99),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_container_roundtrip() {
        let c: StopoverContainer<FlexibleKind, i64> = [
            Stopover::new_flexible(sid(1), rid(0), None, None, Destination::Terminal, tp(10))
                .unwrap(),
            Stopover::new_flexible(sid(2), rid(0), None, None, Destination::Terminal, tp(20))
                .unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(c.len(), 2);
        assert!(c.contains_id(sid(1)));
        assert_eq!(c.get(sid(2)).map(|j| j.deadline()), Some(tp(20)));
    }
}
