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
    stopover::{Stopover, StopoverIdentifier},
};
use crate::common::PinnedKind;
use rack_alloc_core::prelude::SolverVariable;
use std::collections::HashMap;

/// A pinned stopover together with the slot it already occupies.
///
/// Whether the pin is actually reachable under the stopover's timing data
/// is checked when the [`crate::problem::prob::Problem`] is built, because
/// that check needs the distance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedAssignment<T: SolverVariable> {
    stopover: Stopover<PinnedKind, T>,
    position: PositionIdentifier,
}

impl<T: SolverVariable> PinnedAssignment<T> {
    #[inline]
    pub fn new(stopover: Stopover<PinnedKind, T>, position: PositionIdentifier) -> Self {
        Self { stopover, position }
    }

    #[inline]
    pub fn stopover(&self) -> &Stopover<PinnedKind, T> {
        &self.stopover
    }

    #[inline]
    pub fn stopover_id(&self) -> StopoverIdentifier {
        self.stopover.id()
    }

    #[inline]
    pub fn position(&self) -> PositionIdentifier {
        self.position
    }
}

impl<T: SolverVariable> std::fmt::Display for PinnedAssignment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PinnedAssignment(Stopover: {}, Position: {})",
            self.stopover.id(),
            self.position
        )
    }
}

#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct PinnedAssignmentContainer<T: SolverVariable>(
    HashMap<StopoverIdentifier, PinnedAssignment<T>>,
);

impl<T: SolverVariable> Default for PinnedAssignmentContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SolverVariable> PinnedAssignmentContainer<T> {
    #[inline]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    #[inline]
    pub fn insert(&mut self, assignment: PinnedAssignment<T>) -> Option<PinnedAssignment<T>> {
        self.0.insert(assignment.stopover_id(), assignment)
    }

    #[inline]
    pub fn get(&self, id: StopoverIdentifier) -> Option<&PinnedAssignment<T>> {
        self.0.get(&id)
    }

    #[inline]
    pub fn pinned_position_of(&self, id: StopoverIdentifier) -> Option<PositionIdentifier> {
        self.0.get(&id).map(|a| a.position())
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
    pub fn iter(&self) -> impl Iterator<Item = &PinnedAssignment<T>> {
        self.0.values()
    }
}

impl<T: SolverVariable> FromIterator<PinnedAssignment<T>> for PinnedAssignmentContainer<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = PinnedAssignment<T>>>(iter: I) -> Self {
        let mut c = Self::new();
        for a in iter {
            c.insert(a);
        }
        c
    }
}
