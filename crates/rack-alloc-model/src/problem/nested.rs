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

use crate::problem::position::{PositionContainer, PositionIdentifier};
use rack_alloc_core::prelude::SolverVariable;
use std::collections::HashMap;

/// For every slot, the slots that sit between it and its lane opening.
///
/// Handling a nested slot has to pass through every slot of that set, so
/// each (slot, front-slot) pair is a potential blockage site. A slot right
/// at the lane opening maps to the empty set.
#[derive(Debug, Clone, Default)]
pub struct NestedIndex {
    front: HashMap<PositionIdentifier, Vec<PositionIdentifier>>,
}

impl NestedIndex {
    pub fn build<T: SolverVariable>(positions: &PositionContainer<T>) -> Self {
        let mut front: HashMap<PositionIdentifier, Vec<PositionIdentifier>> =
            HashMap::with_capacity(positions.len());
        for s in positions.iter() {
            let mut blockers: Vec<PositionIdentifier> = positions
                .iter()
                .filter(|c| c.lies_in_front_of(s))
                .map(|c| c.id())
                .collect();
            blockers.sort();
            front.insert(s.id(), blockers);
        }
        Self { front }
    }

    /// Slots that must be crossed to reach `position`, shallowest first.
    #[inline]
    pub fn front_of(&self, position: PositionIdentifier) -> &[PositionIdentifier] {
        self.front
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All (slot, front-slot) pairs that can host a blockage.
    #[inline]
    pub fn iter_pairs(&self) -> impl Iterator<Item = (PositionIdentifier, PositionIdentifier)> + '_ {
        self.front
            .iter()
            .flat_map(|(s, blockers)| blockers.iter().map(move |b| (*s, *b)))
    }

    #[inline]
    pub fn pair_count(&self) -> usize {
        self.front.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::position::Position;

    #[inline]
    fn pid(n: u32) -> PositionIdentifier {
        PositionIdentifier::new(n)
    }

    fn lane() -> PositionContainer<i64> {
        // One lane served from both sides, one unrelated lane.
        [
            Position::new(pid(1), 0, 0, 1).unwrap(),
            Position::new(pid(2), 0, 0, 2).unwrap(),
            Position::new(pid(3), 0, 0, 3).unwrap(),
            Position::new(pid(4), 0, 0, -1).unwrap(),
            Position::new(pid(5), 1, 0, 1).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_front_slot_has_empty_set() {
        let index = NestedIndex::build(&lane());
        assert!(index.front_of(pid(1)).is_empty());
        assert!(index.front_of(pid(4)).is_empty());
    }

    #[test]
    fn test_deep_slot_collects_all_shallower_same_side() {
        let index = NestedIndex::build(&lane());
        assert_eq!(index.front_of(pid(2)), &[pid(1)]);
        assert_eq!(index.front_of(pid(3)), &[pid(1), pid(2)]);
    }

    #[test]
    fn test_other_lane_is_unrelated() {
        let index = NestedIndex::build(&lane());
        assert!(index.front_of(pid(5)).is_empty());
        assert!(!index.front_of(pid(3)).contains(&pid(5)));
    }

    #[test]
    fn test_nesting_is_transitive() {
        let index = NestedIndex::build(&lane());
        // p1 in front of p2, p2 in front of p3 => p1 in front of p3,
        // and the same closure for every chained pair in the index.
        assert!(index.front_of(pid(2)).contains(&pid(1)));
        assert!(index.front_of(pid(3)).contains(&pid(2)));
        assert!(index.front_of(pid(3)).contains(&pid(1)));
        for (s, f) in index.iter_pairs() {
            for ff in index.front_of(f) {
                assert!(
                    index.front_of(s).contains(ff),
                    "front sets must be transitively closed"
                );
            }
        }
    }

    #[test]
    fn test_pair_count() {
        let index = NestedIndex::build(&lane());
        assert_eq!(index.pair_count(), 3);
    }
}
