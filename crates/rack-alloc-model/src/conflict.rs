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

//! # Conflict Graphs
//!
//! Three pairwise relations over stopovers, all derived from the
//! materialized break-interval table:
//!
//! - same-slot overlap: two flexible stopovers whose windows at one slot
//!   intersect can never share that slot;
//! - storing blockage at `(s, s_front)`: a stopover entering the nested
//!   slot `s` while another one occupies `s_front` forces a rearrangement;
//! - retrieval blockage: the same on the way out, tested at the leaving
//!   time.
//!
//! Construction is pure; the three graphs are built concurrently over a
//! read-only table, and positions fan out in parallel inside each graph.

use crate::intervals::BreakIntervalTable;
use crate::problem::{
    nested::NestedIndex, position::PositionIdentifier, prob::Problem,
    stopover::StopoverIdentifier,
};
use rack_alloc_core::prelude::{SolverVariable, TimePoint};
use rayon::prelude::*;
use std::collections::HashMap;

type PairList = Vec<(StopoverIdentifier, StopoverIdentifier)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockageSide {
    Storing,
    Retrieval,
}

#[derive(Debug, Clone, Default)]
pub struct ConflictGraphs {
    overlap: HashMap<PositionIdentifier, PairList>,
    storing: HashMap<(PositionIdentifier, PositionIdentifier), PairList>,
    retrieval: HashMap<(PositionIdentifier, PositionIdentifier), PairList>,
}

impl ConflictGraphs {
    pub fn build<T: SolverVariable>(
        problem: &Problem<T>,
        table: &BreakIntervalTable<T>,
        nested: &NestedIndex,
    ) -> Self {
        let mut flexible: Vec<StopoverIdentifier> =
            problem.flexible_stopovers().iter_ids().collect();
        flexible.sort();
        let mut everyone: Vec<StopoverIdentifier> = flexible.clone();
        everyone.extend(problem.iter_pinned_stopovers().map(|j| j.id()));
        everyone.sort();
        let mut positions: Vec<PositionIdentifier> = problem.positions().iter_ids().collect();
        positions.sort();

        Self::build_from_parts(&flexible, &everyone, &positions, nested, table)
    }

    /// Builds the graphs from already-materialized windows. Pairs whose
    /// windows are missing from the table never conflict.
    pub fn build_from_parts<T: SolverVariable>(
        flexible: &[StopoverIdentifier],
        everyone: &[StopoverIdentifier],
        positions: &[PositionIdentifier],
        nested: &NestedIndex,
        table: &BreakIntervalTable<T>,
    ) -> Self {
        let (overlap, (storing, retrieval)) = rayon::join(
            || build_overlap(flexible, positions, table),
            || {
                rayon::join(
                    || build_blockage(everyone, nested, table, BlockageSide::Storing),
                    || build_blockage(everyone, nested, table, BlockageSide::Retrieval),
                )
            },
        );
        Self {
            overlap,
            storing,
            retrieval,
        }
    }

    /// Ordered pairs of flexible stopovers that may not share `position`.
    #[inline]
    pub fn overlap_at(&self, position: PositionIdentifier) -> &[(StopoverIdentifier, StopoverIdentifier)] {
        self.overlap
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    pub fn storing_at(
        &self,
        position: PositionIdentifier,
        front: PositionIdentifier,
    ) -> &[(StopoverIdentifier, StopoverIdentifier)] {
        self.storing
            .get(&(position, front))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    pub fn retrieval_at(
        &self,
        position: PositionIdentifier,
        front: PositionIdentifier,
    ) -> &[(StopoverIdentifier, StopoverIdentifier)] {
        self.retrieval
            .get(&(position, front))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    pub fn overlap_pair_count(&self) -> usize {
        self.overlap.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn blockage_pair_count(&self) -> usize {
        self.storing.values().map(Vec::len).sum::<usize>()
            + self.retrieval.values().map(Vec::len).sum::<usize>()
    }
}

fn build_overlap<T: SolverVariable>(
    flexible: &[StopoverIdentifier],
    positions: &[PositionIdentifier],
    table: &BreakIntervalTable<T>,
) -> HashMap<PositionIdentifier, PairList> {
    positions
        .par_iter()
        .map(|&s| {
            let mut pairs: PairList = Vec::new();
            for &j1 in flexible {
                let Some(w1) = table.window(j1, s) else {
                    continue;
                };
                for &j2 in flexible {
                    if j1 == j2 {
                        continue;
                    }
                    let Some(w2) = table.window(j2, s) else {
                        continue;
                    };
                    if w1.intersects(&w2) {
                        pairs.push((j1, j2));
                    }
                }
            }
            (s, pairs)
        })
        .collect()
}

fn build_blockage<T: SolverVariable>(
    everyone: &[StopoverIdentifier],
    nested: &NestedIndex,
    table: &BreakIntervalTable<T>,
    side: BlockageSide,
) -> HashMap<(PositionIdentifier, PositionIdentifier), PairList> {
    let lanes: Vec<(PositionIdentifier, PositionIdentifier)> = nested.iter_pairs().collect();
    lanes
        .par_iter()
        .map(|&(s, front)| {
            let mut pairs: PairList = Vec::new();
            for &j1 in everyone {
                let Some(w1) = table.window(j1, s) else {
                    continue;
                };
                let probe: TimePoint<T> = match side {
                    BlockageSide::Storing => w1.start(),
                    BlockageSide::Retrieval => w1.end(),
                };
                for &j2 in everyone {
                    if j1 == j2 {
                        continue;
                    }
                    let Some(w2) = table.window(j2, front) else {
                        continue;
                    };
                    if w2.interior_contains(probe) {
                        pairs.push((j1, j2));
                    }
                }
            }
            ((s, front), pairs)
        })
        .collect()
}
