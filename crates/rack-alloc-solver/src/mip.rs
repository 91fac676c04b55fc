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

//! Model assembly.
//!
//! Variables: one boolean `x[j, s]` per stopover and slot, one boolean
//! `b1/b2[s, s_front, j]` per nested slot pair and stopover. Objective:
//! round-trip travel of the chosen slots plus `4 * |depth|` per fired
//! blockage indicator. Constraints: exactly one feasible slot per flexible
//! stopover, at most one of any temporally overlapping pair per slot, the
//! standard `b >= x + x' - 1` linearization on both blockage sides, and
//! the pins. The positive blockage coefficient keeps every indicator at
//! its lower bound, so the linearization pins it to the conjunction
//! exactly.

use crate::outcome::SolveOutcome;
use good_lp::{
    Expression, Solution as LpSolution, SolverModel, Variable, default_solver, variable, variables,
};
use num_traits::ToPrimitive;
use rack_alloc_model::conflict::ConflictGraphs;
use rack_alloc_model::intervals::{BreakIntervalTable, feasible_positions};
use rack_alloc_model::problem::{
    err::EmptyFeasibleSetError,
    nested::NestedIndex,
    position::PositionIdentifier,
    prob::Problem,
    stopover::StopoverIdentifier,
};
use rack_alloc_model::solution::{BlockageEvent, BlockagePhase, Placement, Solution};
use rack_alloc_core::prelude::SolverVariable;
use std::collections::HashMap;
use tracing::{debug, info};

const BLOCKAGE_WEIGHT: f64 = 4.0;

/// Assembles the boolean model for a problem and runs it through the
/// generic solver boundary. Search itself is entirely the backend's
/// business.
#[derive(Debug, Clone, Copy, Default)]
pub struct MipSolver;

impl MipSolver {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn solve<T: SolverVariable>(
        &self,
        problem: &Problem<T>,
    ) -> Result<SolveOutcome<T>, EmptyFeasibleSetError> {
        let table = BreakIntervalTable::build(problem);
        let nested = NestedIndex::build(problem.positions());

        let mut flexible_ids: Vec<StopoverIdentifier> =
            problem.flexible_stopovers().iter_ids().collect();
        flexible_ids.sort();
        let mut pinned_ids: Vec<StopoverIdentifier> =
            problem.iter_pinned_stopovers().map(|j| j.id()).collect();
        pinned_ids.sort();
        let mut everyone: Vec<StopoverIdentifier> = flexible_ids.clone();
        everyone.extend(pinned_ids.iter().copied());
        everyone.sort();
        let mut position_ids: Vec<PositionIdentifier> = problem.positions().iter_ids().collect();
        position_ids.sort();

        // The weaker existence check: refuse to assemble a model that is
        // already known to be unsolvable.
        let mut feasible_sets: HashMap<StopoverIdentifier, Vec<PositionIdentifier>> =
            HashMap::with_capacity(flexible_ids.len());
        for j in problem.iter_flexible_stopovers() {
            let feasible = feasible_positions(j, problem.positions(), problem.distances());
            if feasible.is_empty() {
                return Err(EmptyFeasibleSetError::new(j.id()));
            }
            feasible_sets.insert(j.id(), feasible);
        }

        let conflicts = ConflictGraphs::build(problem, &table, &nested);
        debug!(
            overlap_pairs = conflicts.overlap_pair_count(),
            blockage_pairs = conflicts.blockage_pair_count(),
            "conflict graphs built"
        );

        // Variables.
        let mut vars = variables!();
        let mut x: HashMap<(StopoverIdentifier, PositionIdentifier), Variable> = HashMap::new();
        for &j in &everyone {
            for &s in &position_ids {
                let name = format!("x_{}_{}", j.into_inner(), s.into_inner());
                x.insert((j, s), vars.add(variable().binary().name(name)));
            }
        }

        let nested_pairs: Vec<(PositionIdentifier, PositionIdentifier)> = {
            let mut pairs: Vec<_> = nested.iter_pairs().collect();
            pairs.sort();
            pairs
        };
        let mut b1: HashMap<(PositionIdentifier, PositionIdentifier, StopoverIdentifier), Variable> =
            HashMap::new();
        let mut b2: HashMap<(PositionIdentifier, PositionIdentifier, StopoverIdentifier), Variable> =
            HashMap::new();
        for &(s, front) in &nested_pairs {
            for &j in &everyone {
                let suffix = format!(
                    "{}_{}_{}",
                    s.into_inner(),
                    front.into_inner(),
                    j.into_inner()
                );
                b1.insert(
                    (s, front, j),
                    vars.add(variable().binary().name(format!("b1_{suffix}"))),
                );
                b2.insert(
                    (s, front, j),
                    vars.add(variable().binary().name(format!("b2_{suffix}"))),
                );
            }
        }

        // Objective: travel for flexible stopovers, rearrangement penalty
        // per blockage indicator.
        let mut travel_cost: HashMap<(StopoverIdentifier, PositionIdentifier), f64> =
            HashMap::new();
        let mut objective = Expression::from(0.0);
        for j in problem.iter_flexible_stopovers() {
            for &s in &position_ids {
                let cost = problem
                    .round_trip_cost(j, s)
                    .value()
                    .to_f64()
                    .expect("travel cost fits in f64");
                travel_cost.insert((j.id(), s), cost);
                objective = objective + cost * x[&(j.id(), s)];
            }
        }
        let mut blockage_weight: HashMap<(PositionIdentifier, PositionIdentifier), f64> =
            HashMap::new();
        for &(s, front) in &nested_pairs {
            let depth = problem
                .positions()
                .get(s)
                .expect("nested index only references known positions")
                .nesting_level()
                .to_f64()
                .expect("depth fits in f64");
            blockage_weight.insert((s, front), BLOCKAGE_WEIGHT * depth);
            for &j in &everyone {
                objective = objective
                    + BLOCKAGE_WEIGHT * depth * b1[&(s, front, j)]
                    + BLOCKAGE_WEIGHT * depth * b2[&(s, front, j)];
            }
        }

        let mut model = vars.minimise(objective).using(default_solver);
        let mut constraint_count = 0usize;

        // One feasible slot per flexible stopover.
        for &j in &flexible_ids {
            let sum = feasible_sets[&j]
                .iter()
                .fold(Expression::from(0.0), |acc, &s| acc + x[&(j, s)]);
            model.add_constraint(sum.eq(1.0));
            constraint_count += 1;
        }

        // Temporally overlapping stopovers may not share a slot.
        for &s in &position_ids {
            for &(j1, j2) in conflicts.overlap_at(s) {
                model.add_constraint((x[&(j1, s)] + x[&(j2, s)]).leq(1.0));
                constraint_count += 1;
            }
        }

        // Blockage linearization on both handling sides.
        for &(s, front) in &nested_pairs {
            for &(j, j_front) in conflicts.storing_at(s, front) {
                model.add_constraint(
                    (x[&(j, s)] + x[&(j_front, front)] - b1[&(s, front, j)]).leq(1.0),
                );
                constraint_count += 1;
            }
            for &(j, j_front) in conflicts.retrieval_at(s, front) {
                model.add_constraint(
                    (x[&(j, s)] + x[&(j_front, front)] - b2[&(s, front, j)]).leq(1.0),
                );
                constraint_count += 1;
            }
        }

        // Resident inventory stays where it is.
        for pin in problem.iter_pinned_assignments() {
            model.add_constraint(Expression::from(x[&(pin.stopover_id(), pin.position())]).eq(1.0));
            constraint_count += 1;
        }

        info!(
            assignment_variables = x.len(),
            blockage_variables = b1.len() + b2.len(),
            constraints = constraint_count,
            "model assembled, invoking solver"
        );

        let lp_solution = match model.solve() {
            Ok(solution) => solution,
            Err(err) => return Ok(SolveOutcome::from_resolution_error(err)),
        };

        // Read-back, only reached on an optimal outcome.
        let mut placements: Vec<Placement<T>> = Vec::with_capacity(everyone.len());
        let mut objective_value = 0.0;
        for &j in &flexible_ids {
            let s = feasible_sets[&j]
                .iter()
                .copied()
                .find(|&s| lp_solution.value(x[&(j, s)]) > 0.5)
                .expect("an optimal solution places every flexible stopover exactly once");
            objective_value += travel_cost[&(j, s)];
            placements.push(Placement::new(
                j,
                s,
                table.window(j, s).expect("table covers every pair"),
            ));
        }
        for pin in problem.iter_pinned_assignments() {
            placements.push(Placement::new(
                pin.stopover_id(),
                pin.position(),
                table
                    .window(pin.stopover_id(), pin.position())
                    .expect("table covers every pair"),
            ));
        }

        let mut blockages: Vec<BlockageEvent> = Vec::new();
        for (&(s, front, j), &var) in &b1 {
            if lp_solution.value(var) > 0.5 {
                objective_value += blockage_weight[&(s, front)];
                blockages.push(BlockageEvent::new(s, front, j, BlockagePhase::Storing));
            }
        }
        for (&(s, front, j), &var) in &b2 {
            if lp_solution.value(var) > 0.5 {
                objective_value += blockage_weight[&(s, front)];
                blockages.push(BlockageEvent::new(s, front, j, BlockagePhase::Retrieval));
            }
        }

        Ok(SolveOutcome::Optimal(Solution::new(
            placements,
            blockages,
            objective_value,
        )))
    }
}
