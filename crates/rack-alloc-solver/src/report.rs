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

//! Human-readable rendering of a solved assignment. The core mandates no
//! serialization format; these renderers are a convenience for terminals
//! and logs.

use rack_alloc_core::prelude::SolverVariable;
use rack_alloc_model::common::Kind;
use rack_alloc_model::problem::{prob::Problem, station::RackIdentifier, stopover::Stopover};
use rack_alloc_model::solution::{Placement, Solution};
use std::fmt::Write as _;

pub struct SolutionReport<'a, T: SolverVariable> {
    problem: &'a Problem<T>,
    solution: &'a Solution<T>,
}

impl<'a, T: SolverVariable> SolutionReport<'a, T> {
    #[inline]
    pub fn new(problem: &'a Problem<T>, solution: &'a Solution<T>) -> Self {
        Self { problem, solution }
    }

    /// Per-rack chronology: every stopover of the rack, ordered by
    /// deadline, with its travel legs and occupancy window.
    pub fn rack_paths(&self) -> String {
        let mut out = String::new();
        let mut racks: Vec<RackIdentifier> = self.problem.racks().iter().map(|r| r.id()).collect();
        if racks.is_empty() {
            let mut seen: Vec<RackIdentifier> = self
                .problem
                .iter_flexible_stopovers()
                .map(|j| j.rack())
                .chain(self.problem.iter_pinned_stopovers().map(|j| j.rack()))
                .collect();
            seen.sort();
            seen.dedup();
            racks = seen;
        }

        for rack in racks {
            let _ = writeln!(out, "----------------- {rack} -----------------");
            let mut lines: Vec<(T, String)> = Vec::new();
            for j in self.problem.iter_flexible_stopovers().filter(|j| j.rack() == rack) {
                if let Some(p) = self.solution.placement_of(j.id()) {
                    lines.push((j.deadline().value(), self.path_line(j, p)));
                }
            }
            for j in self.problem.iter_pinned_stopovers().filter(|j| j.rack() == rack) {
                if let Some(p) = self.solution.placement_of(j.id()) {
                    lines.push((j.deadline().value(), self.path_line(j, p)));
                }
            }
            lines.sort_by(|a, b| a.0.cmp(&b.0));
            for (_, line) in lines {
                let _ = writeln!(out, "{line}");
            }
            let _ = writeln!(out);
        }
        out
    }

    /// Per-slot occupancy: who holds the slot and when, earliest first.
    pub fn position_timelines(&self) -> String {
        let mut out = String::new();
        let mut positions: Vec<_> = self.problem.positions().iter().collect();
        positions.sort_by_key(|p| p.id());
        for position in positions {
            let _ = writeln!(out, "------------ {position} ------------");
            let mut holders: Vec<&Placement<T>> = self
                .solution
                .placements()
                .iter()
                .filter(|p| p.position() == position.id())
                .collect();
            holders.sort_by_key(|p| p.window().start());
            for placement in holders {
                let _ = writeln!(
                    out,
                    "[{}, {}) held by {}",
                    placement.window().start().value(),
                    placement.window().end().value(),
                    placement.stopover()
                );
            }
        }
        out
    }

    fn path_line<K: Kind>(&self, stopover: &Stopover<K, T>, placement: &Placement<T>) -> String {
        let mut line = String::new();
        match (stopover.origin(), stopover.arrival()) {
            (Some(origin), Some(arrival)) => {
                let travel = self
                    .problem
                    .distances()
                    .from_station(origin, placement.position())
                    .expect("distance table validated at problem construction");
                let _ = write!(
                    line,
                    "{} ({}) -> [{}] -> {} [{}, {})",
                    origin,
                    arrival.value(),
                    travel.value(),
                    placement.position(),
                    placement.window().start().value(),
                    placement.window().end().value()
                );
            }
            _ => {
                let _ = write!(line, "start at {}", placement.position());
            }
        }
        match stopover.destination().station() {
            Some(dest) => {
                let travel = self
                    .problem
                    .distances()
                    .from_station(dest, placement.position())
                    .expect("distance table validated at problem construction");
                let _ = write!(
                    line,
                    " -> [{}] -> {} ({})",
                    travel.value(),
                    dest,
                    stopover.deadline().value()
                );
            }
            None => {
                let _ = write!(line, " -> end ({})", stopover.deadline().value());
            }
        }
        line
    }
}

impl<T: SolverVariable> std::fmt::Display for SolutionReport<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pinned stopovers:")?;
        for pin in self.problem.iter_pinned_assignments() {
            if let Some(p) = self.solution.placement_of(pin.stopover_id()) {
                writeln!(f, "  {p}")?;
            }
        }

        writeln!(f, "In-transit stopovers:")?;
        for j in self.problem.iter_flexible_stopovers() {
            if j.destination().is_terminal() {
                continue;
            }
            if let Some(p) = self.solution.placement_of(j.id()) {
                writeln!(f, "  {p}")?;
            }
        }

        writeln!(f, "End-of-horizon stopovers:")?;
        for j in self.problem.iter_flexible_stopovers() {
            if !j.destination().is_terminal() {
                continue;
            }
            if let Some(p) = self.solution.placement_of(j.id()) {
                writeln!(f, "  {p}")?;
            }
        }

        writeln!(f, "Blockages:")?;
        for b in self.solution.blockages() {
            writeln!(f, "  {b}")?;
        }

        write!(f, "Total cost: {}", self.solution.objective_value())
    }
}
