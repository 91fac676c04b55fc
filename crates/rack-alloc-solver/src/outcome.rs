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

use good_lp::ResolutionError;
use rack_alloc_core::prelude::SolverVariable;
use rack_alloc_model::solution::Solution;

/// What the solver boundary reported.
///
/// Variable values exist only in the `Optimal` case; every other variant
/// is surfaced verbatim and retried (or not) by the caller, never here.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome<T: SolverVariable> {
    Optimal(Solution<T>),
    Infeasible,
    ResourceLimit,
    Error(String),
}

impl<T: SolverVariable> SolveOutcome<T> {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match self {
            SolveOutcome::Optimal(solution) => Some(solution),
            _ => None,
        }
    }

    pub(crate) fn from_resolution_error(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => SolveOutcome::Infeasible,
            ResolutionError::Unbounded => {
                SolveOutcome::Error("solver reported an unbounded model".into())
            }
            ResolutionError::Other(msg) => classify_message(msg),
            ResolutionError::Str(msg) => classify_message(&msg),
        }
    }
}

fn classify_message<T: SolverVariable>(msg: &str) -> SolveOutcome<T> {
    let lowered = msg.to_ascii_lowercase();
    if lowered.contains("limit") || lowered.contains("timeout") || lowered.contains("time") {
        SolveOutcome::ResourceLimit
    } else {
        SolveOutcome::Error(msg.to_owned())
    }
}

impl<T: SolverVariable> std::fmt::Display for SolveOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveOutcome::Optimal(solution) => {
                write!(f, "optimal, objective {}", solution.objective_value())
            }
            SolveOutcome::Infeasible => write!(f, "infeasible"),
            SolveOutcome::ResourceLimit => write!(f, "resource limit reached"),
            SolveOutcome::Error(msg) => write!(f, "solver error: {msg}"),
        }
    }
}
