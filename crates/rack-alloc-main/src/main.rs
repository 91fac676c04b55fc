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

use chrono::{DateTime, Utc};
use rack_alloc_model::generator::{InstanceConfig, InstanceGenerator};
use rack_alloc_model::problem::loader::ProblemLoader;
use rack_alloc_model::problem::prob::Problem;
use rack_alloc_model::validation::SolutionValidator;
use rack_alloc_solver::mip::MipSolver;
use rack_alloc_solver::outcome::SolveOutcome;
use rack_alloc_solver::report::SolutionReport;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

fn instances() -> Vec<(Problem<i64>, String)> {
    let Some(inst_dir) = find_instances_dir() else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(&inst_dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && e.path().extension().map(|x| x == "txt").unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();
    files.sort();

    let loader = ProblemLoader::default();
    files
        .into_iter()
        .filter_map(|f| {
            let name = f
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| f.to_string_lossy().into_owned());
            match loader.from_path(&f) {
                Ok(problem) => Some((problem, name)),
                Err(err) => {
                    tracing::warn!("skipping {name}: {err}");
                    None
                }
            }
        })
        .collect()
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    iteration: usize,
    instance: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    status: String,
    cost: Option<f64>,
}

fn main() {
    enable_tracing();

    let mut work = instances();
    if work.is_empty() {
        tracing::info!("no instances directory found, generating a demo instance");
        let problem = InstanceGenerator::new(InstanceConfig::default())
            .generate()
            .expect("the default generator configuration is consistent");
        work.push((problem, "generated-demo".to_string()));
    }

    let solver = MipSolver::new();
    let mut results: Vec<RunRecord> = Vec::new();

    for (iteration, (problem, instance)) in work.into_iter().enumerate() {
        let iteration = iteration + 1;
        tracing::info!(
            "solving [{}] {} with {} positions and {} stopovers",
            iteration,
            instance,
            problem.positions().len(),
            problem.stopover_count()
        );

        let start_ts = Utc::now();
        let t0 = Instant::now();
        let outcome = match solver.solve(&problem) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("cannot assemble a model for {instance}: {err}");
                continue;
            }
        };
        let runtime_ms = t0.elapsed().as_millis();
        let end_ts = Utc::now();

        let (status, cost) = match &outcome {
            SolveOutcome::Optimal(solution) => {
                if let Err(err) = SolutionValidator::validate(&problem, solution) {
                    tracing::error!("solver returned an inconsistent assignment: {err}");
                }
                println!("{}", SolutionReport::new(&problem, solution));
                println!();
                println!("{}", SolutionReport::new(&problem, solution).rack_paths());
                println!(
                    "{}",
                    SolutionReport::new(&problem, solution).position_timelines()
                );
                ("optimal".to_string(), Some(solution.objective_value()))
            }
            other => {
                tracing::warn!("no optimal assignment for {instance}: {other}");
                (other.to_string(), None)
            }
        };

        results.push(RunRecord {
            iteration,
            instance,
            start_ts,
            end_ts,
            runtime_ms,
            status,
            cost,
        });
    }

    match serde_json::to_string_pretty(&results) {
        Ok(json) => {
            if let Err(err) =
                File::create("results.json").and_then(|mut f| f.write_all(json.as_bytes()))
            {
                tracing::warn!("could not write results.json: {err}");
            }
        }
        Err(err) => tracing::warn!("could not serialize run records: {err}"),
    }
}
