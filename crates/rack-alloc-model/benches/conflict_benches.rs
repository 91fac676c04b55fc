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

use criterion::{Criterion, criterion_group, criterion_main};
use rack_alloc_model::conflict::ConflictGraphs;
use rack_alloc_model::generator::{InstanceConfig, InstanceGenerator};
use rack_alloc_model::intervals::BreakIntervalTable;
use rack_alloc_model::problem::nested::NestedIndex;
use std::hint::black_box;

fn bench_conflict_construction(c: &mut Criterion) {
    let problem = InstanceGenerator::new(InstanceConfig {
        racks: 4,
        lanes: 8,
        depth_levels: 4,
        stations: 4,
        flexible: 48,
        pinned: 8,
        horizon: 2000,
        seed: 7,
    })
    .generate()
    .expect("bench instance is consistent");
    let nested = NestedIndex::build(problem.positions());

    c.bench_function("break_interval_table_build", |b| {
        b.iter(|| black_box(BreakIntervalTable::build(&problem)))
    });

    let table = BreakIntervalTable::build(&problem);
    c.bench_function("conflict_graphs_build", |b| {
        b.iter(|| black_box(ConflictGraphs::build(&problem, &table, &nested)))
    });
}

criterion_group!(benches, bench_conflict_construction);
criterion_main!(benches);
