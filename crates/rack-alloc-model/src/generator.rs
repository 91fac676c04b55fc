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

//! Seeded random instance generation for tests and benches.
//!
//! Deadlines are padded so that every flexible stopover can reach every
//! slot and every pin is workable; generated instances therefore always
//! pass problem validation and have non-empty feasible sets.

use crate::common::{FlexibleKind, PinnedKind};
use crate::problem::{
    asg::{PinnedAssignment, PinnedAssignmentContainer},
    err::ProblemError,
    loader::build_distances,
    position::{Position, PositionContainer, PositionIdentifier},
    prob::Problem,
    station::{PickingStation, Rack, RackIdentifier, StationIdentifier},
    stopover::{Destination, Stopover, StopoverContainer, StopoverIdentifier},
};
use rack_alloc_core::prelude::TimePoint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceConfig {
    pub racks: u32,
    pub lanes: u32,
    pub depth_levels: u32,
    pub stations: u32,
    pub flexible: u32,
    pub pinned: u32,
    pub horizon: i64,
    pub seed: u64,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            racks: 2,
            lanes: 4,
            depth_levels: 3,
            stations: 2,
            flexible: 6,
            pinned: 2,
            horizon: 400,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceGenerator {
    config: InstanceConfig,
}

impl InstanceGenerator {
    #[inline]
    pub fn new(config: InstanceConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<Problem<i64>, ProblemError> {
        let cfg = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);

        let mut positions = PositionContainer::with_capacity((cfg.lanes * cfg.depth_levels) as usize);
        let mut next_id = 0u32;
        for lane in 0..cfg.lanes {
            for level in 1..=cfg.depth_levels {
                positions.insert(
                    Position::new(
                        PositionIdentifier::new(next_id),
                        lane as i64 * 2,
                        0,
                        level as i64,
                    )
                    .expect("generated depth levels start at 1"),
                );
                next_id += 1;
            }
        }

        let stations: Vec<PickingStation<i64>> = (0..cfg.stations)
            .map(|k| {
                PickingStation::new(
                    StationIdentifier::new(k),
                    rng.random_range(0..(cfg.lanes as i64 * 2).max(1)),
                    -1,
                )
            })
            .collect();

        let racks: Vec<Rack> = (0..cfg.racks.max(1))
            .map(|r| Rack::new(RackIdentifier::new(r)))
            .collect();

        let distances = build_distances(&stations, &positions);

        // Worst-case one-way trip; padding deadlines with a full round
        // trip keeps every slot reachable.
        let worst_leg: i64 = stations
            .iter()
            .flat_map(|st| {
                positions.iter().map(|p| {
                    distances
                        .from_station(st.id(), p.id())
                        .expect("distance table was just built for all pairs")
                        .value()
                        + p.depth_penalty().value()
                })
            })
            .max()
            .unwrap_or(0);

        let random_destination = |rng: &mut ChaCha8Rng| -> Destination {
            if cfg.stations == 0 || rng.random_range(0..4) == 0 {
                Destination::Terminal
            } else {
                Destination::Station(StationIdentifier::new(rng.random_range(0..cfg.stations)))
            }
        };

        let mut flexible = StopoverContainer::with_capacity(cfg.flexible as usize);
        for i in 0..cfg.flexible {
            let rack = RackIdentifier::new(rng.random_range(0..racks.len() as u32));
            let destination = random_destination(&mut rng);
            let (origin, arrival) = if cfg.stations > 0 && rng.random_range(0..5) > 0 {
                let origin = StationIdentifier::new(rng.random_range(0..cfg.stations));
                let arrival = rng.random_range(0..cfg.horizon.max(2) / 2);
                (Some(origin), Some(TimePoint::new(arrival)))
            } else {
                (None, None)
            };
            let floor = arrival.map(|t| t.value()).unwrap_or(0);
            let deadline = floor
                + 2 * worst_leg
                + 1
                + rng.random_range(0..cfg.horizon.max(2) / 2);
            flexible.insert(
                Stopover::<FlexibleKind, i64>::new(
                    StopoverIdentifier::new(i),
                    rack,
                    origin,
                    arrival,
                    destination,
                    TimePoint::new(deadline),
                )
                .expect("origin is generated whenever an arrival is"),
            );
        }

        // Pins go to distinct slots.
        let mut free_slots: Vec<PositionIdentifier> = positions.iter_ids().collect();
        free_slots.sort();
        let mut pinned = PinnedAssignmentContainer::new();
        for i in 0..cfg.pinned.min(free_slots.len() as u32) {
            let slot = free_slots.remove(rng.random_range(0..free_slots.len()));
            let rack = RackIdentifier::new(rng.random_range(0..racks.len() as u32));
            let destination = random_destination(&mut rng);
            let deadline = 2 * worst_leg + 1 + rng.random_range(0..cfg.horizon.max(2) / 2);
            pinned.insert(PinnedAssignment::new(
                Stopover::<PinnedKind, i64>::new_pinned(
                    StopoverIdentifier::new(cfg.flexible + i),
                    rack,
                    destination,
                    TimePoint::new(deadline),
                ),
                slot,
            ));
        }

        Problem::new(racks, positions, stations, distances, flexible, pinned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::feasible_positions;

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = InstanceGenerator::new(InstanceConfig::default())
            .generate()
            .expect("default config is consistent");
        let b = InstanceGenerator::new(InstanceConfig::default())
            .generate()
            .expect("default config is consistent");
        let ids_a: Vec<_> = a.flexible_stopovers().iter_ids().collect();
        let ids_b: Vec<_> = b.flexible_stopovers().iter_ids().collect();
        assert_eq!(a.stopover_count(), b.stopover_count());
        assert_eq!(ids_a.len(), ids_b.len());
        for j in a.iter_flexible_stopovers() {
            let other = b.flexible_stopovers().get(j.id()).expect("same id set");
            assert_eq!(j.deadline(), other.deadline());
            assert_eq!(j.arrival(), other.arrival());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = InstanceGenerator::new(InstanceConfig::default()).generate().unwrap();
        let b = InstanceGenerator::new(InstanceConfig {
            seed: 43,
            ..InstanceConfig::default()
        })
        .generate()
        .unwrap();
        let deadlines_a: Vec<_> = {
            let mut v: Vec<_> = a.iter_flexible_stopovers().map(|j| j.deadline()).collect();
            v.sort();
            v
        };
        let deadlines_b: Vec<_> = {
            let mut v: Vec<_> = b.iter_flexible_stopovers().map(|j| j.deadline()).collect();
            v.sort();
            v
        };
        assert_ne!(deadlines_a, deadlines_b);
    }

    #[test]
    fn test_generated_stopovers_have_feasible_slots() {
        let p = InstanceGenerator::new(InstanceConfig {
            flexible: 10,
            pinned: 4,
            ..InstanceConfig::default()
        })
        .generate()
        .expect("padded deadlines validate");
        for j in p.iter_flexible_stopovers() {
            assert!(
                !feasible_positions(j, p.positions(), p.distances()).is_empty(),
                "stopover {} has no feasible slot",
                j.id()
            );
        }
    }

    #[test]
    fn test_pins_are_distinct_slots() {
        let p = InstanceGenerator::new(InstanceConfig {
            pinned: 5,
            ..InstanceConfig::default()
        })
        .generate()
        .unwrap();
        let mut slots: Vec<_> = p.iter_pinned_assignments().map(|a| a.position()).collect();
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), p.pinned_assignments().len());
    }
}
