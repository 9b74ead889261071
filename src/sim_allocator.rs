// Capacity Allocator - randomized partitioning of new capacity

use crate::sim_participant::{ParticipantId, ParticipantPool};
use rand::rngs::StdRng;
use rand::Rng;

/// Upper bound on a single random allocation (TB)
///
/// Models the largest single hardware contribution; sizes are biased toward
/// (0, 10] TB.
pub const MAX_ALLOCATION_TB: f64 = 10.0;

/// Below this remainder, the whole remainder goes to one final participant
pub const FINAL_ALLOCATION_TB: f64 = 1.0;

/// Floor for a random draw (TB)
///
/// A draw of exactly 0 would leave `remaining` unchanged and the fill loop
/// spinning. Clamping up to this floor keeps `remaining` strictly decreasing
/// on every iteration.
pub const MIN_ALLOCATION_TB: f64 = 1e-6;

/// Partitions a capacity delta into new participants
///
/// The RNG is injected so runs are reproducible under a fixed seed.
pub struct CapacityAllocator {
    rng: StdRng,
}

impl CapacityAllocator {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Fill `delta_tb` of new capacity into the pool
    ///
    /// Creates zero or more participants whose storage sums to `delta_tb`
    /// (modulo float rounding) and appends them to the pool in creation
    /// order. A non-positive delta creates nobody.
    pub fn fill(&mut self, pool: &mut ParticipantPool, delta_tb: f64) -> Vec<ParticipantId> {
        let mut created = Vec::new();
        let mut remaining = delta_tb;

        while remaining > 0.0 {
            let allocation = if remaining < FINAL_ALLOCATION_TB {
                // small tail: hand the exact remainder to one last participant
                remaining
            } else if remaining < MAX_ALLOCATION_TB {
                self.rng.gen_range(0.0..remaining).max(MIN_ALLOCATION_TB)
            } else {
                self.rng.gen_range(0.0..MAX_ALLOCATION_TB).max(MIN_ALLOCATION_TB)
            };

            created.push(pool.add(allocation));
            remaining -= allocation;
        }

        created
    }
}
