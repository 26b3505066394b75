//! Seeded random number generation.
//!
//! The orchestrator owns exactly one [`GaRng`] built from the run seed, and
//! every stochastic decision draws from it in a fixed order.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// The generator type used by the engine.
pub type GaRng = StdRng;

/// Creates a deterministic generator from `seed`.
///
/// Two generators built from the same seed yield identical streams.
pub fn create_rng(seed: u64) -> GaRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a fresh seed from the thread-local entropy source.
pub fn random_seed() -> u64 {
    rand::random()
}
