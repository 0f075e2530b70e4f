use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random source owned by each generator.
///
/// ChaCha8 keeps the same stream for a seed across platforms and crate
/// releases, which `StdRng` does not promise.
pub type FixtureRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> FixtureRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws `count` floats uniformly from `[0, 1)`.
pub fn unit_floats<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<f32> {
    (0..count).map(|_| rng.gen::<f32>()).collect()
}
