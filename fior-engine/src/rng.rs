//! Seeded pseudo-random generation
//!
//! Every random operation in a pipeline carries a seed string; the same
//! seed must reproduce the same draw sequence so stored pipelines replay
//! identically. The seed string hashes (SHA-256) to 256 bits of generator
//! state, so any string, including the empty string, is a valid seed.
//! Determinism holds within this crate only; no bit-compatibility with
//! other implementations is promised.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Deterministic generator keyed by an arbitrary seed string.
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Build a generator from a seed string via SHA-256.
    pub fn from_seed_str(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        SeededRng(StdRng::from_seed(digest.into()))
    }

    /// Uniform draw in [0, 1). Each draw advances the generator state.
    pub fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Fisher-Yates shuffle of `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
