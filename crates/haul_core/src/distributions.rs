//! Random mining durations.
//!
//! The sampler owns its generator so every world carries an independent,
//! optionally seeded stream.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::clock::SimTime;

/// Inclusive uniform integer distribution over mining durations (minutes).
#[derive(Debug, Clone, Resource)]
pub struct MiningTimeSampler {
    min: SimTime,
    max: SimTime,
    rng: StdRng,
}

impl MiningTimeSampler {
    /// `seed = None` draws the seed from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`; scenario building validates the range first.
    pub fn new(min: SimTime, max: SimTime, seed: Option<u64>) -> Self {
        assert!(min <= max, "mining range [{min}, {max}] is empty");
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { min, max, rng }
    }

    /// Always yields `minutes`.
    pub fn fixed(minutes: SimTime) -> Self {
        Self::new(minutes, minutes, Some(0))
    }

    pub fn range(&self) -> (SimTime, SimTime) {
        (self.min, self.max)
    }

    pub fn sample(&mut self) -> SimTime {
        self.rng.gen_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_range() {
        let mut sampler = MiningTimeSampler::new(60, 300, Some(7));
        for _ in 0..1000 {
            let d = sampler.sample();
            assert!((60..=300).contains(&d));
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = MiningTimeSampler::new(60, 300, Some(42));
        let mut b = MiningTimeSampler::new(60, 300, Some(42));
        let xs: Vec<_> = (0..20).map(|_| a.sample()).collect();
        let ys: Vec<_> = (0..20).map(|_| b.sample()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn fixed_sampler_is_constant() {
        let mut sampler = MiningTimeSampler::fixed(60);
        assert_eq!(sampler.range(), (60, 60));
        assert!((0..10).all(|_| sampler.sample() == 60));
    }
}
