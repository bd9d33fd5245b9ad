use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Random source that is reproducible when a seed is given and drawn from OS entropy otherwise.
#[derive(Debug)]
pub struct MaybeSeededRng {
    seed: Option<u64>,
    rng: SmallRng,
}

impl MaybeSeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Seed for a child source, so that independent components can be derived from one root seed.
    pub fn fork_seed(&mut self) -> u64 {
        self.rng.random()
    }
}
