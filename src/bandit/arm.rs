use super::errors::ArmError;
use super::rng::MaybeSeededRng;

use rand::distr::Uniform;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Shape of the reward distribution of an arm, parameterized by its mean and standard deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionFamily {
    #[default]
    Gaussian,
    /// Uniform on `[mean - sqrt(3) * std, mean + sqrt(3) * std]`.
    Uniform,
}

#[derive(Clone, Debug)]
enum Sampler {
    Gaussian(Normal<f64>),
    Uniform(Uniform<f64>),
}

impl Sampler {
    fn resolve(family: DistributionFamily, mean: f64, std: f64) -> Result<Self, ArmError> {
        match family {
            DistributionFamily::Gaussian => Normal::new(mean, std)
                .map(Sampler::Gaussian)
                .map_err(|e| ArmError::Distribution(e.to_string())),
            DistributionFamily::Uniform => {
                let half_range = 3.0_f64.sqrt() * std;
                Uniform::new(mean - half_range, mean + half_range)
                    .map(Sampler::Uniform)
                    .map_err(|e| ArmError::Distribution(e.to_string()))
            }
        }
    }

    fn sample(&self, rng: &mut MaybeSeededRng) -> f64 {
        match self {
            Sampler::Gaussian(normal) => normal.sample(rng.get_rng()),
            Sampler::Uniform(uniform) => uniform.sample(rng.get_rng()),
        }
    }
}

/// A stochastic reward source producing i.i.d. draws.
#[derive(Debug)]
pub struct Arm {
    mean: f64,
    std: f64,
    family: DistributionFamily,
    sampler: Sampler,
    rng: MaybeSeededRng,
}

impl Arm {
    pub fn new(
        mean: f64,
        std: f64,
        family: DistributionFamily,
        seed: Option<u64>,
    ) -> Result<Self, ArmError> {
        if !mean.is_finite() {
            return Err(ArmError::InvalidMean(mean));
        }
        if !std.is_finite() || std <= 0.0 {
            return Err(ArmError::InvalidStd(std));
        }

        Ok(Self {
            mean,
            std,
            family,
            sampler: Sampler::resolve(family, mean, std)?,
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn gaussian(mean: f64, std: f64, seed: Option<u64>) -> Result<Self, ArmError> {
        Self::new(mean, std, DistributionFamily::Gaussian, seed)
    }

    pub fn sample(&mut self) -> f64 {
        self.sampler.sample(&mut self.rng)
    }

    pub fn pull(&mut self, times: usize) -> Result<Vec<f64>, ArmError> {
        if times == 0 {
            return Err(ArmError::InvalidTimes(times));
        }

        Ok((0..times).map(|_| self.sample()).collect())
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    pub fn family(&self) -> DistributionFamily {
        self.family
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }
}
