use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArmError {
    #[error("Standard deviation must be finite and positive, got {0}")]
    InvalidStd(f64),
    #[error("Mean must be finite, got {0}")]
    InvalidMean(f64),
    #[error("Number of pulls must be positive, got {0}")]
    InvalidTimes(usize),
    #[error("Cannot build sampler: {0}")]
    Distribution(String),
}

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Environment needs at least one arm")]
    NoArms,
    #[error("Arm {index} out of range, environment has {n_arms} arms")]
    ArmOutOfRange { index: usize, n_arms: usize },
    #[error(transparent)]
    Arm(#[from] ArmError),
}
