use anyhow::{Context, Result};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use square_matrix::SquareMatrix;
use tracing::{info, warn};

/// Sizes picked when none is configured, `[1, 5)`.
const DEFAULT_SIZES: std::ops::Range<usize> = 1..5;

/// The main config type.
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Where the two matrices come from.
    #[serde(default)]
    pub matrices: MatricesConfig,
}

impl Config {
    /// Loads the config from a file path.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        builder = builder.add_source(config::File::with_name(path));
        builder.build()?.try_deserialize()
    }

    /// Applies command line overrides for random generation.
    pub fn override_random(&mut self, overrides: RandomOverrides) {
        if overrides.is_empty() {
            return;
        }
        match &mut self.matrices {
            MatricesConfig::Random { size, min, max, seed } => {
                *size = overrides.size.or(*size);
                *min = overrides.min.unwrap_or(*min);
                *max = overrides.max.unwrap_or(*max);
                *seed = overrides.seed.or(*seed);
            }
            MatricesConfig::Explicit { .. } => {
                warn!("ignoring random generation flags, the config provides explicit matrices");
            }
        }
    }
}

/// Command line values that replace the configured random generation parameters.
#[derive(Debug, Default)]
pub struct RandomOverrides {
    /// Matrix size.
    pub size: Option<usize>,

    /// Inclusive lower bound of the entries.
    pub min: Option<i64>,

    /// Exclusive upper bound of the entries.
    pub max: Option<i64>,

    /// Seed of the random number generator.
    pub seed: Option<u64>,
}

impl RandomOverrides {
    fn is_empty(&self) -> bool {
        self.size.is_none() && self.min.is_none() && self.max.is_none() && self.seed.is_none()
    }
}

/// The matrices configuration.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatricesConfig {
    /// Two matrices of the same size with entries in `[min, max)`.
    Random {
        /// The size, drawn from `[1, 5)` when missing.
        size: Option<usize>,

        /// Inclusive lower bound of the entries.
        #[serde(default = "default_min")]
        min: i64,

        /// Exclusive upper bound of the entries.
        #[serde(default = "default_max")]
        max: i64,

        /// Seed for reproducible runs.
        seed: Option<u64>,
    },

    /// Two matrices given row by row.
    Explicit {
        /// The first matrix.
        left: SquareMatrix,

        /// The second matrix.
        right: SquareMatrix,
    },
}

fn default_min() -> i64 {
    1
}

fn default_max() -> i64 {
    10
}

impl Default for MatricesConfig {
    fn default() -> Self {
        MatricesConfig::Random { size: None, min: default_min(), max: default_max(), seed: None }
    }
}

impl MatricesConfig {
    /// Builds the pair of matrices this configuration describes.
    pub fn build(self) -> Result<(SquareMatrix, SquareMatrix)> {
        match self {
            MatricesConfig::Random { size, min, max, seed } => {
                let mut rng: Box<dyn RngCore> = match seed {
                    Some(seed) => Box::new(ChaCha20Rng::seed_from_u64(seed)),
                    None => Box::new(rand::thread_rng()),
                };
                let size = size.unwrap_or_else(|| rng.gen_range(DEFAULT_SIZES));
                info!(size, min, max, ?seed, "generating random matrices");
                let left = SquareMatrix::gen_random_with_rng(rng.as_mut(), size, min, max)
                    .context("failed to generate the first matrix")?;
                let right = SquareMatrix::gen_random_with_rng(rng.as_mut(), size, min, max)
                    .context("failed to generate the second matrix")?;
                Ok((left, right))
            }
            MatricesConfig::Explicit { left, right } => Ok((left, right)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn load_yaml(contents: &str) -> Config {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        Config::load(file.path().to_str().unwrap()).unwrap()
    }

    #[test]
    fn explicit() {
        let config = load_yaml(
            "
matrices:
  type: explicit
  left: [[1, 2], [3, 4]]
  right: [[5, 6], [7, 8]]
",
        );
        let (left, right) = config.matrices.build().unwrap();
        assert_eq!(left, SquareMatrix::new(vec![1, 2, 3, 4], 2).unwrap());
        assert_eq!(right, SquareMatrix::new(vec![5, 6, 7, 8], 2).unwrap());
    }

    #[test]
    fn random_defaults() {
        let config = load_yaml(
            "
matrices:
  type: random
  size: 3
  seed: 5
",
        );
        let (left, right) = config.matrices.build().unwrap();
        assert_eq!(left.size(), 3);
        assert_eq!(right.size(), 3);
        assert!(left.data().iter().chain(right.data()).all(|entry| (1..10).contains(entry)));
    }

    #[test]
    fn seeded_runs_repeat() {
        let build = || {
            let mut config = Config::default();
            config.override_random(RandomOverrides { seed: Some(9), ..Default::default() });
            config.matrices.build().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn overrides() {
        let mut config = Config::default();
        config.override_random(RandomOverrides { size: Some(2), min: Some(-1), max: Some(0), seed: Some(1) });
        let (left, right) = config.matrices.build().unwrap();
        assert_eq!(left, SquareMatrix::new(vec![-1; 4], 2).unwrap());
        assert_eq!(right, left);
    }

    #[test]
    fn invalid_range() {
        let mut config = Config::default();
        config.override_random(RandomOverrides { min: Some(5), max: Some(5), ..Default::default() });
        assert!(config.matrices.build().is_err());
    }

    #[test]
    fn non_square_rows_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"matrices:\n  type: explicit\n  left: [[1, 2], [3]]\n  right: [[1]]\n").unwrap();
        file.flush().unwrap();
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
