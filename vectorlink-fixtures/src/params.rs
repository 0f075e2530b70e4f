use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{sql::validate_table_name, FixtureError};

pub const DEFAULT_TABLE: &str = "vectors";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DenseParams {
    pub samples: usize,
    pub features: usize,
    pub seed: u64,
    pub table: String,
    /// log a progress line every this many rows. 0 disables it
    pub progress: usize,
}

impl Default for DenseParams {
    fn default() -> Self {
        Self {
            samples: 100_000,
            features: 1024,
            seed: 0,
            table: DEFAULT_TABLE.to_string(),
            progress: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl DenseParams {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FixtureError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        positive("samples", self.samples)?;
        positive("features", self.features)?;
        validate_table_name(&self.table)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SparseParams {
    pub samples: usize,
    pub dimensionality: u32,
    /// number of (index, value) pairs stored per row. 0 is allowed and
    /// yields a blob holding only the trailer
    pub nonzeros: u32,
    pub seed: u64,
    pub table: String,
    /// log a progress line every this many rows. 0 disables it
    pub progress: usize,
}

impl Default for SparseParams {
    fn default() -> Self {
        Self {
            samples: 500_000,
            dimensionality: 20_000,
            nonzeros: 200,
            seed: 0,
            table: DEFAULT_TABLE.to_string(),
            progress: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SparseParams {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FixtureError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        positive("samples", self.samples)?;
        positive("dimensionality", self.dimensionality as usize)?;
        if self.nonzeros > self.dimensionality {
            return Err(FixtureError::TooManyNonzeros {
                nonzeros: self.nonzeros,
                dimensionality: self.dimensionality,
            });
        }
        validate_table_name(&self.table)
    }
}

fn positive(name: &str, value: usize) -> Result<(), FixtureError> {
    if value == 0 {
        Err(FixtureError::InvalidConfig(format!(
            "{name} must be greater than zero"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        DenseParams::default().validate().unwrap();
        SparseParams::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let params = SparseParams::from_reader(&br#"{"samples": 3, "nonzeros": 2}"#[..]).unwrap();
        assert_eq!(
            SparseParams {
                samples: 3,
                nonzeros: 2,
                ..Default::default()
            },
            params
        );

        let params = DenseParams::from_reader(&br#"{"features": 8, "seed": 7}"#[..]).unwrap();
        assert_eq!(8, params.features);
        assert_eq!(7, params.seed);
        assert_eq!(100_000, params.samples);
        assert_eq!("vectors", params.table);
    }

    #[test]
    fn unknown_json_fields_are_rejected() {
        let result = DenseParams::from_reader(&br#"{"fetaures": 8}"#[..]);
        assert!(matches!(result, Err(FixtureError::BadConfigJson(_))));
    }

    #[test]
    fn zero_counts_are_rejected() {
        let dense = DenseParams {
            samples: 0,
            ..Default::default()
        };
        assert!(matches!(dense.validate(), Err(FixtureError::InvalidConfig(_))));

        let dense = DenseParams {
            features: 0,
            ..Default::default()
        };
        assert!(matches!(dense.validate(), Err(FixtureError::InvalidConfig(_))));

        let sparse = SparseParams {
            dimensionality: 0,
            nonzeros: 0,
            ..Default::default()
        };
        assert!(matches!(sparse.validate(), Err(FixtureError::InvalidConfig(_))));
    }

    #[test]
    fn more_nonzeros_than_dimensions_is_rejected() {
        let sparse = SparseParams {
            dimensionality: 5,
            nonzeros: 6,
            ..Default::default()
        };
        assert!(matches!(
            sparse.validate(),
            Err(FixtureError::TooManyNonzeros {
                nonzeros: 6,
                dimensionality: 5
            })
        ));
    }

    #[test]
    fn nonzeros_may_be_zero_or_full() {
        for nonzeros in [0, 5] {
            SparseParams {
                dimensionality: 5,
                nonzeros,
                ..Default::default()
            }
            .validate()
            .unwrap();
        }
    }
}
