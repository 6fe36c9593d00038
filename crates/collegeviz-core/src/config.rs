use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::binning::BinThresholds;
use crate::error::{PipelineError, Result};

/// Pipeline settings. Every field has a default, so an empty file (or no file)
/// reads and writes the conventional file names in the working directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub merge: MergeConfig,
    pub binning: BinningConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub salary_path: PathBuf,
    pub tuition_path: PathBuf,
    pub enrollment_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            salary_path: PathBuf::from("salary_potential.csv"),
            tuition_path: PathBuf::from("tuition_cost.csv"),
            enrollment_path: PathBuf::from("College_Enroll_2020.csv"),
            output_path: PathBuf::from("final_data.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub thresholds: BinThresholds,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/final_data.csv"),
            output_path: PathBuf::from("final_data_bins.csv"),
            thresholds: BinThresholds::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(contents)?;
        config.binning.thresholds.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PipelineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when given, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}
