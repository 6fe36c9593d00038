// crates/collegeviz-core/src/binning.rs

use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::BinningConfig;
use crate::error::{PipelineError, Result};
use crate::report::{BinCounts, InputSummary, StageReport};
use crate::schema::{ENROLLMENT, ENROLLMENT_BIN, MERGED_TABLE};
use crate::tables::{read_table, require_columns, write_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentBin {
    Small,
    Medium,
    Large,
}

impl EnrollmentBin {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentBin::Small => "Small",
            EnrollmentBin::Medium => "Medium",
            EnrollmentBin::Large => "Large",
        }
    }
}

impl fmt::Display for EnrollmentBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentBin {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "small" => Ok(EnrollmentBin::Small),
            "medium" => Ok(EnrollmentBin::Medium),
            "large" => Ok(EnrollmentBin::Large),
            _ => Err(PipelineError::Validation(format!(
                "unknown enrollment bin '{value}' (expected Small, Medium or Large)"
            ))),
        }
    }
}

/// Lower bounds of the three half-open enrollment intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinThresholds {
    pub small_min: f64,
    pub medium_min: f64,
    pub large_min: f64,
}

impl Default for BinThresholds {
    fn default() -> Self {
        Self {
            small_min: 0.0,
            medium_min: 5_000.0,
            large_min: 15_000.0,
        }
    }
}

impl BinThresholds {
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.small_min, self.medium_min, self.large_min];
        if bounds.iter().any(|value| !value.is_finite()) {
            return Err(PipelineError::Validation(
                "enrollment thresholds must be finite".to_string(),
            ));
        }
        if !(self.small_min < self.medium_min && self.medium_min < self.large_min) {
            return Err(PipelineError::Validation(format!(
                "enrollment thresholds must be strictly increasing, got {} / {} / {}",
                self.small_min, self.medium_min, self.large_min
            )));
        }
        Ok(())
    }

    /// Lower bounds are inclusive. NaN and values below `small_min` have no bin.
    pub fn classify(&self, value: f64) -> Option<EnrollmentBin> {
        if value.is_nan() || value < self.small_min {
            None
        } else if value < self.medium_min {
            Some(EnrollmentBin::Small)
        } else if value < self.large_min {
            Some(EnrollmentBin::Medium)
        } else {
            Some(EnrollmentBin::Large)
        }
    }
}

/// Appends `enrollment_bin` to `df`, leaving existing columns in place.
///
/// Enrollment values that cannot be read as numbers are left without a bin. A
/// non-empty table with no numeric enrollment at all is rejected.
pub fn apply_enrollment_bins(df: &DataFrame, thresholds: &BinThresholds) -> Result<DataFrame> {
    require_columns(df, MERGED_TABLE, &[ENROLLMENT])?;

    let enrollment = df.column(ENROLLMENT)?.cast(&DataType::Float64)?;
    let values = enrollment.f64()?;

    if df.height() > 0 && values.null_count() == df.height() {
        return Err(PipelineError::NonNumericColumn {
            column: ENROLLMENT.to_string(),
        });
    }

    let labels: Vec<Option<&str>> = values
        .into_iter()
        .map(|value| {
            value
                .and_then(|v| thresholds.classify(v))
                .map(|bin| bin.as_str())
        })
        .collect();

    let mut output = df.clone();
    output.with_column(Series::new(ENROLLMENT_BIN.into(), labels))?;
    Ok(output)
}

/// Tallies the labels of an `enrollment_bin` column.
pub fn count_bins(df: &DataFrame) -> Result<BinCounts> {
    let labels = df.column(ENROLLMENT_BIN)?.str()?;
    let mut counts = BinCounts::default();
    for label in labels.into_iter() {
        match label.map(EnrollmentBin::from_str) {
            Some(Ok(EnrollmentBin::Small)) => counts.small += 1,
            Some(Ok(EnrollmentBin::Medium)) => counts.medium += 1,
            Some(Ok(EnrollmentBin::Large)) => counts.large += 1,
            _ => counts.unbinned += 1,
        }
    }
    Ok(counts)
}

/// Reads the configured table, bins it and writes the augmented copy.
/// The binned frame is returned alongside the report so callers can preview it.
pub fn run_binning_stage(config: &BinningConfig) -> Result<(DataFrame, StageReport)> {
    config.thresholds.validate()?;
    info!(input = %config.input_path.display(), "starting binning stage");

    let df = read_table(&config.input_path)?;
    let mut binned = apply_enrollment_bins(&df, &config.thresholds)?;
    write_table(&mut binned, &config.output_path)?;

    let bins = count_bins(&binned)?;
    info!(
        rows = binned.height(),
        small = bins.small,
        medium = bins.medium,
        large = bins.large,
        unbinned = bins.unbinned,
        output = %config.output_path.display(),
        "binning stage complete"
    );

    let report = StageReport {
        stage: "binning",
        inputs: vec![InputSummary {
            table: MERGED_TABLE,
            path: config.input_path.clone(),
            rows: df.height(),
        }],
        output_path: config.output_path.clone(),
        output_rows: binned.height(),
        output_columns: binned.width(),
        bins: Some(bins),
    };
    Ok((binned, report))
}
