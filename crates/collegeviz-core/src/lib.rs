pub mod binning;
pub mod config;
pub mod error;
pub mod inspect;
pub mod merge;
pub mod report;
pub mod schema;
pub mod tables;

pub use binning::{apply_enrollment_bins, run_binning_stage, BinThresholds, EnrollmentBin};
pub use config::{BinningConfig, MergeConfig, PipelineConfig};
pub use error::{PipelineError, Result};
pub use merge::{merge_tables, run_merge_stage};
pub use report::{BinCounts, InputSummary, StageReport};
