use std::path::PathBuf;

use serde::Serialize;

/// Row counts for one table read by a stage.
#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub table: &'static str,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BinCounts {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    pub unbinned: usize,
}

/// Summary of a completed stage, logged by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    pub inputs: Vec<InputSummary>,
    pub output_path: PathBuf,
    pub output_rows: usize,
    pub output_columns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<BinCounts>,
}
