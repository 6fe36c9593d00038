//! Filtered, ranked views of the binned table: salary minus tuition per school.

use std::fmt;
use std::str::FromStr;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use polars::prelude::*;

use crate::binning::EnrollmentBin;
use crate::error::{PipelineError, Result};
use crate::schema::{
    EARLY_CAREER_PAY, ENROLLMENT_BIN, IN_STATE_TOTAL, MERGED_TABLE, NAME, NET_VALUE,
    OUT_OF_STATE_TOTAL, STATE, TYPE,
};
use crate::tables::require_columns;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TuitionKind {
    #[default]
    InState,
    OutOfState,
}

impl TuitionKind {
    pub fn column(&self) -> &'static str {
        match self {
            TuitionKind::InState => IN_STATE_TOTAL,
            TuitionKind::OutOfState => OUT_OF_STATE_TOTAL,
        }
    }
}

impl fmt::Display for TuitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuitionKind::InState => f.write_str("in-state"),
            TuitionKind::OutOfState => f.write_str("out-of-state"),
        }
    }
}

impl FromStr for TuitionKind {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "in-state" | "in_state" | "in_state_total" => Ok(TuitionKind::InState),
            "out-of-state" | "out_of_state" | "out_of_state_total" => Ok(TuitionKind::OutOfState),
            other => Err(PipelineError::Validation(format!(
                "unknown tuition kind '{other}' (expected in-state or out-of-state)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InspectFilter {
    pub state: Option<String>,
    pub bin: Option<EnrollmentBin>,
    pub tuition: TuitionKind,
}

/// Applies the state and bin filters, adds `net_value` and sorts it descending.
pub fn filter_schools(df: &DataFrame, filter: &InspectFilter) -> Result<DataFrame> {
    let tuition_column = filter.tuition.column();
    require_columns(df, MERGED_TABLE, &[NAME, EARLY_CAREER_PAY, tuition_column])?;

    let mut lf = df.clone().lazy();

    if let Some(state) = &filter.state {
        require_columns(df, MERGED_TABLE, &[STATE])?;
        lf = lf.filter(col(STATE).eq(lit(state.clone())));
    }

    if let Some(bin) = filter.bin {
        require_columns(df, MERGED_TABLE, &[ENROLLMENT_BIN])?;
        lf = lf.filter(col(ENROLLMENT_BIN).eq(lit(bin.as_str())));
    }

    let ranked = lf
        .with_column(
            (col(EARLY_CAREER_PAY).cast(DataType::Float64)
                - col(tuition_column).cast(DataType::Float64))
            .alias(NET_VALUE),
        )
        .sort(
            [NET_VALUE],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()?;

    Ok(ranked)
}

/// Renders at most `limit` rows of a frame produced by [`filter_schools`].
pub fn render_table(df: &DataFrame, tuition: TuitionKind, limit: usize) -> Result<Table> {
    let columns = [
        NAME,
        STATE,
        TYPE,
        ENROLLMENT_BIN,
        tuition.column(),
        EARLY_CAREER_PAY,
        NET_VALUE,
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.to_vec());

    for idx in 0..df.height().min(limit) {
        let mut row = Vec::with_capacity(columns.len());
        for name in columns {
            row.push(cell_text(df, name, idx)?);
        }
        table.add_row(row);
    }

    Ok(table)
}

fn cell_text(df: &DataFrame, column: &str, idx: usize) -> Result<String> {
    let Ok(series) = df.column(column) else {
        return Ok(String::new());
    };
    let text = match series.get(idx)? {
        AnyValue::Null => String::new(),
        AnyValue::Float64(value) => format!("{value:.0}"),
        other => match other.get_str() {
            Some(value) => value.to_string(),
            None => other.to_string(),
        },
    };
    Ok(text)
}
