// crates/collegeviz-core/src/merge.rs

use polars::prelude::*;
use tracing::{debug, info};

use crate::config::MergeConfig;
use crate::error::Result;
use crate::report::{InputSummary, StageReport};
use crate::schema::{
    ENROLLMENT_RENAMES, ENROLLMENT_TABLE, NAME, SALARY_COLUMNS, SALARY_RENAMES, SALARY_TABLE,
    TUITION_COLUMNS, TUITION_TABLE,
};
use crate::tables::{read_table, rename_columns, require_columns, write_table};

/// Joins tuition, salary and enrollment on institution name.
///
/// Salary is projected to `name, early_career_pay` and tuition to
/// `name, state, type, in_state_total, out_of_state_total`; every enrollment
/// column is carried through. Both joins are inner joins that keep the row
/// order of the left side, so names missing from any table are dropped.
pub fn merge_tables(
    salary: &DataFrame,
    tuition: &DataFrame,
    enrollment: &DataFrame,
) -> Result<DataFrame> {
    let mut salary = salary.clone();
    rename_columns(&mut salary, SALARY_TABLE, SALARY_RENAMES)?;
    require_columns(&salary, SALARY_TABLE, SALARY_COLUMNS)?;
    let salary = salary.select(SALARY_COLUMNS.iter().copied())?;

    let mut enrollment = enrollment.clone();
    rename_columns(&mut enrollment, ENROLLMENT_TABLE, ENROLLMENT_RENAMES)?;

    require_columns(tuition, TUITION_TABLE, TUITION_COLUMNS)?;
    let tuition = tuition.select(TUITION_COLUMNS.iter().copied())?;

    let tuition_salary = inner_join_on_name(tuition.lazy(), salary.lazy()).collect()?;
    debug!(rows = tuition_salary.height(), "joined tuition with salary");

    let merged = inner_join_on_name(tuition_salary.lazy(), enrollment.lazy()).collect()?;
    debug!(rows = merged.height(), "joined enrollment");

    Ok(merged)
}

/// Null names match each other, and clashing right-hand columns get `_right`.
fn inner_join_on_name(left: LazyFrame, right: LazyFrame) -> LazyFrame {
    let mut args = JoinArgs::new(JoinType::Inner);
    args.maintain_order = MaintainOrderJoin::Left;
    args.nulls_equal = true;
    left.join(right, [col(NAME)], [col(NAME)], args)
}

/// Reads the three configured inputs, merges them and writes the result.
pub fn run_merge_stage(config: &MergeConfig) -> Result<StageReport> {
    info!(
        salary = %config.salary_path.display(),
        tuition = %config.tuition_path.display(),
        enrollment = %config.enrollment_path.display(),
        "starting merge stage"
    );

    let salary = read_table(&config.salary_path)?;
    let tuition = read_table(&config.tuition_path)?;
    let enrollment = read_table(&config.enrollment_path)?;

    let inputs = vec![
        InputSummary {
            table: SALARY_TABLE,
            path: config.salary_path.clone(),
            rows: salary.height(),
        },
        InputSummary {
            table: TUITION_TABLE,
            path: config.tuition_path.clone(),
            rows: tuition.height(),
        },
        InputSummary {
            table: ENROLLMENT_TABLE,
            path: config.enrollment_path.clone(),
            rows: enrollment.height(),
        },
    ];

    let mut merged = merge_tables(&salary, &tuition, &enrollment)?;
    write_table(&mut merged, &config.output_path)?;

    info!(
        rows = merged.height(),
        output = %config.output_path.display(),
        "merge stage complete"
    );

    Ok(StageReport {
        stage: "merge",
        inputs,
        output_path: config.output_path.clone(),
        output_rows: merged.height(),
        output_columns: merged.width(),
        bins: None,
    })
}
