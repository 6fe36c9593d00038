use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Reads a comma-separated file with a header row. Column types are inferred
/// from every row so that repeated reads of the same file agree.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| PipelineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(file)
        .finish()?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read table"
    );
    Ok(df)
}

/// Writes every column of `df` with a header row and no row index.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| PipelineError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    CsvWriter::new(&mut file).include_header(true).finish(df)?;

    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

pub fn require_columns(df: &DataFrame, table: &'static str, columns: &[&str]) -> Result<()> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(PipelineError::MissingColumn {
                table,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Renames columns in place. Every source column must exist.
pub fn rename_columns(
    df: &mut DataFrame,
    table: &'static str,
    renames: &[(&str, &str)],
) -> Result<()> {
    for (from, to) in renames {
        require_columns(df, table, &[*from])?;
        df.rename(from, (*to).into())?;
        // rename leaves the cached schema pointing at the old name
        df.clear_schema();
    }
    Ok(())
}
