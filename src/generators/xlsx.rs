//! Spreadsheet workbook with one header-only worksheet per table.

use crate::error::GenerateError;
use crate::schema::Schema;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write the workbook to `path`. Worksheet names are the table names, so a
/// name Excel rejects (too long, reserved characters, duplicate) fails the run.
pub fn generate_xlsx(schema: &Schema, path: &Path) -> Result<PathBuf, GenerateError> {
    let mut workbook = Workbook::new();

    for table in &schema.tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&table.name)?;

        for (col, column) in table.columns.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| GenerateError::TooManyColumns {
                table: table.name.clone(),
                count: table.columns.len(),
            })?;
            worksheet.write_string(0, col, &column.name)?;
        }
        debug!(table = %table.name, columns = table.columns.len(), "added worksheet");
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
    }
    workbook.save(path)?;
    Ok(path.to_path_buf())
}
