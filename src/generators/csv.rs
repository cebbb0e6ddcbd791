//! CSV header files, one per table.

use crate::error::GenerateError;
use crate::schema::{Schema, Table};
use crate::writer::TableDirWriter;
use std::path::PathBuf;

const LINE_TERMINATOR: &str = "\r\n";

/// Write `{output_dir}/{table}.csv` for every table, each holding a single
/// header row of column names.
pub fn generate_csv(schema: &Schema, output_dir: PathBuf) -> Result<Vec<PathBuf>, GenerateError> {
    let mut writer = TableDirWriter::new(output_dir, ".csv");
    writer.ensure_output_dir()?;

    for table in &schema.tables {
        writer.write_table(&table.name, &header_row(table))?;
    }

    Ok(writer.into_written())
}

fn header_row(table: &Table) -> String {
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    let mut row = csv_row(&names);
    row.push_str(LINE_TERMINATOR);
    row
}

/// Format one CSV record without its line terminator.
///
/// A record made of a single empty field is written as `""` so that it
/// reads back as a field rather than a blank line.
pub fn csv_row(fields: &[&str]) -> String {
    if let [only] = fields {
        if only.is_empty() {
            return "\"\"".to_string();
        }
    }
    fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_escape(val: &str) -> String {
    if val.contains(',') || val.contains('"') || val.contains('\n') || val.contains('\r') {
        format!("\"{}\"", val.replace('"', "\"\""))
    } else {
        val.to_string()
    }
}
