//! XML row templates, one file per table.

use crate::error::GenerateError;
use crate::schema::{Schema, Table};
use crate::writer::TableDirWriter;
use std::path::PathBuf;

const INDENT: &str = "   ";

/// Write `{output_dir}/{table}.xml` for every table
pub fn generate_xml(schema: &Schema, output_dir: PathBuf) -> Result<Vec<PathBuf>, GenerateError> {
    let mut writer = TableDirWriter::new(output_dir, ".xml");
    writer.ensure_output_dir()?;

    for table in &schema.tables {
        writer.write_table(&table.name, &render_table_xml(table))?;
    }

    Ok(writer.into_written())
}

/// Render the template document for one table: the table element holding a
/// single `Row` with one empty element per column.
pub fn render_table_xml(table: &Table) -> String {
    let mut out = String::from("<?xml version=\"1.0\" ?>\n");
    out.push_str(&format!("<{}>\n", table.name));

    if table.columns.is_empty() {
        out.push_str(&format!("{}<Row/>\n", INDENT));
    } else {
        out.push_str(&format!("{}<Row>\n", INDENT));
        for column in &table.columns {
            out.push_str(&format!("{}{}<{}/>\n", INDENT, INDENT, column.name));
        }
        out.push_str(&format!("{}</Row>\n", INDENT));
    }

    out.push_str(&format!("</{}>\n", table.name));
    out
}
