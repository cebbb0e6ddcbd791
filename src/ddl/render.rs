//! Dialect emitter: renders [`TableSpec`]s as CREATE TABLE statements.

use super::{SqlDialect, TableSpec};

/// Render one CREATE TABLE statement, without the statement separator.
///
/// Columns come first, then the primary key, then one FOREIGN KEY line per
/// constraint in declaration order.
pub fn render_table(spec: &TableSpec, dialect: SqlDialect) -> String {
    let mut lines: Vec<String> =
        Vec::with_capacity(spec.columns.len() + spec.foreign_keys.len() + 1);

    for column in &spec.columns {
        let mut line = format!(
            "    {} {}",
            dialect.quote(&column.name),
            dialect.physical_type(&column.data_type)
        );
        if column.not_null {
            line.push_str(" NOT NULL");
        }
        lines.push(line);
    }

    if !spec.primary_keys.is_empty() {
        let pk: Vec<String> = spec.primary_keys.iter().map(|c| dialect.quote(c)).collect();
        lines.push(format!("    PRIMARY KEY ({})", pk.join(", ")));
    }

    for fk in &spec.foreign_keys {
        lines.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            dialect.quote(&fk.column),
            dialect.quote(&fk.referenced_table),
            dialect.quote(&fk.referenced_column)
        ));
    }

    format!(
        "CREATE TABLE {} (\n{}\n{}",
        dialect.quote(&spec.name),
        lines.join(",\n"),
        dialect.table_trailer()
    )
}

/// Render a full script: the dialect preamble, then every statement in the
/// order given.
pub fn render_script<'a>(
    specs: impl IntoIterator<Item = &'a TableSpec>,
    dialect: SqlDialect,
) -> String {
    let separator = dialect.statement_separator();
    let mut out = String::new();

    if let Some(preamble) = dialect.preamble() {
        out.push_str(preamble);
        out.push_str(separator);
    }

    for spec in specs {
        out.push_str(&render_table(spec, dialect));
        out.push_str(separator);
    }

    out
}
