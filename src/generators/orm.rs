//! Django model source (`models.py`).

use crate::error::GenerateError;
use crate::schema::{Column, PropertyValue, Resolver, Schema, SemanticType, Table};
use crate::writer::write_artifact;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

const IMPORT_LINE: &str = "from django.db import models";

/// Field class and its fixed leading arguments for a column type
fn field_type(data_type: &SemanticType) -> (&'static str, Option<&'static str>) {
    match data_type {
        SemanticType::VarChar => ("models.CharField", Some("max_length=255")),
        SemanticType::Int => ("models.IntegerField", None),
        SemanticType::Float => ("models.FloatField", None),
        SemanticType::Boolean => ("models.BooleanField", None),
        SemanticType::Date => ("models.DateField", None),
        SemanticType::DateTime => ("models.DateTimeField", None),
        SemanticType::Blob => ("models.BinaryField", None),
        SemanticType::Uuid => ("models.UUIDField", None),
        _ => ("models.CharField", Some("max_length=255")),
    }
}

/// Python spelling of a property value
fn python_literal(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Flag(true) => "True".to_string(),
        PropertyValue::Flag(false) => "False".to_string(),
        PropertyValue::Raw(Value::Null) => "None".to_string(),
        PropertyValue::Raw(Value::String(s)) => s.clone(),
        PropertyValue::Raw(other) => other.to_string(),
    }
}

/// Keyword options (`null=`, `blank=`, `primary_key=`) in property order
fn field_options<'a>(resolver: &Resolver<'a>, column: &'a Column) -> Vec<String> {
    let mut options = Vec::new();
    for (name, value) in resolver.properties(column) {
        match name {
            "nullable" => options.push(format!("null={}", python_literal(value))),
            "blank" => options.push(format!("blank={}", python_literal(value))),
            "PrimaryKey" if value.is_true() => options.push("primary_key=True".to_string()),
            _ => {}
        }
    }
    options
}

fn relation_field(kind: &str, related: &str, options: &[String]) -> String {
    let mut extra = String::new();
    for option in options {
        extra.push_str(", ");
        extra.push_str(option);
    }
    match kind {
        "OneToOne" => format!(
            "models.OneToOneField(\"{}\", on_delete=models.CASCADE{})",
            related, extra
        ),
        "ManyToMany" => format!("models.ManyToManyField(\"{}\"{})", related, extra),
        _ => format!(
            "models.ForeignKey(\"{}\", on_delete=models.CASCADE{})",
            related, extra
        ),
    }
}

fn field_line<'a>(resolver: &Resolver<'a>, column: &'a Column) -> String {
    let options = field_options(resolver, column);

    if let Some(rel) = &column.relationship {
        if let Some(related) = resolver.table(&rel.table_uuid) {
            let kind = resolver
                .relationship_type(&rel.relationship_type_uuid)
                .unwrap_or("ForeignKey");
            return format!(
                "    {} = {}",
                column.name,
                relation_field(kind, &related.name, &options)
            );
        }
        debug!(
            column = %column.name,
            table_uuid = %rel.table_uuid,
            "relationship target not found, emitting plain field"
        );
    }

    let (class, leading) = field_type(&resolver.semantic_type(column));
    let mut params: Vec<&str> = Vec::with_capacity(options.len() + 1);
    params.extend(leading);
    params.extend(options.iter().map(String::as_str));
    format!("    {} = {}({})", column.name, class, params.join(", "))
}

fn render_class<'a>(resolver: &Resolver<'a>, table: &'a Table) -> String {
    let mut fields: Vec<String> = table
        .columns
        .iter()
        .map(|c| field_line(resolver, c))
        .collect();
    if fields.is_empty() {
        fields.push("    pass".to_string());
    }
    format!("class {}(models.Model):\n{}\n", table.name, fields.join("\n"))
}

/// Render the whole module: the import, a blank line, then one class per
/// table followed by a blank line.
pub fn render_models(schema: &Schema) -> String {
    let resolver = Resolver::new(schema);
    let mut out = format!("{}\n\n", IMPORT_LINE);
    for table in &schema.tables {
        out.push_str(&render_class(&resolver, table));
        out.push('\n');
    }
    out
}

pub fn generate_models(schema: &Schema, path: &Path) -> Result<PathBuf, GenerateError> {
    write_artifact(path, &render_models(schema))
}
