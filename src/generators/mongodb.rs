//! MongoDB `$jsonSchema` collection validators, one file per table.

use super::json::to_pretty_json;
use crate::error::GenerateError;
use crate::schema::{Resolver, Schema, SemanticType, Table};
use crate::writer::TableDirWriter;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

fn bson_type(data_type: &SemanticType) -> &'static str {
    match data_type {
        SemanticType::VarChar | SemanticType::Uuid => "string",
        SemanticType::Int => "int",
        SemanticType::Float => "double",
        SemanticType::Boolean => "bool",
        SemanticType::Date | SemanticType::DateTime => "date",
        SemanticType::Blob => "binData",
        _ => "string",
    }
}

/// Build the validator document for one collection.
///
/// A column is required when it is declared not nullable or is a primary key.
pub fn collection_schema<'a>(resolver: &Resolver<'a>, table: &'a Table) -> Value {
    let mut properties = Map::new();
    let mut required: Vec<&str> = Vec::new();

    for column in &table.columns {
        properties.insert(
            column.name.clone(),
            json!({ "bsonType": bson_type(&resolver.semantic_type(column)) }),
        );

        let flags = resolver.column_flags(column);
        if (flags.not_null || flags.primary_key) && !required.contains(&column.name.as_str()) {
            required.push(&column.name);
        }
    }

    json!({
        "$jsonSchema": {
            "bsonType": "object",
            "title": table.name,
            "properties": properties,
            "required": required,
            "additionalProperties": false
        }
    })
}

/// Write `{output_dir}/{table}_schema.json` for every table
pub fn generate_mongodb(
    schema: &Schema,
    output_dir: PathBuf,
) -> Result<Vec<PathBuf>, GenerateError> {
    let resolver = Resolver::new(schema);
    let mut writer = TableDirWriter::new(output_dir, "_schema.json");
    writer.ensure_output_dir()?;

    for table in &schema.tables {
        let document = collection_schema(&resolver, table);
        writer.write_table(&table.name, &to_pretty_json(&document)?)?;
    }

    Ok(writer.into_written())
}
