//! JSON data skeletons keyed by table name.

use crate::error::GenerateError;
use crate::schema::Schema;
use crate::writer::write_artifact;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Serialize with a 4-space indent and no trailing newline
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, GenerateError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// `{ "<table>": [] }` for every table
pub fn clean_skeleton(schema: &Schema) -> Value {
    let mut data = Map::new();
    for table in &schema.tables {
        data.insert(table.name.clone(), Value::Array(Vec::new()));
    }
    Value::Object(data)
}

/// `{ "<table>": [ { "<column>": null, ... } ] }` for every table
pub fn sample_skeleton(schema: &Schema) -> Value {
    let mut data = Map::new();
    for table in &schema.tables {
        let row: Map<String, Value> = table
            .columns
            .iter()
            .map(|c| (c.name.clone(), Value::Null))
            .collect();
        data.insert(table.name.clone(), Value::Array(vec![Value::Object(row)]));
    }
    Value::Object(data)
}

pub fn generate_clean_json(schema: &Schema, path: &Path) -> Result<PathBuf, GenerateError> {
    write_artifact(path, &to_pretty_json(&clean_skeleton(schema))?)
}

pub fn generate_sample_json(schema: &Schema, path: &Path) -> Result<PathBuf, GenerateError> {
    write_artifact(path, &to_pretty_json(&sample_skeleton(schema))?)
}
