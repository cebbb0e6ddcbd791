//! JSON Schema of the input schema document.
//!
//! Generated from the [`Schema`] model with schemars, so the published schema
//! always matches what the loader accepts. Exported via `--print-json-schema`.

use crate::generators::to_pretty_json;
use crate::schema::Schema;
use schemars::schema_for;

/// JSON Schema describing a schema document
pub fn input_schema() -> schemars::Schema {
    schema_for!(Schema)
}

/// The input JSON Schema as pretty-printed JSON
pub fn input_schema_json() -> String {
    // serializing a schemars::Schema cannot fail
    to_pretty_json(&input_schema()).unwrap_or_default()
}
