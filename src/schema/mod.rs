//! Input schema model.
//!
//! This module provides:
//! - Data models for the JSON schema document (tables, columns, properties, relationships)
//! - Loading and property-value normalization
//! - Semantic type classification for resolved column type names
//! - The uuid [`Resolver`] used by every generator

mod resolve;

pub use resolve::*;

use crate::error::SchemaError;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Column type name that marks a multi-valued column.
pub const ARRAY_TYPE_NAME: &str = "Array(VARCHAR(255))";

/// Name of the identifier column every table is assumed to carry.
pub const IDENTITY_COLUMN: &str = "UUID";

/// Root of a schema document.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct Schema {
    /// Tables in declaration order
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Column type lookup (uuid -> semantic type name)
    #[serde(default)]
    pub column_types: Vec<LookupEntry>,
    /// Relationship type lookup (uuid -> relationship kind)
    #[serde(default)]
    pub relationship_types: Vec<LookupEntry>,
    /// Property type lookup (uuid -> property name)
    #[serde(default)]
    pub property_types: Vec<LookupEntry>,
}

/// A `{uuid, name}` pair in one of the lookup collections.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LookupEntry {
    pub uuid: String,
    pub name: String,
}

/// Table definition
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Table {
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<Vec<Column>>")]
    pub columns: Vec<Column>,
}

/// Column definition within a table
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Column {
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    /// Column type uuid
    #[serde(rename = "type", default)]
    pub type_uuid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<Vec<Property>>")]
    pub properties: Vec<Property>,
    /// Only the first declared relationship is kept.
    #[serde(default, deserialize_with = "first_relationship")]
    #[schemars(with = "Option<Vec<Relationship>>")]
    pub relationship: Option<Relationship>,
}

/// A typed property attached to a column (`nullable`, `blank`, `PrimaryKey`, ...)
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Property {
    /// Property type uuid
    #[serde(rename = "type")]
    pub type_uuid: String,
    #[serde(default)]
    #[schemars(with = "Value")]
    pub value: PropertyValue,
}

/// Declares that a column references a column of another table.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Relationship {
    pub table_uuid: String,
    pub column_uuid: String,
    pub relationship_type_uuid: String,
    /// Custom junction/relation name
    pub name: String,
}

impl Relationship {
    /// The declared relation name, if one was given
    pub fn declared_name(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

/// Normalized property value.
///
/// Booleans and the strings `"true"`/`"false"` both become [`PropertyValue::Flag`];
/// anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Flag(bool),
    Raw(Value),
}

impl PropertyValue {
    /// Truthiness of the value: null, `""`, `0` and empty containers are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Flag(b) => *b,
            PropertyValue::Raw(Value::Null) => false,
            PropertyValue::Raw(Value::Bool(b)) => *b,
            PropertyValue::Raw(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            PropertyValue::Raw(Value::String(s)) => !s.is_empty(),
            PropertyValue::Raw(Value::Array(a)) => !a.is_empty(),
            PropertyValue::Raw(Value::Object(o)) => !o.is_empty(),
        }
    }

    /// Strict truth: only `true` and `"true"` qualify.
    pub fn is_true(&self) -> bool {
        matches!(
            self,
            PropertyValue::Flag(true) | PropertyValue::Raw(Value::Bool(true))
        )
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        PropertyValue::Raw(Value::Null)
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => PropertyValue::Flag(b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => PropertyValue::Flag(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => PropertyValue::Flag(false),
            other => PropertyValue::Raw(other),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PropertyValue::from)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn first_relationship<'de, D>(deserializer: D) -> Result<Option<Relationship>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Relationship>> = Option::deserialize(deserializer)?;
    Ok(entries.and_then(|e| e.into_iter().next()))
}

impl Schema {
    /// Load a schema document from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        if !path.exists() {
            return Err(SchemaError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SchemaError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a schema document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get the number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if schema has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Dialect-agnostic column type classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticType {
    /// VARCHAR(255)
    VarChar,
    Int,
    Float,
    Boolean,
    Date,
    DateTime,
    Blob,
    /// UUID (only meaningful to the ORM and document-store generators)
    Uuid,
    /// Multi-valued sentinel, lowered into a junction table
    Array,
    /// A resolved name outside the fixed set
    Other(String),
    /// The column's type uuid is not in the lookup
    Unresolved,
}

impl SemanticType {
    /// Classify a resolved type name
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None => SemanticType::Unresolved,
            Some("VARCHAR(255)") => SemanticType::VarChar,
            Some("INT") => SemanticType::Int,
            Some("FLOAT") => SemanticType::Float,
            Some("BOOLEAN") => SemanticType::Boolean,
            Some("DATE") => SemanticType::Date,
            Some("DATETIME") => SemanticType::DateTime,
            Some("BLOB") => SemanticType::Blob,
            Some("UUID") => SemanticType::Uuid,
            Some(ARRAY_TYPE_NAME) => SemanticType::Array,
            Some(other) => SemanticType::Other(other.to_string()),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SemanticType::Array)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::VarChar => write!(f, "VARCHAR(255)"),
            SemanticType::Int => write!(f, "INT"),
            SemanticType::Float => write!(f, "FLOAT"),
            SemanticType::Boolean => write!(f, "BOOLEAN"),
            SemanticType::Date => write!(f, "DATE"),
            SemanticType::DateTime => write!(f, "DATETIME"),
            SemanticType::Blob => write!(f, "BLOB"),
            SemanticType::Uuid => write!(f, "UUID"),
            SemanticType::Array => write!(f, "{}", ARRAY_TYPE_NAME),
            SemanticType::Other(name) => write!(f, "{}", name),
            SemanticType::Unresolved => write!(f, "<unresolved>"),
        }
    }
}
