//! Uuid resolution against the schema's lookup collections.
//!
//! A [`Resolver`] is built once per generation run and borrowed by every
//! lowering step. Lookups never fail: a miss is `None` and the caller applies
//! its own default.

use super::{Column, LookupEntry, PropertyValue, Schema, SemanticType, Table};
use ahash::AHashMap;

/// Immutable uuid lookup tables for one schema
#[derive(Debug)]
pub struct Resolver<'a> {
    column_types: AHashMap<&'a str, &'a str>,
    relationship_types: AHashMap<&'a str, &'a str>,
    property_types: AHashMap<&'a str, &'a str>,
    tables: AHashMap<&'a str, &'a Table>,
}

impl<'a> Resolver<'a> {
    /// Build lookup tables for a schema
    pub fn new(schema: &'a Schema) -> Self {
        let mut tables = AHashMap::with_capacity(schema.tables.len());
        for table in &schema.tables {
            // First table with a given uuid wins
            tables.entry(table.uuid.as_str()).or_insert(table);
        }

        Self {
            column_types: lookup(&schema.column_types),
            relationship_types: lookup(&schema.relationship_types),
            property_types: lookup(&schema.property_types),
            tables,
        }
    }

    /// Semantic type name for a column type uuid
    pub fn column_type(&self, uuid: &str) -> Option<&'a str> {
        self.column_types.get(uuid).copied()
    }

    /// Relationship kind for a relationship type uuid
    pub fn relationship_type(&self, uuid: &str) -> Option<&'a str> {
        self.relationship_types.get(uuid).copied()
    }

    /// Property name for a property type uuid
    pub fn property_type(&self, uuid: &str) -> Option<&'a str> {
        self.property_types.get(uuid).copied()
    }

    /// Table by uuid
    pub fn table(&self, uuid: &str) -> Option<&'a Table> {
        self.tables.get(uuid).copied()
    }

    /// Column of a table, both by uuid
    pub fn column(&self, table_uuid: &str, column_uuid: &str) -> Option<&'a Column> {
        self.table(table_uuid)?
            .columns
            .iter()
            .find(|c| c.uuid == column_uuid)
    }

    /// Classified semantic type of a column
    pub fn semantic_type(&self, column: &Column) -> SemanticType {
        SemanticType::from_name(self.column_type(&column.type_uuid))
    }

    /// Properties of a column with their resolved names, in declaration order.
    ///
    /// Properties whose type uuid is unmapped are skipped.
    pub fn properties(
        &self,
        column: &'a Column,
    ) -> impl Iterator<Item = (&'a str, &'a PropertyValue)> + '_ {
        column
            .properties
            .iter()
            .filter_map(move |p| self.property_type(&p.type_uuid).map(|name| (name, &p.value)))
    }

    /// Nullability and primary-key facts for a column
    pub fn column_flags(&self, column: &'a Column) -> ColumnFlags {
        let mut flags = ColumnFlags::default();
        for (name, value) in self.properties(column) {
            match name {
                "nullable" if !value.is_truthy() => flags.not_null = true,
                "PrimaryKey" if value.is_true() => flags.primary_key = true,
                _ => {}
            }
        }
        flags
    }
}

/// Facts derived from a column's properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    /// A `nullable` property with a false value was declared
    pub not_null: bool,
    /// A `PrimaryKey` property with the value `true` or `"true"` was declared
    pub primary_key: bool,
}

// Later entries override earlier ones for duplicate uuids.
fn lookup(entries: &[LookupEntry]) -> AHashMap<&str, &str> {
    entries
        .iter()
        .map(|e| (e.uuid.as_str(), e.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_json_str(
            r#"{
                "tables": [
                    {"uuid": "t1", "name": "User", "columns": [
                        {"uuid": "c1", "name": "UUID", "type": "ty-str",
                         "properties": [
                            {"type": "p-pk", "value": "true"},
                            {"type": "p-null", "value": false},
                            {"type": "p-missing", "value": true}
                         ]}
                    ]}
                ],
                "column_types": [
                    {"uuid": "ty-str", "name": "INT"},
                    {"uuid": "ty-str", "name": "VARCHAR(255)"}
                ],
                "relationship_types": [{"uuid": "r1", "name": "ForeignKey"}],
                "property_types": [
                    {"uuid": "p-pk", "name": "PrimaryKey"},
                    {"uuid": "p-null", "name": "nullable"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let schema = schema();
        let resolver = Resolver::new(&schema);

        assert_eq!(resolver.column_type("ty-str"), Some("VARCHAR(255)"));
        assert_eq!(resolver.relationship_type("r1"), Some("ForeignKey"));
        assert_eq!(resolver.property_type("nope"), None);
        assert_eq!(resolver.table("t1").map(|t| t.name.as_str()), Some("User"));
        assert_eq!(
            resolver.column("t1", "c1").map(|c| c.name.as_str()),
            Some("UUID")
        );
        assert!(resolver.column("t1", "c2").is_none());
        assert!(resolver.column("t9", "c1").is_none());
    }

    #[test]
    fn test_column_flags_skip_unmapped_properties() {
        let schema = schema();
        let resolver = Resolver::new(&schema);
        let column = &schema.tables[0].columns[0];

        assert_eq!(resolver.properties(column).count(), 2);
        assert_eq!(
            resolver.column_flags(column),
            ColumnFlags {
                not_null: true,
                primary_key: true
            }
        );
    }

    #[test]
    fn test_primary_key_needs_literal_true() {
        for value in [r#""no""#, r#""0""#, r#""yes""#, "2"] {
            let doc = format!(
                r#"{{
                    "tables": [{{"uuid": "t1", "name": "User", "columns": [
                        {{"uuid": "c1", "name": "UUID",
                         "properties": [{{"type": "p-pk", "value": {}}}]}}
                    ]}}],
                    "property_types": [{{"uuid": "p-pk", "name": "PrimaryKey"}}]
                }}"#,
                value
            );
            let schema = Schema::from_json_str(&doc).unwrap();
            let resolver = Resolver::new(&schema);
            let flags = resolver.column_flags(&schema.tables[0].columns[0]);
            assert!(!flags.primary_key, "value {}", value);
        }
    }
}
