//! Column lowering, table building and junction synthesis.
//!
//! Each schema table becomes one [`TableSpec`]. Array-typed columns do not
//! appear in their owning table; each one is turned into a [`JunctionSpec`]
//! that links the owner to the referenced table, or to a plain value column
//! when no relationship is declared.

use super::{ColumnDef, ForeignKey, SqlDialect, TableOrigin, TableSpec};
use crate::schema::{Column, Resolver, Schema, SemanticType, Table, IDENTITY_COLUMN};
use tracing::debug;

/// Output of the lowering step
#[derive(Debug, Clone)]
pub struct LoweredSchema {
    /// Schema tables in input order, then junction tables in discovery order
    pub specs: Vec<TableSpec>,
    pub junctions: Vec<JunctionSpec>,
}

/// Referenced side of a junction table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JunctionTarget {
    /// Foreign-keyed to `table(column)`
    Reference { table: String, column: String },
    /// Plain value column without a constraint
    Scalar { column: String },
}

/// A junction table requested by an array-typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionSpec {
    pub name: String,
    pub owner_table: String,
    /// The array-typed column this junction replaces
    pub source_column: String,
    pub target: JunctionTarget,
}

impl JunctionSpec {
    /// Column in the junction table that points back at the owner
    pub fn owner_column(&self) -> String {
        format!("{}_ID", self.owner_table)
    }

    /// Build the two-column table for a dialect
    pub fn to_table_spec(&self, dialect: SqlDialect) -> TableSpec {
        let mut spec = TableSpec::new(
            self.name.clone(),
            TableOrigin::Junction {
                owner_table: self.owner_table.clone(),
                source_column: self.source_column.clone(),
            },
        );

        let owner_column = self.owner_column();
        spec.columns.push(junction_column(&owner_column));
        spec.foreign_keys.push(ForeignKey {
            column: owner_column,
            referenced_table: self.owner_table.clone(),
            referenced_column: IDENTITY_COLUMN.to_string(),
        });

        match &self.target {
            JunctionTarget::Reference { table, column } => {
                let name = format!(
                    "{}{}",
                    self.source_column,
                    dialect.junction_reference_suffix()
                );
                spec.columns.push(junction_column(&name));
                spec.foreign_keys.push(ForeignKey {
                    column: name,
                    referenced_table: table.clone(),
                    referenced_column: column.clone(),
                });
            }
            JunctionTarget::Scalar { column } => {
                spec.columns.push(junction_column(column));
            }
        }

        spec
    }
}

fn junction_column(name: &str) -> ColumnDef {
    ColumnDef {
        name: name.to_string(),
        data_type: SemanticType::VarChar,
        not_null: true,
    }
}

/// Result of lowering a single column
#[derive(Debug, Clone)]
pub enum LoweredColumn {
    /// An ordinary column of the owning table
    Field {
        def: ColumnDef,
        primary_key: bool,
        foreign_key: Option<ForeignKey>,
    },
    /// An array-typed column, replaced by a junction table
    Junction(JunctionSpec),
}

/// Lower a single column of `table`
pub fn lower_column(table: &Table, column: &Column, resolver: &Resolver<'_>) -> LoweredColumn {
    let data_type = resolver.semantic_type(column);
    if data_type.is_array() {
        return LoweredColumn::Junction(synthesize_junction(table, column, resolver));
    }
    if data_type == SemanticType::Unresolved {
        debug!(table = %table.name, column = %column.name, type_uuid = %column.type_uuid, "unresolved column type");
    }

    let flags = resolver.column_flags(column);
    let foreign_key = column.relationship.as_ref().and_then(|rel| {
        let target = resolver.table(&rel.table_uuid);
        let target_column = resolver.column(&rel.table_uuid, &rel.column_uuid);
        match (target, target_column) {
            (Some(t), Some(c)) => Some(ForeignKey {
                column: column.name.clone(),
                referenced_table: t.name.clone(),
                referenced_column: c.name.clone(),
            }),
            _ => {
                debug!(table = %table.name, column = %column.name, "dropping foreign key to unresolved target");
                None
            }
        }
    });

    LoweredColumn::Field {
        def: ColumnDef {
            name: column.name.clone(),
            data_type,
            not_null: flags.not_null,
        },
        primary_key: flags.primary_key,
        foreign_key,
    }
}

/// Build the junction request for an array-typed column
pub fn synthesize_junction(table: &Table, column: &Column, resolver: &Resolver<'_>) -> JunctionSpec {
    let default_name = || format!("{}_{}", table.name, column.name);

    let (name, target) = match &column.relationship {
        Some(rel) => {
            let name = rel
                .declared_name()
                .map(str::to_string)
                .unwrap_or_else(default_name);
            let target = match resolver.table(&rel.table_uuid) {
                Some(target_table) => JunctionTarget::Reference {
                    table: target_table.name.clone(),
                    column: resolver
                        .column(&rel.table_uuid, &rel.column_uuid)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| IDENTITY_COLUMN.to_string()),
                },
                None => JunctionTarget::Scalar {
                    column: IDENTITY_COLUMN.to_string(),
                },
            };
            (name, target)
        }
        None => (
            default_name(),
            JunctionTarget::Scalar {
                column: column.name.clone(),
            },
        ),
    };

    debug!(junction = %name, owner = %table.name, column = %column.name, "synthesized junction table");

    JunctionSpec {
        name,
        owner_table: table.name.clone(),
        source_column: column.name.clone(),
        target,
    }
}

/// Build the [`TableSpec`] for one schema table, collecting junction requests
pub fn build_table(
    table: &Table,
    resolver: &Resolver<'_>,
    junctions: &mut Vec<JunctionSpec>,
) -> TableSpec {
    let mut spec = TableSpec::new(table.name.clone(), TableOrigin::Schema);

    for column in &table.columns {
        match lower_column(table, column, resolver) {
            LoweredColumn::Field {
                def,
                primary_key,
                foreign_key,
            } => {
                if primary_key && !spec.primary_keys.contains(&def.name) {
                    spec.primary_keys.push(def.name.clone());
                }
                spec.columns.push(def);
                spec.foreign_keys.extend(foreign_key);
            }
            LoweredColumn::Junction(junction) => junctions.push(junction),
        }
    }

    if spec.columns.is_empty() {
        debug!(table = %table.name, "table has no columns after lowering");
    }
    spec
}

/// Lower every table of a schema for one dialect
pub fn lower(schema: &Schema, resolver: &Resolver<'_>, dialect: SqlDialect) -> LoweredSchema {
    let mut junctions = Vec::new();
    let mut specs: Vec<TableSpec> = schema
        .tables
        .iter()
        .map(|t| build_table(t, resolver, &mut junctions))
        .collect();

    specs.extend(junctions.iter().map(|j| j.to_table_spec(dialect)));

    LoweredSchema { specs, junctions }
}
