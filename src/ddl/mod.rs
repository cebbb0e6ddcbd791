//! SQL DDL generation.
//!
//! The pipeline runs in four steps, shared by every dialect:
//! - lowering: columns become [`ColumnDef`]s, array-typed columns become junction tables
//! - graphing: a [`DependencyGraph`] is built from the structured foreign keys
//! - ordering: tables are arranged by a depth-first traversal of that graph
//! - rendering: the ordered [`TableSpec`]s are printed for one [`SqlDialect`]

mod dialect;
mod graph;
mod lower;
mod render;

pub use dialect::*;
pub use graph::*;
pub use lower::*;
pub use render::*;

use crate::error::GenerateError;
use crate::schema::{Resolver, Schema, SemanticType};
use crate::writer::write_artifact;
use ahash::AHashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column definition inside a [`TableSpec`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: SemanticType,
    pub not_null: bool,
}

/// Foreign key constraint: `column` references `referenced_table(referenced_column)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Where a [`TableSpec`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOrigin {
    /// Declared in the schema document
    Schema,
    /// Synthesized for an array-typed column
    Junction {
        owner_table: String,
        source_column: String,
    },
}

/// Resolved, dialect-agnostic table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub origin: TableOrigin,
    pub columns: Vec<ColumnDef>,
    /// Primary key column names in declaration order
    pub primary_keys: Vec<String>,
    /// Foreign keys in declaration order
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, origin: TableOrigin) -> Self {
        Self {
            name: name.into(),
            origin,
            columns: Vec::new(),
            primary_keys: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_junction(&self) -> bool {
        matches!(self.origin, TableOrigin::Junction { .. })
    }
}

/// Options for a DDL run
#[derive(Debug, Clone, Copy, Default)]
pub struct DdlOptions {
    /// Force dependency ordering on or off; `None` uses the dialect default
    pub order_tables: Option<bool>,
}

/// A fully planned DDL script: specs, their dependency graph and emission order
#[derive(Debug)]
pub struct DdlPlan {
    pub dialect: SqlDialect,
    /// Schema tables in input order, followed by junction tables
    pub specs: Vec<TableSpec>,
    /// Junction tables that were synthesized, in discovery order
    pub junctions: Vec<JunctionSpec>,
    pub graph: DependencyGraph,
    /// Indexes into `specs`, in emission order
    pub order: Vec<usize>,
}

impl DdlPlan {
    /// Lower, graph and order a schema for one dialect
    pub fn build(schema: &Schema, dialect: SqlDialect, options: &DdlOptions) -> Self {
        let resolver = Resolver::new(schema);
        let lowered = lower(schema, &resolver, dialect);
        let graph = DependencyGraph::from_specs(&lowered.specs);

        let ordered = options.order_tables.unwrap_or(dialect.orders_tables());
        let order = if ordered {
            emission_order(&lowered.specs, &graph)
        } else {
            (0..lowered.specs.len()).collect()
        };

        debug!(
            dialect = %dialect,
            tables = lowered.specs.len(),
            junctions = lowered.junctions.len(),
            graph_keys = graph.len(),
            ordered,
            "planned DDL"
        );

        Self {
            dialect,
            specs: lowered.specs,
            junctions: lowered.junctions,
            graph,
            order,
        }
    }

    /// Table specs in emission order
    pub fn ordered_specs(&self) -> impl Iterator<Item = &TableSpec> {
        self.order.iter().map(|&i| &self.specs[i])
    }

    /// Table names in emission order
    pub fn table_names(&self) -> Vec<&str> {
        self.ordered_specs().map(|s| s.name.as_str()).collect()
    }

    /// Render the complete script
    pub fn render(&self) -> String {
        render_script(self.ordered_specs(), self.dialect)
    }
}

/// Emission order for `specs`.
///
/// The topological order (dependents first) is reversed once more, so tables
/// reachable through the graph come out in traversal post-order. Tables that
/// take part in no foreign key follow in scan order.
///
/// Only the first spec with a given name is emitted; later ones are logged.
pub fn emission_order(specs: &[TableSpec], graph: &DependencyGraph) -> Vec<usize> {
    for index in shadowed_specs(specs) {
        warn!(table = %specs[index].name, "duplicate table name, CREATE TABLE skipped");
    }

    let sorted = graph.topological_order();

    let mut order: Vec<usize> = sorted
        .iter()
        .filter_map(|name| specs.iter().position(|s| &s.name == name))
        .collect();
    order.reverse();

    let in_graph: AHashSet<&str> = sorted.iter().map(String::as_str).collect();
    order.extend(
        specs
            .iter()
            .enumerate()
            .filter(|(_, s)| !in_graph.contains(s.name.as_str()))
            .map(|(i, _)| i),
    );
    order
}

/// Indexes of specs whose name was already taken by an earlier spec
pub fn shadowed_specs(specs: &[TableSpec]) -> Vec<usize> {
    let mut seen = AHashSet::new();
    specs
        .iter()
        .enumerate()
        .filter(|(_, s)| !seen.insert(s.name.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Generate the DDL script for a schema
pub fn generate(schema: &Schema, dialect: SqlDialect, options: &DdlOptions) -> String {
    DdlPlan::build(schema, dialect, options).render()
}

/// Generate the DDL script and write it to `path`, replacing any existing file
pub fn write(
    schema: &Schema,
    dialect: SqlDialect,
    options: &DdlOptions,
    path: &Path,
) -> Result<(), GenerateError> {
    let script = generate(schema, dialect, options);
    write_artifact(path, &script)?;
    info!(dialect = %dialect, path = %path.display(), "wrote DDL script");
    Ok(())
}
