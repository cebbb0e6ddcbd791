//! Test schema generator for schema-codegen integration tests.
//!
//! Produces deterministic schema documents (tables, lookups, properties and
//! relationships) from a seed, for property tests and benchmarks.
//!
//! # Example
//!
//! ```rust
//! use test_data_gen::{Scale, SchemaGenerator};
//!
//! let mut generator = SchemaGenerator::new(42, Scale::Small);
//! let doc = generator.generate();
//! assert!(doc["tables"].as_array().unwrap().len() > 0);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};

/// Column type names placed in the `column_types` lookup
pub const COLUMN_TYPES: [&str; 9] = [
    "VARCHAR(255)",
    "INT",
    "FLOAT",
    "BOOLEAN",
    "DATE",
    "DATETIME",
    "BLOB",
    "UUID",
    "Array(VARCHAR(255))",
];

/// Relationship kinds placed in the `relationship_types` lookup
pub const RELATIONSHIP_TYPES: [&str; 3] = ["ForeignKey", "OneToOne", "ManyToMany"];

/// Property names placed in the `property_types` lookup
pub const PROPERTY_TYPES: [&str; 3] = ["nullable", "blank", "PrimaryKey"];

const ARRAY_TYPE_INDEX: usize = 8;

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// 8 tables
    Small,
    /// 60 tables
    Medium,
    /// 500 tables
    Large,
}

impl Scale {
    pub fn tables(&self) -> usize {
        match self {
            Scale::Small => 8,
            Scale::Medium => 60,
            Scale::Large => 500,
        }
    }

    pub fn max_columns(&self) -> usize {
        match self {
            Scale::Small => 6,
            Scale::Medium => 12,
            Scale::Large => 20,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(Scale::Small),
            "medium" | "m" => Ok(Scale::Medium),
            "large" | "l" => Ok(Scale::Large),
            _ => Err(format!(
                "Unknown scale: {}. Use small, medium, or large",
                s
            )),
        }
    }
}

/// Seeded schema document generator
pub struct SchemaGenerator {
    rng: ChaCha8Rng,
    scale: Scale,
    /// Allow relationships to point at later tables (and so form cycles)
    allow_cycles: bool,
    /// Probability that a non-identity column is array-typed
    array_ratio: f64,
    /// Probability that a non-identity column carries a relationship
    relationship_ratio: f64,
}

impl SchemaGenerator {
    pub fn new(seed: u64, scale: Scale) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            scale,
            allow_cycles: false,
            array_ratio: 0.1,
            relationship_ratio: 0.25,
        }
    }

    pub fn with_cycles(mut self, allow: bool) -> Self {
        self.allow_cycles = allow;
        self
    }

    pub fn with_array_ratio(mut self, ratio: f64) -> Self {
        self.array_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_relationship_ratio(mut self, ratio: f64) -> Self {
        self.relationship_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Generate one schema document
    pub fn generate(&mut self) -> Value {
        let table_count = self.scale.tables();
        let tables: Vec<Value> = (0..table_count).map(|i| self.table(i, table_count)).collect();

        json!({
            "tables": tables,
            "column_types": lookup("ct", &COLUMN_TYPES),
            "relationship_types": lookup("rt", &RELATIONSHIP_TYPES),
            "property_types": lookup("pt", &PROPERTY_TYPES),
        })
    }

    /// Generate one schema document as pretty-printed JSON
    pub fn generate_string(&mut self) -> String {
        let doc = self.generate();
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }

    fn table(&mut self, index: usize, table_count: usize) -> Value {
        let mut columns = vec![json!({
            "uuid": column_uuid(index, 0),
            "name": "UUID",
            "type": "ct-0",
            "properties": [
                {"type": "pt-2", "value": true},
                {"type": "pt-0", "value": false}
            ]
        })];

        let extra = self.rng.random_range(0..self.scale.max_columns());
        for c in 1..=extra {
            columns.push(self.column(index, c, table_count));
        }

        json!({
            "uuid": table_uuid(index),
            "name": format!("Table{}", index),
            "columns": columns,
        })
    }

    fn column(&mut self, table: usize, index: usize, table_count: usize) -> Value {
        let is_array = self.rng.random_bool(self.array_ratio);
        let type_index = if is_array {
            ARRAY_TYPE_INDEX
        } else {
            self.rng.random_range(0..ARRAY_TYPE_INDEX)
        };

        let mut column = json!({
            "uuid": column_uuid(table, index),
            "name": format!("Col{}", index),
            "type": format!("ct-{}", type_index),
            "properties": self.properties(),
        });

        if let Some(target) = self.relationship_target(table, table_count) {
            let kind = self.rng.random_range(0..RELATIONSHIP_TYPES.len());
            column["relationship"] = json!([{
                "table_uuid": table_uuid(target),
                "column_uuid": column_uuid(target, 0),
                "relationship_type_uuid": format!("rt-{}", kind),
            }]);
        }

        column
    }

    fn properties(&mut self) -> Value {
        let mut props = Vec::new();
        if self.rng.random_bool(0.5) {
            // Mix booleans and their string spellings
            let value = match self.rng.random_range(0..3) {
                0 => json!(true),
                1 => json!(false),
                _ => json!("false"),
            };
            props.push(json!({"type": "pt-0", "value": value}));
        }
        if self.rng.random_bool(0.2) {
            props.push(json!({"type": "pt-1", "value": self.rng.random_bool(0.5)}));
        }
        Value::Array(props)
    }

    fn relationship_target(&mut self, table: usize, table_count: usize) -> Option<usize> {
        if !self.rng.random_bool(self.relationship_ratio) {
            return None;
        }
        if self.allow_cycles {
            Some(self.rng.random_range(0..table_count))
        } else if table > 0 {
            Some(self.rng.random_range(0..table))
        } else {
            None
        }
    }
}

fn lookup(prefix: &str, names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"uuid": format!("{}-{}", prefix, i), "name": name}))
            .collect(),
    )
}

fn table_uuid(index: usize) -> String {
    format!("t-{}", index)
}

fn column_uuid(table: usize, index: usize) -> String {
    format!("c-{}-{}", table, index)
}
