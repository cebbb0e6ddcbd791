//! Output generators and their option codes.
//!
//! Codes 1-3 produce SQL DDL through [`crate::ddl`]; the rest are
//! single-pass formatters that walk the schema table by table.

mod csv;
mod json;
mod mongodb;
mod orm;
mod xlsx;
mod xml;

pub use self::csv::{csv_row, generate_csv};
pub use self::json::{
    clean_skeleton, generate_clean_json, generate_sample_json, sample_skeleton, to_pretty_json,
};
pub use self::mongodb::{collection_schema, generate_mongodb};
pub use self::orm::{generate_models, render_models};
pub use self::xlsx::generate_xlsx;
pub use self::xml::{generate_xml, render_table_xml};

use crate::config::GeneratorConfig;
use crate::ddl::{self, SqlDialect};
use crate::error::GenerateError;
use crate::schema::Schema;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// A selectable output generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// SQL DDL script for a dialect (codes 1-3)
    Ddl(SqlDialect),
    /// Spreadsheet with one header row per table
    Excel,
    /// One CSV header file per table
    Csv,
    /// JSON skeleton with an empty array per table
    CleanJson,
    /// JSON skeleton with one null-filled row per table
    SampleJson,
    /// Django model classes
    Django,
    /// One XML row template per table
    Xml,
    /// One MongoDB `$jsonSchema` validator per table
    MongoDb,
}

impl Generator {
    /// All generators in option-code order
    pub const ALL: [Generator; 10] = [
        Generator::Ddl(SqlDialect::MySql),
        Generator::Ddl(SqlDialect::Postgres),
        Generator::Ddl(SqlDialect::Sqlite),
        Generator::Excel,
        Generator::Csv,
        Generator::CleanJson,
        Generator::SampleJson,
        Generator::Django,
        Generator::Xml,
        Generator::MongoDb,
    ];

    /// Look up a generator by its option code
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| i64::from(g.code()) == code)
    }

    pub fn code(&self) -> u32 {
        match self {
            Generator::Ddl(SqlDialect::MySql) => 1,
            Generator::Ddl(SqlDialect::Postgres) => 2,
            Generator::Ddl(SqlDialect::Sqlite) => 3,
            Generator::Excel => 4,
            Generator::Csv => 5,
            Generator::CleanJson => 6,
            Generator::SampleJson => 7,
            Generator::Django => 8,
            Generator::Xml => 9,
            Generator::MongoDb => 10,
        }
    }

    /// Name used in progress messages
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Ddl(dialect) => dialect.display_name(),
            Generator::Excel => "Excel",
            Generator::Csv => "CSV",
            Generator::CleanJson => "clean JSON",
            Generator::SampleJson => "sample JSON",
            Generator::Django => "Django models",
            Generator::Xml => "XML",
            Generator::MongoDb => "MongoDB",
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            Generator::Ddl(SqlDialect::MySql) => "mysql",
            Generator::Ddl(SqlDialect::Postgres) => "postgres",
            Generator::Ddl(SqlDialect::Sqlite) => "sqlite",
            Generator::Excel => "excel",
            Generator::Csv => "csv",
            Generator::CleanJson | Generator::SampleJson => "json",
            Generator::Django => "django",
            Generator::Xml => "xml",
            Generator::MongoDb => "mongodb",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Generator::Ddl(SqlDialect::MySql) => "Generate SQL scripts for MySQL",
            Generator::Ddl(SqlDialect::Postgres) => "Generate SQL scripts for PostgreSQL",
            Generator::Ddl(SqlDialect::Sqlite) => "Generate SQL scripts for SQLite",
            Generator::Excel => "Generate Excel files",
            Generator::Csv => "Generate CSV files",
            Generator::CleanJson => "Generate clean JSON file",
            Generator::SampleJson => "Generate sample JSON file",
            Generator::Django => "Generate Django models",
            Generator::Xml => "Generate XML file",
            Generator::MongoDb => "Generate MongoDB script",
        }
    }

    /// Run the generator, writing its files under the configured output directory
    pub fn run(
        &self,
        schema: &Schema,
        config: &GeneratorConfig,
    ) -> Result<GenerationReport, GenerateError> {
        let files = match self {
            Generator::Ddl(dialect) => {
                let path = config.ddl_path(*dialect);
                ddl::write(schema, *dialect, &config.ddl_options(*dialect), &path)?;
                vec![path]
            }
            Generator::Excel => vec![generate_xlsx(schema, &config.resolve(&config.files.xlsx))?],
            Generator::Csv => generate_csv(schema, config.resolve(&config.files.csv_dir))?,
            Generator::CleanJson => vec![generate_clean_json(
                schema,
                &config.resolve(&config.files.clean_json),
            )?],
            Generator::SampleJson => vec![generate_sample_json(
                schema,
                &config.resolve(&config.files.sample_json),
            )?],
            Generator::Django => vec![generate_models(
                schema,
                &config.resolve(&config.files.models),
            )?],
            Generator::Xml => generate_xml(schema, config.resolve(&config.files.xml_dir))?,
            Generator::MongoDb => {
                generate_mongodb(schema, config.resolve(&config.files.mongodb_dir))?
            }
        };

        info!(generator = self.name(), files = files.len(), "generation finished");
        Ok(GenerationReport {
            generator: *self,
            files,
        })
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Files written by one generator run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generator: Generator,
    pub files: Vec<PathBuf>,
}

/// Option menu shown by the CLI
pub fn help_text() -> String {
    let mut text = String::from("Usage: schema-codegen <SCHEMA> [OPTION]\nOptions:\n");
    for generator in Generator::ALL {
        text.push_str(&format!(
            "  {:<2} {:<9} {}\n",
            generator.code(),
            generator.keyword(),
            generator.description()
        ));
    }
    text
}
