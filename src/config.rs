//! YAML configuration for output locations and DDL behavior.
//!
//! Every field is optional; the defaults reproduce the historical file names
//! in the current directory.

use crate::ddl::{DdlOptions, SqlDialect};
use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output file and directory names, relative to `output_dir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub mysql: PathBuf,
    pub postgres: PathBuf,
    pub sqlite: PathBuf,
    pub xlsx: PathBuf,
    pub csv_dir: PathBuf,
    pub clean_json: PathBuf,
    pub sample_json: PathBuf,
    pub models: PathBuf,
    pub xml_dir: PathBuf,
    pub mongodb_dir: PathBuf,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            mysql: SqlDialect::MySql.default_file_name().into(),
            postgres: SqlDialect::Postgres.default_file_name().into(),
            sqlite: SqlDialect::Sqlite.default_file_name().into(),
            xlsx: "output.xlsx".into(),
            csv_dir: "csv_output".into(),
            clean_json: "clean_data.json".into(),
            sample_json: "sample_data.json".into(),
            models: "models.py".into(),
            xml_dir: "xml_output".into(),
            mongodb_dir: "mongodb_schemas".into(),
        }
    }
}

/// Per-dialect DDL settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Override the dialect's default statement ordering
    pub order_tables: Option<bool>,
}

/// DDL settings for each dialect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdlConfig {
    pub mysql: DialectConfig,
    pub postgres: DialectConfig,
    pub sqlite: DialectConfig,
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory all outputs are written under
    pub output_dir: PathBuf,
    pub files: OutputFiles,
    pub ddl: DdlConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            files: OutputFiles::default(),
            ddl: DdlConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let content = fs::read_to_string(path).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml_ng::from_str(&content).map_err(|e| GenerateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Resolve a configured name against `output_dir`
    pub fn resolve(&self, name: &Path) -> PathBuf {
        self.output_dir.join(name)
    }

    /// Output path of the DDL script for a dialect
    pub fn ddl_path(&self, dialect: SqlDialect) -> PathBuf {
        let name = match dialect {
            SqlDialect::MySql => &self.files.mysql,
            SqlDialect::Postgres => &self.files.postgres,
            SqlDialect::Sqlite => &self.files.sqlite,
        };
        self.resolve(name)
    }

    /// DDL options for a dialect
    pub fn ddl_options(&self, dialect: SqlDialect) -> DdlOptions {
        let dialect_config = match dialect {
            SqlDialect::MySql => self.ddl.mysql,
            SqlDialect::Postgres => self.ddl.postgres,
            SqlDialect::Sqlite => self.ddl.sqlite,
        };
        DdlOptions {
            order_tables: dialect_config.order_tables,
        }
    }
}
