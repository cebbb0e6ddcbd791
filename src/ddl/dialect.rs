//! Per-dialect rendering tables.
//!
//! Everything that differs between the MySQL, PostgreSQL and SQLite output
//! lives here: identifier quoting, physical type names, statement trailers,
//! file preamble and whether statements are dependency-ordered.

use crate::schema::SemanticType;
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlDialect {
    #[default]
    MySql,
    Postgres,
    Sqlite,
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(SqlDialect::Postgres),
            "sqlite" | "sqlite3" => Ok(SqlDialect::Sqlite),
            _ => Err(format!(
                "Unknown dialect: {}. Valid options: mysql, postgres, sqlite",
                s
            )),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::Postgres => write!(f, "postgres"),
            SqlDialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl SqlDialect {
    /// All supported dialects
    pub const ALL: [SqlDialect; 3] = [SqlDialect::MySql, SqlDialect::Postgres, SqlDialect::Sqlite];

    /// Human-readable name used in status messages
    pub fn display_name(&self) -> &'static str {
        match self {
            SqlDialect::MySql => "MySQL",
            SqlDialect::Postgres => "PostgreSQL",
            SqlDialect::Sqlite => "SQLite",
        }
    }

    /// Identifier quote character
    pub fn quote_char(&self) -> char {
        match self {
            SqlDialect::MySql => '`',
            SqlDialect::Postgres | SqlDialect::Sqlite => '"',
        }
    }

    /// Quote an identifier, doubling any embedded quote character
    pub fn quote(&self, ident: &str) -> String {
        let q = self.quote_char();
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(q);
        for c in ident.chars() {
            if c == q {
                out.push(q);
            }
            out.push(c);
        }
        out.push(q);
        out
    }

    /// String type used for unknown types and junction columns
    pub fn string_type(&self) -> &'static str {
        match self {
            SqlDialect::MySql | SqlDialect::Postgres => "VARCHAR(255)",
            SqlDialect::Sqlite => "TEXT",
        }
    }

    /// Physical type name for a semantic type
    pub fn physical_type(&self, ty: &SemanticType) -> &'static str {
        match (self, ty) {
            (SqlDialect::MySql, SemanticType::VarChar) => "VARCHAR(255)",
            (SqlDialect::MySql, SemanticType::Int) => "INT",
            (SqlDialect::MySql, SemanticType::Float) => "FLOAT",
            (SqlDialect::MySql, SemanticType::Boolean) => "TINYINT(1)",
            (SqlDialect::MySql, SemanticType::Date) => "DATE",
            (SqlDialect::MySql, SemanticType::DateTime) => "DATETIME",
            (SqlDialect::MySql, SemanticType::Blob) => "BLOB",

            (SqlDialect::Postgres, SemanticType::VarChar) => "VARCHAR(255)",
            (SqlDialect::Postgres, SemanticType::Int) => "INTEGER",
            (SqlDialect::Postgres, SemanticType::Float) => "REAL",
            (SqlDialect::Postgres, SemanticType::Boolean) => "BOOLEAN",
            (SqlDialect::Postgres, SemanticType::Date) => "DATE",
            (SqlDialect::Postgres, SemanticType::DateTime) => "TIMESTAMP",
            (SqlDialect::Postgres, SemanticType::Blob) => "BYTEA",

            (SqlDialect::Sqlite, SemanticType::VarChar) => "TEXT",
            (SqlDialect::Sqlite, SemanticType::Int) => "INTEGER",
            (SqlDialect::Sqlite, SemanticType::Float) => "REAL",
            // SQLite has no boolean or date storage classes
            (SqlDialect::Sqlite, SemanticType::Boolean) => "INTEGER",
            (SqlDialect::Sqlite, SemanticType::Date) => "TEXT",
            (SqlDialect::Sqlite, SemanticType::DateTime) => "TEXT",
            (SqlDialect::Sqlite, SemanticType::Blob) => "BLOB",

            _ => self.string_type(),
        }
    }

    /// Text closing each CREATE TABLE statement, after the column block
    pub fn table_trailer(&self) -> &'static str {
        match self {
            SqlDialect::MySql => ") ENGINE=InnoDB;",
            SqlDialect::Postgres | SqlDialect::Sqlite => ");",
        }
    }

    /// Statement written at the top of the file
    pub fn preamble(&self) -> Option<&'static str> {
        match self {
            SqlDialect::Sqlite => Some("PRAGMA foreign_keys = ON;"),
            SqlDialect::MySql | SqlDialect::Postgres => None,
        }
    }

    /// Separator written after every statement
    pub fn statement_separator(&self) -> &'static str {
        match self {
            SqlDialect::MySql | SqlDialect::Postgres => "\n",
            SqlDialect::Sqlite => "\n\n",
        }
    }

    /// Suffix of a junction table's referencing column (`Tags` -> `Tags_ID`)
    pub fn junction_reference_suffix(&self) -> &'static str {
        match self {
            SqlDialect::MySql | SqlDialect::Postgres => "_ID",
            SqlDialect::Sqlite => "",
        }
    }

    /// Whether CREATE TABLE statements are dependency-ordered by default
    pub fn orders_tables(&self) -> bool {
        match self {
            SqlDialect::MySql | SqlDialect::Postgres => true,
            SqlDialect::Sqlite => false,
        }
    }

    /// Default output file name
    pub fn default_file_name(&self) -> &'static str {
        match self {
            SqlDialect::MySql => "create_database_mysql.sql",
            SqlDialect::Postgres => "create_database_postgres.sql",
            SqlDialect::Sqlite => "create_database_sqlite.sql",
        }
    }
}
