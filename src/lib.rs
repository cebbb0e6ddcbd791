pub mod config;
pub mod ddl;
pub mod error;
pub mod generators;
pub mod json_schema;
pub mod schema;
pub mod writer;
