//! Integration tests for DDL generation across dialects.

use schema_codegen::ddl::{self, DdlOptions, DdlPlan, JunctionTarget, SqlDialect};
use schema_codegen::schema::Schema;
use std::path::Path;
use test_data_gen::{Scale, SchemaGenerator};

fn blog() -> Schema {
    Schema::from_path(Path::new("tests/fixtures/blog.json")).unwrap()
}

fn position(names: &[&str], name: &str) -> usize {
    names
        .iter()
        .position(|n| *n == name)
        .unwrap_or_else(|| panic!("table {} not emitted", name))
}

#[test]
fn test_mysql_blog_script() {
    let sql = ddl::generate(&blog(), SqlDialect::MySql, &DdlOptions::default());

    let expected = "\
CREATE TABLE `User` (
    `UUID` VARCHAR(255) NOT NULL,
    `Email` VARCHAR(255),
    PRIMARY KEY (`UUID`)
) ENGINE=InnoDB;
CREATE TABLE `Post` (
    `UUID` VARCHAR(255) NOT NULL,
    `AuthorID` VARCHAR(255),
    `PublishedAt` DATETIME,
    PRIMARY KEY (`UUID`),
    FOREIGN KEY (`AuthorID`) REFERENCES `User`(`UUID`)
) ENGINE=InnoDB;
CREATE TABLE `Post_Tags` (
    `Post_ID` VARCHAR(255) NOT NULL,
    `Tags` VARCHAR(255) NOT NULL,
    FOREIGN KEY (`Post_ID`) REFERENCES `Post`(`UUID`)
) ENGINE=InnoDB;
CREATE TABLE `Category` (
    `UUID` VARCHAR(255),
    `Rank` INT,
    PRIMARY KEY (`UUID`)
) ENGINE=InnoDB;
CREATE TABLE `PostCategory` (
    `Post_ID` VARCHAR(255) NOT NULL,
    `Categories_ID` VARCHAR(255) NOT NULL,
    FOREIGN KEY (`Post_ID`) REFERENCES `Post`(`UUID`),
    FOREIGN KEY (`Categories_ID`) REFERENCES `Category`(`UUID`)
) ENGINE=InnoDB;
";
    assert_eq!(sql, expected);
}

#[test]
fn test_referenced_tables_emitted_first() {
    let plan = DdlPlan::build(&blog(), SqlDialect::MySql, &DdlOptions::default());
    let names = plan.table_names();

    assert!(position(&names, "User") < position(&names, "Post"));
    assert!(position(&names, "Post") < position(&names, "Post_Tags"));
    assert!(position(&names, "Category") < position(&names, "PostCategory"));
}

#[test]
fn test_junction_without_relationship() {
    let plan = DdlPlan::build(&blog(), SqlDialect::MySql, &DdlOptions::default());
    let junction = plan
        .junctions
        .iter()
        .find(|j| j.name == "Post_Tags")
        .unwrap();

    assert_eq!(junction.owner_table, "Post");
    assert_eq!(
        junction.target,
        JunctionTarget::Scalar {
            column: "Tags".to_string()
        }
    );

    let spec = plan.specs.iter().find(|s| s.name == "Post_Tags").unwrap();
    assert!(spec.is_junction());
    assert_eq!(spec.columns.len(), 2);
    assert_eq!(spec.foreign_keys.len(), 1);
    assert_eq!(spec.foreign_keys[0].column, "Post_ID");
    assert_eq!(spec.foreign_keys[0].referenced_table, "Post");
}

#[test]
fn test_array_columns_are_not_emitted_on_owner() {
    let plan = DdlPlan::build(&blog(), SqlDialect::Postgres, &DdlOptions::default());
    let post = plan.specs.iter().find(|s| s.name == "Post").unwrap();

    assert!(post.column("Tags").is_none());
    assert!(post.column("Categories").is_none());
}

#[test]
fn test_unmapped_property_is_ignored() {
    let plan = DdlPlan::build(&blog(), SqlDialect::MySql, &DdlOptions::default());
    let category = plan.specs.iter().find(|s| s.name == "Category").unwrap();
    let rank = category.column("Rank").unwrap();

    assert!(!rank.not_null);
    assert_eq!(category.primary_keys, vec!["UUID"]);
}

#[test]
fn test_sqlite_keeps_scan_order() {
    let sql = ddl::generate(&blog(), SqlDialect::Sqlite, &DdlOptions::default());

    assert!(sql.starts_with("PRAGMA foreign_keys = ON;\n\n"));
    let tables: Vec<&str> = sql
        .lines()
        .filter_map(|l| l.strip_prefix("CREATE TABLE \""))
        .filter_map(|l| l.split('"').next())
        .collect();
    assert_eq!(
        tables,
        vec!["User", "Post", "Category", "Post_Tags", "PostCategory"]
    );
    // junction reference columns carry no suffix in SQLite
    assert!(sql.contains("    \"Categories\" TEXT NOT NULL,\n"));
    assert!(sql.contains("FOREIGN KEY (\"Categories\") REFERENCES \"Category\"(\"UUID\")"));
}

#[test]
fn test_sqlite_ordering_can_be_enabled() {
    let options = DdlOptions {
        order_tables: Some(true),
    };
    let plan = DdlPlan::build(&blog(), SqlDialect::Sqlite, &options);
    assert_eq!(
        plan.table_names(),
        vec!["User", "Post", "Post_Tags", "Category", "PostCategory"]
    );
}

#[test]
fn test_postgres_types() {
    let sql = ddl::generate(&blog(), SqlDialect::Postgres, &DdlOptions::default());
    assert!(sql.contains("    \"PublishedAt\" TIMESTAMP,\n"));
    assert!(sql.contains("    \"Rank\" INTEGER,\n"));
    assert!(!sql.contains("ENGINE=InnoDB"));
}

#[test]
fn test_foreign_key_to_missing_table_is_dropped() {
    let schema = Schema::from_json_str(
        r#"{
            "tables": [{"uuid": "t1", "name": "Orphan", "columns": [
                {"uuid": "c1", "name": "ParentID", "type": "ty",
                 "relationship": [{"table_uuid": "gone", "column_uuid": "gone"}]}
            ]}],
            "column_types": [{"uuid": "ty", "name": "INT"}]
        }"#,
    )
    .unwrap();

    let sql = ddl::generate(&schema, SqlDialect::MySql, &DdlOptions::default());
    assert_eq!(
        sql,
        "CREATE TABLE `Orphan` (\n    `ParentID` INT\n) ENGINE=InnoDB;\n"
    );
}

#[test]
fn test_foreign_key_to_missing_column_is_dropped() {
    let schema = Schema::from_json_str(
        r#"{
            "tables": [
                {"uuid": "t-user", "name": "User", "columns": [
                    {"uuid": "c-id", "name": "UUID", "type": "ty"}
                ]},
                {"uuid": "t-post", "name": "Post", "columns": [
                    {"uuid": "c-a", "name": "A", "type": "ty",
                     "relationship": [{"table_uuid": "t-user", "column_uuid": "nope"}]}
                ]}
            ],
            "column_types": [{"uuid": "ty", "name": "VARCHAR(255)"}]
        }"#,
    )
    .unwrap();

    let sql = ddl::generate(&schema, SqlDialect::MySql, &DdlOptions::default());
    assert!(sql.contains("CREATE TABLE `Post` (\n    `A` VARCHAR(255)\n) ENGINE=InnoDB;\n"));
    assert!(!sql.contains("FOREIGN KEY"));
}

#[test]
fn test_junction_to_missing_column_references_uuid() {
    let schema = Schema::from_json_str(
        r#"{
            "tables": [
                {"uuid": "t-user", "name": "User", "columns": [
                    {"uuid": "c-id", "name": "UUID", "type": "ty"}
                ]},
                {"uuid": "t-post", "name": "Post", "columns": [
                    {"uuid": "c-readers", "name": "Readers", "type": "ty-arr",
                     "relationship": [{"table_uuid": "t-user", "column_uuid": "nope"}]}
                ]}
            ],
            "column_types": [
                {"uuid": "ty", "name": "VARCHAR(255)"},
                {"uuid": "ty-arr", "name": "Array(VARCHAR(255))"}
            ]
        }"#,
    )
    .unwrap();

    let plan = DdlPlan::build(&schema, SqlDialect::MySql, &DdlOptions::default());
    let junction = plan
        .junctions
        .iter()
        .find(|j| j.name == "Post_Readers")
        .unwrap();
    assert_eq!(
        junction.target,
        JunctionTarget::Reference {
            table: "User".to_string(),
            column: "UUID".to_string()
        }
    );

    let sql = plan.render();
    assert!(sql.contains("FOREIGN KEY (`Readers_ID`) REFERENCES `User`(`UUID`)"));
}

#[test]
fn test_generation_is_idempotent() {
    for seed in [1, 7, 42] {
        let doc = SchemaGenerator::new(seed, Scale::Medium)
            .with_cycles(true)
            .generate_string();
        let schema = Schema::from_json_str(&doc).unwrap();

        for dialect in SqlDialect::ALL {
            let first = ddl::generate(&schema, dialect, &DdlOptions::default());
            let second = ddl::generate(&schema, dialect, &DdlOptions::default());
            assert_eq!(first, second, "seed {} dialect {}", seed, dialect);
        }
    }
}

#[test]
fn test_every_table_emitted_exactly_once() {
    for seed in [3, 11, 99] {
        let doc = SchemaGenerator::new(seed, Scale::Medium)
            .with_cycles(true)
            .with_array_ratio(0.2)
            .generate_string();
        let schema = Schema::from_json_str(&doc).unwrap();
        let plan = DdlPlan::build(&schema, SqlDialect::MySql, &DdlOptions::default());

        let mut order = plan.order.clone();
        order.sort_unstable();
        assert_eq!(order, (0..plan.specs.len()).collect::<Vec<_>>());
        assert_eq!(plan.specs.len(), schema.len() + plan.junctions.len());
    }
}

#[test]
fn test_acyclic_references_precede_dependents() {
    let doc = SchemaGenerator::new(5, Scale::Medium)
        .with_relationship_ratio(0.5)
        .generate_string();
    let schema = Schema::from_json_str(&doc).unwrap();
    let plan = DdlPlan::build(&schema, SqlDialect::MySql, &DdlOptions::default());
    let names = plan.table_names();

    for spec in &plan.specs {
        for fk in &spec.foreign_keys {
            if fk.referenced_table == spec.name {
                continue;
            }
            assert!(
                position(&names, &fk.referenced_table) < position(&names, &spec.name),
                "{} emitted before {}",
                spec.name,
                fk.referenced_table
            );
        }
    }
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out.sql");
    std::fs::write(&path, "stale contents that are longer than the script").unwrap();

    let schema = Schema::from_json_str(r#"{"tables": [{"name": "T", "columns": []}]}"#).unwrap();
    ddl::write(&schema, SqlDialect::Postgres, &DdlOptions::default(), &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "CREATE TABLE \"T\" (\n\n);\n"
    );
}
