//! End-to-end tests for the schema-codegen binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn schema_codegen_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schema-codegen"))
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/blog.json")
}

fn run_with_stdin(args: &[&str], cwd: &Path, stdin: &str) -> Output {
    let mut child = schema_codegen_bin()
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn schema-codegen");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_generate_mysql_by_option() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();
    let output = schema_codegen_bin()
        .arg(&fixture)
        .arg("1")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains(&format!(
        "Successfully loaded schema from '{}'",
        fixture.display()
    )));
    assert!(out.contains("Generating MySQL...\n"));
    assert!(out.contains("MySQL generation complete.\n"));

    let sql = fs::read_to_string(dir.path().join("create_database_mysql.sql")).unwrap();
    assert!(sql.starts_with("CREATE TABLE `User` (\n"));
}

#[test]
fn test_piped_logs_are_plain_text() {
    let dir = TempDir::new().unwrap();
    let output = schema_codegen_bin()
        .arg(fixture())
        .arg("1")
        .arg("--verbose")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wrote DDL script"));
    assert!(!stderr.contains('\x1b'));
}

#[test]
fn test_output_dir_flag() {
    let dir = TempDir::new().unwrap();
    let output = schema_codegen_bin()
        .arg(fixture())
        .arg("10")
        .arg("--output-dir")
        .arg(dir.path().join("generated"))
        .output()
        .unwrap();

    assert!(output.status.success());
    for table in ["User", "Post", "Category"] {
        let path = dir
            .path()
            .join(format!("generated/mongodb_schemas/{}_schema.json", table));
        assert!(path.exists(), "missing {}", path.display());
    }
}

#[test]
fn test_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let output = schema_codegen_bin()
        .arg("does-not-exist.json")
        .arg("1")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: File 'does-not-exist.json' not found."));
}

#[test]
fn test_invalid_json_schema_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let output = schema_codegen_bin()
        .arg("broken.json")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: 'broken.json' is not a valid JSON file."));
}

#[test]
fn test_non_integer_option() {
    let dir = TempDir::new().unwrap();
    let output = schema_codegen_bin()
        .arg(fixture())
        .arg("mysql")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: Generator type must be an integer."));
    assert!(!dir.path().join("create_database_mysql.sql").exists());
}

#[test]
fn test_unknown_option_takes_no_action() {
    let dir = TempDir::new().unwrap();
    let output = schema_codegen_bin()
        .arg(fixture())
        .arg("42")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Invalid option: 42"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_negative_option_is_an_unknown_code() {
    let dir = TempDir::new().unwrap();
    let output = schema_codegen_bin()
        .arg(fixture())
        .arg("-1")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Invalid option: -1"));
}

#[test]
fn test_interactive_session() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();
    let output = run_with_stdin(
        &[fixture.to_str().unwrap()],
        dir.path(),
        "9\nabc\n99\nQ\n",
    );

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Options:\n"));
    assert!(out.contains("XML generation complete."));
    assert!(out.contains("Invalid input. Please enter a number or 'q' to quit."));
    assert!(out.contains("Invalid option: 99"));
    assert!(out.contains("Exiting the program. Goodbye!"));
    assert!(dir.path().join("xml_output/Post.xml").exists());
}

#[test]
fn test_interactive_end_of_input() {
    let dir = TempDir::new().unwrap();
    let fixture = fixture();
    let output = run_with_stdin(&[fixture.to_str().unwrap()], dir.path(), "");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Exiting the program. Goodbye!"));
}

#[test]
fn test_print_json_schema() {
    let output = schema_codegen_bin()
        .arg("--print-json-schema")
        .output()
        .unwrap();

    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(schema["properties"]["tables"].is_object());
}

#[test]
fn test_schema_argument_required() {
    let output = schema_codegen_bin().output().unwrap();
    assert!(!output.status.success());
}
