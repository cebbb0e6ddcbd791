mod interactive;

use anyhow::Context;
use clap::Parser;
use schema_codegen::config::GeneratorConfig;
use schema_codegen::generators::Generator;
use schema_codegen::json_schema::input_schema_json;
use schema_codegen::schema::Schema;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "schema-codegen")]
#[command(version)]
#[command(
    about = "Generate SQL DDL, data skeletons and models from a JSON schema document",
    long_about = None
)]
pub struct Cli {
    /// Schema document (JSON)
    #[arg(required_unless_present = "print_json_schema")]
    pub schema: Option<PathBuf>,

    /// Generator option number (1-10); omit to choose from a menu
    #[arg(allow_negative_numbers = true)]
    pub option: Option<String>,

    /// Directory outputs are written under (overrides the config file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// YAML file with output names and DDL settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the JSON Schema of the input document and exit
    #[arg(long)]
    pub print_json_schema: bool,
}

/// Run the CLI and return the process exit status
pub fn run(cli: Cli) -> anyhow::Result<i32> {
    if cli.print_json_schema {
        println!("{}", input_schema_json());
        return Ok(0);
    }

    let path = cli.schema.context("a schema file is required")?;
    let schema = match Schema::from_path(&path) {
        Ok(schema) => schema,
        Err(e) => {
            println!("{e}");
            return Ok(1);
        }
    };
    println!("Successfully loaded schema from '{}'", path.display());
    debug!(tables = schema.len(), "schema loaded");

    let config = load_config(cli.config.as_deref(), cli.output_dir)?;

    match cli.option {
        Some(option) => match option.trim().parse::<i64>() {
            Ok(code) => {
                run_generator(code, &schema, &config)?;
                Ok(0)
            }
            Err(_) => {
                println!("Error: Generator type must be an integer.");
                Ok(1)
            }
        },
        None => {
            interactive::run(&schema, &config)?;
            Ok(0)
        }
    }
}

fn load_config(path: Option<&Path>, output_dir: Option<PathBuf>) -> anyhow::Result<GeneratorConfig> {
    let config = match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    Ok(match output_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    })
}

/// Run the generator for an option code, printing progress messages.
/// Unknown codes are reported and nothing is generated.
pub(crate) fn run_generator(
    code: i64,
    schema: &Schema,
    config: &GeneratorConfig,
) -> anyhow::Result<()> {
    let Some(generator) = Generator::from_code(code) else {
        println!("Invalid option: {code}");
        return Ok(());
    };

    println!("Generating {}...", generator.name());
    let report = generator
        .run(schema, config)
        .with_context(|| format!("{} generation failed", generator.name()))?;
    for file in &report.files {
        debug!(path = %file.display(), "written");
    }
    println!("{} generation complete.", generator.name());
    Ok(())
}
