//! CLI for generating schema fixtures.
//!
//! Usage:
//!   gen-schema --scale small --seed 42 > fixtures/small.json
//!   gen-schema --scale large --cycles --output large.json

use anyhow::Context;
use clap::Parser;
use std::fs;
use test_data_gen::{Scale, SchemaGenerator};

#[derive(Parser, Debug)]
#[command(name = "gen-schema")]
#[command(about = "Generate schema documents for schema-codegen", long_about = None)]
struct Args {
    /// Scale preset: small, medium, large
    #[arg(short, long, default_value = "small")]
    scale: String,

    /// Random seed for reproducibility
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Allow relationships to later tables, producing cycles
    #[arg(long)]
    cycles: bool,

    /// Share of columns that are array-typed (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    array_ratio: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let scale: Scale = args.scale.parse().map_err(anyhow::Error::msg)?;

    let doc = SchemaGenerator::new(args.seed, scale)
        .with_cycles(args.cycles)
        .with_array_ratio(args.array_ratio)
        .generate_string();

    match args.output {
        Some(path) => fs::write(&path, doc).with_context(|| format!("Failed to write {}", path))?,
        None => println!("{}", doc),
    }
    Ok(())
}
