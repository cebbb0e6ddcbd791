//! Menu-driven generator selection.

use super::run_generator;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use schema_codegen::config::GeneratorConfig;
use schema_codegen::generators::help_text;
use schema_codegen::schema::Schema;

const PROMPT: &str = "Enter an option number (or 'q' to quit): ";
const GOODBYE: &str = "Exiting the program. Goodbye!";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Option(i64),
    Invalid,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Input::Quit;
    }
    match line.parse::<i64>() {
        Ok(code) => Input::Option(code),
        Err(_) => Input::Invalid,
    }
}

/// Show the menu and run generators until the user quits.
///
/// A failing generator is reported and the menu is shown again.
pub fn run(schema: &Schema, config: &GeneratorConfig) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let help = help_text();

    loop {
        println!("\n{}", help);

        match rl.readline(PROMPT) {
            Ok(line) => match parse_input(&line) {
                Input::Quit => {
                    println!("{}", GOODBYE);
                    break;
                }
                Input::Option(code) => {
                    let _ = rl.add_history_entry(line.trim());
                    if let Err(e) = run_generator(code, schema, config) {
                        println!("Error: {e:#}");
                    }
                }
                Input::Invalid => {
                    println!("Invalid input. Please enter a number or 'q' to quit.");
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", GOODBYE);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
