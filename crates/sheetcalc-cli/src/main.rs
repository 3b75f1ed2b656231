//! Sheetcalc CLI - spreadsheet formula evaluator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetcalc::coercion::first_scalar;
use sheetcalc::prelude::*;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "sheetcalc")]
#[command(author, version, about = "Evaluate spreadsheet formulas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate formulas and print their results
    #[command(alias = "calc")]
    Eval {
        /// Formulas to evaluate, e.g. '=1+1' or '="A"&1'
        #[arg(required = true)]
        formulas: Vec<String>,

        /// Print results as {"type": ..., "value": ...} JSON
        #[arg(short, long)]
        json: bool,

        /// Show only the first element of list results
        #[arg(short, long)]
        coherent: bool,
    },

    /// Print the token stream of a formula
    Tokens {
        /// Formula to tokenize
        formula: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            formulas,
            json,
            coherent,
        } => eval(&formulas, json, coherent),
        Commands::Tokens { formula } => print_tokens(&formula),
    }
}

fn eval(formulas: &[String], json: bool, coherent: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for formula in formulas {
        let mut value = sheetcalc::calculate(formula)
            .with_context(|| format!("Failed to evaluate '{}'", formula))?;

        if coherent {
            value = display_value(&value);
        }

        if json {
            let tagged = TaggedValue::from(value);
            let text = serde_json::to_string(&tagged).context("Failed to serialize result")?;
            writeln!(out, "{}", text).context("Failed to write to stdout")?;
        } else {
            writeln!(out, "{}", value).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Collapse a list result to the single value a cell would show
fn display_value(value: &Value) -> Value {
    match first_scalar(value) {
        Ok(scalar) => scalar.clone(),
        Err(e) => Value::Error(e),
    }
}

fn print_tokens(formula: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for token in sheetcalc::tokenize(formula) {
        let token = token.with_context(|| format!("Failed to tokenize '{}'", formula))?;
        writeln!(out, "{}\t{:?}\t{}", token.position, token.text, token.kind)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_collapses_lists() {
        let list = Value::list([Value::string("a"), Value::Number(1.0)]);
        assert_eq!(display_value(&list), Value::string("a"));
        assert_eq!(
            display_value(&Value::list([Value::list([Value::Boolean(true)])])),
            Value::Boolean(true)
        );
        assert_eq!(display_value(&Value::Number(2.0)), Value::Number(2.0));
    }

    #[test]
    fn test_display_value_empty_list() {
        assert_eq!(
            display_value(&Value::List(Vec::new())),
            Value::Error(ErrorKind::Value)
        );
    }
}
