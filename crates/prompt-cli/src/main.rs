mod output;

use clap::{Parser, Subcommand};
use prompt_engine::{AnswerStore, FormDefinition, PromptEngine};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use output::{DeriveOutput, encode_hex};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Prompt derivation inspector",
    long_about = "Loads a declarative prompt definition, runs the derivation engine and prints the resulting prompts and answers as JSON"
)]
struct Cli {
    /// Log derivation details to stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive prompt state from a definition and optional answers.
    Derive {
        /// Path to the prompt definition JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file holding the initial answer tree.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Explicit answer as ID=VALUE; VALUE is parsed as JSON, else kept as a string.
        #[arg(long = "set", value_name = "ID=VALUE")]
        set: Vec<String>,
        /// Also print the answers as CBOR hex.
        #[arg(long)]
        cbor: bool,
    },
    /// Print the JSON Schema of the prompt definition format.
    Schema,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Derive {
            spec,
            answers,
            set,
            cbor,
        } => run_derive(spec, answers, set, cbor),
        Command::Schema => run_schema(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded; keep going without ours.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_derive(
    spec_path: PathBuf,
    answers_path: Option<PathBuf>,
    assignments: Vec<String>,
    cbor: bool,
) -> CliResult<()> {
    let definition = FormDefinition::from_path(&spec_path)?;
    info!(form = %definition.id, prompts = definition.prompts.len(), "loaded definition");
    let mut engine = definition.into_engine()?;

    match answers_path {
        Some(path) => {
            let answers: AnswerStore = serde_json::from_str(&fs::read_to_string(&path)?)?;
            engine.set_answers(answers)?;
        }
        None => engine.start()?,
    }

    for assignment in &assignments {
        let (id, value) = parse_assignment(assignment)?;
        debug!(prompt = id, "applying explicit value");
        engine.set_value(id, value)?;
    }

    print_engine(&engine, cbor)
}

fn print_engine(engine: &PromptEngine, cbor: bool) -> CliResult<()> {
    let output = DeriveOutput {
        prompts: engine.prompts(),
        answers: engine.answers(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    if cbor {
        println!("{}", encode_hex(&engine.answers().to_cbor()?));
    }
    Ok(())
}

fn run_schema() -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&FormDefinition::json_schema())?
    );
    Ok(())
}

fn parse_assignment(raw: &str) -> CliResult<(&str, Value)> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", raw))?;
    if id.is_empty() {
        return Err(format!("missing prompt id in '{}'", raw).into());
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((id, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assignment_values_parse_as_json_or_string() {
        let (id, value) = parse_assignment("features.router=true").expect("parse");
        assert_eq!(id, "features.router");
        assert_eq!(value, json!(true));

        let (_, value) = parse_assignment("name=my app").expect("parse");
        assert_eq!(value, json!("my app"));

        let (_, value) = parse_assignment("list=[\"a\",\"b\"]").expect("parse");
        assert_eq!(value, json!(["a", "b"]));
    }

    #[test]
    fn assignment_requires_separator_and_id() {
        assert!(parse_assignment("no-separator").is_err());
        assert!(parse_assignment("=1").is_err());
    }
}
