//! Tagschema CLI
//!
//! Compiles description documents and checks JSON documents against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tagschema::{CompileError, Schema, Tag};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagschema")]
#[command(about = "Check JSON documents against tag-based schemas")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check documents against a schema description
    Check {
        /// Description document the schema is compiled from
        #[arg(long)]
        schema: PathBuf,

        /// Documents to check
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// Output results as JSON, one line per document
        #[arg(long)]
        json: bool,
    },

    /// Check that a description document compiles
    Compile {
        /// Description document
        description: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            schema,
            documents,
            json,
        } => run_check(&schema, &documents, json),
        Commands::Compile { description, json } => run_compile(&description, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(description: &Path, documents: &[PathBuf], json_output: bool) -> Result<(), u8> {
    let schema = load_schema(description, json_output)?;

    let mut loaded = Vec::with_capacity(documents.len());
    for path in documents {
        loaded.push(load_json(path).map_err(|msg| {
            report_error(json_output, &msg);
            2
        })?);
    }

    let results = schema.check_all(&loaded);
    let mut all_valid = true;
    for (path, result) in documents.iter().zip(&results) {
        all_valid &= result.is_valid();
        if json_output {
            let mut report = result.to_json();
            report["document"] = json!(path.display().to_string());
            println!("{}", report);
        } else if result.is_valid() {
            println!("{}: valid", path.display());
        } else {
            println!("{}: invalid", path.display());
            print!("{}", result);
        }
    }

    if all_valid {
        Ok(())
    } else {
        Err(1)
    }
}

fn run_compile(description: &Path, json_output: bool) -> Result<(), u8> {
    let schema = load_schema(description, json_output)?;

    let root_keys = match schema.root().as_ref() {
        Tag::Object(object) => object.fields().count(),
        _ => 0,
    };
    let groups = schema.groups().names();
    if json_output {
        println!(
            "{}",
            json!({"valid": true, "root_keys": root_keys, "groups": groups})
        );
    } else {
        println!(
            "{}: compiles ({} root keys, {} groups)",
            description.display(),
            root_keys,
            groups.len()
        );
    }
    Ok(())
}

/// Loads and compiles a description; a description that fails the
/// meta-schema or describes an inconsistent schema exits with 1.
fn load_schema(path: &Path, json_output: bool) -> Result<Schema, u8> {
    let document = load_json(path).map_err(|msg| {
        report_error(json_output, &msg);
        2
    })?;

    Schema::from_document(&document).map_err(|error| {
        match &error {
            CompileError::Invalid(result) if json_output => {
                let mut report = result.to_json();
                report["description"] = json!(path.display().to_string());
                println!("{}", report);
            }
            CompileError::Invalid(result) => {
                eprintln!("Error: {} is not a valid description", path.display());
                eprint!("{}", result);
            }
            CompileError::Build(build) => {
                report_error(json_output, &format!("{}: {}", path.display(), build));
            }
        }
        1
    })
}

fn load_json(path: &Path) -> Result<Value, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("parsing {}: {}", path.display(), e))
}

fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", json!({"valid": false, "error": msg}));
    } else {
        eprintln!("Error: {}", msg);
    }
}
