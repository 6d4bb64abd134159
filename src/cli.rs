//! Command-line interface implementation for scaffolder.
//! Provides argument parsing and help text formatting using clap.

use crate::api::Request;
use crate::error::{Error, Result};
use crate::spec::{Parameters, Value};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

/// Command-line arguments structure for scaffolder.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scaffolder: render code generators from templates",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the generators available in a source directory
    List {
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,
    },

    /// Print the spec of one generator
    Show {
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,
        #[arg(value_name = "GENERATOR")]
        name: String,
    },

    /// Write a render spec holding the default of every variable
    Defaults {
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,
        #[arg(value_name = "TARGET_DIR")]
        target_dir: PathBuf,
        #[arg(value_name = "GENERATOR")]
        name: String,
        /// Render spec file name inside the target directory
        #[arg(long, value_name = "FILE")]
        render_spec: Option<String>,
    },

    /// Validate parameter values and write them as a render spec
    Values {
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,
        #[arg(value_name = "TARGET_DIR")]
        target_dir: PathBuf,
        #[arg(value_name = "GENERATOR")]
        name: String,
        /// String parameter, may be repeated. Overrides entries from --values.
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// YAML or JSON file with a map of (possibly structured) parameter values
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,
        /// Render spec file name inside the target directory
        #[arg(long, value_name = "FILE")]
        render_spec: Option<String>,
    },

    /// Render the generator named by the render spec in the target directory
    Render {
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,
        #[arg(value_name = "TARGET_DIR")]
        target_dir: PathBuf,
        /// Render spec file name inside the target directory
        #[arg(long, value_name = "FILE")]
        render_spec: Option<String>,
    },
}

fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Builds a request from the directory arguments of a subcommand.
pub fn build_request(
    source_dir: PathBuf,
    target_dir: PathBuf,
    render_spec: Option<String>,
) -> Request {
    Request {
        source_base_dir: source_dir,
        target_base_dir: target_dir,
        render_spec_file: render_spec,
    }
}

/// Collects parameters from an optional values file, then applies `KEY=VALUE` pairs on top.
///
/// # Errors
/// * `Error::ReadError` if the values file cannot be read
/// * `Error::JsonValuesParseError` if a `.json` file is not a map of values
/// * `Error::ValuesParseError` if any other file is not a YAML map of values
pub fn load_parameters(
    values: Option<&PathBuf>,
    params: &[(String, String)],
) -> Result<Parameters> {
    let mut parameters = match values {
        Some(path) => {
            let file = path.display().to_string();
            let contents = fs::read_to_string(path)
                .map_err(|source| Error::ReadError { file: file.clone(), source })?;
            if path.extension().is_some_and(|ext| ext == "json") {
                serde_json::from_str::<Parameters>(&contents)
                    .map_err(|source| Error::JsonValuesParseError { file, source })?
            } else {
                serde_yaml::from_str::<Parameters>(&contents)
                    .map_err(|source| Error::ValuesParseError { file, source })?
            }
        }
        None => Parameters::new(),
    };

    for (key, value) in params {
        parameters.insert(key.clone(), Value::from(value.as_str()));
    }
    Ok(parameters)
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 after printing help if the subcommand or its arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
