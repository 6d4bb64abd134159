//! Error handling for scaffolder.
//! Defines the crate-wide error type and the result alias used throughout the library.

use std::io;
use thiserror::Error;

/// Errors raised while listing, loading, resolving or rendering generators.
///
/// Variants fall into two groups. Anything not tied to a single output file
/// (configuration, spec loading, parameter resolution) aborts the whole call and
/// ends up as the only top-level error of a [`crate::api::Response`]. Template,
/// path, condition and write failures are scoped to one output file and are
/// collected into that file's [`crate::api::FileResult`].
#[derive(Error, Debug)]
pub enum Error {
    /// A base directory path was rejected before any I/O was attempted.
    #[error("invalid {kind} directory: baseDir {dir} must not contain trailing slash")]
    ConfigError { kind: &'static str, dir: String },

    #[error("error reading generator spec file {file}: {source}")]
    SpecLoadError {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("error parsing generator spec from file {file}: {source}")]
    SpecParseError {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("error listing generators in {dir}: {source}")]
    ListError {
        dir: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid glob pattern: {0}")]
    GlobError(#[from] globset::Error),

    /// A template source file could not be read from the generator directory.
    #[error("failed to load template {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("error reading render spec file {file}: {source}")]
    ReadError {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("error parsing render spec from file {file}: {source}")]
    RenderSpecParseError {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("error parsing values file {file}: {source}")]
    ValuesParseError {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("error parsing JSON values file {file}: {source}")]
    JsonValuesParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error writing file {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("error serializing to YAML: {0}")]
    SerializeError(#[source] serde_yaml::Error),

    #[error("parameter '{0}' is required but missing")]
    MissingParameterError(String),

    #[error("value for parameter '{name}' does not match pattern {pattern}")]
    PatternMismatchError { name: String, pattern: String },

    #[error("parameter '{0}' is not allowed according to generator spec")]
    UnknownParameterError(String),

    /// The generator spec declares a string default that is not a valid template.
    #[error("variable declaration {name} has invalid default (this is an error in the generator spec): {source}")]
    InvalidDefaultError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The generator spec declares a validation pattern that is not a valid regex.
    #[error("variable declaration {name} has invalid pattern (this is an error in the generator spec, not the render request): {source}")]
    InvalidPatternError {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse template {path}: {reason}")]
    TemplateParseError { path: String, reason: String },

    #[error("error evaluating template for target '{target}'{item}: {source}")]
    TemplateExecutionError {
        target: String,
        item: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("error evaluating target path from '{path}'{item}: {source}")]
    PathRenderError {
        path: String,
        item: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("error evaluating condition from '{condition}'{item}: {source}")]
    ConditionError {
        condition: String,
        item: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Convenience type alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
