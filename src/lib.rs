//! Scaffolder renders code generators into target directories.
//! A generator is a YAML spec of template units and variables living in a source
//! directory. Parameters are resolved against the declared variables, persisted as a
//! render spec, and replayed to produce the output files.

/// Caller-facing requests, responses and the `Api` trait
pub mod api;

/// Command-line interface for the scaffolder binary
pub mod cli;

/// Fixed file names, reserved keys and skip values
pub mod constants;

/// Error types and handling for scaffolder
pub mod error;

/// Render orchestration over generator and target directories
pub mod generator;

/// Logging decorator applied at the call boundary
pub mod logging;

/// Resolution and validation of parameters against declared variables
pub mod parameters;

/// MiniJinja-based rendering of templates, paths, conditions and defaults
pub mod renderer;

/// Generator and target directory access
pub mod repository;

/// Generator spec and render spec data model
pub mod spec;

use api::{Api, Request, Response};
use error::Result;
use generator::Generator;
use logging::LoggingApi;
use spec::{GeneratorSpec, Parameters};
use std::path::Path;

/// Returns the default configured API: the render pipeline wrapped in call logging.
pub fn new_generator() -> LoggingApi<Generator> {
    LoggingApi::new(Generator::new())
}

pub fn find_generator_names<P: AsRef<Path>>(source_base_dir: P) -> Result<Vec<String>> {
    new_generator().find_generator_names(source_base_dir.as_ref())
}

pub fn obtain_generator_spec<P: AsRef<Path>>(
    source_base_dir: P,
    generator_name: &str,
) -> Result<GeneratorSpec> {
    new_generator().obtain_generator_spec(source_base_dir.as_ref(), generator_name)
}

pub fn write_render_spec_with_defaults(request: &Request, generator_name: &str) -> Response {
    new_generator().write_render_spec_with_defaults(request, generator_name)
}

pub fn write_render_spec_with_values(
    request: &Request,
    generator_name: &str,
    parameters: &Parameters,
) -> Response {
    new_generator().write_render_spec_with_values(request, generator_name, parameters)
}

pub fn render(request: &Request) -> Response {
    new_generator().render(request)
}
