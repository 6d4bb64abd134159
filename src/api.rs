//! Caller-facing contract: requests, responses and the [`Api`] trait.

use crate::error::{Error, Result};
use crate::spec::{GeneratorSpec, Parameters};
use std::fmt;
use std::path::{Path, PathBuf};

/// The operations offered to callers.
pub trait Api {
    /// Lists the generators available in `source_base_dir`.
    fn find_generator_names(&self, source_base_dir: &Path) -> Result<Vec<String>>;

    /// Loads the spec of one generator. Pure: unchanged files yield equal specs.
    fn obtain_generator_spec(
        &self,
        source_base_dir: &Path,
        generator_name: &str,
    ) -> Result<GeneratorSpec>;

    /// Writes a render spec holding every variable's default, without validation.
    fn write_render_spec_with_defaults(&self, request: &Request, generator_name: &str) -> Response;

    /// Validates `parameters` against the generator and writes them as a render spec.
    fn write_render_spec_with_values(
        &self,
        request: &Request,
        generator_name: &str,
        parameters: &Parameters,
    ) -> Response;

    /// Renders the generator named by the stored render spec into the target directory.
    fn render(&self, request: &Request) -> Response;
}

/// Where to read generators from and where to render them to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub source_base_dir: PathBuf,
    pub target_base_dir: PathBuf,
    /// Overrides the render spec file name inside the target directory
    pub render_spec_file: Option<String>,
}

impl Request {
    pub fn new<S: Into<PathBuf>, T: Into<PathBuf>>(source_base_dir: S, target_base_dir: T) -> Self {
        Self {
            source_base_dir: source_base_dir.into(),
            target_base_dir: target_base_dir.into(),
            render_spec_file: None,
        }
    }

    pub fn with_render_spec_file<S: Into<String>>(mut self, file: S) -> Self {
        self.render_spec_file = Some(file.into());
        self
    }
}

/// Outcome for one output file, or one `with_items` iteration.
#[derive(Debug)]
pub struct FileResult {
    pub success: bool,
    /// Rendered output path, or the unrendered target path if rendering the path failed
    pub relative_file_path: String,
    pub errors: Vec<Error>,
}

impl FileResult {
    pub fn success<S: Into<String>>(relative_file_path: S) -> Self {
        Self { success: true, relative_file_path: relative_file_path.into(), errors: Vec::new() }
    }

    pub fn failure<S: Into<String>>(relative_file_path: S, err: Error) -> Self {
        Self { success: false, relative_file_path: relative_file_path.into(), errors: vec![err] }
    }
}

impl fmt::Display for FileResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "ok: '{}'", self.relative_file_path)
        } else {
            write!(f, "failed: '{}'", self.relative_file_path)?;
            for err in &self.errors {
                write!(f, "\n  {err}")?;
            }
            Ok(())
        }
    }
}

/// Aggregate result of one call.
///
/// `success` is true iff every file result succeeded and no top-level error occurred.
/// `errors` only holds failures that happened before any file was processed.
#[derive(Debug, Default)]
pub struct Response {
    pub success: bool,
    pub rendered_files: Vec<FileResult>,
    pub errors: Vec<Error>,
}

impl Response {
    pub fn from_files(rendered_files: Vec<FileResult>) -> Self {
        let success = rendered_files.iter().all(|file| file.success);
        Self { success, rendered_files, errors: Vec::new() }
    }

    pub fn toplevel_error(err: Error) -> Self {
        Self { success: false, rendered_files: Vec::new(), errors: vec![err] }
    }
}

impl From<Result<Vec<FileResult>>> for Response {
    fn from(result: Result<Vec<FileResult>>) -> Self {
        match result {
            Ok(files) => Response::from_files(files),
            Err(err) => Response::toplevel_error(err),
        }
    }
}
