//! Storage collaborators of the render pipeline.
//!
//! - `generator_dir`: reads generator specs and template sources
//! - `target_dir`: persists render specs and writes rendered output

pub mod generator_dir;
pub mod target_dir;

pub use generator_dir::GeneratorDirectory;
pub use target_dir::TargetDirectory;

use crate::error::{Error, Result};
use crate::spec::{GeneratorSpec, RenderSpec};
use std::path::Path;

/// Read access to a directory of generators.
pub trait GeneratorSource {
    /// Names of all generators available in the source, sorted.
    fn find_generator_names(&self) -> Result<Vec<String>>;

    /// Loads and parses the spec of generator `name`.
    ///
    /// # Errors
    /// * `Error::SpecLoadError` if the spec file cannot be read
    /// * `Error::SpecParseError` on unknown fields or duplicate keys
    fn obtain_generator_spec(&self, name: &str) -> Result<GeneratorSpec>;

    /// Reads a template source file relative to the source root.
    fn read_file(&self, relative_path: &str) -> Result<Vec<u8>>;
}

/// Write access to the directory a generator renders into.
pub trait TargetStorage {
    /// Persists `spec` and returns the file name it was written to.
    fn write_render_spec(&self, spec: &RenderSpec, file_override: Option<&str>) -> Result<String>;

    fn obtain_render_spec(&self, file_override: Option<&str>) -> Result<RenderSpec>;

    /// Writes `contents` relative to the target root, creating parent directories.
    fn write_file(&self, relative_path: &str, contents: &[u8]) -> Result<()>;
}

/// Rejects base directories that end in a path separator.
pub(crate) fn validate_base_dir(kind: &'static str, dir: &Path) -> Result<()> {
    let raw = dir.to_string_lossy();
    if raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(Error::ConfigError { kind, dir: raw.into_owned() });
    }
    Ok(())
}
