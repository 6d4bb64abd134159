use crate::constants::DEFAULT_RENDER_SPEC_FILE;
use crate::error::{Error, Result};
use crate::repository::{validate_base_dir, TargetStorage};
use crate::spec::RenderSpec;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// A render target backed by a local directory.
#[derive(Debug, Clone)]
pub struct TargetDirectory {
    base_dir: PathBuf,
}

impl TargetDirectory {
    /// Creates a TargetDirectory instance.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `base_dir` ends with a path separator
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        validate_base_dir("target", base_dir)?;
        Ok(Self { base_dir: base_dir.to_path_buf() })
    }

    fn write(&self, relative_path: &str, contents: &[u8]) -> Result<()> {
        let path = self.base_dir.join(relative_path);
        let write_error = |source| Error::WriteError { path: relative_path.to_string(), source };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&path, contents).map_err(write_error)
    }
}

fn render_spec_file(file_override: Option<&str>) -> &str {
    match file_override {
        Some(file) if !file.is_empty() => file,
        _ => DEFAULT_RENDER_SPEC_FILE,
    }
}

impl TargetStorage for TargetDirectory {
    fn write_render_spec(&self, spec: &RenderSpec, file_override: Option<&str>) -> Result<String> {
        let file = render_spec_file(file_override);
        let contents = serde_yaml::to_string(spec).map_err(Error::SerializeError)?;

        debug!("Writing render spec to {}", self.base_dir.join(file).display());
        self.write(file, contents.as_bytes())?;
        Ok(file.to_string())
    }

    fn obtain_render_spec(&self, file_override: Option<&str>) -> Result<RenderSpec> {
        let file = render_spec_file(file_override);
        let path = self.base_dir.join(file);
        debug!("Loading render spec from {}", path.display());

        let contents = fs::read_to_string(&path)
            .map_err(|source| Error::ReadError { file: file.to_string(), source })?;
        serde_yaml::from_str(&contents)
            .map_err(|source| Error::RenderSpecParseError { file: file.to_string(), source })
    }

    fn write_file(&self, relative_path: &str, contents: &[u8]) -> Result<()> {
        debug!("Writing file: {}", self.base_dir.join(relative_path).display());
        self.write(relative_path, contents)
    }
}
