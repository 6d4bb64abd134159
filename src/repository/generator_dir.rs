use crate::constants::{generator_file_name, GENERATOR_FILE_PREFIX, GENERATOR_FILE_SUFFIX};
use crate::error::{Error, Result};
use crate::repository::{validate_base_dir, GeneratorSource};
use crate::spec::GeneratorSpec;
use globset::{Glob, GlobMatcher};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A generator source backed by a local directory.
///
/// Generator `name` is described by `<base_dir>/generator-<name>.yaml`; template
/// sources are resolved relative to `base_dir`.
#[derive(Debug, Clone)]
pub struct GeneratorDirectory {
    base_dir: PathBuf,
}

impl GeneratorDirectory {
    /// Creates a GeneratorDirectory instance.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `base_dir` ends with a path separator
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        validate_base_dir("generator", base_dir)?;
        Ok(Self { base_dir: base_dir.to_path_buf() })
    }

    fn spec_file_matcher() -> Result<GlobMatcher> {
        let glob = Glob::new(&format!("{GENERATOR_FILE_PREFIX}*{GENERATOR_FILE_SUFFIX}"))?;
        Ok(glob.compile_matcher())
    }
}

impl GeneratorSource for GeneratorDirectory {
    fn find_generator_names(&self) -> Result<Vec<String>> {
        let matcher = Self::spec_file_matcher()?;
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.base_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| Error::ListError {
                dir: self.base_dir.display().to_string(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if matcher.is_match(file_name) {
                let name = &file_name
                    [GENERATOR_FILE_PREFIX.len()..file_name.len() - GENERATOR_FILE_SUFFIX.len()];
                names.push(name.to_string());
            }
        }

        names.sort();
        debug!("Found generators {:?} in {}", names, self.base_dir.display());
        Ok(names)
    }

    fn obtain_generator_spec(&self, name: &str) -> Result<GeneratorSpec> {
        let file = generator_file_name(name);
        let path = self.base_dir.join(&file);
        debug!("Loading generator spec from {}", path.display());

        let contents = fs::read_to_string(&path)
            .map_err(|source| Error::SpecLoadError { file: file.clone(), source })?;
        serde_yaml::from_str(&contents).map_err(|source| Error::SpecParseError { file, source })
    }

    fn read_file(&self, relative_path: &str) -> Result<Vec<u8>> {
        fs::read(self.base_dir.join(relative_path)).map_err(|source| Error::FileReadError {
            path: relative_path.to_string(),
            source,
        })
    }
}
