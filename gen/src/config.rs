//! Build configuration: one [`BuildTarget`] per toolchain.

use crate::error::{GenError, Result};
use crate::toolchain::{GLUE_FILE_NAME, PLATFORM_ENV, Toolchain};
use std::path::{Path, PathBuf};

/// Everything needed to compile the module with one toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub toolchain: Toolchain,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_filename: String,
    pub platform_env: Vec<(String, String)>,
    /// Compiler executable, a path or a name resolved on `PATH`.
    pub compiler: PathBuf,
    /// Installation root; asked from the compiler when unset.
    pub root: Option<PathBuf>,
}

impl BuildTarget {
    pub fn new(
        toolchain: Toolchain,
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        output_filename: impl Into<String>,
    ) -> Self {
        Self {
            toolchain,
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            output_filename: output_filename.into(),
            platform_env: PLATFORM_ENV
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            compiler: PathBuf::from(toolchain.default_compiler()),
            root: None,
        }
    }

    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    /// Where the compiled module lands.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }

    /// Where the glue script is staged.
    pub fn glue_path(&self) -> PathBuf {
        self.output_dir.join(GLUE_FILE_NAME)
    }
}

/// The full run: one source tree, a primary and an alternate target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub source_dir: PathBuf,
    /// Targets in build order, primary first.
    pub targets: Vec<BuildTarget>,
}

impl BuildConfig {
    /// Go as primary, TinyGo as alternate, with default compilers.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        go_output: impl Into<PathBuf>,
        tinygo_output: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        let source_dir = source_dir.into();
        let filename = filename.into();
        Self {
            targets: vec![
                BuildTarget::new(Toolchain::Go, &source_dir, go_output, filename.clone()),
                BuildTarget::new(Toolchain::TinyGo, &source_dir, tinygo_output, filename),
            ],
            source_dir,
        }
    }

    pub fn target(&self, toolchain: Toolchain) -> Option<&BuildTarget> {
        self.targets.iter().find(|t| t.toolchain == toolchain)
    }

    pub fn target_mut(&mut self, toolchain: Toolchain) -> Option<&mut BuildTarget> {
        self.targets.iter_mut().find(|t| t.toolchain == toolchain)
    }

    /// Check the configuration without touching the filesystem beyond reads.
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(GenError::Configuration(format!(
                "Source directory does not exist: {}",
                self.source_dir.display()
            )));
        }

        for target in &self.targets {
            let name = Path::new(&target.output_filename);
            if target.output_filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
                return Err(GenError::Configuration(format!(
                    "Output filename must be a plain file name: {:?}",
                    target.output_filename
                )));
            }
            if target.output_filename == GLUE_FILE_NAME {
                return Err(GenError::Configuration(format!(
                    "Output filename collides with {}",
                    GLUE_FILE_NAME
                )));
            }
        }

        for (i, a) in self.targets.iter().enumerate() {
            if self.targets[i + 1..]
                .iter()
                .any(|b| b.output_dir == a.output_dir)
            {
                return Err(GenError::Configuration(format!(
                    "{} and another toolchain share output directory {}",
                    a.toolchain,
                    a.output_dir.display()
                )));
            }
        }

        Ok(())
    }
}
