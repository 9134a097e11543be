//! The end-to-end build: validate, prepare, stage glue, compile, report.

use crate::compile::{CompileReport, compile};
use crate::config::BuildConfig;
use crate::error::{GenError, Result};
use crate::glue::stage_for;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Staged glue scripts, in target order.
    pub glue: Vec<PathBuf>,
    /// One report per target, in build order.
    pub reports: Vec<CompileReport>,
}

/// Format a byte count the way `du -h` does.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["K", "M", "G", "T"];
    if bytes < 1024 {
        return format!("{}B", bytes);
    }
    let mut size = bytes as f64;
    let mut unit = "B";
    for next in UNITS {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{:.1}{}", size, unit)
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(
                f,
                "{:<7} {:>7}  {:>6.2}s  {}",
                report.toolchain.name(),
                human_size(report.size_bytes),
                report.elapsed.as_secs_f64(),
                report.artifact.display()
            )?;
        }
        write!(f, "✅ All WASM files generated successfully!")
    }
}

/// Runs a [`BuildConfig`] start to finish, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: BuildConfig,
}

impl Orchestrator {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Create every output directory. Existing directories are left alone.
    pub fn prepare_outputs(&self) -> Result<()> {
        for target in &self.config.targets {
            fs::create_dir_all(&target.output_dir).map_err(|source| GenError::OutputDir {
                path: target.output_dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Stage every target's glue script. No compiler runs until all are in place.
    pub fn stage_glue(&self) -> Result<Vec<PathBuf>> {
        info!("Copying wasm_exec.js files...");
        self.config.targets.iter().map(stage_for).collect()
    }

    /// Compile every target in order, stopping at the first failure.
    pub fn compile_all(&self) -> Result<Vec<CompileReport>> {
        self.config.targets.iter().map(compile).collect()
    }

    pub fn run(&self) -> Result<BuildSummary> {
        self.config.validate()?;
        self.prepare_outputs()?;
        let glue = self.stage_glue()?;
        let reports = self.compile_all()?;

        for target in &self.config.targets {
            let artifact = target.artifact_path();
            if !artifact.is_file() {
                return Err(GenError::MissingArtifact {
                    toolchain: target.toolchain,
                    path: artifact,
                });
            }
        }

        Ok(BuildSummary { glue, reports })
    }
}
