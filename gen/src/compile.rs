//! Running a toolchain's compiler as a subprocess.

use crate::config::BuildTarget;
use crate::error::{GenError, Result};
use crate::toolchain::Toolchain;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub toolchain: Toolchain,
    pub artifact: PathBuf,
    pub size_bytes: u64,
    pub elapsed: Duration,
    /// Combined stdout and stderr of the compiler.
    pub output: String,
}

fn combine(stdout: &[u8], stderr: &[u8]) -> String {
    let mut out = String::from_utf8_lossy(stdout).into_owned();
    out.push_str(&String::from_utf8_lossy(stderr));
    out.trim_end().to_string()
}

/// Compile the module for `target`.
///
/// The compiler runs from inside the source directory with the platform
/// environment set; arguments are passed as a vector, never through a shell.
pub fn compile(target: &BuildTarget) -> Result<CompileReport> {
    let toolchain = target.toolchain;

    // The compiler runs in the source dir, so hand it an absolute output path.
    let output_dir = fs::canonicalize(&target.output_dir).map_err(|source| GenError::OutputDir {
        path: target.output_dir.clone(),
        source,
    })?;
    let artifact = output_dir.join(&target.output_filename);
    let args = toolchain.build_args(&artifact);

    info!("Compiling with {}...", toolchain);
    debug!(
        "Running {} {:?} in {} with {:?}",
        target.compiler.display(),
        args,
        target.source_dir.display(),
        target.platform_env
    );

    let started = Instant::now();
    let output = Command::new(&target.compiler)
        .args(&args)
        .envs(target.platform_env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .current_dir(&target.source_dir)
        .output()
        .map_err(|e| GenError::Compile {
            toolchain,
            status: "failed to start".to_string(),
            output: format!("{}: {}", target.compiler.display(), e),
        })?;
    let elapsed = started.elapsed();

    let combined = combine(&output.stdout, &output.stderr);
    if !output.status.success() {
        return Err(GenError::Compile {
            toolchain,
            status: output.status.to_string(),
            output: combined,
        });
    }

    let size_bytes = fs::metadata(&artifact)
        .map_err(|_| GenError::MissingArtifact {
            toolchain,
            path: artifact.clone(),
        })?
        .len();

    if !combined.is_empty() {
        debug!("{} output:\n{}", toolchain, combined);
    }
    info!("✓ Compiled {}", target.artifact_path().display());

    Ok(CompileReport {
        toolchain,
        artifact,
        size_bytes,
        elapsed,
        output: combined,
    })
}
