//! Staging of the toolchain's `wasm_exec.js` next to the compiled module.
//!
//! A module only runs with the glue script of the toolchain that built it,
//! so each target stages its own copy from its own installation root.

use crate::config::BuildTarget;
use crate::error::{GenError, Result};
use crate::toolchain::{GLUE_FILE_NAME, Toolchain};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A toolchain's glue script on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueAsset {
    pub toolchain: Toolchain,
    pub source: PathBuf,
}

impl GlueAsset {
    /// Find the glue script under `root`, trying each known layout in order.
    pub fn locate(toolchain: Toolchain, root: &Path) -> Result<Self> {
        for candidate in toolchain.glue_candidates() {
            let path = root.join(candidate);
            debug!("Looking for {} glue at {}", toolchain, path.display());
            if path.is_file() {
                return Ok(Self {
                    toolchain,
                    source: path,
                });
            }
        }

        Err(GenError::AssetCopy {
            toolchain,
            reason: format!(
                "{} not found under {} (tried {})",
                GLUE_FILE_NAME,
                root.display(),
                toolchain.glue_candidates().join(", ")
            ),
        })
    }

    /// Copy the script byte-for-byte into `output_dir`, returning the destination.
    pub fn stage(&self, output_dir: &Path) -> Result<PathBuf> {
        let dest = output_dir.join(GLUE_FILE_NAME);
        fs::copy(&self.source, &dest).map_err(|e| GenError::AssetCopy {
            toolchain: self.toolchain,
            reason: format!("{} -> {}: {}", self.source.display(), dest.display(), e),
        })?;
        Ok(dest)
    }
}

/// Resolve, locate and stage the glue script for `target`.
pub fn stage_for(target: &BuildTarget) -> Result<PathBuf> {
    let root = target
        .toolchain
        .resolve_root(&target.compiler, target.root.as_deref())?;
    let asset = GlueAsset::locate(target.toolchain, &root)?;
    let dest = asset.stage(&target.output_dir)?;
    info!("✓ Copied {}", dest.display());
    Ok(dest)
}
