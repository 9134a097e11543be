//! Error types for the build orchestrator.

use crate::toolchain::Toolchain;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, GenError>;

/// Build failures. Every one of them aborts the run.
#[derive(Error, Debug)]
pub enum GenError {
    /// Invalid configuration, detected before anything is written.
    #[error("{0}")]
    Configuration(String),

    /// An output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The toolchain installation root could not be determined.
    #[error("Could not resolve {toolchain} installation root: {reason}")]
    RootResolution { toolchain: Toolchain, reason: String },

    /// The glue script could not be found, read or written.
    #[error("Failed to copy {toolchain} wasm_exec.js: {reason}")]
    AssetCopy { toolchain: Toolchain, reason: String },

    /// The compiler could not be started or exited non-zero.
    #[error("{toolchain} build failed ({status})\nOutput: {output}")]
    Compile {
        toolchain: Toolchain,
        status: String,
        output: String,
    },

    /// The compiler reported success but the module is not on disk.
    #[error("{toolchain} build produced no artifact at {}", path.display())]
    MissingArtifact { toolchain: Toolchain, path: PathBuf },
}
