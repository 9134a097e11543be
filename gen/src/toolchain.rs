//! Compiler toolchains that can produce a JavaScript-hosted WASM module.

use crate::error::{GenError, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// File name of the host-interop glue script shipped next to each module.
pub const GLUE_FILE_NAME: &str = "wasm_exec.js";

/// Cross-compilation environment for the JavaScript host target.
pub const PLATFORM_ENV: [(&str, &str); 2] = [("GOOS", "js"), ("GOARCH", "wasm")];

/// A compiler and its matching runtime glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    /// The standard Go toolchain.
    Go,
    /// TinyGo, which produces much smaller modules.
    TinyGo,
}

impl Toolchain {
    pub fn name(self) -> &'static str {
        match self {
            Toolchain::Go => "Go",
            Toolchain::TinyGo => "TinyGo",
        }
    }

    /// Compiler looked up on `PATH` when none is configured.
    pub fn default_compiler(self) -> &'static str {
        match self {
            Toolchain::Go => "go",
            Toolchain::TinyGo => "tinygo",
        }
    }

    /// Environment variable naming the installation root.
    pub fn root_env(self) -> &'static str {
        match self {
            Toolchain::Go => "GOROOT",
            Toolchain::TinyGo => "TINYGOROOT",
        }
    }

    /// Glue script locations relative to the installation root, in lookup order.
    ///
    /// Go moved `wasm_exec.js` from `misc/wasm` to `lib/wasm` in newer releases.
    pub fn glue_candidates(self) -> &'static [&'static str] {
        match self {
            Toolchain::Go => &["misc/wasm/wasm_exec.js", "lib/wasm/wasm_exec.js"],
            Toolchain::TinyGo => &["targets/wasm_exec.js"],
        }
    }

    /// Arguments for a size-optimized build without debug info, written to `output`.
    pub fn build_args(self, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["build".into()];
        match self {
            Toolchain::Go => {
                args.push("-o".into());
                args.push(output.into());
                args.push("-ldflags=-s -w".into());
            }
            Toolchain::TinyGo => {
                args.push("-target=wasm".into());
                args.push("-no-debug".into());
                args.push("-o".into());
                args.push(output.into());
            }
        }
        args.push(".".into());
        args
    }

    /// Locate the installation root.
    ///
    /// An explicit root wins; otherwise the compiler is asked via `<compiler> env <VAR>`.
    pub fn resolve_root(self, compiler: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(root) = explicit {
            return Ok(root.to_path_buf());
        }

        debug!("Asking {} for {}", compiler.display(), self.root_env());
        let output = Command::new(compiler)
            .args(["env", self.root_env()])
            .output()
            .map_err(|e| GenError::RootResolution {
                toolchain: self,
                reason: format!("failed to run {}: {}", compiler.display(), e),
            })?;

        if !output.status.success() {
            return Err(GenError::RootResolution {
                toolchain: self,
                reason: format!(
                    "`{} env {}` exited with {}",
                    compiler.display(),
                    self.root_env(),
                    output.status
                ),
            });
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Err(GenError::RootResolution {
                toolchain: self,
                reason: format!("{} is not set", self.root_env()),
            });
        }

        Ok(PathBuf::from(root))
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
