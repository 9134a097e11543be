//! Skycoin Lite build tooling.
//!
//! Compiles the WASM module twice, once with Go and once with TinyGo, and
//! stages each toolchain's `wasm_exec.js` next to its module so two
//! self-contained bundles exist side by side.
//!
//! # Example
//!
//! ```rust,ignore
//! use skycoin_lite_gen::{BuildConfig, Orchestrator};
//!
//! let config = BuildConfig::new("wasm", "wasm-go", "wasm-tinygo", "skycoin-lite.wasm");
//! let summary = Orchestrator::new(config).run()?;
//! println!("{summary}");
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod glue;
pub mod orchestrator;
pub mod toolchain;

pub use compile::CompileReport;
pub use config::{BuildConfig, BuildTarget};
pub use error::{GenError, Result};
pub use glue::GlueAsset;
pub use orchestrator::{BuildSummary, Orchestrator};
pub use toolchain::Toolchain;
