//! Skycoin Lite WASM generator CLI.

use clap::Parser;
use skycoin_lite_gen::{BuildConfig, Orchestrator, Toolchain};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skycoin-lite-gen")]
#[command(about = "Generate WASM files for Go and TinyGo")]
#[command(
    long_about = "Compiles WASM from source using both Go and TinyGo, and copies their respective wasm_exec.js files."
)]
struct Cli {
    /// Directory containing WASM source code
    #[arg(short, long, default_value = "wasm")]
    source: PathBuf,

    /// Output directory for Go-compiled WASM
    #[arg(short = 'g', long, default_value = "wasm-go")]
    go_output: PathBuf,

    /// Output directory for TinyGo-compiled WASM
    #[arg(short = 't', long, default_value = "wasm-tinygo")]
    tinygo_output: PathBuf,

    /// Output WASM filename
    #[arg(short, long, default_value = "skycoin-lite.wasm")]
    filename: String,

    /// Go installation root (asked from `go env GOROOT` when unset)
    #[arg(long, env = "GOROOT")]
    go_root: Option<PathBuf>,

    /// TinyGo installation root (asked from `tinygo env TINYGOROOT` when unset)
    #[arg(long, env = "TINYGOROOT")]
    tinygo_root: Option<PathBuf>,

    /// Go compiler executable
    #[arg(long, env = "SKYCOIN_GEN_GO", default_value = "go")]
    go_bin: PathBuf,

    /// TinyGo compiler executable
    #[arg(long, env = "SKYCOIN_GEN_TINYGO", default_value = "tinygo")]
    tinygo_bin: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> BuildConfig {
        let mut config = BuildConfig::new(
            self.source,
            self.go_output,
            self.tinygo_output,
            self.filename,
        );

        let overrides = [
            (Toolchain::Go, self.go_bin, self.go_root),
            (Toolchain::TinyGo, self.tinygo_bin, self.tinygo_root),
        ];
        for (toolchain, compiler, root) in overrides {
            if let Some(target) = config.target_mut(toolchain) {
                *target = target.clone().with_compiler(compiler).with_root(root);
            }
        }

        config
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let summary = Orchestrator::new(cli.into_config()).run()?;
    println!("{summary}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
