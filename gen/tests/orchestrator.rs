//! End-to-end runs of the orchestrator against fake compilers.
//!
//! The fake compilers are shell scripts, so these tests only run on unix.

#![cfg(unix)]

use skycoin_lite_gen::{BuildConfig, GenError, Orchestrator, Toolchain};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Scripts are written and executed in the same process; running tests one at a
/// time keeps a concurrent fork from holding a script open for writing (ETXTBSY).
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// Compiler that writes `GOOS GOARCH cwd` to the file after `-o` and answers `env`.
fn ok_compiler(root: &Path) -> String {
    format!(
        r#"#!/bin/sh
if [ "$1" = "env" ]; then
  echo "{root}"
  exit 0
fi
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    shift
    out="$1"
  fi
  shift
done
printf '%s %s %s' "$GOOS" "$GOARCH" "$(pwd)" > "$out"
echo "compiled $out"
"#,
        root = root.display()
    )
}

const FAILING_COMPILER: &str = r#"#!/bin/sh
echo "./main.go:3:2: undefined: liteclient" >&2
exit 2
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("wasm")).unwrap();
        fs::write(dir.path().join("wasm/main.go"), "package main\n").unwrap();

        let go_root = dir.path().join("goroot");
        fs::create_dir_all(go_root.join("lib/wasm")).unwrap();
        fs::write(go_root.join("lib/wasm/wasm_exec.js"), "// go glue\n").unwrap();

        let tinygo_root = dir.path().join("tinygoroot");
        fs::create_dir_all(tinygo_root.join("targets")).unwrap();
        fs::write(tinygo_root.join("targets/wasm_exec.js"), "// tinygo glue\n").unwrap();

        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Config with explicit roots and the given compiler scripts.
    fn config(&self, go_bin: &Path, tinygo_bin: &Path) -> BuildConfig {
        let mut config = BuildConfig::new(
            self.path("wasm"),
            self.path("wasm-go"),
            self.path("wasm-tinygo"),
            "skycoin-lite.wasm",
        );
        let go = config.target_mut(Toolchain::Go).unwrap();
        *go = go
            .clone()
            .with_compiler(go_bin)
            .with_root(Some(self.path("goroot")));
        let tinygo = config.target_mut(Toolchain::TinyGo).unwrap();
        *tinygo = tinygo
            .clone()
            .with_compiler(tinygo_bin)
            .with_root(Some(self.path("tinygoroot")));
        config
    }
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_builds_both_bundles() {
    let _guard = serial();
    let fx = Fixture::new();
    let go = fx.script("fake-go", &ok_compiler(&fx.path("goroot")));
    let tinygo = fx.script("fake-tinygo", &ok_compiler(&fx.path("tinygoroot")));

    let summary = Orchestrator::new(fx.config(&go, &tinygo)).run().unwrap();

    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.reports[0].toolchain, Toolchain::Go);
    assert_eq!(summary.reports[1].toolchain, Toolchain::TinyGo);
    assert_eq!(summary.glue.len(), 2);

    for out in ["wasm-go", "wasm-tinygo"] {
        assert_eq!(
            dir_entries(&fx.path(out)),
            vec!["skycoin-lite.wasm".to_string(), "wasm_exec.js".to_string()]
        );
    }

    // Each bundle carries its own toolchain's glue
    assert_eq!(
        fs::read_to_string(fx.path("wasm-go/wasm_exec.js")).unwrap(),
        "// go glue\n"
    );
    assert_eq!(
        fs::read_to_string(fx.path("wasm-tinygo/wasm_exec.js")).unwrap(),
        "// tinygo glue\n"
    );

    // Compiler ran in the source dir with the JS/WASM platform env
    let module = fs::read_to_string(fx.path("wasm-go/skycoin-lite.wasm")).unwrap();
    let source = fs::canonicalize(fx.path("wasm")).unwrap();
    assert_eq!(module, format!("js wasm {}", source.display()));

    assert!(summary.reports[0].output.contains("compiled"));
    assert!(summary.to_string().contains("All WASM files generated successfully"));
}

#[test]
fn test_rerun_overwrites_previous_outputs() {
    let _guard = serial();
    let fx = Fixture::new();
    let go = fx.script("fake-go", &ok_compiler(&fx.path("goroot")));
    let tinygo = fx.script("fake-tinygo", &ok_compiler(&fx.path("tinygoroot")));

    let orchestrator = Orchestrator::new(fx.config(&go, &tinygo));
    orchestrator.run().unwrap();
    fs::write(fx.path("wasm-go/skycoin-lite.wasm"), "stale").unwrap();
    orchestrator.run().unwrap();

    let module = fs::read_to_string(fx.path("wasm-go/skycoin-lite.wasm")).unwrap();
    assert!(module.starts_with("js wasm "));
}

#[test]
fn test_primary_failure_stops_the_run() {
    let _guard = serial();
    let fx = Fixture::new();
    let go = fx.script("fake-go", FAILING_COMPILER);
    let tinygo = fx.script("fake-tinygo", &ok_compiler(&fx.path("tinygoroot")));

    let err = Orchestrator::new(fx.config(&go, &tinygo)).run().unwrap_err();

    match err {
        GenError::Compile {
            toolchain, output, ..
        } => {
            assert_eq!(toolchain, Toolchain::Go);
            assert!(output.contains("undefined: liteclient"));
        }
        other => panic!("expected compile error, got {other:?}"),
    }
    assert!(!fx.path("wasm-go/skycoin-lite.wasm").exists());
    // The alternate compiler was never run
    assert!(!fx.path("wasm-tinygo/skycoin-lite.wasm").exists());
}

#[test]
fn test_alternate_failure_keeps_primary_artifact() {
    let _guard = serial();
    let fx = Fixture::new();
    let go = fx.script("fake-go", &ok_compiler(&fx.path("goroot")));
    let tinygo = fx.script("fake-tinygo", FAILING_COMPILER);

    let err = Orchestrator::new(fx.config(&go, &tinygo)).run().unwrap_err();

    assert!(matches!(
        err,
        GenError::Compile {
            toolchain: Toolchain::TinyGo,
            ..
        }
    ));
    assert!(fx.path("wasm-go/skycoin-lite.wasm").is_file());
}

#[test]
fn test_missing_glue_blocks_compilation() {
    let _guard = serial();
    let fx = Fixture::new();
    fs::remove_file(fx.path("tinygoroot/targets/wasm_exec.js")).unwrap();
    let go = fx.script("fake-go", &ok_compiler(&fx.path("goroot")));
    let tinygo = fx.script("fake-tinygo", &ok_compiler(&fx.path("tinygoroot")));

    let err = Orchestrator::new(fx.config(&go, &tinygo)).run().unwrap_err();

    assert!(matches!(
        err,
        GenError::AssetCopy {
            toolchain: Toolchain::TinyGo,
            ..
        }
    ));
    // Staging happens before any compiler runs
    assert!(!fx.path("wasm-go/skycoin-lite.wasm").exists());
}

#[test]
fn test_root_asked_from_compiler() {
    let _guard = serial();
    let fx = Fixture::new();
    let go = fx.script("fake-go", &ok_compiler(&fx.path("goroot")));
    let tinygo = fx.script("fake-tinygo", &ok_compiler(&fx.path("tinygoroot")));

    let mut config = fx.config(&go, &tinygo);
    for target in &mut config.targets {
        target.root = None;
    }

    Orchestrator::new(config).run().unwrap();
    assert_eq!(
        fs::read_to_string(fx.path("wasm-tinygo/wasm_exec.js")).unwrap(),
        "// tinygo glue\n"
    );
}

#[test]
fn test_cli_exit_codes() {
    let _guard = serial();
    let fx = Fixture::new();
    let go = fx.script("fake-go", &ok_compiler(&fx.path("goroot")));
    let tinygo = fx.script("fake-tinygo", &ok_compiler(&fx.path("tinygoroot")));
    let bin = env!("CARGO_BIN_EXE_skycoin-lite-gen");

    // Missing source: non-zero exit, diagnostic on stderr, nothing created
    let output = Command::new(bin)
        .current_dir(fx.dir.path())
        .args(["--source", "missing", "--go-bin"])
        .arg(&go)
        .arg("--tinygo-bin")
        .arg(&tinygo)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Source directory does not exist"));
    assert!(!fx.path("wasm-go").exists());
    assert!(!fx.path("wasm-tinygo").exists());

    // Defaults relative to the working directory, roots from the compilers
    let output = Command::new(bin)
        .current_dir(fx.dir.path())
        .env_remove("GOROOT")
        .env_remove("TINYGOROOT")
        .env("SKYCOIN_GEN_GO", &go)
        .env("SKYCOIN_GEN_TINYGO", &tinygo)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(fx.path("wasm-go/skycoin-lite.wasm").is_file());
    assert!(fx.path("wasm-tinygo/skycoin-lite.wasm").is_file());
}
