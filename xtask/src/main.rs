//! Custom cargo commands for the vseq crate.
//!
//! Usage:
//!   cargo xtask verify           - Run full verification suite
//!   cargo xtask test             - Run all tests
//!   cargo xtask kani             - Run Kani proofs (needs cargo-kani)
//!   cargo xtask fuzz <target>    - Fuzz one target for 60s (needs cargo-fuzz)
//!   cargo xtask check            - Quick check (no Kani)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Fuzz targets declared in fuzz/Cargo.toml.
const FUZZ_TARGETS: &[&str] = &["mark_ops", "fold_walk"];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("kani") => kani()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify           Run full verification suite (contracts + tests + clippy + proofs)
  test             Run all Rust tests
  kani             Run Kani model checking proofs
  fuzz <target>    Fuzz a target for 60 seconds (mark_ops, fold_walk)
  check            Quick check (cargo test + clippy, no Kani)
  bench            Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("vseq Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking contract markers...");
    check_contract_markers()?;
    println!("✓ Contract markers present\n");

    println!("[2/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Testing proof harness arithmetic...");
    run_cargo_in(&project_root()?.join("kani-proofs"), &["test", "--quiet"])?;
    println!("✓ Proof harness tests passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Run Kani proofs
fn kani() -> Result<()> {
    run_cargo_in(&project_root()?.join("kani-proofs"), &["kani"])
}

/// Fuzz a single target for a fixed time budget
fn fuzz(target: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("usage: cargo xtask fuzz <{}>", FUZZ_TARGETS.join("|"));
    };
    if !FUZZ_TARGETS.contains(&target) {
        bail!("unknown fuzz target '{}', expected one of {:?}", target, FUZZ_TARGETS);
    }
    run_cargo(&["fuzz", "run", target, "--", "-max_total_time=60"])
}

/// Quick check (no Kani)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run_cargo_in(&project_root()?, args)
}

fn run_cargo_in(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_contract_markers() -> Result<()> {
    let root = project_root()?;
    let contracts = std::fs::read_to_string(root.join("src/contracts.rs"))
        .context("Failed to read src/contracts.rs")?;

    let count = contracts.matches("Contract violation").count();

    if count < 5 {
        bail!(
            "Expected at least 5 contract assertions, found {}. Someone may have removed invariant checks!",
            count
        );
    }

    Ok(())
}
