//! Captures the version of the rustc that builds the service, so the
//! reported `rust_version` host fact matches the actual toolchain rather
//! than the crate's MSRV floor.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        // "rustc 1.82.0 (f6e511eec 2024-10-15)" -> "1.82.0"
        .and_then(|line| line.split_whitespace().nth(1).map(|v| v.to_string()))
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_RUST_VERSION").to_string());

    println!("cargo:rustc-env=SERVICE_RUST_VERSION={}", version);
}
