// SPDX-License-Identifier: Apache-2.0
//! Build script: compile the mock Ket engine shared library for integration tests.

use std::env;
use std::path::PathBuf;
use std::process::Command;

const MOCK_ENGINE_SRC: &str = "native/mock_engine.c";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // `cfg!` here would describe the build host, not the target.
    let lib_name = match env::var("CARGO_CFG_TARGET_OS").as_deref() {
        Ok("macos") => "libmock_ket_engine.dylib",
        _ => "libmock_ket_engine.so",
    };
    let so_path = out_dir.join(lib_name);

    let status = Command::new("cc")
        .args(["-shared", "-fPIC", "-Wall", "-Wextra", "-O2", "-o"])
        .arg(&so_path)
        .arg(MOCK_ENGINE_SRC)
        .status()
        .expect("failed to invoke C compiler");
    assert!(status.success(), "failed to compile mock Ket engine: {status}");

    // Tell cargo where to find the compiled mock engine.
    println!("cargo:rustc-env=MOCK_KET_ENGINE_PATH={}", so_path.display());
    // Re-run if the mock engine source changes.
    println!("cargo:rerun-if-changed={MOCK_ENGINE_SRC}");
}
