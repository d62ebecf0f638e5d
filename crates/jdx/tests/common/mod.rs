//! Common test utilities shared across integration tests.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// A small project with one cycle and one root package.
pub const DEMO: &str = "\
;Java Package Dependency Data
;Thu Jul 16 10:21:44 2020
;demo.data
Pcom.acme
SWidget
SGadget
Pcom.acme.util
SStrings
Pcom.acme.app
SMain
D0.0>1.0
D1.0>0.1
D2.0>0.0
C0}1}
";

/// Write `DEMO` as `demo.data` into `dir`.
pub fn write_demo(dir: &Path) {
    std::fs::write(dir.join("demo.data"), DEMO).expect("Failed to write demo data");
}

fn jdx(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_jdx"));
    command
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("JDX_ASCII", "1")
        .env_remove("RUST_LOG")
        .env_remove("JDX_COLOR")
        .env_remove("JDX_MAX_WIDTH");
    command
}

/// Run the jdx binary in the specified directory
pub fn run_jdx_in_dir(dir: &Path, args: &[&str]) -> Output {
    jdx(dir, args).output().expect("Failed to execute jdx binary")
}

/// Run the jdx binary with `input` on stdin
pub fn run_jdx_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = jdx(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn jdx binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for jdx")
}

/// Stdout as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
