//! Stamps the binary with its revision, build day and audio backend.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Short revision of the checkout, or `None` outside a git tree.
fn git_revision() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}

/// Packagers can pin either value; `DINO_` names win over the bare ones.
fn pinned(name: &str) -> Option<String> {
    env::var(format!("DINO_{}", name))
        .or_else(|_| env::var(name))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn main() {
    let revision = pinned("BUILD_COMMIT")
        .or_else(git_revision)
        .unwrap_or_else(|| "unknown".into());
    let day = pinned("BUILD_DATE").unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".into());
    let speaker = env::var_os("CARGO_FEATURE_AUDIO").is_some();

    let generated = [
        format!("pub const BUILD_COMMIT: &str = {:?};", revision),
        format!("pub const BUILD_DATE: &str = {:?};", day),
        format!("pub const BUILD_PROFILE: &str = {:?};", profile),
        format!("pub const SPEAKER_OUTPUT: bool = {};", speaker),
    ]
    .join("\n");

    let Some(out_dir) = env::var_os("OUT_DIR") else {
        panic!("OUT_DIR is not set");
    };
    let target = PathBuf::from(out_dir).join("build_info.rs");
    if let Err(err) = fs::write(&target, generated) {
        panic!("cannot write {}: {}", target.display(), err);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    for var in ["BUILD_COMMIT", "BUILD_DATE", "DINO_BUILD_COMMIT", "DINO_BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
}
