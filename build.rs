//! Embeds the commit hash and build time shown in the console banner.
//!
//! Both values can be pinned through `PORTAL_BUILD_GIT_HASH` and
//! `PORTAL_BUILD_TIMESTAMP` for reproducible builds; otherwise they are probed
//! from `git` and `date`, falling back to "unknown".

use std::env;
use std::process::Command;

const HASH_VAR: &str = "PORTAL_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "PORTAL_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed={HASH_VAR}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_VAR}");

    let hash = env::var(HASH_VAR)
        .ok()
        .or_else(|| probe("git", &["rev-parse", "--short=10", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = env::var(TIMESTAMP_VAR)
        .ok()
        .or_else(|| probe("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={HASH_VAR}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn probe(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
