use std::process::Command;

// Stamps the binary's --version with the short git SHA, or "unknown" outside a checkout.
fn main() {
    println!("cargo:rerun-if-env-changed=ACCRUE_BUILD_SHA");
    println!("cargo:rerun-if-changed=../.git/HEAD");

    let sha = std::env::var("ACCRUE_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_short_sha)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=ACCRUE_BUILD_SHA={}", sha);
}

fn git_short_sha() -> Option<String> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out = Command::new("git")
        .args(["-C", &format!("{manifest_dir}/.."), "rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
