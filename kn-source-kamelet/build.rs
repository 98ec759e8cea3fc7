use std::path::Path;
use std::process::Command;

fn main() {
    let git_revision = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .unwrap_or_else(|| "unknown".into());
    let build_date = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    println!("cargo:rustc-env=KN_SOURCE_KAMELET_GIT_REVISION={git_revision}");
    println!("cargo:rustc-env=KN_SOURCE_KAMELET_BUILD_DATE={build_date}");

    // the repository root is the workspace root, one level above this package
    let head = Path::new(env!("CARGO_MANIFEST_DIR")).join("../.git/HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    } else {
        println!("cargo:rerun-if-changed=build.rs");
    }
}
