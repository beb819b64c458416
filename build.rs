fn main() {
    // Shown by `zaptrigger --version`
    println!(
        "cargo:rustc-env=ZAPTRIGGER_BUILD_DATE={}",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string());

    if let Some(hash) = hash {
        println!("cargo:rustc-env=ZAPTRIGGER_GIT_HASH={hash}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
