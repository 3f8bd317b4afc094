use std::process::Command;

fn main() {
    // Capture Git values during compilation (not at runtime)
    let git_hash = git_output(&["rev-parse", "--short", "HEAD"]);
    let git_date = git_output(&["log", "-1", "--format=%ci"]);

    // Embed these values as constants in the binary
    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=GIT_DATE={}", git_date);
}

fn git_output(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
