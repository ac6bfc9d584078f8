use std::env;
use std::process::Command;

fn main() {
    // Git SHA (short)
    let git_sha = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=ACTIVATOR_GIT_SHA={git_sha}");

    // Build time (UTC, RFC3339)
    let build_time = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=ACTIVATOR_BUILD_TIME={build_time}");

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string());
    println!("cargo:rustc-env=ACTIVATOR_TARGET={target}");

    // Enabled cargo features, lowercased; "default" when none are set
    let mut feats: Vec<String> = env::vars()
        .filter_map(|(k, _)| k.strip_prefix("CARGO_FEATURE_").map(|f| f.to_lowercase()))
        .collect();
    feats.sort();
    let features = if feats.is_empty() {
        "default".to_string()
    } else {
        feats.join(",")
    };
    println!("cargo:rustc-env=ACTIVATOR_FEATURES={features}");
}
