use std::fs;
use std::process::Command;

use tempfile::TempDir;

const CONFIG: &str = r#"
[site]
brnd = "typo"

[[pages]]
path = "/about"
title = "About Us"
"#;

fn vitrine(dir: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_vitrine"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("run vitrine")
}

#[test]
fn head_json_stdout_parses_with_warnings() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vitrine.toml"), CONFIG).unwrap();

    let output = vitrine(&dir, &["--verbose", "head", "/about", "--json"]);
    assert!(output.status.success(), "head should exit successfully");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("site.brnd"),
        "unknown field should be reported on stderr; got:\n{stderr}"
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {:?}", output.stdout));
    assert_eq!(value[0]["text"], "About Us | Maruti Solutions");
}

#[test]
fn head_html_stdout_has_no_log_lines() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vitrine.toml"), CONFIG).unwrap();

    let output = vitrine(&dir, &["head", "/missing"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<title>Maruti Solutions - "), "got:\n{stdout}");
    assert!(!stdout.contains("[warning]"));
}
