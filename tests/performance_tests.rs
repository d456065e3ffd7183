use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_large_file_streaming() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("large_vehicles.csv");
    common::generate_csv(&input, 50_000).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("autovalue"))
        .arg(&input)
        .args(["--current-year", "2026"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Binary failed to value 50k vehicles");
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header + one row per vehicle
    assert_eq!(stdout.lines().count(), 50_001);
    assert!(output.stderr.is_empty());
}
