//! Integration tests for rebound CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::{Command, Output};

fn rebound(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rebound"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn example_scene() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes/example.yaml")
}

/// A scratch file path unique to this test run.
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rebound-{}-{}", std::process::id(), name))
}

#[test]
fn classify_reports_edge_corner_and_none() {
    let out = rebound(&["classify", "--circle", "99,0,5"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("zone: right (code 1)"), "{}", stdout(&out));
    assert!(stdout(&out).contains("velocity: (1, 1) -> (-1, 1)"));

    let out = rebound(&["classify", "--circle", "99,99,5"]);
    assert!(stdout(&out).contains("zone: top-right (code 5)"), "{}", stdout(&out));
    assert!(stdout(&out).contains("-> (-1, -1)"));

    let out = rebound(&["classify", "--circle", "0,0,5"]);
    assert!(stdout(&out).contains("zone: none (code 0)"), "{}", stdout(&out));
}

#[test]
fn classify_later_rule_wins_for_overhanging_shapes() {
    // Overhangs both sides: the left test comes after the right test
    let out = rebound(&["classify", "--rect", "-150,10,150,0"]);
    assert!(stdout(&out).contains("zone: left"), "{}", stdout(&out));

    // Overhangs all four sides: bottom-right is the last rule
    let out = rebound(&["classify", "--circle", "0,0,500"]);
    assert!(stdout(&out).contains("zone: bottom-right"), "{}", stdout(&out));
}

#[test]
fn classify_honours_custom_bounds() {
    let out = rebound(&["classify", "--circle", "9,0,1", "--bounds", "-10,10,10,-10"]);
    assert!(stdout(&out).contains("zone: right"), "{}", stdout(&out));
}

#[test]
fn classify_rejects_non_positive_radius() {
    let out = rebound(&["classify", "--circle", "0,0,0"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
}

#[test]
fn scene_example_is_valid_yaml() {
    let out = rebound(&["scene", "--example"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("name: \"Corner pocket\""));

    let path = scratch("example.yaml");
    std::fs::write(&path, &text).unwrap();
    let out = rebound(&["scene", path.to_str().unwrap()]);
    let _ = std::fs::remove_file(&path);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Circles: 2 initial, 2 scripted clicks"), "{}", stdout(&out));
}

#[test]
fn run_json_report() {
    let out = rebound(&["run", example_scene().to_str().unwrap(), "-n", "200", "--json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(report["scene"], "Corner pocket");
    assert_eq!(report["frames"], 200);
    // both scripted clicks fall inside 200 frames
    assert_eq!(report["spawned"], 2);
    assert_eq!(report["circles"].as_array().unwrap().len(), 4);
    assert!(report["generated_at"].is_string());
    assert!(report["total_collisions"].as_u64().unwrap() > 0);
}

#[test]
fn run_is_deterministic_with_seed() {
    let path = example_scene();
    let a = rebound(&["run", path.to_str().unwrap(), "-n", "300", "--json"]);
    let b = rebound(&["run", path.to_str().unwrap(), "-n", "300", "--json"]);
    let a: serde_json::Value = serde_json::from_str(&stdout(&a)).unwrap();
    let b: serde_json::Value = serde_json::from_str(&stdout(&b)).unwrap();
    assert_eq!(a["circles"], b["circles"]);
    assert_eq!(a["collisions"], b["collisions"]);
}

#[test]
fn svg_command_writes_document() {
    let out = rebound(&["svg", example_scene().to_str().unwrap(), "-n", "10"]);
    assert!(out.status.success());
    let svg = stdout(&out);
    assert!(svg.contains("<?xml"), "Should have XML declaration");
    assert!(svg.contains("<svg"), "Should have SVG element");
    assert!(svg.contains("<ellipse"), "Should draw circles");
    assert!(svg.contains("Click to add circles: 3"), "caption counts circles");
    assert!(svg.contains("</svg>"), "Should close SVG element");
}

#[test]
fn render_command_writes_png() {
    let path = scratch("frame.png");
    let out = rebound(&[
        "render",
        example_scene().to_str().unwrap(),
        "-n",
        "5",
        "--size",
        "120",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(&path).expect("PNG written");
    let _ = std::fs::remove_file(&path);
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn unknown_option_fails() {
    let out = rebound(&["run", "--bogus"]);
    assert!(!out.status.success());
}

#[test]
fn unsamplable_spawn_settings_fail_cleanly() {
    let path = scratch("inf-speed.yaml");
    let yaml = "spawn: {max_speed: .inf}\nclicks:\n  - {frame: 0, x: 0, y: 0}\n";
    std::fs::write(&path, yaml).unwrap();
    let out = rebound(&["run", path.to_str().unwrap(), "-n", "5"]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: invalid spawn settings"), "{}", stderr);
    assert!(!stderr.contains("panicked"), "{}", stderr);
}
