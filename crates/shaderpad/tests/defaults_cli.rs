use std::process::Command;

use tempfile::TempDir;

#[test]
fn defaults_fragment_prints_compilable_source() {
    let output = Command::new(env!("CARGO_BIN_EXE_shaderpad"))
        .args(["defaults", "fragment"])
        .output()
        .expect("failed to run shaderpad defaults fragment");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("#version 330 core"));
    assert!(stdout.contains("uniform sampler2D image;"));
    assert!(stdout.contains("void main()"));
}

#[test]
fn defaults_vertex_prints_fixed_stage() {
    let output = Command::new(env!("CARGO_BIN_EXE_shaderpad"))
        .args(["defaults", "vertex"])
        .output()
        .expect("failed to run shaderpad defaults vertex");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("uniform mat4 mvp;"));
    assert!(stdout.contains("gl_Position"));
}

#[test]
fn missing_fragment_file_fails_before_opening_a_window() {
    let root = TempDir::new().unwrap();
    let fragment = root.path().join("absent.frag");

    let output = Command::new(env!("CARGO_BIN_EXE_shaderpad"))
        .arg("--fragment")
        .arg(&fragment)
        .output()
        .expect("failed to run shaderpad with a missing fragment file");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("absent.frag"));
}
