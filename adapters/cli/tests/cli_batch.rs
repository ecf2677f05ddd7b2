use std::{fs, process::Command};

fn mars_rover() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mars-rover"))
}

fn stdout_of(command: &mut Command) -> String {
    let output = command.output().expect("failed to launch mars-rover");
    assert!(
        output.status.success(),
        "mars-rover failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is utf8")
}

#[test]
fn batch_run_prints_log_and_final_positions() {
    let stdout = stdout_of(mars_rover().args([
        "--plateau",
        "5 5",
        "--rover",
        "1 2 N",
        "--instructions",
        "LMLMLMLMM",
        "--rover",
        "3 3 E",
        "--instructions",
        "MMRMMRMRRM",
    ]));

    assert!(stdout.starts_with("Simulation complete. Execution log:\nStarting execution\n"));
    assert!(stdout.ends_with(
        "\nRover 1 final position: 1 3 N\nRover 2 final position: 5 1 E\n"
    ));
}

#[test]
fn json_batch_run_is_machine_readable() {
    let stdout = stdout_of(mars_rover().args([
        "--plateau",
        "5 5",
        "--rover",
        "0 0 N",
        "--instructions",
        "MMR",
        "--format",
        "json",
    ]));

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["ticks"], 3);
    assert_eq!(report["stop"], "completed");
    assert_eq!(report["rovers"][0]["position"]["coordinates"]["y"], 2);
    assert_eq!(report["rovers"][0]["position"]["direction"], "E");
    assert!(report["log"]
        .as_array()
        .expect("log array")
        .iter()
        .any(|entry| entry["message"] == "Starting tick 2"));
}

#[test]
fn invalid_plateau_fails_with_message() {
    let output = mars_rover()
        .args(["--plateau", "x 5"])
        .output()
        .expect("failed to launch mars-rover");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Plateau width must be an integer."),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn scenario_file_drives_a_batch_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("fleet.toml");
    fs::write(
        &path,
        r#"
plateau = "5 5"

[[rovers]]
position = "1 2 N"
instructions = "LMLMLMLMM"

[[rovers]]
position = "3 3 E"
instructions = "MMRMMRMRRM"
"#,
    )
    .expect("write scenario");

    let stdout = stdout_of(mars_rover().arg("--scenario").arg(&path));

    assert!(stdout.contains("Rover 1 final position: 1 3 N"));
    assert!(stdout.contains("Rover 2 final position: 5 1 E"));
}

#[test]
fn missing_scenario_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = mars_rover()
        .arg("--scenario")
        .arg(dir.path().join("absent.toml"))
        .output()
        .expect("failed to launch mars-rover");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read scenario"));
}
